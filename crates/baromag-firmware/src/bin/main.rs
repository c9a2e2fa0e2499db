#![no_std]
#![no_main]
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
#![deny(clippy::large_stack_frames)]

use baromag_core::async_i2c_bus::CriticalSectionBusDevice;
use baromag_core::report::TAG_BMP280;
use baromag_firmware::{hardware, settings, tasks};
use embassy_executor::Spawner;
use embassy_time::{Duration, Timer};
use esp_hal::clock::CpuClock;
use esp_hal::timer::timg::TimerGroup;
use log::{error, info};

#[panic_handler]
fn panic(info: &core::panic::PanicInfo) -> ! {
    rtt_target::rprintln!("PANIC: {}", info);
    loop {}
}

extern crate alloc;

// This creates a default app-descriptor required by the esp-idf bootloader.
// For more information see: <https://docs.espressif.com/projects/esp-idf/en/stable/esp32/api-reference/system/app_image_format.html#application-description>
esp_bootloader_esp_idf::esp_app_desc!();

#[allow(
    clippy::large_stack_frames,
    reason = "it's not unusual to allocate larger buffers etc. in main"
)]
#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    rtt_target::rtt_init_log!();

    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    esp_alloc::heap_allocator!(#[esp_hal::ram(reclaimed)] size: 32 * 1024);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    info!("Embassy initialized!");

    let monitor = settings::monitor_config();

    // The two loops share nothing, so each is spawned independently and a
    // failure on one side never keeps the other from starting.
    let reed = hardware::create_reed_input(peripherals.GPIO6);
    spawner.spawn(tasks::ky003_task(reed, monitor)).unwrap();

    info!(target: TAG_BMP280, "Initializing I2C...");
    match hardware::create_i2c_bus(peripherals.I2C0, peripherals.GPIO19, peripherals.GPIO20) {
        Ok(i2c) => {
            let bus = hardware::share_i2c_bus(i2c);
            spawner.spawn(tasks::bmp280_task(CriticalSectionBusDevice::new(bus), monitor)).unwrap();
        }
        Err(e) => error!(target: TAG_BMP280, "Failed to initialize BMP280: {:?}", e),
    }

    loop {
        Timer::after(Duration::from_secs(60)).await;
    }
}
