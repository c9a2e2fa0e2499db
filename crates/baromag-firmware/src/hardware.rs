//! Hardware initialization for the sensor node
//!
//! Wiring: BMP280 on I2C0 (SDA GPIO19, SCL GPIO20, SDO to GND), KY-003 signal
//! on GPIO6.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex as AsyncMutex;
use esp_hal::Async;
use esp_hal::gpio::{Input, InputConfig, Pull};
use esp_hal::i2c::master::{Config as I2cConfig, ConfigError, I2c};
use esp_hal::peripherals::{GPIO6, GPIO19, GPIO20, I2C0};
use esp_hal::time::Rate;
use log::info;
use static_cell::StaticCell;

use baromag_core::async_i2c_bus::CriticalSectionBusDevice;

/// Standard-mode bus clock. The BMP280 supports up to 3.4 MHz; 100 kHz keeps
/// long unshielded jumper wires happy.
pub const I2C_FREQUENCY_KHZ: u32 = 100;

pub type I2c0 = I2c<'static, Async>;

/// Handle a task uses to reach a device on I2C0.
pub type I2c0Device = CriticalSectionBusDevice<'static, I2c0>;

/// Configure I2C0 as an async master on GPIO19 (SDA) / GPIO20 (SCL).
///
/// The pins are set up open-drain with the internal pull-ups enabled.
pub fn create_i2c_bus(
    i2c0: I2C0<'static>,
    sda: GPIO19<'static>,
    scl: GPIO20<'static>,
) -> Result<I2c0, ConfigError> {
    let bus = I2c::new(
        i2c0,
        I2cConfig::default().with_frequency(Rate::from_khz(I2C_FREQUENCY_KHZ)),
    )?
    .with_sda(sda)
    .with_scl(scl)
    .into_async();

    info!("I2C0 ready at {} kHz", I2C_FREQUENCY_KHZ);
    Ok(bus)
}

/// Put I2C0 behind the process-wide bus mutex and hand out the first device.
///
/// Further devices for the same bus can be created from the returned
/// reference with [`CriticalSectionBusDevice::new`].
pub fn share_i2c_bus(i2c: I2c0) -> &'static AsyncMutex<CriticalSectionRawMutex, I2c0> {
    static I2C0_BUS: StaticCell<AsyncMutex<CriticalSectionRawMutex, I2c0>> = StaticCell::new();
    I2C0_BUS.init(AsyncMutex::new(i2c))
}

/// Configure the KY-003 signal line as an input with the pull-up enabled.
///
/// The module only ever pulls the line low, so without the pull-up an idle
/// line would float.
pub fn create_reed_input(pin: GPIO6<'static>) -> Input<'static> {
    Input::new(pin, InputConfig::default().with_pull(Pull::Up))
}
