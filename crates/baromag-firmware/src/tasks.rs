//! Embassy task entry points
//!
//! Embassy tasks cannot be generic, so these pin the core loops to the
//! concrete ESP32-S3 peripheral types.

use baromag_core::report::{TAG_BMP280, TAG_KY003};
use baromag_core::{LogSink, MagneticLoop, MonitorConfig, PressureLoop, RegisterBus};
use embassy_time::Delay;
use esp_hal::gpio::Input;
use log::{error, info};

use crate::hardware::I2c0Device;

/// BMP280 acquisition. Ends only if the calibration read fails.
#[embassy_executor::task]
pub async fn bmp280_task(i2c: I2c0Device, config: MonitorConfig) {
    info!(target: TAG_BMP280, "Reading BMP280 Calibration Data...");

    let bus = RegisterBus::new(i2c, Delay, config.bmp280_address, config.bus_timeout);
    PressureLoop::new(bus, Delay, LogSink, config.pressure_period)
        .run()
        .await;

    error!(target: TAG_BMP280, "BMP280 task finished; temperature is no longer sampled");
}

/// KY-003 sampling. Never ends.
#[embassy_executor::task]
pub async fn ky003_task(line: Input<'static>, config: MonitorConfig) {
    info!(target: TAG_KY003, "KY-003 input configured");

    MagneticLoop::new(line, Delay, LogSink, config.magnetic_period)
        .run()
        .await
}
