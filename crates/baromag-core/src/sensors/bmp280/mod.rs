//! BMP280 barometric pressure / temperature sensor
//!
//! Only the temperature path is compensated. The pressure count is decoded so
//! it can be logged, but turning it into pascals is left to a future revision
//! that would consume [`FineTemperature`].

pub mod calibration;
pub mod compensation;
pub mod registers;

pub use calibration::{CalibrationCoefficients, load_calibration};
pub use compensation::{CentiCelsius, FineTemperature, RawMeasurement, compensate_temperature};
