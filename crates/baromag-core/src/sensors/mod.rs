//! Sensor-specific register layouts, decoding and classification
//!
//! Each submodule is pure data handling; bus access and scheduling live in
//! [`crate::bus`] and [`crate::polling`].

pub mod bmp280;
pub mod ky003;

pub use bmp280::{CalibrationCoefficients, CentiCelsius, FineTemperature, RawMeasurement};
pub use ky003::MagneticState;
