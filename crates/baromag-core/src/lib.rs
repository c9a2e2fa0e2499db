//! Hardware-independent acquisition core for the baromag sensor node
//!
//! This crate contains the platform-agnostic half of the device: the BMP280
//! register transactions and fixed-point temperature compensation, the KY-003
//! reed line classification, the two polling loops that drive them, and the
//! report model they emit.
//!
//! It is `#![no_std]` so it compiles on both the ESP32-S3 firmware and desktop
//! hosts (for the simulator and tests). Hardware is reached only through the
//! `embedded-hal` / `embedded-hal-async` traits.

#![cfg_attr(not(test), no_std)]

pub mod async_i2c_bus;
pub mod bus;
pub mod config;
pub mod error;
pub mod polling;
pub mod report;
pub mod sensors;

pub use bus::RegisterBus;
pub use config::MonitorConfig;
pub use error::BusError;
pub use polling::{MagneticLoop, PressureLoop, PressureState, PressureStep};
pub use report::{LogSink, Report, ReportSink};
