//! ESP32-S3 firmware-specific modules for baromag
//!
//! This crate contains the code that cannot compile on desktop targets:
//! peripheral setup for the BMP280 bus and the KY-003 input line, the
//! embassy task entry points, and build-time cadence overrides.

#![no_std]

pub mod hardware;
pub mod settings;
pub mod tasks;
