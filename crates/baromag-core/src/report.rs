//! Report model and sinks
//!
//! Both polling loops describe what happened in a cycle as a [`Report`] and
//! hand it to a [`ReportSink`]. On the device and in the simulator the sink is
//! [`LogSink`], which turns each report into one tagged log line.

use core::fmt;

use log::Level;

use crate::error::BusError;
use crate::sensors::{CalibrationCoefficients, CentiCelsius, FineTemperature, MagneticState};

/// Log target of the pressure-sensor loop.
pub const TAG_BMP280: &str = "BMP280";

/// Log target of the magnetic-sensor loop.
pub const TAG_KY003: &str = "KY003";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Report {
    /// Calibration block read; the pressure loop starts polling.
    CalibrationLoaded(CalibrationCoefficients),
    /// Calibration block could not be read; the pressure loop stops.
    CalibrationFailed(BusError),
    /// One compensated temperature sample.
    Temperature {
        temperature: CentiCelsius,
        t_fine: FineTemperature,
    },
    /// One measurement cycle produced no data.
    ReadFailed(BusError),
    /// One reed line sample.
    Magnetic(MagneticState),
}

impl Report {
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Magnetic(_) => TAG_KY003,
            _ => TAG_BMP280,
        }
    }

    pub const fn level(&self) -> Level {
        match self {
            Self::CalibrationFailed(_) | Self::ReadFailed(_) => Level::Error,
            _ => Level::Info,
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CalibrationLoaded(calib) => write!(f, "Calibration Data Loaded: {calib}"),
            Self::CalibrationFailed(e) => write!(f, "Failed to initialize BMP280: {e}"),
            Self::Temperature { temperature, .. } => write!(f, "Temperature: {temperature} °C"),
            Self::ReadFailed(e) => write!(f, "Failed to read sensor data: {e}"),
            Self::Magnetic(state) => write!(f, "{state}"),
        }
    }
}

/// Destination for reports. The loops only call it; they never own the
/// underlying logger.
pub trait ReportSink {
    fn report(&mut self, report: &Report);
}

impl<T: ReportSink + ?Sized> ReportSink for &mut T {
    fn report(&mut self, report: &Report) {
        (**self).report(report)
    }
}

/// Forwards reports to the `log` facade, one line each, with the report's tag
/// as the log target.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl ReportSink for LogSink {
    fn report(&mut self, report: &Report) {
        log::log!(target: report.tag(), report.level(), "{}", report);
    }
}
