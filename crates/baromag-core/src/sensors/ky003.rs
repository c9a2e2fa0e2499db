//! KY-003 hall-effect / reed module
//!
//! The output idles high through a pull-up and is pulled to ground while a
//! magnetic field is present.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MagneticState {
    Detected,
    NotDetected,
}

impl MagneticState {
    /// Classify the sampled line level. Active low.
    pub const fn from_line_low(is_low: bool) -> Self {
        if is_low {
            Self::Detected
        } else {
            Self::NotDetected
        }
    }

    pub const fn is_detected(self) -> bool {
        matches!(self, Self::Detected)
    }
}

impl fmt::Display for MagneticState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Detected => f.write_str("Magnetic is detected"),
            Self::NotDetected => f.write_str("Magnetic is not detected"),
        }
    }
}
