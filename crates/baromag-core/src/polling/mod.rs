//! The two independent polling loops
//!
//! Each loop owns everything it touches and shares no mutable state with the
//! other. Only the pressure loop uses the two-wire bus; any additional bus
//! consumer must go through [`crate::async_i2c_bus::SharedBusDevice`] so that
//! transactions are serialized start to stop.

mod magnetic;
mod pressure;

pub use magnetic::MagneticLoop;
pub use pressure::{PressureLoop, PressureState, PressureStep};
