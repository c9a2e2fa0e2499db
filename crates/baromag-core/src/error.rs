//! Error types shared by the acquisition core

use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};
use thiserror_no_std::Error;

/// Failure of a single addressed-register transaction on the two-wire bus.
///
/// A `BusError` always means "no new data": the transaction never hands back
/// a partially filled buffer.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusError {
    /// The peripheral did not acknowledge its address or a data byte.
    #[error("device 0x{address:02X} did not acknowledge ({during:?})")]
    NoAcknowledge {
        address: u8,
        during: NoAcknowledgeSource,
    },
    /// Any other failure reported by the bus driver.
    #[error("bus transaction failed: {0:?}")]
    Transaction(ErrorKind),
    /// The transaction did not complete within the configured timeout.
    #[error("bus transaction timed out")]
    Timeout,
}

impl BusError {
    /// Classify a driver error for a transaction addressed to `address`.
    pub fn from_driver<E: embedded_hal::i2c::Error>(address: u8, error: &E) -> Self {
        match error.kind() {
            ErrorKind::NoAcknowledge(during) => Self::NoAcknowledge { address, during },
            kind => Self::Transaction(kind),
        }
    }
}
