//! Addressed-register reads over the two-wire bus
//!
//! A register read is one logical transaction: start, address + W, register
//! pointer, repeated start, address + R, `N` bytes with the last one NACKed,
//! stop. `embedded_hal_async::i2c::I2c::write_read` has exactly these
//! semantics, so the sequencer only adds addressing, the timeout and error
//! classification on top of it.

use embassy_futures::select::{Either, select};
use embassy_time::Duration;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;
use log::{debug, warn};

use crate::config::delay_millis;
use crate::error::BusError;

/// A single peripheral on the bus, read one register block at a time.
///
/// `D` is only used as the timeout clock: every transaction is raced against
/// `D::delay_ms(timeout)` and abandoned when the delay wins.
pub struct RegisterBus<I, D> {
    i2c: I,
    clock: D,
    address: u8,
    timeout: Duration,
}

impl<I, D> RegisterBus<I, D>
where
    I: I2c,
    D: DelayNs,
{
    pub fn new(i2c: I, clock: D, address: u8, timeout: Duration) -> Self {
        Self {
            i2c,
            clock,
            address,
            timeout,
        }
    }

    /// 7-bit address every transaction is sent to.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Read `N` consecutive registers starting at `register`.
    ///
    /// Returns the whole block or an error, never a partially filled buffer.
    pub async fn read<const N: usize>(&mut self, register: u8) -> Result<[u8; N], BusError> {
        let mut buffer = [0u8; N];
        let address = self.address;

        let outcome = select(
            self.i2c.write_read(address, &[register], &mut buffer),
            self.clock.delay_ms(delay_millis(self.timeout)),
        )
        .await;

        match outcome {
            Either::First(Ok(())) => {
                debug!("read {} bytes from 0x{:02X}@0x{:02X}", N, register, address);
                Ok(buffer)
            }
            Either::First(Err(e)) => {
                let error = BusError::from_driver(address, &e);
                warn!("read of 0x{:02X}@0x{:02X} failed: {:?}", register, address, e);
                Err(error)
            }
            Either::Second(()) => {
                warn!(
                    "read of 0x{:02X}@0x{:02X} timed out after {} ms",
                    register,
                    address,
                    self.timeout.as_millis()
                );
                Err(BusError::Timeout)
            }
        }
    }
}
