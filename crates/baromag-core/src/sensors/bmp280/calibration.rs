//! BMP280 temperature calibration coefficients.
//!
//! The factory-trimmed words dig_T1..dig_T3 live at 0x88..=0x8D, least
//! significant byte first (datasheet §3.11.2). They are read once at start-up
//! and never change afterwards.

use core::fmt;

use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;
use log::info;

use super::registers::{Bmp280Register, CALIBRATION_LEN};
use crate::bus::RegisterBus;
use crate::error::BusError;

/// Temperature compensation coefficients (dig_T1, dig_T2, dig_T3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalibrationCoefficients {
    /// dig_T1, unsigned
    pub t1: u16,
    /// dig_T2, signed
    pub t2: i16,
    /// dig_T3, signed
    pub t3: i16,
}

impl CalibrationCoefficients {
    /// Decode the 6-byte calibration block.
    pub const fn from_le_bytes(raw: &[u8; CALIBRATION_LEN]) -> Self {
        Self {
            t1: u16::from_le_bytes([raw[0], raw[1]]),
            t2: i16::from_le_bytes([raw[2], raw[3]]),
            t3: i16::from_le_bytes([raw[4], raw[5]]),
        }
    }
}

impl fmt::Display for CalibrationCoefficients {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T1={}, T2={}, T3={}", self.t1, self.t2, self.t3)
    }
}

/// Read the calibration block in a single transaction.
pub async fn load_calibration<I, D>(
    bus: &mut RegisterBus<I, D>,
) -> Result<CalibrationCoefficients, BusError>
where
    I: I2c,
    D: DelayNs,
{
    info!("Reading BMP280 calibration data from 0x{:02X}", bus.address());
    let raw: [u8; CALIBRATION_LEN] = bus.read(Bmp280Register::CalibStart.addr()).await?;
    Ok(CalibrationCoefficients::from_le_bytes(&raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::test_support::NeverElapses;
    use embassy_futures::block_on;
    use embassy_time::Duration;
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    #[test]
    fn test_decode_respects_signedness() {
        let calib = CalibrationCoefficients::from_le_bytes(&[0x00, 0x6B, 0x00, 0x67, 0x18, 0xFC]);

        assert_eq!(calib.t1, 27392);
        assert_eq!(calib.t2, 26368);
        assert_eq!(calib.t3, -1000);
    }

    #[test]
    fn test_t1_above_i16_range_stays_positive() {
        let calib = CalibrationCoefficients::from_le_bytes(&[0xFF, 0xFF, 0x00, 0x80, 0xFF, 0x7F]);

        assert_eq!(calib.t1, u16::MAX);
        assert_eq!(calib.t2, i16::MIN);
        assert_eq!(calib.t3, i16::MAX);
    }

    #[test]
    fn test_load_reads_six_bytes_at_calibration_base() {
        let expectations = [I2cTransaction::write_read(
            0x76,
            std::vec![0x88],
            std::vec![0x70, 0x6B, 0x43, 0x67, 0x18, 0xFC],
        )];
        let mut i2c = I2cMock::new(&expectations);
        let mut bus = RegisterBus::new(&mut i2c, NeverElapses, 0x76, Duration::from_secs(1));

        let calib = block_on(load_calibration(&mut bus)).unwrap();

        assert_eq!(
            calib,
            CalibrationCoefficients {
                t1: 27504,
                t2: 26435,
                t3: -1000,
            }
        );
        i2c.done();
    }

    #[test]
    fn test_load_propagates_bus_error() {
        let expectations = [
            I2cTransaction::write_read(0x76, std::vec![0x88], std::vec![0; 6])
                .with_error(ErrorKind::Bus),
        ];
        let mut i2c = I2cMock::new(&expectations);
        let mut bus = RegisterBus::new(&mut i2c, NeverElapses, 0x76, Duration::from_secs(1));

        let result = block_on(load_calibration(&mut bus));

        assert_eq!(result, Err(BusError::Transaction(ErrorKind::Bus)));
        i2c.done();
    }

    #[test]
    fn test_display_matches_log_format() {
        let calib = CalibrationCoefficients {
            t1: 27504,
            t2: 26435,
            t3: -1000,
        };

        assert_eq!(std::format!("{calib}"), "T1=27504, T2=26435, T3=-1000");
    }
}
