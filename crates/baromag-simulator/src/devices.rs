//! Simulated peripherals for the desktop build.
//!
//! [`SimulatedBmp280`] answers register reads from a 256-byte register file
//! with the auto-incrementing pointer of the real part. [`SimulatedReed`] is
//! a magnet that passes the KY-003 periodically.

use core::convert::Infallible;
use core::f64::consts::TAU;
use core::future::pending;

use baromag_core::sensors::bmp280::registers::{BMP280_ADDRESS_SDO_GND, Bmp280Register};
use embedded_hal::digital::{ErrorType as DigitalErrorType, InputPin};
use embedded_hal::i2c::{ErrorKind, ErrorType, NoAcknowledgeSource};
use embedded_hal_async::i2c::{I2c, Operation};
use log::{debug, trace};

/// Datasheet example coefficients: dig_T1 = 27504, dig_T2 = 26435, dig_T3 = -1000.
const CALIBRATION: [u8; 6] = [0x70, 0x6B, 0x43, 0x67, 0x18, 0xFC];

/// Raw temperature count that compensates to 25.08 °C with [`CALIBRATION`].
const ADC_T_BASELINE: f64 = 519_888.0;

/// Swing of the raw count, roughly ±2.5 °C.
const ADC_T_AMPLITUDE: f64 = 8_000.0;

/// Measurement reads per full temperature oscillation.
const DRIFT_PERIOD_READS: f64 = 40.0;

/// Fixed raw pressure count, about 1006 hPa with the datasheet coefficients.
const ADC_P: u32 = 415_148;

/// Fault injected into the simulated BMP280.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    None,
    /// The calibration read is never acknowledged.
    Calibration,
    /// Every fourth measurement read fails with a bus error.
    Intermittent,
    /// Every fifth measurement read holds the bus forever.
    Hang,
}

impl Fault {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "none" => Some(Self::None),
            "calibration" => Some(Self::Calibration),
            "intermittent" => Some(Self::Intermittent),
            "hang" => Some(Self::Hang),
            _ => None,
        }
    }
}

pub struct SimulatedBmp280 {
    address: u8,
    registers: [u8; 256],
    pointer: u8,
    fault: Fault,
    measurement_reads: u32,
}

impl SimulatedBmp280 {
    pub fn new(fault: Fault) -> Self {
        let mut registers = [0u8; 256];
        let calib = Bmp280Register::CalibStart.addr() as usize;
        registers[calib..calib + CALIBRATION.len()].copy_from_slice(&CALIBRATION);

        Self {
            address: BMP280_ADDRESS_SDO_GND,
            registers,
            pointer: 0,
            fault,
            measurement_reads: 0,
        }
    }

    /// Latch a fresh conversion into 0xF7..=0xFC.
    fn convert(&mut self) {
        let phase = f64::from(self.measurement_reads) / DRIFT_PERIOD_READS * TAU;
        let adc_t = (ADC_T_BASELINE + ADC_T_AMPLITUDE * phase.sin()) as u32;
        trace!("simulated conversion adc_T={adc_t}");

        let base = Bmp280Register::PressMsb.addr() as usize;
        self.registers[base..base + 3].copy_from_slice(&encode_adc20(ADC_P));
        self.registers[base + 3..base + 6].copy_from_slice(&encode_adc20(adc_t));
    }

    fn inject(&self, register: u8) -> Option<ErrorKind> {
        match (self.fault, register) {
            (Fault::Calibration, r) if r == Bmp280Register::CalibStart.addr() => {
                Some(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address))
            }
            (Fault::Intermittent, r) if r == Bmp280Register::PressMsb.addr() => {
                (self.measurement_reads % 4 == 3).then_some(ErrorKind::Bus)
            }
            _ => None,
        }
    }

    fn hangs(&self, register: u8) -> bool {
        self.fault == Fault::Hang
            && register == Bmp280Register::PressMsb.addr()
            && self.measurement_reads % 5 == 4
    }
}

/// Inverse of the 20-bit decode: msb, lsb, and the top nibble of xlsb.
fn encode_adc20(count: u32) -> [u8; 3] {
    [(count >> 12) as u8, (count >> 4) as u8, ((count & 0x0F) << 4) as u8]
}

impl ErrorType for SimulatedBmp280 {
    type Error = ErrorKind;
}

impl I2c for SimulatedBmp280 {
    async fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if address != self.address {
            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }

        for operation in operations.iter_mut() {
            match operation {
                Operation::Write(bytes) => {
                    let Some((&register, _)) = bytes.split_first() else {
                        continue;
                    };
                    self.pointer = register;

                    if let Some(error) = self.inject(register) {
                        debug!("injecting {error:?} on register 0x{register:02X}");
                        if register == Bmp280Register::PressMsb.addr() {
                            self.measurement_reads += 1;
                        }
                        return Err(error);
                    }
                    if self.hangs(register) {
                        debug!("holding the bus on register 0x{register:02X}");
                        self.measurement_reads += 1;
                        return pending().await;
                    }
                    if register == Bmp280Register::PressMsb.addr() {
                        self.convert();
                        self.measurement_reads += 1;
                    }
                }
                Operation::Read(buffer) => {
                    for byte in buffer.iter_mut() {
                        *byte = self.registers[self.pointer as usize];
                        self.pointer = self.pointer.wrapping_add(1);
                    }
                }
            }
        }

        Ok(())
    }
}

/// Magnet that sits in front of the sensor for `present` samples out of every
/// `period`.
pub struct SimulatedReed {
    samples: u32,
    period: u32,
    present: u32,
}

impl SimulatedReed {
    pub fn new(period: u32, present: u32) -> Self {
        Self {
            samples: 0,
            period: period.max(1),
            present,
        }
    }
}

impl DigitalErrorType for SimulatedReed {
    type Error = Infallible;
}

impl InputPin for SimulatedReed {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.is_low().map(|low| !low)
    }

    /// Low while the magnet is present, like the real module.
    fn is_low(&mut self) -> Result<bool, Self::Error> {
        let low = self.samples % self.period >= self.period - self.present.min(self.period);
        self.samples = self.samples.wrapping_add(1);
        Ok(low)
    }
}
