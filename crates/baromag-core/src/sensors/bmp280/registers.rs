/// BMP280 register map subset used by this device (Bosch BST-BMP280-DS001).
///
/// Both blocks support burst reads: the register pointer auto-increments, so
/// one `write_read` starting at the base register returns the whole block.
///
/// - **Calibration** - 0x88..=0x8D: dig_T1, dig_T2, dig_T3 (little-endian words)
/// - **Measurement** - 0xF7..=0xFC: press_msb, press_lsb, press_xlsb,
///   temp_msb, temp_lsb, temp_xlsb
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Bmp280Register {
    CalibStart = 0x88,
    PressMsb = 0xF7,
}

impl Bmp280Register {
    pub const fn addr(self) -> u8 {
        self as u8
    }
}

/// Address with SDO tied to GND.
pub const BMP280_ADDRESS_SDO_GND: u8 = 0x76;

/// Length of the temperature calibration block (dig_T1..dig_T3).
pub const CALIBRATION_LEN: usize = 6;

/// Length of the burst-read measurement block (pressure + temperature).
pub const MEASUREMENT_LEN: usize = 6;
