//! Runtime configuration for the acquisition loops

use embassy_time::Duration;

use crate::sensors::bmp280::registers::BMP280_ADDRESS_SDO_GND;

/// Default inter-cycle delay of the pressure-sensor loop.
pub const DEFAULT_PRESSURE_PERIOD: Duration = Duration::from_secs(3);

/// Default inter-cycle delay of the magnetic-sensor loop.
pub const DEFAULT_MAGNETIC_PERIOD: Duration = Duration::from_secs(1);

/// Upper bound for one complete bus transaction, start to stop.
pub const DEFAULT_BUS_TIMEOUT: Duration = Duration::from_secs(1);

/// Cadence and addressing used by both polling loops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorConfig {
    /// 7-bit address of the BMP280 on the bus.
    pub bmp280_address: u8,
    /// Timeout applied to every register transaction. Must be finite.
    pub bus_timeout: Duration,
    /// Sleep between two pressure-sensor cycles.
    pub pressure_period: Duration,
    /// Sleep between two magnetic-sensor cycles.
    pub magnetic_period: Duration,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            bmp280_address: BMP280_ADDRESS_SDO_GND,
            bus_timeout: DEFAULT_BUS_TIMEOUT,
            pressure_period: DEFAULT_PRESSURE_PERIOD,
            magnetic_period: DEFAULT_MAGNETIC_PERIOD,
        }
    }
}

impl MonitorConfig {
    pub const fn with_bmp280_address(mut self, address: u8) -> Self {
        self.bmp280_address = address;
        self
    }

    pub const fn with_bus_timeout(mut self, timeout: Duration) -> Self {
        self.bus_timeout = timeout;
        self
    }

    pub const fn with_pressure_period(mut self, period: Duration) -> Self {
        self.pressure_period = period;
        self
    }

    pub const fn with_magnetic_period(mut self, period: Duration) -> Self {
        self.magnetic_period = period;
        self
    }
}

/// Convert a duration to the millisecond argument taken by `DelayNs`,
/// saturating instead of truncating.
pub(crate) fn delay_millis(duration: Duration) -> u32 {
    u32::try_from(duration.as_millis()).unwrap_or(u32::MAX)
}
