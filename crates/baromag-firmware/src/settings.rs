//! Build-time cadence overrides
//!
//! `build.rs` forwards the variables below from the environment or a `.env`
//! file. Anything missing or unparsable falls back to the core defaults.

use baromag_core::MonitorConfig;
use embassy_time::Duration;
use log::warn;

const PRESSURE_PERIOD_MS: Option<&str> = option_env!("BAROMAG_PRESSURE_PERIOD_MS");
const MAGNETIC_PERIOD_MS: Option<&str> = option_env!("BAROMAG_MAGNETIC_PERIOD_MS");
const BUS_TIMEOUT_MS: Option<&str> = option_env!("BAROMAG_BUS_TIMEOUT_MS");

pub fn monitor_config() -> MonitorConfig {
    let mut config = MonitorConfig::default();

    if let Some(period) = parse_millis("BAROMAG_PRESSURE_PERIOD_MS", PRESSURE_PERIOD_MS) {
        config = config.with_pressure_period(period);
    }
    if let Some(period) = parse_millis("BAROMAG_MAGNETIC_PERIOD_MS", MAGNETIC_PERIOD_MS) {
        config = config.with_magnetic_period(period);
    }
    if let Some(timeout) = parse_millis("BAROMAG_BUS_TIMEOUT_MS", BUS_TIMEOUT_MS) {
        config = config.with_bus_timeout(timeout);
    }

    config
}

/// Zero is rejected: a zero period would spin and a zero timeout would fail
/// every transaction.
fn parse_millis(name: &str, raw: Option<&str>) -> Option<Duration> {
    let raw = raw?;
    match raw.trim().parse::<u64>() {
        Ok(0) | Err(_) => {
            warn!("Ignoring {}={:?}: expected a positive number of milliseconds", name, raw);
            None
        }
        Ok(ms) => Some(Duration::from_millis(ms)),
    }
}
