//! Desktop simulator for the baromag acquisition loops.
//!
//! Runs the same `PressureLoop` and `MagneticLoop` as the firmware on the
//! embassy std executor, against a simulated BMP280 behind the shared bus
//! mutex and a simulated KY-003.
//!
//! # Environment
//!
//! | Variable              | Effect                                                   |
//! |-----------------------|----------------------------------------------------------|
//! | `RUST_LOG`            | Log filter, `info` by default                            |
//! | `BAROMAG_SIM_FAULT`   | `none`, `calibration`, `intermittent` or `hang`          |
//! | `BAROMAG_SIM_SPEEDUP` | Divide every period and the bus timeout by this factor   |

mod devices;

use baromag_core::async_i2c_bus::CriticalSectionBusDevice;
use baromag_core::report::{TAG_BMP280, TAG_KY003};
use baromag_core::{LogSink, MagneticLoop, MonitorConfig, PressureLoop, RegisterBus};
use embassy_executor::Spawner;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embassy_time::{Delay, Duration};
use log::{info, warn};
use static_cell::StaticCell;

use devices::{Fault, SimulatedBmp280, SimulatedReed};

// ---------------------------------------------------------------------------
// Simulation constants
// ---------------------------------------------------------------------------

/// The magnet passes the reed sensor for 2 of every 7 samples.
const REED_PERIOD_SAMPLES: u32 = 7;
const REED_PRESENT_SAMPLES: u32 = 2;

type SimulatedBus = CriticalSectionBusDevice<'static, SimulatedBmp280>;

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

fn fault_from_env() -> Fault {
    match std::env::var("BAROMAG_SIM_FAULT") {
        Ok(raw) => Fault::parse(&raw).unwrap_or_else(|| {
            warn!("Unknown BAROMAG_SIM_FAULT={raw:?}, running without faults");
            Fault::None
        }),
        Err(_) => Fault::None,
    }
}

fn speedup_from_env() -> u32 {
    std::env::var("BAROMAG_SIM_SPEEDUP")
        .ok()
        .and_then(|raw| raw.trim().parse::<u32>().ok())
        .filter(|&factor| factor > 0)
        .unwrap_or(1)
}

/// Default cadence, compressed by `speedup`.
fn monitor_config(speedup: u32) -> MonitorConfig {
    let scale = |duration: Duration| duration / speedup;
    let defaults = MonitorConfig::default();

    defaults
        .with_bus_timeout(scale(defaults.bus_timeout))
        .with_pressure_period(scale(defaults.pressure_period))
        .with_magnetic_period(scale(defaults.magnetic_period))
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

#[embassy_executor::task]
async fn bmp280_task(i2c: SimulatedBus, config: MonitorConfig) {
    info!(target: TAG_BMP280, "Reading BMP280 Calibration Data...");

    let bus = RegisterBus::new(i2c, Delay, config.bmp280_address, config.bus_timeout);
    PressureLoop::new(bus, Delay, LogSink, config.pressure_period)
        .run()
        .await;

    warn!(target: TAG_BMP280, "BMP280 task finished; the KY003 task keeps running");
}

#[embassy_executor::task]
async fn ky003_task(line: SimulatedReed, config: MonitorConfig) {
    MagneticLoop::new(line, Delay, LogSink, config.magnetic_period)
        .run()
        .await
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let fault = fault_from_env();
    let config = monitor_config(speedup_from_env());
    info!(
        "Simulating with fault={:?}, pressure every {} ms, magnetic every {} ms",
        fault,
        config.pressure_period.as_millis(),
        config.magnetic_period.as_millis()
    );

    static I2C_BUS: StaticCell<Mutex<CriticalSectionRawMutex, SimulatedBmp280>> =
        StaticCell::new();
    let bus = I2C_BUS.init(Mutex::new(SimulatedBmp280::new(fault)));

    info!(target: TAG_KY003, "Simulated KY-003 ready");
    spawner.spawn(
        ky003_task(
            SimulatedReed::new(REED_PERIOD_SAMPLES, REED_PRESENT_SAMPLES),
            config,
        ),
    )
    .unwrap();
    spawner.spawn(bmp280_task(CriticalSectionBusDevice::new(bus), config)).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speedup_scales_all_periods() {
        let config = monitor_config(10);

        assert_eq!(config.pressure_period, Duration::from_millis(300));
        assert_eq!(config.magnetic_period, Duration::from_millis(100));
        assert_eq!(config.bus_timeout, Duration::from_millis(100));
    }

    #[test]
    fn test_no_speedup_keeps_defaults() {
        assert_eq!(monitor_config(1), MonitorConfig::default());
    }
}
