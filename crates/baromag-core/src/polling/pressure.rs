//! BMP280 polling loop
//!
//! ```text
//! Initializing --calibration ok--> Polling --(each cycle)--> Polling
//!      |
//!      +--calibration error--> Stopped
//! ```
//!
//! A failed measurement does not leave `Polling`; the next cycle is the retry.

use embassy_time::Duration;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;
use log::{debug, error, info};

use crate::bus::RegisterBus;
use crate::config::delay_millis;
use crate::error::BusError;
use crate::report::{Report, ReportSink};
use crate::sensors::bmp280::registers::{Bmp280Register, MEASUREMENT_LEN};
use crate::sensors::bmp280::{
    CalibrationCoefficients, CentiCelsius, FineTemperature, RawMeasurement,
    compensate_temperature, load_calibration,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressureState {
    /// Calibration not loaded yet.
    Initializing,
    /// Calibration loaded; every step is one measurement cycle.
    Polling(CalibrationCoefficients),
    /// Calibration failed. Terminal.
    Stopped,
}

/// Outcome of one [`PressureLoop::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressureStep {
    Calibrated(CalibrationCoefficients),
    InitFailed(BusError),
    Reading {
        temperature: CentiCelsius,
        t_fine: FineTemperature,
        adc_p: u32,
    },
    Skipped(BusError),
    /// The loop was already stopped; nothing was done.
    Stopped,
}

/// Owns the BMP280 bus handle, the calibration once loaded and the fine
/// temperature of the latest cycle.
pub struct PressureLoop<I, D, S, R> {
    bus: RegisterBus<I, D>,
    sleeper: S,
    sink: R,
    period: Duration,
    state: PressureState,
    t_fine: FineTemperature,
}

impl<I, D, S, R> PressureLoop<I, D, S, R>
where
    I: I2c,
    D: DelayNs,
    S: DelayNs,
    R: ReportSink,
{
    pub fn new(bus: RegisterBus<I, D>, sleeper: S, sink: R, period: Duration) -> Self {
        Self {
            bus,
            sleeper,
            sink,
            period,
            state: PressureState::Initializing,
            t_fine: FineTemperature::default(),
        }
    }

    pub fn state(&self) -> PressureState {
        self.state
    }

    /// Fine temperature computed by the most recent successful cycle.
    pub fn t_fine(&self) -> FineTemperature {
        self.t_fine
    }

    /// Advance the state machine by one transition or one polling cycle.
    ///
    /// Initialization does not sleep; a polling cycle always ends with the
    /// configured inter-cycle delay, whether or not the read succeeded.
    pub async fn step(&mut self) -> PressureStep {
        match self.state {
            PressureState::Initializing => self.initialize().await,
            PressureState::Polling(calib) => {
                let outcome = self.poll_once(&calib).await;
                self.sleeper.delay_ms(delay_millis(self.period)).await;
                outcome
            }
            PressureState::Stopped => PressureStep::Stopped,
        }
    }

    /// Run until the loop stops. With a working calibration read this never
    /// returns.
    pub async fn run(mut self) {
        info!("BMP280 polling loop started (period {} ms)", self.period.as_millis());
        while self.step().await != PressureStep::Stopped {}
        error!("BMP280 polling loop stopped");
    }

    async fn initialize(&mut self) -> PressureStep {
        match load_calibration(&mut self.bus).await {
            Ok(calib) => {
                self.sink.report(&Report::CalibrationLoaded(calib));
                self.state = PressureState::Polling(calib);
                PressureStep::Calibrated(calib)
            }
            Err(e) => {
                self.sink.report(&Report::CalibrationFailed(e));
                self.state = PressureState::Stopped;
                PressureStep::InitFailed(e)
            }
        }
    }

    async fn poll_once(&mut self, calib: &CalibrationCoefficients) -> PressureStep {
        let raw = match self
            .bus
            .read::<MEASUREMENT_LEN>(Bmp280Register::PressMsb.addr())
            .await
        {
            Ok(raw) => RawMeasurement::new(raw),
            Err(e) => {
                self.sink.report(&Report::ReadFailed(e));
                return PressureStep::Skipped(e);
            }
        };

        let adc_t = raw.adc_t();
        let temperature = compensate_temperature(adc_t, calib, &mut self.t_fine);
        debug!("adc_T={} adc_P={} t_fine={}", adc_t, raw.adc_p(), self.t_fine.0);

        self.sink.report(&Report::Temperature {
            temperature,
            t_fine: self.t_fine,
        });

        PressureStep::Reading {
            temperature,
            t_fine: self.t_fine,
            adc_p: raw.adc_p(),
        }
    }
}
