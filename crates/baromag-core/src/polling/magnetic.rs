//! KY-003 polling loop
//!
//! Single state: read the line, classify, report, sleep. There is no error
//! path, which the `Error = Infallible` bound on the input line makes explicit.

use core::convert::Infallible;

use embassy_time::Duration;
use embedded_hal::digital::InputPin;
use embedded_hal_async::delay::DelayNs;
use log::info;

use crate::config::delay_millis;
use crate::report::{Report, ReportSink};
use crate::sensors::MagneticState;

pub struct MagneticLoop<P, S, R> {
    line: P,
    sleeper: S,
    sink: R,
    period: Duration,
}

impl<P, S, R> MagneticLoop<P, S, R>
where
    P: InputPin<Error = Infallible>,
    S: DelayNs,
    R: ReportSink,
{
    /// `line` must already be configured as an input with its pull-up enabled.
    pub fn new(line: P, sleeper: S, sink: R, period: Duration) -> Self {
        Self {
            line,
            sleeper,
            sink,
            period,
        }
    }

    /// Sample the line once, report the classification and sleep.
    pub async fn step(&mut self) -> MagneticState {
        let Ok(is_low) = self.line.is_low();
        let state = MagneticState::from_line_low(is_low);

        self.sink.report(&Report::Magnetic(state));
        self.sleeper.delay_ms(delay_millis(self.period)).await;

        state
    }

    pub async fn run(mut self) -> ! {
        info!("KY003 polling loop started (period {} ms)", self.period.as_millis());
        loop {
            self.step().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::test_support::RecordingSleeper;
    use crate::report::test_support::RecordingSink;
    use embassy_futures::block_on;
    use embedded_hal::digital::ErrorType;

    /// Reed line that replays a fixed sequence of levels (`true` = low).
    struct ScriptedLine {
        levels: std::vec::IntoIter<bool>,
    }

    impl ScriptedLine {
        fn new(levels: &[bool]) -> Self {
            Self {
                levels: levels.to_vec().into_iter(),
            }
        }
    }

    impl ErrorType for ScriptedLine {
        type Error = Infallible;
    }

    impl InputPin for ScriptedLine {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            self.is_low().map(|low| !low)
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Ok(self.levels.next().expect("line sampled more often than scripted"))
        }
    }

    #[test]
    fn test_low_level_reports_detected() {
        let mut sleeper = RecordingSleeper::default();
        let mut sink = RecordingSink::default();
        let mut magnetic = MagneticLoop::new(
            ScriptedLine::new(&[true]),
            &mut sleeper,
            &mut sink,
            Duration::from_secs(1),
        );

        let state = block_on(magnetic.step());

        assert_eq!(state, MagneticState::Detected);
        drop(magnetic);
        assert_eq!(sink.reports, std::vec![Report::Magnetic(MagneticState::Detected)]);
    }

    #[test]
    fn test_high_level_reports_not_detected() {
        let mut sleeper = RecordingSleeper::default();
        let mut sink = RecordingSink::default();
        let mut magnetic = MagneticLoop::new(
            ScriptedLine::new(&[false]),
            &mut sleeper,
            &mut sink,
            Duration::from_secs(1),
        );

        let state = block_on(magnetic.step());

        assert_eq!(state, MagneticState::NotDetected);
        drop(magnetic);
        assert_eq!(sink.reports, std::vec![Report::Magnetic(MagneticState::NotDetected)]);
    }

    #[test]
    fn test_n_cycles_emit_n_reports_with_period_between() {
        let levels = [false, true, true, false, false, true];
        let mut sleeper = RecordingSleeper::default();
        let mut sink = RecordingSink::default();
        let mut magnetic = MagneticLoop::new(
            ScriptedLine::new(&levels),
            &mut sleeper,
            &mut sink,
            Duration::from_secs(1),
        );

        for _ in 0..levels.len() {
            block_on(magnetic.step());
        }

        drop(magnetic);
        let expected: std::vec::Vec<Report> = levels
            .iter()
            .map(|&low| Report::Magnetic(MagneticState::from_line_low(low)))
            .collect();
        assert_eq!(sink.reports, expected);
        assert_eq!(sleeper.slept_ms, std::vec![1000; levels.len()]);
    }
}
