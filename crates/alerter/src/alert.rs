use crate::error::AlerterError;
use chrono::NaiveDate;
use core_types::{IndexEventType, PressureEvent, PressureResult, TradePhase};
use events::IndexEvent;
use pressure::{PressureCalculator, SqueezeAssessment, assess_squeeze};
use rust_decimal::Decimal;
use serde::Serialize;

/// Everything a trader needs to act on one index announcement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    pub ticker: String,
    pub company_name: String,
    pub event_type: IndexEventType,
    pub from_index: Option<String>,
    pub to_index: String,
    pub announcement_date: NaiveDate,
    pub effective_date: NaiveDate,
    /// Counted from the day the alert was built. Negative once the change is effective.
    pub days_until_effective: i64,
    pub phase: TradePhase,
    pub pressure: PressureResult,
    /// Present only when the event carries morning volume figures.
    pub squeeze: Option<SqueezeAssessment>,
}

impl Alert {
    /// Scores `event` and, when morning volumes are known, checks for front-running.
    /// The countdown and trade phase are taken as of `today`.
    pub fn build(
        event: &IndexEvent,
        calculator: &PressureCalculator,
        today: NaiveDate,
    ) -> Result<Self, AlerterError> {
        let scoring_failed = |source| AlerterError::Pressure {
            ticker: event.ticker.clone(),
            source,
        };

        let pressure = calculator
            .compute_event(&event.to_pressure_event())
            .map_err(scoring_failed)?;

        let squeeze = event
            .morning_volumes()
            .map(|(morning, typical)| assess_squeeze(pressure.pressure_score, morning, typical))
            .transpose()
            .map_err(scoring_failed)?;

        Ok(Self {
            ticker: event.ticker.clone(),
            company_name: event.company_name.clone(),
            event_type: event.event_type,
            from_index: event.from_index.clone(),
            to_index: event.to_index.clone(),
            announcement_date: event.announcement_date,
            effective_date: event.effective_date,
            days_until_effective: event.days_until_effective_on(today),
            phase: event.phase_on(today),
            pressure,
            squeeze,
        })
    }
}

/// The score of one ad-hoc ticker, outside any news event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub pressure: PressureResult,
    pub squeeze: Option<SqueezeAssessment>,
}

impl Analysis {
    /// `morning_volumes` is `(morning, typical morning)` volume, when known.
    pub fn compute(
        event: &PressureEvent,
        morning_volumes: Option<(Decimal, Decimal)>,
        calculator: &PressureCalculator,
    ) -> Result<Self, AlerterError> {
        let scoring_failed = |source| AlerterError::Pressure {
            ticker: event.ticker.clone(),
            source,
        };

        let pressure = calculator.compute_event(event).map_err(scoring_failed)?;
        let squeeze = morning_volumes
            .map(|(morning, typical)| assess_squeeze(pressure.pressure_score, morning, typical))
            .transpose()
            .map_err(scoring_failed)?;

        Ok(Self { pressure, squeeze })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use configuration::Config;
    use core_types::PressureIntensity;
    use events::{EventSource, MockNewsFeed};
    use pressure::IndexTable;
    use rust_decimal_macros::dec;

    fn calculator() -> PressureCalculator {
        PressureCalculator::new(IndexTable::from_config(&Config::default()).unwrap())
    }

    fn announced() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 9).unwrap()
    }

    fn mock_events() -> Vec<IndexEvent> {
        MockNewsFeed::new(announced()).events().unwrap()
    }

    #[test]
    fn test_build_path_alert() {
        let events = mock_events();
        let alert = Alert::build(&events[0], &calculator(), announced()).unwrap();

        assert_eq!(alert.ticker, "PATH");
        assert_eq!(alert.to_index, "SP400");
        assert_eq!(alert.days_until_effective, 7);
        assert_eq!(alert.phase, TradePhase::Announcement);
        assert_eq!(alert.pressure.pressure_score, dec!(44.58));
        assert_eq!(alert.pressure.intensity, PressureIntensity::Extreme);

        let squeeze = alert.squeeze.unwrap();
        assert_eq!(squeeze.relative_volume, dec!(8.00));
        assert!(squeeze.is_algo_active);
    }

    #[test]
    fn test_build_without_morning_volumes() {
        let mut event = mock_events().remove(1);
        event.morning_vol = None;
        let alert = Alert::build(&event, &calculator(), announced()).unwrap();
        assert!(alert.squeeze.is_none());
        assert_eq!(alert.pressure.pressure_score, dec!(12.76));
    }

    #[test]
    fn test_countdown_and_phase_follow_build_date() {
        let event = mock_events().remove(0);

        let leadup = announced().succ_opt().unwrap();
        let alert = Alert::build(&event, &calculator(), leadup).unwrap();
        assert_eq!(alert.days_until_effective, 6);
        assert_eq!(alert.phase, TradePhase::LeadUp);

        let eve = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        let alert = Alert::build(&event, &calculator(), eve).unwrap();
        assert_eq!(alert.days_until_effective, 1);
        assert_eq!(alert.phase, TradePhase::MocCross);

        let after = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
        let alert = Alert::build(&event, &calculator(), after).unwrap();
        assert_eq!(alert.days_until_effective, -16);
        assert_eq!(alert.phase, TradePhase::Effective);
        // Scoring does not depend on the date.
        assert_eq!(alert.pressure.pressure_score, dec!(44.58));
    }

    #[test]
    fn test_analysis_of_ad_hoc_ticker() {
        let event = PressureEvent::new("XYZ", dec!(1000000000), dec!(10), dec!(1000000), "NASDAQ100");
        let analysis =
            Analysis::compute(&event, Some((dec!(500000), dec!(400000))), &calculator()).unwrap();
        assert_eq!(analysis.pressure.pressure_score, dec!(21.55));
        assert_eq!(analysis.pressure.resolved_index, "SP500");
        let squeeze = analysis.squeeze.unwrap();
        assert_eq!(squeeze.relative_volume, dec!(1.25));
        assert_eq!(squeeze.action, "High Squeeze Potential");

        let analysis = Analysis::compute(&event, None, &calculator()).unwrap();
        assert!(analysis.squeeze.is_none());
    }

    #[test]
    fn test_build_reports_ticker_on_bad_metrics() {
        let mut event = mock_events().remove(0);
        event.current_price = dec!(0);
        let err = Alert::build(&event, &calculator(), announced()).unwrap_err();
        assert!(matches!(err, AlerterError::Pressure { ref ticker, .. } if ticker == "PATH"));
    }
}
