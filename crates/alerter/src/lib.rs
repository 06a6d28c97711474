use crate::error::AlerterError;
use chrono::NaiveDate;
use events::EventSource;
use pressure::PressureCalculator;

pub mod alert;
pub mod error;
pub mod render;

pub use alert::{Alert, Analysis};
pub use render::{AlertRenderer, format_dollars};

/// The alerts produced by one pass over an event source.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    pub alerts: Vec<Alert>,
    /// Events that could not be scored. They are logged and left out of `alerts`.
    pub failures: Vec<AlerterError>,
}

/// Scores every event of `source` and builds an alert for each, dated `today`.
///
/// A bad event does not stop the scan; its error is logged and collected in
/// `ScanOutcome::failures`. Failing to read the source at all is an error.
pub fn scan_events(
    source: &dyn EventSource,
    calculator: &PressureCalculator,
    today: NaiveDate,
) -> Result<ScanOutcome, AlerterError> {
    let events = source.events()?;
    tracing::info!(source = source.name(), count = events.len(), "Scanning index events.");

    let mut outcome = ScanOutcome::default();
    for event in &events {
        match Alert::build(event, calculator, today) {
            Ok(alert) => {
                tracing::debug!(
                    ticker = %alert.ticker,
                    score = %alert.pressure.pressure_score,
                    intensity = %alert.pressure.intensity,
                    phase = %alert.phase,
                    "Alert built."
                );
                outcome.alerts.push(alert);
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to build alert.");
                outcome.failures.push(e);
            }
        }
    }

    Ok(outcome)
}
