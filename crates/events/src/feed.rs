use crate::error::EventsError;
use crate::news::IndexEvent;
use chrono::NaiveDate;
use core_types::IndexEventType;
use rust_decimal_macros::dec;
use std::fs;
use std::path::{Path, PathBuf};

/// A provider of index news.
///
/// The rest of the system only depends on this trait, so the demonstration feed can be
/// swapped for a file or a live announcements API without touching the calculator.
pub trait EventSource {
    /// A short name for logs.
    fn name(&self) -> &str;

    /// Returns every pending index event, in announcement order.
    fn events(&self) -> Result<Vec<IndexEvent>, EventsError>;
}

/// A fixed pair of S&P announcements used for demos and development.
#[derive(Debug, Clone)]
pub struct MockNewsFeed {
    announced_on: NaiveDate,
}

impl MockNewsFeed {
    /// A feed whose announcements are dated `announced_on`.
    pub fn new(announced_on: NaiveDate) -> Self {
        Self { announced_on }
    }
}

impl EventSource for MockNewsFeed {
    fn name(&self) -> &str {
        "mock"
    }

    fn events(&self) -> Result<Vec<IndexEvent>, EventsError> {
        // Effective dates are fixed. Once they have passed, the announcement date
        // (today) lies after them and the events read as already in the index.
        let effective = |ticker: &str, month, day| {
            NaiveDate::from_ymd_opt(2026, month, day).ok_or_else(|| EventsError::InvalidEvent {
                ticker: ticker.to_string(),
                reason: format!("no such date 2026-{month:02}-{day:02}"),
            })
        };

        Ok(vec![
            IndexEvent {
                ticker: "PATH".to_string(),
                company_name: "UiPath Inc.".to_string(),
                event_type: IndexEventType::Migration,
                from_index: Some("SP600".to_string()),
                to_index: "SP400".to_string(),
                announcement_date: self.announced_on,
                effective_date: effective("PATH", 1, 16)?,
                current_price: dec!(24.50),
                mkt_cap: dec!(14200000000),
                avg_vol_30d: dec!(6500000),
                morning_vol: Some(dec!(12000000)),
                typical_morning_vol: Some(dec!(1500000)),
            },
            IndexEvent {
                ticker: "HOOD".to_string(),
                company_name: "Robinhood Markets".to_string(),
                event_type: IndexEventType::Addition,
                from_index: None,
                to_index: "SP500".to_string(),
                announcement_date: self.announced_on,
                effective_date: effective("HOOD", 1, 23)?,
                current_price: dec!(32.10),
                mkt_cap: dec!(28500000000),
                avg_vol_30d: dec!(15000000),
                morning_vol: Some(dec!(18000000)),
                typical_morning_vol: Some(dec!(4000000)),
            },
        ])
    }
}

/// Reads a JSON array of `IndexEvent` records from disk.
#[derive(Debug, Clone)]
pub struct JsonFileFeed {
    path: PathBuf,
}

impl JsonFileFeed {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EventSource for JsonFileFeed {
    fn name(&self) -> &str {
        "json-file"
    }

    fn events(&self) -> Result<Vec<IndexEvent>, EventsError> {
        let raw = fs::read_to_string(&self.path).map_err(|source| EventsError::Io {
            path: self.path.clone(),
            source,
        })?;

        let events: Vec<IndexEvent> = serde_json::from_str(&raw)?;
        for event in &events {
            event.validate()?;
        }

        tracing::debug!(path = %self.path.display(), count = events.len(), "Loaded index events.");
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::TradePhase;
    use std::io::Write;

    #[test]
    fn test_mock_feed_matches_demo_announcements() {
        let day = NaiveDate::from_ymd_opt(2026, 1, 9).unwrap();
        let events = MockNewsFeed::new(day).events().unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].ticker, "PATH");
        assert_eq!(events[0].to_index, "SP400");
        assert_eq!(events[0].from_index.as_deref(), Some("SP600"));
        assert_eq!(events[1].ticker, "HOOD");
        assert_eq!(events[1].event_type, IndexEventType::Addition);
        assert!(events.iter().all(|e| e.announcement_date == day));
        assert_eq!(events[1].lead_time_days(), 14);
        assert!(events.iter().all(|e| e.validate().is_ok()));
    }

    #[test]
    fn test_mock_feed_keeps_fixed_effective_dates() {
        let day = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let events = MockNewsFeed::new(day).events().unwrap();

        assert_eq!(events[0].effective_date, NaiveDate::from_ymd_opt(2026, 1, 16).unwrap());
        assert_eq!(events[1].effective_date, NaiveDate::from_ymd_opt(2026, 1, 23).unwrap());
        assert_eq!(events[0].days_until_effective_on(day), -276);
        assert_eq!(events[0].phase_on(day), TradePhase::Announcement);
        let next_day = day.succ_opt().unwrap();
        assert_eq!(events[1].phase_on(next_day), TradePhase::Effective);
    }

    #[test]
    fn test_json_file_feed_round_trips_mock_events() {
        let day = NaiveDate::from_ymd_opt(2026, 1, 9).unwrap();
        let expected = MockNewsFeed::new(day).events().unwrap();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(serde_json::to_string(&expected).unwrap().as_bytes())
            .unwrap();

        let feed = JsonFileFeed::new(file.path());
        assert_eq!(feed.events().unwrap(), expected);
    }

    #[test]
    fn test_bundled_demo_file_is_valid() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos/events.json");
        let events = JsonFileFeed::new(path).events().unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(events[2].to_index, "NASDAQ100");
        assert_eq!(events[2].morning_volumes(), None);
    }

    #[test]
    fn test_json_file_feed_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let feed = JsonFileFeed::new(dir.path().join("missing.json"));
        assert!(matches!(feed.events(), Err(EventsError::Io { .. })));
    }

    #[test]
    fn test_json_file_feed_rejects_invalid_records() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            br#"[{
                "ticker": "ABC",
                "company_name": "ABC Corp",
                "event_type": "Migration",
                "to_index": "SP400",
                "announcement_date": "2026-01-02",
                "effective_date": "2026-01-09",
                "current_price": 10,
                "mkt_cap": 1000000000,
                "avg_vol_30d": 100000
            }]"#,
        )
        .unwrap();

        let feed = JsonFileFeed::new(file.path());
        assert!(matches!(
            feed.events(),
            Err(EventsError::InvalidEvent { .. })
        ));
    }

    #[test]
    fn test_json_file_feed_rejects_malformed_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"not json").unwrap();
        let feed = JsonFileFeed::new(file.path());
        assert!(matches!(feed.events(), Err(EventsError::Parse(_))));
    }
}
