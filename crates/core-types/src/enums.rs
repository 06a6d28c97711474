use crate::error::CoreError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The three-tier classification of a pressure score.
///
/// Tiers are ordered from weakest to strongest so that `Ord` follows severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PressureIntensity {
    Normal,
    High,
    Extreme,
}

impl PressureIntensity {
    /// Inclusive lower bound of the `Extreme` tier, in days of average volume.
    pub const EXTREME_THRESHOLD: Decimal = dec!(3.0);
    /// Inclusive lower bound of the `High` tier, in days of average volume.
    pub const HIGH_THRESHOLD: Decimal = dec!(1.5);

    /// Classifies an already-rounded pressure score. Evaluated high to low, first match wins.
    pub fn from_score(score: Decimal) -> Self {
        if score >= Self::EXTREME_THRESHOLD {
            PressureIntensity::Extreme
        } else if score >= Self::HIGH_THRESHOLD {
            PressureIntensity::High
        } else {
            PressureIntensity::Normal
        }
    }

    /// The label shown on dashboards (e.g. "EXTREME PRESSURE").
    pub fn ui_label(&self) -> &'static str {
        match self {
            PressureIntensity::Extreme => "EXTREME PRESSURE",
            PressureIntensity::High => "HIGH PRESSURE",
            PressureIntensity::Normal => "NORMAL PRESSURE",
        }
    }

    /// The trader-facing action level.
    pub fn alert_level(&self) -> &'static str {
        match self {
            PressureIntensity::Extreme => "BUY ALERT",
            PressureIntensity::High => "WATCH",
            PressureIntensity::Normal => "MONITOR",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PressureIntensity::Extreme => "EXTREME",
            PressureIntensity::High => "HIGH",
            PressureIntensity::Normal => "NORMAL",
        }
    }
}

impl fmt::Display for PressureIntensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kind of index change announced for a ticker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndexEventType {
    /// A new constituent with no prior index membership.
    Addition,
    /// A move from one index to another (e.g. SP600 to SP400).
    Migration,
    Deletion,
}

impl IndexEventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndexEventType::Addition => "Addition",
            IndexEventType::Migration => "Migration",
            IndexEventType::Deletion => "Deletion",
        }
    }
}

impl fmt::Display for IndexEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IndexEventType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "addition" => Ok(IndexEventType::Addition),
            "migration" => Ok(IndexEventType::Migration),
            "deletion" => Ok(IndexEventType::Deletion),
            other => Err(CoreError::UnknownEventType(other.to_string())),
        }
    }
}

/// Where an index change stands on its trading calendar.
///
/// Ordered chronologically, so a later phase compares greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradePhase {
    /// The day of the announcement (or earlier).
    Announcement,
    /// Institutions building positions ahead of the effective date.
    LeadUp,
    /// The last session or two before inclusion, when the closing auction clears the flow.
    MocCross,
    /// The stock is in the index.
    Effective,
}

impl TradePhase {
    /// Classifies a day relative to an event, from whole calendar days since the
    /// announcement and until the effective date. Evaluated in order, first match wins.
    pub fn classify(days_since_announcement: i64, days_until_effective: i64) -> Self {
        if days_since_announcement <= 0 {
            TradePhase::Announcement
        } else if days_until_effective > 1 {
            TradePhase::LeadUp
        } else if days_until_effective >= 0 {
            TradePhase::MocCross
        } else {
            TradePhase::Effective
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TradePhase::Announcement => "Announcement",
            TradePhase::LeadUp => "Lead-up",
            TradePhase::MocCross => "MOC Cross",
            TradePhase::Effective => "Effective Date",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            TradePhase::Announcement => "The starting gun (day 0)",
            TradePhase::LeadUp => "Institutions build positions",
            TradePhase::MocCross => "Final minutes before inclusion, maximum liquidity",
            TradePhase::Effective => "Officially in the index",
        }
    }
}

impl fmt::Display for TradePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trade_phase_boundaries() {
        // Announcement wins on day 0 whatever the effective date.
        assert_eq!(TradePhase::classify(0, 7), TradePhase::Announcement);
        assert_eq!(TradePhase::classify(0, -3), TradePhase::Announcement);
        assert_eq!(TradePhase::classify(-2, 9), TradePhase::Announcement);

        assert_eq!(TradePhase::classify(1, 6), TradePhase::LeadUp);
        assert_eq!(TradePhase::classify(5, 2), TradePhase::LeadUp);
        assert_eq!(TradePhase::classify(6, 1), TradePhase::MocCross);
        assert_eq!(TradePhase::classify(7, 0), TradePhase::MocCross);
        assert_eq!(TradePhase::classify(8, -1), TradePhase::Effective);
    }

    #[test]
    fn test_trade_phase_labels() {
        assert_eq!(TradePhase::MocCross.to_string(), "MOC Cross");
        assert_eq!(TradePhase::LeadUp.label(), "Lead-up");
        assert_eq!(serde_json::to_string(&TradePhase::LeadUp).unwrap(), "\"LEAD_UP\"");
        assert!(TradePhase::Announcement < TradePhase::Effective);
    }

    #[test]
    fn test_boundaries_belong_to_higher_tier() {
        assert_eq!(PressureIntensity::from_score(dec!(3.00)), PressureIntensity::Extreme);
        assert_eq!(PressureIntensity::from_score(dec!(1.50)), PressureIntensity::High);
        assert_eq!(PressureIntensity::from_score(dec!(2.99)), PressureIntensity::High);
        assert_eq!(PressureIntensity::from_score(dec!(1.49)), PressureIntensity::Normal);
    }

    #[test]
    fn test_every_non_negative_score_has_exactly_one_tier() {
        let mut previous = PressureIntensity::Normal;
        let mut score = Decimal::ZERO;
        while score <= dec!(5) {
            let tier = PressureIntensity::from_score(score);
            // Tiers never go backwards as the score grows.
            assert!(tier >= previous, "tier regressed at {score}");
            previous = tier;
            score += dec!(0.01);
        }
        assert_eq!(previous, PressureIntensity::Extreme);
    }

    #[test]
    fn test_labels() {
        assert_eq!(PressureIntensity::Extreme.ui_label(), "EXTREME PRESSURE");
        assert_eq!(PressureIntensity::Extreme.alert_level(), "BUY ALERT");
        assert_eq!(PressureIntensity::High.ui_label(), "HIGH PRESSURE");
        assert_eq!(PressureIntensity::High.alert_level(), "WATCH");
        assert_eq!(PressureIntensity::Normal.ui_label(), "NORMAL PRESSURE");
        assert_eq!(PressureIntensity::Normal.alert_level(), "MONITOR");
    }

    #[test]
    fn test_intensity_serializes_upper_case() {
        let json = serde_json::to_string(&PressureIntensity::High).unwrap();
        assert_eq!(json, "\"HIGH\"");
    }

    #[test]
    fn test_event_type_from_str() {
        assert_eq!("Migration".parse::<IndexEventType>().unwrap(), IndexEventType::Migration);
        assert_eq!(" addition ".parse::<IndexEventType>().unwrap(), IndexEventType::Addition);
        assert!("spinoff".parse::<IndexEventType>().is_err());
    }
}
