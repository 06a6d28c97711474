use crate::enums::PressureIntensity;
use crate::error::CoreError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Static reference data for one index: how much money tracks it and how big its universe is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexProfile {
    /// The identifier events use to target this index (e.g. "SP500").
    pub id: String,
    /// Total dollar assets benchmarked to the index.
    pub aum: Decimal,
    /// Aggregate market capitalization of the constituent universe.
    pub total_market_cap: Decimal,
}

impl IndexProfile {
    /// Creates a profile, rejecting empty identifiers and non-positive dollar values.
    pub fn new(
        id: impl Into<String>,
        aum: Decimal,
        total_market_cap: Decimal,
    ) -> Result<Self, CoreError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(CoreError::InvalidInput(
                "id".to_string(),
                "index identifier must not be empty".to_string(),
            ));
        }
        if aum <= Decimal::ZERO {
            return Err(CoreError::InvalidInput(
                "aum".to_string(),
                format!("{id}: must be positive, got {aum}"),
            ));
        }
        if total_market_cap <= Decimal::ZERO {
            return Err(CoreError::InvalidInput(
                "total_market_cap".to_string(),
                format!("{id}: must be positive, got {total_market_cap}"),
            ));
        }
        Ok(Self {
            id,
            aum,
            total_market_cap,
        })
    }
}

/// Checks an index reference table and returns the position of its fallback profile.
///
/// The table must be non-empty with unique ids. `default_index` must name one of the
/// profiles; `None` selects the first.
pub fn default_index_position(
    profiles: &[IndexProfile],
    default_index: Option<&str>,
) -> Result<usize, CoreError> {
    if profiles.is_empty() {
        return Err(CoreError::EmptyIndexTable);
    }

    let mut seen = HashSet::new();
    for profile in profiles {
        if !seen.insert(profile.id.as_str()) {
            return Err(CoreError::DuplicateIndex(profile.id.clone()));
        }
    }

    match default_index {
        Some(id) => profiles
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| CoreError::UnknownDefaultIndex(id.to_string())),
        None => Ok(0),
    }
}

/// The market metrics of a single index event, as consumed by the pressure calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PressureEvent {
    pub ticker: String,
    /// Company market capitalization in dollars.
    pub market_cap: Decimal,
    /// Current share price in dollars.
    pub price: Decimal,
    /// Average daily traded volume over 30 sessions, in shares.
    pub avg_volume_30d: Decimal,
    /// The destination index. Unregistered identifiers resolve to the default index.
    pub index_target: String,
}

impl PressureEvent {
    pub fn new(
        ticker: impl Into<String>,
        market_cap: Decimal,
        price: Decimal,
        avg_volume_30d: Decimal,
        index_target: impl Into<String>,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            market_cap,
            price,
            avg_volume_30d,
            index_target: index_target.into(),
        }
    }
}

/// The outcome of one pressure calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PressureResult {
    pub ticker: String,
    /// The index the caller asked for, echoed verbatim.
    pub index_target: String,
    /// The index whose profile was actually used. Differs from `index_target` on fallback.
    pub resolved_index: String,
    /// Days of average volume needed to absorb the mechanical buy, rounded to 2 dp.
    pub pressure_score: Decimal,
    pub shares_to_buy: u64,
    pub dollars_to_buy: Decimal,
    pub intensity: PressureIntensity,
    pub ui_label: String,
    pub alert_level: String,
}

impl PressureResult {
    /// True when the requested index was not registered and the default profile was used.
    pub fn used_default_index(&self) -> bool {
        self.index_target != self.resolved_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_profile_rejects_non_positive_values() {
        assert!(IndexProfile::new("SP500", dec!(0), dec!(1)).is_err());
        assert!(IndexProfile::new("SP500", dec!(1), dec!(-5)).is_err());
        assert!(IndexProfile::new("  ", dec!(1), dec!(1)).is_err());
    }

    #[test]
    fn test_profile_accepts_positive_values() {
        let profile = IndexProfile::new("SP400", dec!(1600000000000), dec!(3200000000000))
            .unwrap();
        assert_eq!(profile.id, "SP400");
        assert_eq!(profile.aum, dec!(1600000000000));
    }

    #[test]
    fn test_default_index_position() {
        let a = IndexProfile::new("A", dec!(10), dec!(100)).unwrap();
        let b = IndexProfile::new("B", dec!(20), dec!(100)).unwrap();
        let table = vec![a.clone(), b];

        assert_eq!(default_index_position(&table, None), Ok(0));
        assert_eq!(default_index_position(&table, Some("B")), Ok(1));
        assert_eq!(
            default_index_position(&table, Some("b")),
            Err(CoreError::UnknownDefaultIndex("b".to_string()))
        );
        assert_eq!(default_index_position(&[], None), Err(CoreError::EmptyIndexTable));
        assert_eq!(
            default_index_position(&[a.clone(), a], None),
            Err(CoreError::DuplicateIndex("A".to_string()))
        );
    }
}
