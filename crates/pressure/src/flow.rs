use crate::calculator::round_2dp;
use crate::error::PressureError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Morning volume above this multiple of its typical level means algorithms are already buying.
pub const ALGO_ACTIVITY_RVOL: Decimal = dec!(3.0);
/// Pressure score above which an undisturbed name has squeeze potential.
pub const SQUEEZE_SCORE: Decimal = dec!(2.5);

/// Whether the mechanical buy is still ahead of the market or already front-run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SqueezeAssessment {
    /// Morning volume as a multiple of typical morning volume, rounded to 2 dp.
    pub relative_volume: Decimal,
    pub is_algo_active: bool,
    pub algo_alert: String,
    pub action: String,
}

/// Morning volume relative to its typical level, unrounded.
pub fn relative_volume(
    morning_volume: Decimal,
    typical_morning_volume: Decimal,
) -> Result<Decimal, PressureError> {
    if morning_volume <= Decimal::ZERO {
        return Err(PressureError::NonPositiveInput {
            field: "morning_volume",
            value: morning_volume,
        });
    }
    if typical_morning_volume <= Decimal::ZERO {
        return Err(PressureError::NonPositiveInput {
            field: "typical_morning_volume",
            value: typical_morning_volume,
        });
    }
    morning_volume
        .checked_div(typical_morning_volume)
        .ok_or_else(|| PressureError::Calculation("'relative_volume' is out of range".to_string()))
}

/// Combines a pressure score with this morning's volume to decide whether to chase the name.
///
/// A squeeze needs both a large mechanical buy (`score > 2.5`) and no sign that
/// algorithms have already absorbed it (`relative volume <= 3.0`).
pub fn assess_squeeze(
    pressure_score: Decimal,
    morning_volume: Decimal,
    typical_morning_volume: Decimal,
) -> Result<SqueezeAssessment, PressureError> {
    let rvol = relative_volume(morning_volume, typical_morning_volume)?;
    let is_algo_active = rvol > ALGO_ACTIVITY_RVOL;

    let algo_alert = if is_algo_active {
        "CAUTION: Algos Front-running"
    } else {
        "Normal Accumulation"
    };

    let action = if pressure_score > SQUEEZE_SCORE && !is_algo_active {
        "High Squeeze Potential"
    } else {
        "Watch for Reversal"
    };

    Ok(SqueezeAssessment {
        relative_volume: round_2dp(rvol),
        is_algo_active,
        algo_alert: algo_alert.to_string(),
        action: action.to_string(),
    })
}
