use crate::error::PressureError;
use crate::index_table::IndexTable;
use core_types::{PressureEvent, PressureIntensity, PressureResult};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// A stateless calculator for the mechanical buying pressure of an index event.
///
/// Holds only the immutable index table, so it is `Send + Sync` and can be shared.
#[derive(Debug, Clone)]
pub struct PressureCalculator {
    table: IndexTable,
}

impl PressureCalculator {
    pub fn new(table: IndexTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &IndexTable {
        &self.table
    }

    /// Computes the pressure of `ticker` joining `index_target`.
    ///
    /// # Arguments
    ///
    /// * `market_cap` - Company market capitalization in dollars.
    /// * `price` - Current share price in dollars.
    /// * `avg_volume_30d` - Average daily volume over 30 sessions, in shares.
    /// * `index_target` - The destination index. Unregistered ids use the default profile.
    ///
    /// # Returns
    ///
    /// A `PressureResult`, or `PressureError::NonPositiveInput` when any numeric input is
    /// zero or negative.
    pub fn compute(
        &self,
        ticker: &str,
        market_cap: Decimal,
        price: Decimal,
        avg_volume_30d: Decimal,
        index_target: &str,
    ) -> Result<PressureResult, PressureError> {
        if ticker.trim().is_empty() {
            return Err(PressureError::InvalidInput(
                "ticker must not be empty".to_string(),
            ));
        }
        ensure_positive("market_cap", market_cap)?;
        ensure_positive("price", price)?;
        ensure_positive("avg_volume_30d", avg_volume_30d)?;

        // --- 1. Resolve the index profile ---
        let resolution = self.table.resolve(index_target);
        let profile = resolution.profile;
        if resolution.is_fallback {
            tracing::debug!(
                ticker,
                index_target,
                default_index = %profile.id,
                "Unregistered index, using the default profile."
            );
        }

        // --- 2. Size the mechanical buy ---
        // aum * weight, multiplied out before dividing so no digits are lost to the weight.
        let index_weight = checked_div(market_cap, profile.total_market_cap, "index_weight")?;
        let held_capital = profile
            .aum
            .checked_mul(market_cap)
            .ok_or_else(|| overflow("dollars_to_buy"))?;
        let dollars_to_buy = checked_div(held_capital, profile.total_market_cap, "dollars_to_buy")?;

        let shares_to_buy = checked_div(dollars_to_buy, price, "shares_to_buy")?
            .trunc()
            .to_u64()
            .ok_or_else(|| overflow("shares_to_buy"))?;

        // --- 3. Express it in days of average volume ---
        let daily_dollar_volume = avg_volume_30d
            .checked_mul(price)
            .ok_or_else(|| overflow("daily_dollar_volume"))?;
        let days_of_volume = checked_div(dollars_to_buy, daily_dollar_volume, "days_of_volume")?;
        let pressure_score = round_2dp(days_of_volume);

        // --- 4. Classify ---
        let intensity = PressureIntensity::from_score(pressure_score);

        tracing::trace!(
            ticker,
            index = %profile.id,
            %index_weight,
            %dollars_to_buy,
            %days_of_volume,
            "Pressure computed."
        );

        Ok(PressureResult {
            ticker: ticker.to_string(),
            index_target: index_target.to_string(),
            resolved_index: profile.id.clone(),
            pressure_score,
            shares_to_buy,
            dollars_to_buy,
            intensity,
            ui_label: intensity.ui_label().to_string(),
            alert_level: intensity.alert_level().to_string(),
        })
    }

    /// Convenience wrapper over [`PressureCalculator::compute`] for a `PressureEvent`.
    pub fn compute_event(&self, event: &PressureEvent) -> Result<PressureResult, PressureError> {
        self.compute(
            &event.ticker,
            event.market_cap,
            event.price,
            event.avg_volume_30d,
            &event.index_target,
        )
    }
}

/// Rounds to 2 dp, half away from zero (1.495 becomes 1.50).
///
/// The result always carries a scale of 2, so `1.5` displays as `1.50`.
pub fn round_2dp(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

fn ensure_positive(field: &'static str, value: Decimal) -> Result<(), PressureError> {
    if value <= Decimal::ZERO {
        return Err(PressureError::NonPositiveInput { field, value });
    }
    Ok(())
}

fn checked_div(
    numerator: Decimal,
    denominator: Decimal,
    metric: &str,
) -> Result<Decimal, PressureError> {
    numerator
        .checked_div(denominator)
        .ok_or_else(|| overflow(metric))
}

fn overflow(metric: &str) -> PressureError {
    PressureError::Calculation(format!("'{metric}' is out of range"))
}
