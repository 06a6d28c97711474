use crate::error::EventsError;
use chrono::NaiveDate;
use core_types::{IndexEventType, PressureEvent, TradePhase};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An index change announcement together with the market metrics needed to score it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEvent {
    pub ticker: String,
    pub company_name: String,
    pub event_type: IndexEventType,
    /// The index the company leaves. `None` for a fresh addition.
    #[serde(default)]
    pub from_index: Option<String>,
    pub to_index: String,
    pub announcement_date: NaiveDate,
    /// The date index funds must hold the stock.
    pub effective_date: NaiveDate,
    pub current_price: Decimal,
    pub mkt_cap: Decimal,
    pub avg_vol_30d: Decimal,
    /// Shares traded so far this morning.
    #[serde(default)]
    pub morning_vol: Option<Decimal>,
    /// Shares typically traded by the same time of day.
    #[serde(default)]
    pub typical_morning_vol: Option<Decimal>,
}

impl IndexEvent {
    /// The market metrics of this event in the shape the pressure calculator takes.
    pub fn to_pressure_event(&self) -> PressureEvent {
        PressureEvent::new(
            self.ticker.clone(),
            self.mkt_cap,
            self.current_price,
            self.avg_vol_30d,
            self.to_index.clone(),
        )
    }

    /// Both morning volume figures, when the event carries them.
    pub fn morning_volumes(&self) -> Option<(Decimal, Decimal)> {
        self.morning_vol.zip(self.typical_morning_vol)
    }

    /// Calendar days between the announcement and the effective date.
    pub fn lead_time_days(&self) -> i64 {
        (self.effective_date - self.announcement_date).num_days()
    }

    /// Calendar days from `today` to the effective date. Negative once it has passed.
    pub fn days_until_effective_on(&self, today: NaiveDate) -> i64 {
        (self.effective_date - today).num_days()
    }

    /// Where the event stands on `today`'s trading calendar.
    pub fn phase_on(&self, today: NaiveDate) -> TradePhase {
        let days_since_announcement = (today - self.announcement_date).num_days();
        TradePhase::classify(days_since_announcement, self.days_until_effective_on(today))
    }

    /// Structural checks on the record. Market metrics are validated by the calculator.
    pub fn validate(&self) -> Result<(), EventsError> {
        let invalid = |reason: &str| EventsError::InvalidEvent {
            ticker: self.ticker.clone(),
            reason: reason.to_string(),
        };

        if self.ticker.trim().is_empty() {
            return Err(invalid("ticker must not be empty"));
        }
        if self.to_index.trim().is_empty() {
            return Err(invalid("to_index must not be empty"));
        }
        if self.event_type == IndexEventType::Migration && self.from_index.is_none() {
            return Err(invalid("a migration needs a from_index"));
        }
        if self.effective_date < self.announcement_date {
            return Err(invalid("effective_date precedes announcement_date"));
        }
        Ok(())
    }
}
