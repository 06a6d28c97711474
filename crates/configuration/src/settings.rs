use crate::error::ConfigError;
use core_types::{IndexProfile, default_index_position};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
///
/// Every section has a default, so an absent `config.toml` yields the built-in S&P tables.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// The index used when an event targets an unregistered identifier.
    /// When omitted, the first entry of `indices` is the default.
    pub default_index: Option<String>,
    /// The index reference table. Order matters: the first entry is the flagship index.
    pub indices: Vec<IndexSettings>,
    pub display: DisplaySettings,
    pub logging: LoggingSettings,
}

/// One row of the index reference table, as written in `[[indices]]`.
#[derive(Debug, Clone, Deserialize)]
pub struct IndexSettings {
    pub id: String,
    /// Dollar assets benchmarked to the index.
    pub aum: Decimal,
    /// Aggregate market capitalization of the index universe.
    pub total_market_cap: Decimal,
}

/// Controls how alerts are presented.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub format: OutputFormat,
    /// The header line printed above text alerts.
    pub title: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// An `EnvFilter` directive, overridden by `RUST_LOG` when set.
    pub level: String,
    /// Write logs to this file instead of stderr.
    pub file: Option<PathBuf>,
}

/// The presentation formats supported by the alerter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One alert block per event.
    #[default]
    Text,
    /// A single summary table.
    Table,
    /// A JSON array of alerts.
    Json,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_index: None,
            indices: default_indices(),
            display: DisplaySettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            title: "Index Inclusion Sniper: Live Dashboard".to_string(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

/// The built-in S&P reference data: SP500 (flagship), SP400 and SP600.
fn default_indices() -> Vec<IndexSettings> {
    vec![
        IndexSettings {
            id: "SP500".to_string(),
            aum: dec!(12500000000000),
            total_market_cap: dec!(58000000000000),
        },
        IndexSettings {
            id: "SP400".to_string(),
            aum: dec!(1600000000000),
            total_market_cap: dec!(3200000000000),
        },
        IndexSettings {
            id: "SP600".to_string(),
            aum: dec!(1100000000000),
            total_market_cap: dec!(1500000000000),
        },
    ]
}

impl Config {
    /// Checks the reference table: non-empty, unique ids, positive values,
    /// and a default index that is actually registered.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let profiles = self.index_profiles()?;
        default_index_position(&profiles, self.default_index.as_deref())?;
        Ok(())
    }

    /// Converts the table rows into validated `IndexProfile`s, preserving order.
    pub fn index_profiles(&self) -> Result<Vec<IndexProfile>, ConfigError> {
        self.indices
            .iter()
            .map(|index| {
                IndexProfile::new(index.id.clone(), index.aum, index.total_market_cap)
                    .map_err(ConfigError::from)
            })
            .collect()
    }

    /// The identifier of the fallback index: `default_index` if set, otherwise the first entry.
    pub fn default_index_id(&self) -> Option<&str> {
        self.default_index
            .as_deref()
            .or_else(|| self.indices.first().map(|index| index.id.as_str()))
    }
}
