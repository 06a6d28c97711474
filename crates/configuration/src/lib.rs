use crate::error::ConfigError;
use config::{Environment, File, FileFormat};
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use settings::{Config, DisplaySettings, IndexSettings, LoggingSettings, OutputFormat};

/// The file looked up in the working directory when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Loads the application configuration.
///
/// With `Some(path)` the file must exist. With `None`, `config.toml` in the working
/// directory is used if present and the built-in tables otherwise. In both cases
/// `SNIPER_`-prefixed environment variables are layered on top
/// (e.g. `SNIPER_DEFAULT_INDEX=SP400`, `SNIPER_DISPLAY__FORMAT=json`).
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let file = match path {
        Some(path) => File::from(path).required(true),
        None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };

    let builder = config::Config::builder()
        .add_source(file)
        .add_source(
            Environment::with_prefix("SNIPER")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;
    Ok(config)
}

/// Parses a configuration from TOML text, without consulting files or the environment.
pub fn parse_config(toml: &str) -> Result<Config, ConfigError> {
    let config = config::Config::builder()
        .add_source(File::from_str(toml, FileFormat::Toml))
        .build()?
        .try_deserialize::<Config>()?;
    config.validate()?;
    Ok(config)
}
