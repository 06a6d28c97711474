use crate::error::ConfigError;
use crate::settings::LoggingSettings;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Installs the global tracing subscriber.
///
/// Logs go to stderr so stdout carries only alerts. When `settings.file` is set they
/// are written to that file instead; keep the returned guard alive until exit so the
/// background writer flushes.
pub fn init_tracing(settings: &LoggingSettings) -> Result<Option<WorkerGuard>, ConfigError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .map_err(|e| {
            ConfigError::Logging(format!("invalid log level '{}': {e}", settings.level))
        })?;

    match &settings.file {
        Some(path) => {
            let directory = path
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let file_name = path.file_name().ok_or_else(|| {
                ConfigError::Logging(format!("log file path '{}' has no file name", path.display()))
            })?;

            let appender = tracing_appender::rolling::never(directory, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);

            let subscriber = FmtSubscriber::builder()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber)
                .map_err(|e| ConfigError::Logging(e.to_string()))?;

            Ok(Some(guard))
        }
        None => {
            let subscriber = FmtSubscriber::builder()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)
                .map_err(|e| ConfigError::Logging(e.to_string()))?;

            Ok(None)
        }
    }
}
