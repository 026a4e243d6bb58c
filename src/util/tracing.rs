use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::fs::File;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::Subscriber;
use tracing_subscriber::fmt::Layer;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::filter;

// default name (fixed)
const APP_SERVICE_NAME: &str = env!("CARGO_PKG_NAME");

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub app_name: Option<String>,
    pub level: Option<String>,
    pub file_name: Option<String>,
    pub file_dir: Option<String>,
    #[serde(default)]
    pub use_json: bool,
    #[serde(default = "LoggingConfig::default_use_stdout")]
    pub use_stdout: bool,
}

impl LoggingConfig {
    pub fn new() -> Self {
        Self {
            app_name: None,
            level: None,
            file_name: None,
            file_dir: None,
            use_json: false,
            use_stdout: true,
        }
    }

    fn default_use_stdout() -> bool {
        true
    }

    pub fn app_service_name(&self) -> String {
        self.app_name
            .clone()
            .unwrap_or_else(|| APP_SERVICE_NAME.to_string())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Read `LOG_LEVEL`, `LOG_FILE_NAME`, `LOG_FILE_DIR`, `LOG_USE_JSON`, ...
pub fn load_tracing_config_from_env() -> Result<LoggingConfig> {
    envy::prefixed("LOG_")
        .from_env::<LoggingConfig>()
        .context("cannot read logging config from env:")
}

pub fn load_tracing_config_from_vars<I>(vars: I) -> Result<LoggingConfig>
where
    I: IntoIterator<Item = (String, String)>,
{
    envy::prefixed("LOG_")
        .from_iter::<_, LoggingConfig>(vars)
        .context("cannot read logging config:")
}

pub fn tracing_init(conf: LoggingConfig) -> Result<()> {
    let subscriber = setup_layer_from_logging_config(&conf)?;
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")?;
    tracing::debug!("logging initialized for {}", conf.app_service_name());
    Ok(())
}

pub fn tracing_init_from_env() -> Result<()> {
    match load_tracing_config_from_env() {
        Ok(conf) => tracing_init(conf),
        Err(e) => {
            tracing::warn!("failed to load logging config from env: {:?}", e);
            Err(e)
        }
    }
}

pub fn setup_layer_from_logging_config(
    conf: &LoggingConfig,
) -> Result<Box<dyn Subscriber + Send + Sync + 'static>> {
    let lv = tracing::Level::from_str(conf.level.as_deref().unwrap_or("INFO"))
        .unwrap_or(tracing::Level::INFO);
    let filter = filter::Targets::new().with_default(lv);
    // RUST_LOG narrows further; without it the configured level applies
    let env_filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(filter::LevelFilter::from_level(lv).into())
        .from_env_lossy();

    let dir = match conf.file_dir.as_ref() {
        Some(d) => PathBuf::from_str(d).context("Invalid log file directory")?,
        None => env::current_dir().context("cannot resolve current directory")?,
    };

    let log_file = match conf.file_name.as_deref() {
        Some(file_name) => {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("create log file directory {:?}", dir))?;
            let path = dir.join(file_name);
            Some(File::create(&path).with_context(|| format!("create log file {:?}", path))?)
        }
        None => None,
    };
    let (json_file, plain_file) = match log_file {
        Some(f) if conf.use_json => (Some(f), None),
        Some(f) => (None, Some(f)),
        None => (None, None),
    };

    let subscriber = Box::new(
        tracing_subscriber::registry()
            .with(filter)
            .with(env_filter)
            .with(json_file.map(|f| {
                Layer::new()
                    .with_writer(f.with_max_level(lv))
                    .with_ansi(false)
                    .json()
            }))
            .with(plain_file.map(|f| {
                Layer::new()
                    .with_writer(f.with_max_level(lv))
                    .with_ansi(false)
            }))
            .with(if !conf.use_json && conf.use_stdout {
                Some(tracing_subscriber::fmt::layer().pretty())
            } else {
                None
            })
            .with(if conf.use_json && conf.use_stdout {
                Some(tracing_subscriber::fmt::layer().json())
            } else {
                None
            }),
    );
    Ok(subscriber)
}

// for simple stdout logging
pub fn tracing_init_test(level: tracing::Level) {
    let _ = tracing_subscriber::fmt().with_max_level(level).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_load_config_defaults() {
        let conf = load_tracing_config_from_vars(vars(&[])).unwrap();
        assert_eq!(conf, LoggingConfig::default());
        assert_eq!(conf.app_service_name(), "text-segments");
    }

    #[test]
    fn test_load_config_from_vars() {
        let conf = load_tracing_config_from_vars(vars(&[
            ("LOG_LEVEL", "DEBUG"),
            ("LOG_FILE_NAME", "segments.log"),
            ("LOG_USE_JSON", "true"),
            ("LOG_USE_STDOUT", "false"),
        ]))
        .unwrap();
        assert_eq!(conf.level.as_deref(), Some("DEBUG"));
        assert_eq!(conf.file_name.as_deref(), Some("segments.log"));
        assert!(conf.use_json);
        assert!(!conf.use_stdout);
    }

    #[test]
    fn test_setup_layer_creates_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let log_dir = dir.path().join("logs");
        let conf = LoggingConfig {
            level: Some("debug".to_string()),
            file_name: Some("segments.log".to_string()),
            file_dir: Some(log_dir.to_string_lossy().into_owned()),
            use_stdout: false,
            ..LoggingConfig::default()
        };

        let subscriber = setup_layer_from_logging_config(&conf).unwrap();
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("split finished");
        });

        let written = std::fs::read_to_string(log_dir.join("segments.log")).unwrap();
        assert!(written.contains("split finished"));
    }

    #[test]
    fn test_init_test_logger_twice() {
        tracing_init_test(tracing::Level::DEBUG);
        tracing_init_test(tracing::Level::DEBUG);
    }
}
