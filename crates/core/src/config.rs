use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::validation::{NumericParsePolicy, Validator};

pub const CONFIG_FILE_CANDIDATES: [&str; 2] = ["advisor.toml", "config/advisor.toml"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub validation: ValidationConfig,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationConfig {
    pub numeric_policy: NumericParsePolicy,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub log_level: Option<String>,
    pub log_format: Option<LogFormat>,
    pub numeric_policy: Option<NumericParsePolicy>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("advisor config `{path}` is unreadable: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("advisor config `{path}` is not valid TOML: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("advisor config `{0}` does not exist")]
    MissingConfigFile(PathBuf),
    #[error("`${{{var}}}` in advisor config: {reason}")]
    Interpolation { var: String, reason: &'static str },
    #[error("`{key}` has unusable value `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("invalid advisor configuration: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
            validation: ValidationConfig { numeric_policy: NumericParsePolicy::Strict },
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let format = match value.trim() {
            raw if raw.eq_ignore_ascii_case("compact") => Self::Compact,
            raw if raw.eq_ignore_ascii_case("pretty") => Self::Pretty,
            raw if raw.eq_ignore_ascii_case("json") => Self::Json,
            other => {
                return Err(ConfigError::Validation(format!(
                    "logging.format `{other}` is not one of compact|pretty|json"
                )))
            }
        };
        Ok(format)
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        match resolve_config_path(options.config_path.as_deref()) {
            Some(path) => {
                let file = read_patch(&path)?;
                let logging = file.logging.unwrap_or_default();
                let validation = file.validation.unwrap_or_default();
                config.layer(logging.level, logging.format, validation.numeric_policy);
            }
            None if options.require_file => {
                let expected =
                    options.config_path.unwrap_or_else(|| PathBuf::from(CONFIG_FILE_CANDIDATES[0]));
                return Err(ConfigError::MissingConfigFile(expected));
            }
            None => {}
        }

        let env_layer = EnvLayer::read()?;
        config.layer(env_layer.level, env_layer.format, env_layer.numeric_policy);

        let ConfigOverrides { log_level, log_format, numeric_policy } = options.overrides;
        config.layer(log_level, log_format, numeric_policy);

        config.validate()?;
        Ok(config)
    }

    pub fn validator(&self) -> Validator {
        Validator::new(self.validation.numeric_policy)
    }

    /// Applies one precedence layer; `None` leaves the lower layer's value.
    fn layer(
        &mut self,
        level: Option<String>,
        format: Option<LogFormat>,
        numeric_policy: Option<NumericParsePolicy>,
    ) {
        if let Some(level) = level {
            self.logging.level = level;
        }
        if let Some(format) = format {
            self.logging.format = format;
        }
        if let Some(numeric_policy) = numeric_policy {
            self.validation.numeric_policy = numeric_policy;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_logging(&self.logging)
    }
}

/// Values taken from `ADVISOR_*` variables. The short `ADVISOR_LOG_*` names
/// are accepted when the long form is unset.
#[derive(Debug, Default)]
struct EnvLayer {
    level: Option<String>,
    format: Option<LogFormat>,
    numeric_policy: Option<NumericParsePolicy>,
}

impl EnvLayer {
    fn read() -> Result<Self, ConfigError> {
        let level = read_env("ADVISOR_LOGGING_LEVEL").or_else(|| read_env("ADVISOR_LOG_LEVEL"));
        let format = read_env("ADVISOR_LOGGING_FORMAT")
            .or_else(|| read_env("ADVISOR_LOG_FORMAT"))
            .map(|value| value.parse::<LogFormat>())
            .transpose()?;
        let numeric_policy = parse_env::<NumericParsePolicy>("ADVISOR_VALIDATION_NUMERIC_POLICY")?;

        Ok(Self { level, format, numeric_policy })
    }
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    read_env(key)
        .map(|value| {
            value.parse::<T>().map_err(|_| ConfigError::InvalidEnvOverride {
                key: key.to_string(),
                value,
            })
        })
        .transpose()
}

pub fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    CONFIG_FILE_CANDIDATES.into_iter().map(PathBuf::from).find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let to_path = || path.to_path_buf();
    let text = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: to_path(), source })
        .and_then(|raw| interpolate_env_vars(&raw))?;

    toml::from_str(&text).map_err(|source| ConfigError::ParseFile { path: to_path(), source })
}

/// Expands `${VAR}` references in the raw file text before TOML parsing.
fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(open) = rest.find("${") {
        output.push_str(&rest[..open]);
        let after_open = &rest[open + 2..];
        let Some(close) = after_open.find('}') else {
            return Err(ConfigError::Interpolation {
                var: after_open.lines().next().unwrap_or_default().to_string(),
                reason: "missing closing brace",
            });
        };

        let var = &after_open[..close];
        let value = env::var(var).map_err(|_| ConfigError::Interpolation {
            var: var.to_string(),
            reason: "variable is not set",
        })?;
        output.push_str(&value);
        rest = &after_open[close + 1..];
    }

    output.push_str(rest);
    Ok(output)
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim();
    if LOG_LEVELS.iter().any(|known| level.eq_ignore_ascii_case(known)) {
        return Ok(());
    }
    Err(ConfigError::Validation(format!(
        "logging.level `{level}` is not one of {}",
        LOG_LEVELS.join("|")
    )))
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    logging: Option<LoggingPatch>,
    validation: Option<ValidationPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}

#[derive(Debug, Default, Deserialize)]
struct ValidationPatch {
    numeric_policy: Option<NumericParsePolicy>,
}
