use pipeline_env::VarNameErr;
use thiserror::Error;

/// Worldwide
pub const DEFAULT_WOEID: &str = "1";

#[derive(Debug, Clone)]
pub struct Config {
    /// The kinesis stream tweets are published to
    pub kinesis_stream_name: String,

    /// The yahoo where-on-earth id trends are looked up for
    pub woeid: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be provided")]
    Missing(&'static str),
    #[error("{var} must be a numeric location id, got {value:?}")]
    InvalidWoeid { var: &'static str, value: String },
    #[error(transparent)]
    Var(#[from] VarNameErr),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&pipeline_env::read_env)
    }

    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Result<String, VarNameErr>,
    {
        let kinesis_stream_name = pipeline_env::read_optional(lookup, "KINESIS_STREAM_NAME")?
            .ok_or(ConfigError::Missing("KINESIS_STREAM_NAME"))?;

        let woeid = pipeline_env::read_optional(lookup, "WOEID")?
            .map(|woeid| woeid.trim().to_string())
            .unwrap_or_else(|| DEFAULT_WOEID.to_string());

        if !woeid.chars().all(|c| c.is_ascii_digit()) {
            return Err(ConfigError::InvalidWoeid {
                var: "WOEID",
                value: woeid,
            });
        }

        Ok(Config {
            kinesis_stream_name,
            woeid,
        })
    }
}
