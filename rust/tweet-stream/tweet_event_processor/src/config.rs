use pipeline_env::VarNameErr;
use thiserror::Error;

pub const DEFAULT_TTL_DAYS: u32 = 7;

#[derive(Debug, Clone)]
pub struct Config {
    /// The dynamodb table tweets are written to
    pub ddb_table: String,

    /// Days until a stored tweet expires
    pub ttl_days: u32,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be provided")]
    Missing(&'static str),
    #[error("{var} must be a whole number of days, got {value:?}")]
    InvalidTtl { var: &'static str, value: String },
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
        let ddb_table = pipeline_env::read_optional(lookup, "DDB_TABLE")?
            .ok_or(ConfigError::Missing("DDB_TABLE"))?;

        let ttl_days = match pipeline_env::read_optional(lookup, "DDB_TTL_DAYS")? {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidTtl {
                    var: "DDB_TTL_DAYS",
                    value,
                })?,
            None => DEFAULT_TTL_DAYS,
        };

        Ok(Config {
            ddb_table,
            ttl_days,
        })
    }
}
