use pipeline_env::VarNameErr;
use thiserror::Error;

use crate::process::{FailurePolicy, UnknownPolicy};

#[derive(Debug, Clone)]
pub struct Config {
    /// How a record that cannot be transformed affects its batch
    pub failure_policy: FailurePolicy,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Var(#[from] VarNameErr),
    #[error("RECORD_FAILURE_POLICY is invalid: {0}")]
    FailurePolicy(#[from] UnknownPolicy),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&pipeline_env::read_env)
    }

    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Result<String, VarNameErr>,
    {
        let failure_policy = pipeline_env::read_optional(lookup, "RECORD_FAILURE_POLICY")?
            .map(|policy| policy.parse())
            .transpose()?
            .unwrap_or_default();

        Ok(Config { failure_policy })
    }
}
