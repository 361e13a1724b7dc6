#![deny(missing_docs)]
//! This crate provides typed access to the environment variables the pipeline binaries are
//! configured with, and the [Environment] the process is running in.

use std::{fmt::Display, str::FromStr};
use thiserror::Error;

/// The name of the variable which selects the [Environment]
pub const ENVIRONMENT_VAR: &str = "ENVIRONMENT";

/// The type of error that is produced when an environment variable cannot be read
#[derive(Debug, Error)]
#[error("An error occurred while reading envvar: {var_name}. Err: {err}")]
pub struct VarNameErr {
    var_name: &'static str,
    err: std::env::VarError,
}

impl VarNameErr {
    /// create an error for a variable that is not set
    pub fn not_present(var_name: &'static str) -> Self {
        Self {
            var_name,
            err: std::env::VarError::NotPresent,
        }
    }

    /// the name of the variable that could not be read
    pub fn var_name(&self) -> &'static str {
        self.var_name
    }

    /// true if the variable was absent rather than malformed
    pub fn is_not_present(&self) -> bool {
        matches!(self.err, std::env::VarError::NotPresent)
    }
}

/// Read a variable from the process environment
pub fn read_env(var_name: &'static str) -> Result<String, VarNameErr> {
    std::env::var(var_name).map_err(|err| VarNameErr { var_name, err })
}

/// Read an optional variable through `lookup`.
/// A variable that is absent or set to an empty string yields [None]
pub fn read_optional<F>(lookup: &F, var_name: &'static str) -> Result<Option<String>, VarNameErr>
where
    F: Fn(&'static str) -> Result<String, VarNameErr>,
{
    match lookup(var_name) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_not_present() => Ok(None),
        Err(e) => Err(e),
    }
}

/// Where a pipeline binary is running, selected by `ENVIRONMENT`
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// `prod`: the deployed pipeline
    Production,
    /// `dev`: a pipeline deployed to a development account
    Develop,
    /// `local`: a developer machine, usually configured through a `.env` file
    Local,
}

/// Why `ENVIRONMENT` could not be turned into an [Environment]
#[derive(Debug, Error)]
pub enum EnvironmentErr {
    /// the variable could not be read
    #[error(transparent)]
    Var(#[from] VarNameErr),
    /// the variable named no known environment
    #[error(transparent)]
    Unknown(#[from] UnknownValue),
}

impl Environment {
    /// the value of `ENVIRONMENT` selecting this environment
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Production => "prod",
            Environment::Develop => "dev",
            Environment::Local => "local",
        }
    }

    /// Read `ENVIRONMENT` through `lookup`
    #[tracing::instrument(err, level = tracing::Level::TRACE, skip(lookup))]
    pub fn from_lookup<F>(lookup: &F) -> Result<Self, EnvironmentErr>
    where
        F: Fn(&'static str) -> Result<String, VarNameErr>,
    {
        Ok(lookup(ENVIRONMENT_VAR)?.parse()?)
    }

    /// Read `ENVIRONMENT` through `lookup`, treating anything unreadable as production
    pub fn from_lookup_or_prod<F>(lookup: &F) -> Self
    where
        F: Fn(&'static str) -> Result<String, VarNameErr>,
    {
        Self::from_lookup(lookup).unwrap_or(Environment::Production)
    }

    /// [Environment::from_lookup_or_prod] over the process environment
    pub fn new_or_prod() -> Self {
        Self::from_lookup_or_prod(&read_env)
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An `ENVIRONMENT` value naming no known [Environment]
#[derive(Debug, Error)]
#[error("{0:?} is not an environment, expected prod, dev or local")]
pub struct UnknownValue(String);

impl FromStr for Environment {
    type Err = UnknownValue;

    fn from_str(value: &str) -> Result<Self, UnknownValue> {
        [
            Environment::Production,
            Environment::Develop,
            Environment::Local,
        ]
        .into_iter()
        .find(|env| env.as_str().eq_ignore_ascii_case(value.trim()))
        .ok_or_else(|| UnknownValue(value.to_string()))
    }
}
