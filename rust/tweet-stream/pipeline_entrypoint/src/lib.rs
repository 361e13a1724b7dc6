#![deny(missing_docs)]
//! This crate provides a standardized initialization process that should be used across the
//! pipeline's lambda entrypoints. This is used to provide consistent behaviour with e.g. tracing
//! configurations

use pipeline_env::{Environment, VarNameErr};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// The variable used to select the log level
pub const LOG_LEVEL_VAR: &str = "LOG_LEVEL";

/// The verbosity the binary logs at when `RUST_LOG` is not set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// most verbose
    Trace,
    /// debug output, including every forwarded tweet
    Debug,
    /// the default
    #[default]
    Info,
    /// warnings and errors only
    Warn,
    /// errors only
    Error,
}

/// Represents a value which cannot be converted into a [LogLevel]
#[derive(Debug, Error)]
#[error("Could not convert {0} into a log level")]
pub struct UnknownLogLevel(String);

impl FromStr for LogLevel {
    type Err = UnknownLogLevel;

    /// accepts `WARNING` and `CRITICAL` as aliases alongside the tracing level names
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "" | "INFO" => Ok(LogLevel::Info),
            "TRACE" => Ok(LogLevel::Trace),
            "DEBUG" => Ok(LogLevel::Debug),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "ERROR" | "CRITICAL" => Ok(LogLevel::Error),
            _ => Err(UnknownLogLevel(s.to_string())),
        }
    }
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

/// An error which can occur when reading the [LogLevel] from the environment
#[derive(Debug, Error)]
pub enum LogLevelErr {
    /// the variable exists but could not be read
    #[error("{0}")]
    VarErr(#[from] VarNameErr),
    /// the variable held an unknown level
    #[error("{0}")]
    InvalidValue(#[from] UnknownLogLevel),
}

impl LogLevel {
    /// Read `LOG_LEVEL` through `lookup`, defaulting to [LogLevel::Info] when unset
    pub fn from_lookup<F>(lookup: &F) -> Result<Self, LogLevelErr>
    where
        F: Fn(&'static str) -> Result<String, VarNameErr>,
    {
        match pipeline_env::read_optional(lookup, LOG_LEVEL_VAR)? {
            Some(level) => Ok(level.parse()?),
            None => Ok(LogLevel::default()),
        }
    }
}

/// struct which defines the behaviour for instantiation
#[derive(Debug)]
pub struct PipelineEntrypoint {
    env: Environment,
    level: LogLevel,
    /// an unusable `LOG_LEVEL`, reported once tracing is up
    level_err: Option<LogLevelErr>,
}

/// sentinel struct which guarantees that we called [PipelineEntrypoint::init]
#[derive(Debug)]
pub struct InitializedEntrypoint(());

impl PipelineEntrypoint {
    /// Load `.env` and then read `ENVIRONMENT` and `LOG_LEVEL` from the process environment,
    /// so values from the file apply to both
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self::from_lookup(&pipeline_env::read_env)
    }

    /// Read `ENVIRONMENT` and `LOG_LEVEL` through `lookup`.
    /// An unknown environment means production and an unusable level means [LogLevel::Info].
    pub fn from_lookup<F>(lookup: &F) -> Self
    where
        F: Fn(&'static str) -> Result<String, VarNameErr>,
    {
        let (level, level_err) = match LogLevel::from_lookup(lookup) {
            Ok(level) => (level, None),
            Err(e) => (LogLevel::default(), Some(e)),
        };

        Self {
            env: Environment::from_lookup_or_prod(lookup),
            level,
            level_err,
        }
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.level.to_string()))
    }

    /// consume self, initialize this binary, and return a proof that it was initialized [InitializedEntrypoint]
    pub fn init(self) -> InitializedEntrypoint {
        std::panic::set_hook(Box::new(tracing_panic::panic_hook));

        match self.env {
            Environment::Local => {
                tracing_subscriber::fmt()
                    .with_ansi(true)
                    .with_env_filter(self.env_filter())
                    .with_file(true)
                    .with_line_number(true)
                    .pretty()
                    .init();
            }
            Environment::Production | Environment::Develop => {
                tracing_subscriber::fmt()
                    .with_ansi(false)
                    .with_env_filter(self.env_filter())
                    .with_file(true)
                    .with_line_number(true)
                    .json()
                    .with_current_span(true)
                    .with_span_list(false)
                    .flatten_event(true)
                    .init();
            }
        }

        if let Some(err) = self.level_err {
            tracing::warn!(error=%err, level=%self.level, "ignoring unusable LOG_LEVEL");
        }

        InitializedEntrypoint(())
    }
}
