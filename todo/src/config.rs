//! Configuration for the todo shell.
//!
//! Loads configuration from environment variables with sensible defaults.
//! Nothing here reaches the reducer itself; it only decides how the store
//! and logging are set up.

use crate::reducer::TodoEnvironment;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use todo_core::environment::SequentialIds;
use todo_runtime::{DEFAULT_MAX_FEEDBACK_ACTIONS, StoreConfig};

/// Default tracing filter, used when `RUST_LOG` and `TODO_LOG` are unset
pub const DEFAULT_LOG_FILTER: &str = "todo_store=info,todo_runtime=warn";

/// Configuration error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Value could not be parsed as a number
    #[error("{var} must be a positive integer, got `{value}`")]
    InvalidNumber {
        /// Variable name
        var: &'static str,
        /// Offending value
        value: String,
    },

    /// Value parsed but is below the allowed minimum
    #[error("{var} must be at least 1")]
    Zero {
        /// Variable name
        var: &'static str,
    },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoConfig {
    /// Tracing filter directive (`TODO_LOG`)
    pub log_filter: String,
    /// First id handed out (`TODO_FIRST_ID`)
    pub first_id: u64,
    /// Runtime feedback limit (`TODO_MAX_FEEDBACK`)
    ///
    /// Only reducers that return `Effect::Send` can reach it. `TodoReducer`
    /// feeds nothing back, so with it every action reduces exactly once and
    /// any value is enough.
    pub max_feedback_actions: usize,
}

impl Default for TodoConfig {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            first_id: 1,
            max_feedback_actions: DEFAULT_MAX_FEEDBACK_ACTIONS,
        }
    }
}

impl TodoConfig {
    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let log_filter = lookup("TODO_LOG")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.log_filter);

        let first_id = match lookup("TODO_FIRST_ID") {
            Some(value) => parse_positive::<u64>("TODO_FIRST_ID", &value)?,
            None => defaults.first_id,
        };

        let max_feedback_actions = match lookup("TODO_MAX_FEEDBACK") {
            Some(value) => parse_positive::<usize>("TODO_MAX_FEEDBACK", &value)?,
            None => defaults.max_feedback_actions,
        };

        Ok(Self {
            log_filter,
            first_id,
            max_feedback_actions,
        })
    }

    /// Environment with a sequential id generator starting at `first_id`
    #[must_use]
    pub fn environment(&self) -> TodoEnvironment {
        TodoEnvironment::new(Arc::new(SequentialIds::starting_at(self.first_id)))
    }

    /// Runtime configuration
    #[must_use]
    pub const fn store_config(&self) -> StoreConfig {
        StoreConfig::new(self.max_feedback_actions)
    }
}

fn parse_positive<T>(var: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialEq + From<u8>,
{
    let parsed = value
        .trim()
        .parse::<T>()
        .map_err(|_| ConfigError::InvalidNumber {
            var,
            value: value.to_string(),
        })?;
    if parsed == T::from(0) {
        return Err(ConfigError::Zero { var });
    }
    Ok(parsed)
}
