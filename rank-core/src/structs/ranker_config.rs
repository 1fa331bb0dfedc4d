//! Ranker knobs read from the environment.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::rank_error::RankError;

/// Products returned to the agent.
pub const RESULT_LIMIT: usize = 4;

/// Candidates kept from the index before scoring.
pub const CANDIDATE_LIMIT: usize = 20;

/// Runtime configuration of [`crate::ranker::ProductRanker`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankerConfig {
    /// Candidates requested from the index (over-fetch, at least 5x the result size).
    pub fetch_k: usize,
    /// Upper bound on a single index call, in seconds.
    pub search_timeout_secs: u64,
}

impl Default for RankerConfig {
    fn default() -> Self {
        Self {
            fetch_k: CANDIDATE_LIMIT,
            search_timeout_secs: 10,
        }
    }
}

impl RankerConfig {
    /// Build configuration from environment variables.
    ///
    /// Environment variables used:
    /// - `RANK_FETCH_K` (default: 20, must be >= 20)
    /// - `RANK_SEARCH_TIMEOUT_SECS` (default: 10, must be > 0)
    pub fn from_env() -> Result<Self, RankError> {
        let defaults = Self::default();
        let cfg = Self {
            fetch_k: env_or("RANK_FETCH_K", defaults.fetch_k)?,
            search_timeout_secs: env_or("RANK_SEARCH_TIMEOUT_SECS", defaults.search_timeout_secs)?,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), RankError> {
        if self.fetch_k < RESULT_LIMIT * 5 {
            return Err(RankError::InvalidConfig(format!(
                "RANK_FETCH_K must be >= {}",
                RESULT_LIMIT * 5
            )));
        }
        if self.search_timeout_secs == 0 {
            return Err(RankError::InvalidConfig(
                "RANK_SEARCH_TIMEOUT_SECS must be > 0".into(),
            ));
        }
        Ok(())
    }

    pub fn search_timeout(&self) -> Duration {
        Duration::from_secs(self.search_timeout_secs)
    }
}

/// Read and parse an env variable, with error mapped to `RankError`.
fn read_env<T: std::str::FromStr>(key: &str) -> Result<T, RankError> {
    match std::env::var(key) {
        Ok(v) => v.trim().parse::<T>().map_err(|_| RankError::EnvParse {
            key: key.into(),
            value: v,
        }),
        Err(_) => Err(RankError::EnvMissing { key: key.into() }),
    }
}

/// Like [`read_env`], but an unset variable yields `default`.
fn env_or<T: std::str::FromStr>(key: &str, default: T) -> Result<T, RankError> {
    match read_env(key) {
        Err(RankError::EnvMissing { .. }) => Ok(default),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = RankerConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.search_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn small_fetch_k_is_rejected() {
        let cfg = RankerConfig {
            fetch_k: 8,
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(RankError::InvalidConfig(_))));
    }

    #[test]
    fn unset_env_falls_back_to_default() {
        let v: usize = env_or("RANK_CORE_TEST_SURELY_UNSET_VAR", 7).unwrap();
        assert_eq!(v, 7);
    }
}
