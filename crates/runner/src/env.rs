// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the runner crate.

use std::path::PathBuf;
use std::time::Duration;

pub const INTERVAL_MS_VAR: &str = "AUTHSYNC_INTERVAL_MS";
pub const CONCURRENCY_VAR: &str = "AUTHSYNC_CONCURRENCY";
pub const SKIP_DEREGISTER_VAR: &str = "AUTHSYNC_SKIP_DEREGISTER";
pub const LOG_VAR: &str = "AUTHSYNC_LOG";
pub const LOG_DIR_VAR: &str = "AUTHSYNC_LOG_DIR";

const DEFAULT_INTERVAL: Duration = Duration::from_secs(15 * 60);
const DEFAULT_CONCURRENCY: usize = 4;
const DEFAULT_LOG_FILTER: &str = "info";

/// Runner configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Time between ticks
    pub interval: Duration,
    /// Max prefix groups reconciled at once (at least 1)
    pub concurrency: usize,
    /// Force register-only runs for every job
    pub skip_deregister: bool,
    /// `tracing_subscriber::EnvFilter` directives
    pub log_filter: String,
    /// When set, logs go to a daily rolling file here instead of stderr
    pub log_dir: Option<PathBuf>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            concurrency: DEFAULT_CONCURRENCY,
            skip_deregister: false,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            log_dir: None,
        }
    }
}

impl RunnerConfig {
    authsync_core::setters! {
        into { log_filter: String }
        set {
            interval: Duration,
            concurrency: usize,
            skip_deregister: bool,
        }
        option { log_dir: PathBuf }
    }

    /// Load configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through `lookup`; unset or unparsable values fall
    /// back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            interval: lookup(INTERVAL_MS_VAR)
                .and_then(|s| s.parse::<u64>().ok())
                .filter(|ms| *ms > 0)
                .map(Duration::from_millis)
                .unwrap_or(defaults.interval),
            concurrency: lookup(CONCURRENCY_VAR)
                .and_then(|s| s.parse::<usize>().ok())
                .map(|n| n.max(1))
                .unwrap_or(defaults.concurrency),
            skip_deregister: lookup(SKIP_DEREGISTER_VAR).is_some_and(|s| parse_flag(&s)),
            log_filter: lookup(LOG_VAR).filter(|s| !s.is_empty()).unwrap_or(defaults.log_filter),
            log_dir: lookup(LOG_DIR_VAR).filter(|s| !s.is_empty()).map(PathBuf::from),
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
