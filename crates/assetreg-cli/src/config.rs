//! # CLI Configuration
//!
//! Resolution order for the snapshot path: `--state` flag, then the
//! `ASSETREG_STATE` environment variable, then `world-state.json` in the
//! working directory.

use std::ffi::OsString;
use std::path::PathBuf;

/// Environment variable naming the snapshot file.
pub const STATE_ENV: &str = "ASSETREG_STATE";

/// Snapshot path used when neither the flag nor the environment sets one.
pub const DEFAULT_STATE_PATH: &str = "world-state.json";

/// Resolved host configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// World-state snapshot file.
    pub state_path: PathBuf,
    /// Number of `-v` flags given.
    pub verbosity: u8,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            state_path: PathBuf::from(DEFAULT_STATE_PATH),
            verbosity: 0,
        }
    }
}

impl CliConfig {
    /// Resolve configuration from the command-line flag and the process
    /// environment.
    pub fn resolve(state_flag: Option<PathBuf>, verbosity: u8) -> Self {
        Self::resolve_with(state_flag, std::env::var_os(STATE_ENV), verbosity)
    }

    /// Resolve configuration from explicit inputs.
    pub fn resolve_with(
        state_flag: Option<PathBuf>,
        state_env: Option<OsString>,
        verbosity: u8,
    ) -> Self {
        let state_path = state_flag
            .or_else(|| state_env.filter(|v| !v.is_empty()).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_PATH));
        Self {
            state_path,
            verbosity,
        }
    }

    /// Tracing filter directive for the configured verbosity.
    pub fn log_directive(&self) -> &'static str {
        match self.verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
