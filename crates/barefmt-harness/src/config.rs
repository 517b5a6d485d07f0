//! Harness configuration.
//!
//! Settings come from CLI flags first and fall back to the environment:
//! - `BAREFMT_LOG_LEVEL`: minimum structured-log level (`trace` .. `fatal`,
//!   default `info`).
//! - `BAREFMT_LOG`: path of a JSONL log file. When unset, logs go to stderr.

use std::path::PathBuf;
use std::sync::OnceLock;

use crate::structured_log::{LogEmitter, LogLevel};

pub const ENV_LOG_LEVEL: &str = "BAREFMT_LOG_LEVEL";
pub const ENV_LOG_PATH: &str = "BAREFMT_LOG";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HarnessConfig {
    pub min_level: LogLevel,
    pub log_path: Option<PathBuf>,
}

impl HarnessConfig {
    /// Build from explicit values, leaving gaps for [`HarnessConfig::with_env_fallback`].
    #[must_use]
    pub fn from_values(level: Option<&str>, log_path: Option<PathBuf>) -> Self {
        Self {
            min_level: level.map(LogLevel::from_str_loose).unwrap_or_default(),
            log_path,
        }
    }

    /// Fill `log_path` and an unset level from the process environment.
    #[must_use]
    pub fn with_env_fallback(self, level_given: bool) -> Self {
        let env = env_config();
        Self {
            min_level: if level_given {
                self.min_level
            } else {
                env.min_level
            },
            log_path: self.log_path.or_else(|| env.log_path.clone()),
        }
    }

    /// Open the emitter this configuration describes.
    pub fn emitter(&self, run_id: &str) -> std::io::Result<LogEmitter> {
        match &self.log_path {
            Some(path) => LogEmitter::to_file(path, run_id, self.min_level),
            None => Ok(LogEmitter::to_stderr(run_id, self.min_level)),
        }
    }
}

static ENV_CONFIG: OnceLock<HarnessConfig> = OnceLock::new();

/// Configuration read from the environment (reads on first call, caches thereafter).
#[must_use]
pub fn env_config() -> &'static HarnessConfig {
    ENV_CONFIG.get_or_init(|| HarnessConfig {
        min_level: std::env::var(ENV_LOG_LEVEL)
            .map(|v| LogLevel::from_str_loose(&v))
            .unwrap_or_default(),
        log_path: std::env::var_os(ENV_LOG_PATH)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from),
    })
}
