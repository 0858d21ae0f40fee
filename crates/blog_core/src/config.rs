//! Run configuration for the blog demo.
//!
//! There is no environment or flag parsing: the defaults below are what the
//! binary runs with. Tests and embedders build their own `BlogConfig`.

use crate::logging::default_log_level;
use std::path::PathBuf;

/// Database file used when no other path is configured.
pub const DEFAULT_DB_PATH: &str = "my_blog.db";
/// Log directory, relative to the working directory.
pub const DEFAULT_LOG_DIR: &str = "logs";

/// Storage and logging settings for one process run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogConfig {
    /// SQLite database file.
    pub db_path: PathBuf,
    /// Log every executed SQL statement at debug level.
    pub echo_sql: bool,
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Rolling log directory. Relative paths resolve against the cwd.
    pub log_dir: PathBuf,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            echo_sql: true,
            log_level: default_log_level().to_string(),
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
        }
    }
}

impl BlogConfig {
    /// Returns `log_dir` as an absolute path.
    ///
    /// # Errors
    /// - Returns an error when the current directory cannot be read.
    pub fn resolved_log_dir(&self) -> std::io::Result<PathBuf> {
        if self.log_dir.is_absolute() {
            return Ok(self.log_dir.clone());
        }
        Ok(std::env::current_dir()?.join(&self.log_dir))
    }
}
