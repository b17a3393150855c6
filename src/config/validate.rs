//! Config validation: buffer bounds and a safe log file location.

use anyhow::{bail, Context, Result};
use tracing::debug;

use super::paths::path_has_symlink_ancestor;
use super::types::Config;
use super::{MAX_BUFFER_SIZE, MIN_BUFFER_SIZE};

impl Config {
    pub fn validate(&self) -> Result<()> {
        if !(MIN_BUFFER_SIZE..=MAX_BUFFER_SIZE).contains(&self.copy_buffer_size) {
            bail!(
                "copy_buffer_size {} is outside {}..={} bytes",
                self.copy_buffer_size,
                MIN_BUFFER_SIZE,
                MAX_BUFFER_SIZE
            );
        }

        if let Some(log) = &self.log_file {
            if log.is_dir() {
                bail!("log_file '{}' is a directory", log.display());
            }
            let linked = path_has_symlink_ancestor(log)
                .with_context(|| format!("inspect ancestors of log_file '{}'", log.display()))?;
            if linked {
                bail!("refusing log_file '{}': an ancestor is a symlink", log.display());
            }
        }

        debug!(
            buffer = self.copy_buffer_size,
            durability = ?self.durability,
            log_level = %self.log_level,
            "config validated"
        );
        Ok(())
    }
}
