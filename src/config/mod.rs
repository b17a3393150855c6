//! Library configuration: types, default paths, XML loading and validation.

pub mod paths;
pub mod types;
mod validate;
pub mod xml;

pub use paths::{default_config_path, default_log_path, path_has_symlink_ancestor};
pub use types::{Config, LogLevel};
pub use xml::{load_config, load_config_from_path, parse_config_str};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "CFS_CONFIG";

/// Smallest accepted copy chunk (4 KiB).
pub const MIN_BUFFER_SIZE: usize = 4 * 1024;
/// Largest accepted copy chunk (64 MiB).
pub const MAX_BUFFER_SIZE: usize = 64 * 1024 * 1024;
