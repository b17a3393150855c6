//! XML configuration support.
//! - Reads config.xml with quick_xml + serde.
//! - Unknown elements are rejected so typos surface instead of being ignored.
//! - Every element is optional; absent ones keep their defaults.
//!
//! Example:
//! ```xml
//! <config>
//!   <copy_buffer_size>65536</copy_buffer_size>
//!   <durability>data</durability>
//!   <preserve_times>true</preserve_times>
//!   <log_level>info</log_level>
//!   <log_file>/var/log/cfs.log</log_file>
//! </config>
//! ```

use anyhow::{anyhow, Context, Result};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::paths::default_config_path;
use super::types::{Config, LogLevel};
use crate::fs_ops::DurabilityMode;

/// Struct mirroring the XML config for deserialization.
/// Values stay strings so they can be trimmed and reported precisely.
#[derive(Debug, Default, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    copy_buffer_size: Option<String>,
    durability: Option<String>,
    preserve_times: Option<String>,
    log_level: Option<String>,
    log_file: Option<String>,
}

/// Trimmed, non-empty text of an optional element.
fn text(v: &Option<String>) -> Option<&str> {
    v.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn parse_bool(field: &str, s: &str) -> Result<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        other => Err(anyhow!("{field}: expected true/false, got '{other}'")),
    }
}

fn xml_to_config(parsed: XmlConfig) -> Result<Config> {
    let mut cfg = Config::default();

    if let Some(s) = text(&parsed.copy_buffer_size) {
        cfg.copy_buffer_size = s
            .parse::<usize>()
            .with_context(|| format!("copy_buffer_size: '{s}' is not a byte count"))?;
    }
    if let Some(s) = text(&parsed.durability) {
        cfg.durability = s.parse::<DurabilityMode>().map_err(|e| anyhow!("durability: {e}"))?;
    }
    if let Some(s) = text(&parsed.preserve_times) {
        cfg.preserve_times = parse_bool("preserve_times", s)?;
    }
    if let Some(s) = text(&parsed.log_level) {
        cfg.log_level = s.parse::<LogLevel>().map_err(|e| anyhow!("log_level: {e}"))?;
    }
    cfg.log_file = text(&parsed.log_file).map(PathBuf::from);

    Ok(cfg)
}

/// Parse config XML text. Blank input yields the defaults. The result is not
/// validated; see [`Config::validate`].
pub fn parse_config_str(contents: &str) -> Result<Config> {
    if contents.trim().is_empty() {
        return Ok(Config::default());
    }
    let parsed: XmlConfig = from_xml_str(contents).context("parse config xml")?;
    xml_to_config(parsed)
}

/// Load and validate a Config from a specific XML file.
pub fn load_config_from_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    let cfg = parse_config_str(&contents)
        .with_context(|| format!("load config xml '{}'", path.display()))?;
    cfg.validate()
        .with_context(|| format!("validate config xml '{}'", path.display()))?;
    debug!(path = %path.display(), "loaded config");
    Ok(cfg)
}

/// Load from `$CFS_CONFIG` or the platform default path. A missing file means
/// defaults; a present but malformed file is an error.
pub fn load_config() -> Result<Config> {
    let path = default_config_path().context("resolve config path")?;
    if !path.exists() {
        info!(path = %path.display(), "no config file; using defaults");
        return Ok(Config::default());
    }
    load_config_from_path(&path)
}
