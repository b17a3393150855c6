use serial_test::serial;
use std::fs;
use tempfile::tempdir;

use cfs::config::{default_config_path, load_config, CONFIG_ENV};
use cfs::{Config, DurabilityMode, LogLevel};

struct EnvGuard;

impl EnvGuard {
    fn set(value: &std::path::Path) -> Self {
        unsafe { std::env::set_var(CONFIG_ENV, value) };
        EnvGuard
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        unsafe { std::env::remove_var(CONFIG_ENV) };
    }
}

#[test]
#[serial]
fn env_variable_selects_config_file() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("custom.xml");
    fs::write(
        &cfg_path,
        r#"<config>
  <copy_buffer_size>131072</copy_buffer_size>
  <durability>data</durability>
  <log_level>info</log_level>
</config>"#,
    )
    .unwrap();

    let _env = EnvGuard::set(&cfg_path);
    assert_eq!(default_config_path().unwrap(), cfg_path);

    let cfg = load_config().unwrap();
    assert_eq!(cfg.copy_buffer_size, 131072);
    assert_eq!(cfg.durability, DurabilityMode::Data);
    assert_eq!(cfg.log_level, LogLevel::Info);
    cfg.validate().unwrap();
}

#[test]
#[serial]
fn missing_file_falls_back_to_defaults() {
    let td = tempdir().unwrap();
    let _env = EnvGuard::set(&td.path().join("absent.xml"));
    assert_eq!(load_config().unwrap(), Config::default());
}

#[test]
#[serial]
fn default_path_lives_under_crate_dir_without_override() {
    unsafe { std::env::remove_var(CONFIG_ENV) };
    if let Ok(p) = default_config_path() {
        assert!(p.ends_with(std::path::Path::new("cfs").join("config.xml")));
    }
}
