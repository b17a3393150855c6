use std::fs;
use tempfile::tempdir;

use cfs::config::load_config_from_path;

#[test]
fn malformed_xml_errors_with_path() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("config.xml");
    fs::write(
        &cfg_path,
        "<config>\n  <log_level>debug</log_level>\n  <durability>full\n</config>",
    )
    .unwrap();
    let err = load_config_from_path(&cfg_path).unwrap_err();
    let msg = format!("{err:#}");
    assert!(msg.contains("parse config xml"), "{msg}");
    assert!(msg.contains("config.xml"), "{msg}");
}

#[test]
fn out_of_range_buffer_is_refused_at_load() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("config.xml");
    for size in ["0", "16"] {
        fs::write(&cfg_path, format!("<config><copy_buffer_size>{size}</copy_buffer_size></config>"))
            .unwrap();
        let msg = format!("{:#}", load_config_from_path(&cfg_path).unwrap_err());
        assert!(msg.contains("copy_buffer_size"), "{msg}");
    }
}

#[test]
fn unreadable_path_reports_read_failure() {
    let td = tempdir().unwrap();
    let err = load_config_from_path(&td.path().join("nope.xml")).unwrap_err();
    assert!(err.to_string().contains("read config xml"));
}
