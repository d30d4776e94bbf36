//! Tests for the shell export conversion.

use std::fs;

use super::ResolveError;
use super::export::export_lines;

#[test]
fn well_formed_file_yields_four_exports() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mqtt_config.py");
    fs::write(
        &path,
        "host = \"broker.local\"\nport = 1883\nuser = \"mqtt\"\npwd = \"secret\"\nca_certs = \"\"\n",
    )
    .unwrap();

    let lines = export_lines(&path).unwrap();

    assert_eq!(
        lines,
        vec![
            r#"export MQTT_HOST="broker.local""#,
            r#"export MQTT_PORT="1883""#,
            r#"export MQTT_USER="mqtt""#,
            r#"export MQTT_PASSWORD="secret""#,
        ]
    );
}

#[test]
fn docstring_and_import_do_not_block_exports() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mqtt_config.py");
    fs::write(
        &path,
        "\"\"\"MQTT broker settings.\"\"\"\nimport os\nhost = \"h\"\nport = 1883\nuser = \"u\"\npwd = \"p\"\n",
    )
    .unwrap();

    let lines = export_lines(&path).unwrap();

    assert_eq!(
        lines,
        vec![
            r#"export MQTT_HOST="h""#,
            r#"export MQTT_PORT="1883""#,
            r#"export MQTT_USER="u""#,
            r#"export MQTT_PASSWORD="p""#,
        ]
    );
}

#[test]
fn only_present_keys_are_exported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mqtt_config.py");
    fs::write(&path, "pwd = 'x'\nhost = 'h'\n").unwrap();

    let lines = export_lines(&path).unwrap();

    assert_eq!(
        lines,
        vec![r#"export MQTT_HOST="h""#, r#"export MQTT_PASSWORD="x""#]
    );
}

#[test]
fn missing_file_yields_single_comment() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mqtt_config.py");

    let lines = export_lines(&path).unwrap();

    assert_eq!(lines, vec![format!("# Config file {} not found.", path.display())]);
}

#[test]
fn invalid_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mqtt_config.py");
    fs::write(&path, "host = get_host()\n").unwrap();

    let result = export_lines(&path);

    assert!(matches!(result, Err(ResolveError::UserConfigParse { line: 1, .. })));
}
