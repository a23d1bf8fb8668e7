//! Integration tests: run the CLI binary with temp fixtures.

use std::fs;
use std::path::PathBuf;
use std::process::Command;

fn announce_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_announce"))
}

#[test]
fn missing_request_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let out = Command::new(announce_bin())
        .arg("no-such-request.json")
        .current_dir(dir.path())
        .output()
        .unwrap();
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("no-such-request.json"), "stderr: {stderr}");
}

#[test]
fn invalid_request_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("request.json"),
        r#"{"text": "hi", "lang": "klingon", "gender": "female", "style": "formal"}"#,
    )
    .unwrap();
    let out = Command::new(announce_bin())
        .current_dir(dir.path())
        .output()
        .unwrap();
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("invalid request"), "stderr: {stderr}");
}

#[test]
fn missing_api_key_is_a_configuration_failure() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("request.json"),
        serde_json::json!({
            "text": "Lunch is ready",
            "lang": "en",
            "gender": "female",
            "style": "friendly"
        })
        .to_string(),
    )
    .unwrap();
    let out = Command::new(announce_bin())
        .current_dir(dir.path())
        .env_remove("OPENAI_API_KEY")
        .output()
        .unwrap();
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("configuration stage failed"), "stderr: {stderr}");
    assert!(stderr.contains("API key"), "stderr: {stderr}");
}
