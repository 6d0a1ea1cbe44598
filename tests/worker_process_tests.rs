use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};

use tailwind_linter::bridge::{BridgeOp, BridgeReply, BridgeRequest};
use tailwind_linter::{TailwindBridge, TailwindVersion};
use tempfile::tempdir;

const BIN: &str = env!("CARGO_BIN_EXE_tailwind-linter-cli");

#[test]
fn test_worker_backend_round_trip() {
    let dir = tempdir().unwrap();
    let bridge = TailwindBridge::with_workers(PathBuf::from(BIN));

    let (entries, warnings) = bridge
        .get_class_order(
            TailwindVersion::V3,
            &[
                "p-4".to_string(),
                "flex".to_string(),
                "mystery-x".to_string(),
            ],
            dir.path(),
            None,
        )
        .unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[1].class_name, "flex");
    assert!(entries[1].order < entries[0].order);
    assert_eq!(entries[2].order, None);
    // No config in the tempdir, so the worker reports the fallback
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].option, "tailwindConfig");

    // The worker persists across requests on the same bridge
    let (unregistered, _) = bridge
        .get_unregistered_classes(
            TailwindVersion::V3,
            &["mystery-x".to_string(), "flex".to_string()],
            dir.path(),
            None,
        )
        .unwrap();
    assert_eq!(unregistered, vec!["mystery-x".to_string()]);
}

#[test]
fn test_worker_resolves_config_on_disk() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("tailwind.config.js");
    std::fs::write(&config, "module.exports = { prefix: 'tw-' };").unwrap();

    let bridge = TailwindBridge::with_workers(PathBuf::from(BIN));
    let (prefix, warnings) = bridge
        .get_prefix(TailwindVersion::V3, dir.path(), Some(&config))
        .unwrap();
    assert_eq!(prefix, "tw-");
    assert!(warnings.is_empty());
}

#[test]
fn test_worker_replies_in_band_on_malformed_line() {
    let mut child = Command::new(BIN)
        .args(["worker", "--major", "3"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();
    let mut stdin = child.stdin.take().unwrap();
    let mut stdout = BufReader::new(child.stdout.take().unwrap());

    // Garbage gets an in-band error, not a dead process
    stdin.write_all(b"this is not json\n").unwrap();
    stdin.flush().unwrap();
    let mut line = String::new();
    stdout.read_line(&mut line).unwrap();
    let reply: BridgeReply = serde_json::from_str(&line).unwrap();
    let err = reply.unwrap_err();
    assert!(err.contains("malformed request"), "got: {err}");

    // The same connection still answers a well-formed request
    let dir = tempdir().unwrap();
    let req = BridgeRequest {
        op: BridgeOp::ClassOrder,
        classes: vec!["flex".to_string()],
        cwd: dir.path().display().to_string(),
        config_path: None,
    };
    let line_out = serde_json::to_string(&req).unwrap();
    stdin.write_all(line_out.as_bytes()).unwrap();
    stdin.write_all(b"\n").unwrap();
    stdin.flush().unwrap();
    let mut line = String::new();
    stdout.read_line(&mut line).unwrap();
    let reply: BridgeReply = serde_json::from_str(&line).unwrap();
    let (payload, _) = reply.unwrap();
    assert_eq!(payload[0][0], "flex");

    // Closing the pipe ends the serve loop cleanly
    drop(stdin);
    let status = child.wait().unwrap();
    assert!(status.success());
}
