//! End-to-end: a writer pushes into a memory-mapped image, the reader side reads it back
//! through a separate read-only mapping, as `ringlog-sim` and `ringlog-dump` do.

use std::process::Command;

use ringlog_common::entry::{LogLevel, format_line};
use ringlog_common::{PAYLOAD_CAPACITY, REGION_SIZE, RingWriter};
use ringlog_host::config::TargetConfig;
use ringlog_host::{MmapRegion, ReaderError, Session};

fn target(path: &std::path::Path) -> TargetConfig {
    TargetConfig {
        image: path.to_path_buf(),
        base_offset: 0,
    }
}

#[test]
fn test_lines_round_trip_through_mapping() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ring.bin");

    let mut writer = RingWriter::init(MmapRegion::create(&path, 0).unwrap());
    let mut session = Session::attach(&target(&path)).unwrap();

    writer.push_str(&format_line(LogLevel::Info, 10, "boot"));
    writer.push_str(&format_line(LogLevel::Warn, 20, "fifo high"));

    let dump = session.log_reader().read_buffer().unwrap();
    assert_eq!(dump.text(), "[I] 00000010 boot\n[W] 00000020 fifo high\n");

    // Writer keeps going while the session stays attached
    writer.push_str(&format_line(LogLevel::Error, 30, "timeout"));
    let dump = session.log_reader().read_buffer().unwrap();
    assert!(dump.text().ends_with("[E] 00000030 timeout\n"));
}

#[test]
fn test_wrapped_ring_keeps_newest_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ring.bin");

    let mut writer = RingWriter::init(MmapRegion::create(&path, 0).unwrap());
    for i in 0..500u32 {
        writer.push_str(&format_line(LogLevel::Info, i, &format!("line {i}")));
    }
    drop(writer);

    let mut session = Session::attach(&target(&path)).unwrap();
    let dump = session.log_reader().read_buffer().unwrap();
    assert_eq!(dump.len(), PAYLOAD_CAPACITY);
    assert_eq!(usize::from(dump.length), PAYLOAD_CAPACITY);

    let text = dump.text();
    assert!(text.ends_with("[I] 00000499 line 499\n"));

    // Everything after the first (possibly cut) line is whole and in order
    let lines: Vec<&str> = text.lines().skip(1).collect();
    let numbers: Vec<u32> = lines
        .iter()
        .map(|line| line.rsplit(' ').next().unwrap().parse().unwrap())
        .collect();
    assert!(numbers.windows(2).all(|pair| pair[1] == pair[0] + 1));
}

#[test]
fn test_uninitialized_image_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("blank.bin");
    std::fs::write(&path, vec![0u8; REGION_SIZE]).unwrap();

    let mut session = Session::attach(&target(&path)).unwrap();
    let err = session.log_reader().read_buffer().unwrap_err();
    assert!(matches!(err, ReaderError::InvalidHeader { .. }));
}

#[test]
fn test_dump_binary_prints_ring() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ring.bin");

    let mut writer = RingWriter::init(MmapRegion::create(&path, 0).unwrap());
    writer.push_str("[I] 00000001 hello from the ring\n");
    writer.region().flush().unwrap();
    drop(writer);

    let output = Command::new(env!("CARGO_BIN_EXE_ringlog-dump"))
        .current_dir(dir.path())
        .arg("--image")
        .arg(&path)
        .env_remove("RUST_LOG")
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(output.stdout, b"[I] 00000001 hello from the ring\n\n");
}

#[test]
fn test_dump_binary_fails_without_target() {
    let dir = tempfile::tempdir().unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_ringlog-dump"))
        .current_dir(dir.path())
        .arg("--image")
        .arg(dir.path().join("missing.bin"))
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("could not reach target"));
}

#[test]
fn test_sim_binary_then_dump() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sim.bin");

    let status = Command::new(env!("CARGO_BIN_EXE_ringlog-sim"))
        .current_dir(dir.path())
        .args(["--count", "3", "--interval-ms", "0", "--image"])
        .arg(&path)
        .status()
        .unwrap();
    assert!(status.success());

    let mut session = Session::attach(&target(&path)).unwrap();
    let dump = session.log_reader().read_buffer().unwrap();
    let text = dump.text();
    assert_eq!(text.lines().count(), 3);
    assert!(text.lines().next().unwrap().ends_with("heartbeat #0"));
    assert!(text.lines().last().unwrap().starts_with("[I] "));
}
