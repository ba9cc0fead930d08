use std::{fs, path::Path, process::Command};

use chn_core::ChnRecord;
use rpt2chn::{ConversionPipeline, ConvertConfig, ConvertError};
use tempfile::TempDir;

const REFERENCE_RPT: &str = "\
Spectrum acquired 01-06-2020 13:45:30
Live time (s): 100.0
Real time (s): 120.0
0 1 1 1 1 1 1 1 1 1 1 1 1 1 1 1 1
16 2 2 2 2 2 2 2 2 2 2 2 2 2 2 2 2

32 3 3 3 3 3 3 3 3 3 3 3 3 3 3 3 3
48 4 4 4 4 4 4 4 4 4 4 4 4 4 4 4 4
";

fn write_input(
    dir: &TempDir,
    text: &str,
) -> std::path::PathBuf {
    let path = dir.path().join("spectrum.rpt");
    fs::write(&path, text).unwrap();
    path
}

fn run(
    input: &Path,
    output: &Path,
) -> Result<chn_core::ConversionSummary, ConvertError> {
    ConversionPipeline::new(ConvertConfig::new(input, output).unwrap()).run()
}

// ===========================================================================
// Pipeline
// ===========================================================================

#[test]
fn test_reference_file_conversion() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, REFERENCE_RPT);
    let output = dir.path().join("spectrum.chn");

    let summary = run(&input, &output).unwrap();
    assert_eq!(summary.channel_count, 64);
    assert_eq!(summary.bytes_written, 32 + 64 * 4);

    let raw = fs::read(&output).unwrap();
    assert_eq!(&raw[16..28], b"01JUN2011345");

    let record = ChnRecord::read_from(&raw[..]).unwrap();
    assert_eq!(record.header.real_time_ticks, 6_000);
    assert_eq!(record.header.live_time_ticks, 5_000);
    assert_eq!(record.channels[0], 1);
    assert_eq!(record.channels[63], 4);
}

#[test]
fn test_idempotent_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, REFERENCE_RPT);
    let out1 = dir.path().join("a.chn");
    let out2 = dir.path().join("b.chn");

    run(&input, &out1).unwrap();
    run(&input, &out2).unwrap();
    // повторный запуск поверх существующего файла
    run(&input, &out1).unwrap();

    assert_eq!(fs::read(&out1).unwrap(), fs::read(&out2).unwrap());
}

#[test]
fn test_existing_output_is_truncated() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, REFERENCE_RPT);
    let output = dir.path().join("spectrum.chn");
    fs::write(&output, vec![0xAAu8; 4096]).unwrap();

    run(&input, &output).unwrap();

    assert_eq!(fs::metadata(&output).unwrap().len(), 32 + 256);
}

#[test]
fn test_invalid_input_creates_no_output() {
    let dir = tempfile::tempdir().unwrap();
    // 3 канала — не степень двойки
    let input = write_input(&dir, "a b 01-06-2020 13:45:30\n1\n2\n0 1 2 3\n");
    let output = dir.path().join("spectrum.chn");

    let e = run(&input, &output).unwrap_err();

    assert!(matches!(e, ConvertError::Chn(ref c) if c.is_validation()));
    assert!(!output.exists());
}

#[test]
fn test_invalid_input_keeps_existing_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, "a b 01-13-2020 13:45:30\n1\n2\n0 1\n");
    let output = dir.path().join("spectrum.chn");
    fs::write(&output, b"previous").unwrap();

    assert!(run(&input, &output).is_err());
    assert_eq!(fs::read(&output).unwrap(), b"previous");
}

#[test]
fn test_latin1_labels_convert() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("latin1.rpt");
    let mut raw = b"Detektor G\xE9 01-06-2020 13:45:30\n".to_vec();
    raw.extend_from_slice(b"Live time (\xB5s): 100.0\nReal time: 120.0\n0 7 9\n");
    fs::write(&input, raw).unwrap();
    let output = dir.path().join("latin1.chn");

    let summary = run(&input, &output).unwrap();

    assert_eq!(summary.channel_count, 2);
    assert_eq!(fs::metadata(&output).unwrap().len(), 40);
}

#[test]
fn test_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("spectrum.chn");

    let e = run(&dir.path().join("missing.rpt"), &output).unwrap_err();

    assert!(e.to_string().starts_with("Input file not found"));
    assert!(!output.exists());
}

#[test]
fn test_output_in_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, REFERENCE_RPT);
    let output = dir.path().join("no-such-dir").join("spectrum.chn");

    let e = run(&input, &output).unwrap_err();

    assert!(matches!(e, ConvertError::WriteOutput { .. }));
}

// ===========================================================================
// Binary
// ===========================================================================

fn rpt2chn() -> Command {
    Command::new(env!("CARGO_BIN_EXE_rpt2chn"))
}

#[test]
fn test_binary_success() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, REFERENCE_RPT);
    let output = dir.path().join("spectrum.chn");

    let out = rpt2chn()
        .arg("--if")
        .arg(&input)
        .arg("--of")
        .arg(&output)
        .env_remove("RUST_LOG")
        .output()
        .unwrap();

    assert!(out.status.success());
    assert!(out.stderr.is_empty());
    assert_eq!(fs::metadata(&output).unwrap().len(), 288);
}

#[test]
fn test_binary_failure_single_line() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, "a b 01-06-2020 13:45:30\n1\n2\n\n");
    let output = dir.path().join("spectrum.chn");

    let out = rpt2chn()
        .arg("--if")
        .arg(&input)
        .arg("--of")
        .arg(&output)
        .env_remove("RUST_LOG")
        .output()
        .unwrap();

    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert_eq!(stderr.lines().count(), 1, "{stderr}");
    assert!(stderr.contains("number of channels is not a power of two"));
    assert!(!output.exists());
}

#[test]
fn test_binary_usage_on_missing_flag() {
    let out = rpt2chn().arg("--if").arg("x.rpt").output().unwrap();

    assert!(!out.status.success());
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.contains("Usage"), "{stderr}");
}
