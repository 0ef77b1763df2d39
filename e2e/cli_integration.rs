//! End-to-end tests for the `lzu8` binary: file mode, stdin/stdout mode,
//! encodings, and failure reporting.

use std::fs;
use std::io::Write;
use std::process::{Command, Stdio};

use lzu8::lorem;

fn lzu8() -> Command {
    Command::new(env!("CARGO_BIN_EXE_lzu8"))
}

#[test]
fn compress_then_decompress_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("sample.txt");
    let text = lorem::text(200_000, 404);
    fs::write(&input, &text).unwrap();

    let status = lzu8().arg("compress").arg(&input).status().unwrap();
    assert!(status.success());

    let compressed = dir.path().join("sample.txt.lzu8");
    assert!(compressed.exists());
    assert!(fs::metadata(&compressed).unwrap().len() < text.len() as u64);

    fs::remove_file(&input).unwrap();
    let status = lzu8().arg("decompress").arg(&compressed).status().unwrap();
    assert!(status.success());
    assert_eq!(fs::read_to_string(&input).unwrap(), text);
}

#[test]
fn several_files_in_one_invocation() {
    let dir = tempfile::tempdir().unwrap();
    let mut paths = Vec::new();
    for i in 0..4u32 {
        let path = dir.path().join(format!("part{i}.txt"));
        fs::write(&path, lorem::text(30_000, i)).unwrap();
        paths.push(path);
    }

    let status = lzu8().arg("compress").args(&paths).status().unwrap();
    assert!(status.success());
    for path in &paths {
        let mut compressed = path.as_os_str().to_owned();
        compressed.push(".lzu8");
        assert!(fs::metadata(compressed).is_ok());
    }
}

#[test]
fn stdin_to_stdout_round_trip() {
    let text = lorem::text(50_000, 9);

    let mut compress = lzu8()
        .arg("compress")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    compress
        .stdin
        .take()
        .unwrap()
        .write_all(text.as_bytes())
        .unwrap();
    let compressed = compress.wait_with_output().unwrap();
    assert!(compressed.status.success());
    assert!(compressed.stdout.len() < text.len());

    let mut decompress = lzu8()
        .arg("decompress")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    decompress
        .stdin
        .take()
        .unwrap()
        .write_all(&compressed.stdout)
        .unwrap();
    let restored = decompress.wait_with_output().unwrap();
    assert!(restored.status.success());
    assert_eq!(String::from_utf8(restored.stdout).unwrap(), text);
}

#[test]
fn base64_encoding_flag_produces_ascii_files() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("doc.txt");
    let text = lorem::text(40_000, 11);
    fs::write(&input, &text).unwrap();

    let status = lzu8()
        .args(["compress", "--encoding", "base64"])
        .arg(&input)
        .arg("-o")
        .arg(dir.path().join("doc.b64"))
        .status()
        .unwrap();
    assert!(status.success());

    let wrapped = fs::read(dir.path().join("doc.b64")).unwrap();
    assert!(wrapped.iter().all(u8::is_ascii));

    let status = lzu8()
        .args(["decompress", "--encoding", "base64"])
        .arg(dir.path().join("doc.b64"))
        .arg("-o")
        .arg(dir.path().join("doc.out"))
        .status()
        .unwrap();
    assert!(status.success());
    assert_eq!(fs::read_to_string(dir.path().join("doc.out")).unwrap(), text);
}

#[test]
fn missing_input_file_fails_with_a_message() {
    let out = lzu8().args(["compress", "no-such-file.txt"]).output().unwrap();
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("no-such-file.txt"));
}

#[test]
fn unknown_decompress_suffix_is_rejected_without_output_flag() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("plain.bin");
    fs::write(&input, b"abc").unwrap();
    let out = lzu8().arg("decompress").arg(&input).output().unwrap();
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("suffix"));
}

#[test]
fn corrupt_input_reports_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.lzu8");
    // A pointer pointing before the start of the stream.
    fs::write(&input, [0xE4, 0x7F, 0xFF]).unwrap();
    let out = lzu8().arg("decompress").arg(&input).output().unwrap();
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("corrupt"));
}

#[test]
fn truncated_compressed_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("cut.lzu8");
    // Stream ends inside a pointer token.
    fs::write(&input, [b'a', b'b', b'c', b'd', 0xC4]).unwrap();
    let out = lzu8().arg("decompress").arg(&input).output().unwrap();
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("truncated"));
}

#[test]
fn verbose_reports_sizes_on_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("v.txt");
    fs::write(&input, lorem::text(20_000, 2)).unwrap();
    let out = lzu8().args(["-v", "compress"]).arg(&input).output().unwrap();
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("bytes"));
}

#[test]
fn output_flag_with_multiple_inputs_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.txt");
    let b = dir.path().join("b.txt");
    fs::write(&a, "aaaa").unwrap();
    fs::write(&b, "bbbb").unwrap();
    let out = lzu8()
        .arg("compress")
        .arg(&a)
        .arg(&b)
        .arg("-o")
        .arg(dir.path().join("joined"))
        .output()
        .unwrap();
    assert!(!out.status.success());
}
