use assert_cmd::prelude::*; // Add methods on commands
use predicates::prelude::*; // Assertions on command output
use std::process::Command; // Run programs
use tempfile;
type STDRESULT = Result<(),Box<dyn std::error::Error>>;

#[test]
fn simulate_compress_expand() -> STDRESULT {
    let temp_dir = tempfile::tempdir()?;
    let raw_path = temp_dir.path().join("boards.raw");
    let frame_path = temp_dir.path().join("boards.bpk");
    let out_path = temp_dir.path().join("recovered.raw");

    let mut cmd = Command::cargo_bin("boardpack")?;
    cmd.arg("simulate")
        .arg("-g").arg("200")
        .arg("-e").arg("0.3")
        .arg("-o").arg(&raw_path)
        .assert()
        .success();

    let mut cmd = Command::cargo_bin("boardpack")?;
    cmd.arg("compress")
        .arg("-i").arg(&raw_path)
        .arg("-o").arg(&frame_path)
        .assert()
        .success();

    let mut cmd = Command::cargo_bin("boardpack")?;
    cmd.arg("expand")
        .arg("-i").arg(&frame_path)
        .arg("-o").arg(&out_path)
        .assert()
        .success();

    match (std::fs::read(&raw_path),std::fs::read(&out_path)) {
        (Ok(v1),Ok(v2)) => {
            assert_eq!(v1,v2);
        },
        _ => panic!("unable to compare output with reference")
    }

    let raw_len = std::fs::metadata(&raw_path)?.len();
    let frame_len = std::fs::metadata(&frame_path)?.len();
    assert!(frame_len < raw_len);
    Ok(())
}

#[test]
fn compress_rejects_bad_squares() -> STDRESULT {
    let temp_dir = tempfile::tempdir()?;
    let bad_path = temp_dir.path().join("bad.raw");
    std::fs::write(&bad_path,[7u8;9])?;
    let mut cmd = Command::cargo_bin("boardpack")?;
    cmd.arg("compress")
        .arg("-i").arg(&bad_path)
        .arg("-o").arg(temp_dir.path().join("out.bpk"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("FileFormatMismatch"));
    Ok(())
}

#[test]
fn expand_rejects_short_frame() -> STDRESULT {
    let temp_dir = tempfile::tempdir()?;
    let bad_path = temp_dir.path().join("bad.bpk");
    std::fs::write(&bad_path,[0u8;10])?;
    let mut cmd = Command::cargo_bin("boardpack")?;
    cmd.arg("expand")
        .arg("-i").arg(&bad_path)
        .arg("-o").arg(temp_dir.path().join("out.raw"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("MalformedFrame"));
    Ok(())
}
