mod common;

use assert_cmd::Command;
use predicates::prelude::*;

fn seqscan(cwd: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("seqscan").expect("binary exists");
    cmd.current_dir(cwd)
        .env_remove("SEQSCAN_FORMAT")
        .env_remove("SEQSCAN_LISTING_FORMAT");
    cmd
}

#[test]
fn help_displays_usage() {
    Command::cargo_bin("seqscan")
        .expect("binary exists")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn ls_matches_fixture_listing() -> anyhow::Result<()> {
    let temp = tempfile::tempdir()?;
    common::write_fixture(temp.path())?;

    seqscan(temp.path())
        .args(["ls", "."])
        .assert()
        .success()
        .stdout(common::LISTING);
    Ok(())
}

#[test]
fn ls_pattern_and_custom_template() -> anyhow::Result<()> {
    let temp = tempfile::tempdir()?;
    common::write_fixture(temp.path())?;

    seqscan(temp.path())
        .args(["ls", "bnc*", "-f", "%h%p%t %r"])
        .assert()
        .success()
        .stdout(
            "bnc01_TinkSO_tx_0_ty_0.%04d.tif 101-105\n\
             bnc01_TinkSO_tx_0_ty_1.%04d.tif 101-105\n\
             bnc01_TinkSO_tx_1_ty_0.%04d.tif 101-105\n\
             bnc01_TinkSO_tx_1_ty_1.%04d.tif 101-105\n",
        );
    Ok(())
}

#[test]
fn ls_json_output() -> anyhow::Result<()> {
    let temp = tempfile::tempdir()?;
    common::write_fixture(temp.path())?;

    let output = seqscan(temp.path())
        .args(["ls", "--output", "json"])
        .output()?;
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    let entries = value.as_array().expect("array");
    assert_eq!(entries.len(), 20);
    assert_eq!(entries[2]["rendered"], "a.1-14.tga");
    assert_eq!(entries[2]["missing"], "4-9, 11");
    Ok(())
}

#[test]
fn ls_missing_path_fails() -> anyhow::Result<()> {
    let temp = tempfile::tempdir()?;
    seqscan(temp.path())
        .args(["ls", "nowhere"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nowhere"));
    Ok(())
}

#[test]
fn group_reads_stdin() -> anyhow::Result<()> {
    let temp = tempfile::tempdir()?;
    seqscan(temp.path())
        .arg("group")
        .write_stdin("fileA.1.rgb\nfileA.2.rgb\nfileB.1.rgb\n")
        .assert()
        .success()
        .stdout("fileA.1-2.rgb\nfileB.1.rgb\n");

    seqscan(temp.path())
        .args(["group", "-f", "%h%p%t %R"])
        .write_stdin(r#"["a.001.tga", "a.003.tga"]"#)
        .assert()
        .success()
        .stdout("a.%03d.tga [1, 3]\n");
    Ok(())
}

#[test]
fn expand_prints_members() -> anyhow::Result<()> {
    let temp = tempfile::tempdir()?;
    seqscan(temp.path())
        .args(["expand", "shots/a.%03d.tga 1-3", "-f", "%h%p%t %r"])
        .assert()
        .success()
        .stdout("shots/a.001.tga\nshots/a.002.tga\nshots/a.003.tga\n");
    Ok(())
}

#[test]
fn expand_uses_the_default_template() -> anyhow::Result<()> {
    let temp = tempfile::tempdir()?;
    seqscan(temp.path())
        .args(["expand", "a1.1-3.jpg"])
        .assert()
        .success()
        .stdout("a1.1.jpg\na1.2.jpg\na1.3.jpg\n");
    Ok(())
}

#[test]
fn expand_rejects_bad_templates() -> anyhow::Result<()> {
    let temp = tempfile::tempdir()?;
    seqscan(temp.path())
        .args(["expand", "a.1-3.tga", "-f", "%h%q"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown"));
    Ok(())
}

#[test]
fn env_overrides_listing_template() -> anyhow::Result<()> {
    let temp = tempfile::tempdir()?;
    common::write_fixture(temp.path())?;
    seqscan(temp.path())
        .env("SEQSCAN_LISTING_FORMAT", "%h%r%t")
        .args(["ls", "a.*"])
        .assert()
        .success()
        .stdout("a.1-14.tga\n");
    Ok(())
}

#[test]
fn completions_are_generated() {
    Command::cargo_bin("seqscan")
        .expect("binary exists")
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("seqscan"));
}
