use std::path::PathBuf;
use std::{fs, path::Path};

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::tempdir;

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(path)
}

fn path_as_str(path: &Path) -> &str {
    path.to_str().expect("path should be valid utf-8")
}

fn fvl() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("fvl"));
    cmd.env_remove("CISCONFS")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn finds_source_interface_in_fixture_backups() {
    fvl()
        .arg("172.24.20.1")
        .arg("--cfg-dir")
        .arg(fixture("fixtures/backups"))
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Host: core-sw1 Iface: Vlan20 Vrf:  IfaceIp: 172.24.20.1/24 AclIn: USERS-IN AclOut: USERS-OUT",
        ))
        .stdout(predicate::str::contains(
            "Host: edge-rtr1 Iface: GigabitEthernet0/1 Vrf: CUST-A IfaceIp: 172.24.20.254/24",
        ))
        .stdout(predicate::str::contains("!>"));
}

#[test]
fn destination_section_follows_source() {
    fvl()
        .arg("172.24.30.9")
        .arg("10.0.0.1")
        .arg("--cfg-dir")
        .arg(fixture("fixtures/backups"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Iface: Vlan30 (DOWN) Vrf:"))
        .stdout(predicate::str::contains("Destination:"))
        .stdout(predicate::str::contains(
            "Host: core-sw1 Iface: GigabitEthernet0/0 Vrf: MGMT IfaceIp: 10.0.0.1/24",
        ));
}

#[test]
fn backup_copies_are_not_scanned() {
    let output = fvl()
        .arg("10.0.0.1")
        .arg("--cfg-dir")
        .arg(fixture("fixtures/backups"))
        .output()
        .expect("run fvl");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("utf-8 stdout");
    assert_eq!(stdout.matches("Host: core-sw1").count(), 1);
}

#[test]
fn cfg_dir_comes_from_environment() {
    fvl()
        .env("CISCONFS", fixture("fixtures/backups"))
        .arg("172.24.21.5")
        .assert()
        .success()
        .stdout(predicate::str::contains("Iface: Vlan20 (SECNDR) Vrf:"));
}

#[test]
fn no_match_is_success() {
    fvl()
        .arg("198.51.100.7")
        .arg("--cfg-dir")
        .arg(fixture("fixtures/backups"))
        .assert()
        .success()
        .stdout(predicate::str::contains("no matches for 198.51.100.7"));
}

#[test]
fn invalid_source_fails() {
    fvl()
        .arg("1270.1.0.1")
        .arg("--cfg-dir")
        .arg(fixture("fixtures/backups"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid source address `1270.1.0.1`"));
}

#[test]
fn invalid_destination_fails_even_without_backups() {
    let dir = tempdir().expect("tempdir");
    fvl()
        .arg("10.0.0.1")
        .arg("10.0.0")
        .arg("--cfg-dir")
        .arg(path_as_str(dir.path()))
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid destination address"));
}

#[test]
fn empty_directory_reports_no_candidates() {
    let dir = tempdir().expect("tempdir");
    fs::write(dir.path().join("r1.cfg.bak"), "hostname r1\n").expect("write");
    fvl()
        .arg("10.0.0.1")
        .arg("--cfg-dir")
        .arg(path_as_str(dir.path()))
        .assert()
        .failure()
        .stderr(predicate::str::contains("no text configuration backups found"));
}

#[test]
fn missing_directory_fails() {
    let dir = tempdir().expect("tempdir");
    fvl()
        .arg("10.0.0.1")
        .arg("--cfg-dir")
        .arg(path_as_str(&dir.path().join("nope")))
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist or is not a directory"));
}

#[test]
fn json_output_lists_both_sides() {
    let output = fvl()
        .arg("10.0.0.1")
        .arg("192.0.2.2")
        .arg("--cfg-dir")
        .arg(fixture("fixtures/backups"))
        .arg("--format")
        .arg("json")
        .output()
        .expect("run fvl");
    assert!(output.status.success(), "fvl should succeed");

    let report: Value = serde_json::from_slice(&output.stdout).expect("json parse");
    let source = report["source"].as_array().expect("source array");
    assert_eq!(source.len(), 1);
    assert_eq!(source[0]["hostname"], "core-sw1");
    assert_eq!(source[0]["vrf"], "MGMT");
    assert_eq!(source[0]["exact"], true);
    assert_eq!(source[0]["status"], "up");
    assert_eq!(source[0]["prefix"], "10.0.0.1/24");

    let destination = report["destination"].as_array().expect("destination array");
    assert_eq!(destination.len(), 1);
    assert_eq!(destination[0]["interface"], "GigabitEthernet0/2");
    assert_eq!(destination[0]["exact"], false);
    assert_eq!(report["files_scanned"], 2);
}

#[test]
fn settings_file_supplies_directory_and_limit() {
    let dir = tempdir().expect("tempdir");
    let backups = dir.path().join("backups");
    fs::create_dir(&backups).expect("mkdir");
    let mut text = String::from("hostname big\ninterface Port-channel1\n");
    for n in 0..30 {
        text.push_str(&format!(" ip address 10.1.{n}.1 255.255.255.0 secondary\n"));
    }
    fs::write(backups.join("big.cfg"), text).expect("write config");

    let settings = dir.path().join("fvl.toml");
    fs::write(
        &settings,
        format!(
            "cfg_dir = {:?}\nmax_block_lines = 10\n",
            path_as_str(&backups)
        ),
    )
    .expect("write settings");

    fvl()
        .arg("10.1.25.1")
        .arg("--config")
        .arg(path_as_str(&settings))
        .assert()
        .success()
        .stdout(predicate::str::contains("no matches for 10.1.25.1"))
        .stderr(predicate::str::contains("exceeds 10 lines"));

    fvl()
        .arg("10.1.25.1")
        .arg("--config")
        .arg(path_as_str(&settings))
        .arg("--max-block-lines")
        .arg("100")
        .assert()
        .success()
        .stdout(predicate::str::contains("Host: big Iface: Port-channel1 (SECNDR)"));
}
