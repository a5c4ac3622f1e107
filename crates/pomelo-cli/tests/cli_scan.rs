use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn pomelo_cmd() -> Command {
    Command::cargo_bin("pomelo").unwrap()
}

const APP_POM: &str = r#"<?xml version="1.0"?>
<project>
    <groupId>com.x</groupId>
    <artifactId>app</artifactId>
    <version>1.0</version>
    <dependencies>
        <dependency>
            <groupId>com.x</groupId>
            <artifactId>lib</artifactId>
            <version>1.2.3</version>
        </dependency>
    </dependencies>
</project>"#;

#[test]
fn scan_emits_packages_as_text() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("pom.xml"), APP_POM).unwrap();

    pomelo_cmd()
        .args(["scan", tmp.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("lib 1.2.3 pkg:maven/com.x/lib@1.2.3"))
        .stderr(predicate::str::contains("1 packages from 1 projects"));
}

#[test]
fn scan_emits_json() {
    let tmp = TempDir::new().unwrap();
    let nested = tmp.path().join("module");
    fs::create_dir_all(&nested).unwrap();
    fs::write(nested.join("pom.xml"), APP_POM).unwrap();

    let output = pomelo_cmd()
        .args(["scan", tmp.path().to_str().unwrap(), "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let packages = parsed["packages"].as_array().unwrap();
    assert_eq!(packages.len(), 1);
    assert_eq!(packages[0]["purl"], "pkg:maven/com.x/lib@1.2.3");
    assert_eq!(parsed["projects"][0]["coordinate"]["artifactId"], "app");
}

#[test]
fn scan_warns_about_unresolved_versions() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("pom.xml"),
        r#"<?xml version="1.0"?>
<project>
    <groupId>com.x</groupId>
    <artifactId>app</artifactId>
    <version>1.0</version>
    <dependencies>
        <dependency>
            <groupId>com.x</groupId>
            <artifactId>lib</artifactId>
            <version>${missing.prop}</version>
        </dependency>
    </dependencies>
</project>"#,
    )
    .unwrap();

    pomelo_cmd()
        .args(["scan", tmp.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("${missing.prop}"))
        .stderr(predicate::str::contains(
            "1 package(s) have unresolved versions",
        ));
}

#[test]
fn scan_empty_directory_succeeds() {
    let tmp = TempDir::new().unwrap();

    pomelo_cmd()
        .args(["scan", tmp.path().to_str().unwrap()])
        .assert()
        .success()
        .stderr(predicate::str::contains("0 packages from 0 projects"));
}

#[test]
fn scan_rejects_unknown_format() {
    let tmp = TempDir::new().unwrap();

    pomelo_cmd()
        .args(["scan", tmp.path().to_str().unwrap(), "--format", "yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown output format"));
}

#[test]
fn scan_rejects_missing_directory() {
    pomelo_cmd()
        .args(["scan", "/no/such/dir"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not a directory"));
}

#[test]
fn config_prints_defaults() {
    let tmp = TempDir::new().unwrap();

    pomelo_cmd()
        .current_dir(tmp.path())
        .args(["config"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "maven-url = \"https://repo.maven.apache.org/maven2\"",
        ))
        .stdout(predicate::str::contains("use-network = false"));
}

#[test]
fn config_reads_file() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("pomelo.toml"),
        "use-network = true\nmax-parent-recursive-depth = 9\n",
    )
    .unwrap();

    pomelo_cmd()
        .current_dir(tmp.path())
        .args(["config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("use-network = true"))
        .stdout(predicate::str::contains("max-parent-recursive-depth = 9"));
}
