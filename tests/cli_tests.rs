//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const DEFAULT_SEED_DIR: &str = "ap-study-backend/src/infrastructure/database/seeds";

fn seedtally(cwd: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("seedtally").unwrap();
    cmd.current_dir(cwd).env_remove("SEEDTALLY_SEED_DIR");
    cmd
}

fn questions(n: usize, category: &str) -> String {
    let items: Vec<String> = (0..n)
        .map(|i| format!(r#"{{"id": {}, "category": "{}"}}"#, i, category))
        .collect();
    format!("[{}]", items.join(","))
}

fn default_seed_dir(root: &TempDir) -> PathBuf {
    let dir = root.path().join(DEFAULT_SEED_DIR);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_year(dir: &Path, year: u32, content: &str) {
    fs::write(dir.join(format!("questions-{}.json", year)), content).unwrap();
}

#[test]
fn missing_seed_directory_fails() {
    let root = TempDir::new().unwrap();

    seedtally(root.path())
        .assert()
        .code(1)
        .stdout("シードデータディレクトリが見つかりません\n")
        .stderr(predicate::str::is_empty());
}

#[test]
fn full_coverage_report() {
    let root = TempDir::new().unwrap();
    let seeds = default_seed_dir(&root);
    for year in 2020..2026 {
        write_year(&seeds, year, &questions(80, "A"));
    }

    seedtally(root.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("総問題数: 480\n"))
        .stdout(predicate::str::contains("  2020年度:  80問\n"))
        .stdout(predicate::str::contains("  2025年度:  80問\n"))
        .stdout(predicate::str::contains("推定網羅率: 100% (480/480)\n"))
        .stdout(predicate::str::contains(
            "  A                   : 480問\n",
        ))
        .stderr(predicate::str::is_empty());
}

#[test]
fn missing_year_counts_zero() {
    let root = TempDir::new().unwrap();
    let seeds = default_seed_dir(&root);
    for year in [2020, 2021, 2023, 2024, 2025] {
        write_year(&seeds, year, &questions(80, "A"));
    }

    seedtally(root.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("  2022年度:   0問\n"))
        .stdout(predicate::str::contains("総問題数: 400\n"))
        .stdout(predicate::str::contains("推定網羅率: 83% (400/480)\n"))
        .stderr(predicate::str::is_empty());
}

#[test]
fn invalid_json_is_reported_and_skipped() {
    let root = TempDir::new().unwrap();
    let seeds = default_seed_dir(&root);
    write_year(&seeds, 2020, &questions(10, "DB"));
    write_year(&seeds, 2021, "[{\"id\": 1,");

    seedtally(root.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("  2021年度:   0問\n"))
        .stdout(predicate::str::contains("総問題数: 10\n"))
        .stdout(predicate::str::contains("  DB                  :  10問\n"))
        .stderr(predicate::str::contains("エラー "))
        .stderr(predicate::str::contains("questions-2021.json"));
}

#[test]
fn empty_directory_has_no_category_section() {
    let root = TempDir::new().unwrap();
    default_seed_dir(&root);

    seedtally(root.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("総問題数: 0\n"))
        .stdout(predicate::str::contains("推定網羅率: 0% (0/480)\n"))
        .stdout(predicate::str::contains("カテゴリ別問題数").not());
}

#[test]
fn seed_dir_flag_overrides_default() {
    let root = TempDir::new().unwrap();
    let seeds = root.path().join("custom");
    fs::create_dir_all(&seeds).unwrap();
    write_year(&seeds, 2024, &questions(3, "ネットワーク"));

    seedtally(root.path())
        .arg("--seed-dir")
        .arg(&seeds)
        .assert()
        .success()
        .stdout(predicate::str::contains("  2024年度:   3問\n"))
        .stdout(predicate::str::contains("ネットワーク"));
}

#[test]
fn json_format() {
    let root = TempDir::new().unwrap();
    let seeds = default_seed_dir(&root);
    write_year(&seeds, 2020, &questions(40, "A"));

    let output = seedtally(root.path())
        .arg("--format")
        .arg("json")
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["total"], 40);
    assert_eq!(value["years"]["2020"], 40);
    assert_eq!(value["years"]["2025"], 0);
    assert_eq!(value["coverage"]["percent"], 8);
    assert_eq!(value["categories"][0]["category"], "A");
}

#[test]
fn config_file_sets_range_and_quota() {
    let root = TempDir::new().unwrap();
    let seeds = default_seed_dir(&root);
    write_year(&seeds, 2024, &questions(50, "A"));
    write_year(&seeds, 2025, &questions(50, "A"));
    fs::write(
        root.path().join(".seedtally.toml"),
        "[seeds]\nstart_year = 2024\nend_year = 2026\nper_year_quota = 100\n",
    )
    .unwrap();

    seedtally(root.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("2020年度").not())
        .stdout(predicate::str::contains("推定網羅率: 50% (100/200)\n"));
}

#[test]
fn reversed_year_range_is_an_error() {
    let root = TempDir::new().unwrap();
    default_seed_dir(&root);
    let config = root.path().join("bad.toml");
    fs::write(&config, "[seeds]\nstart_year = 2025\nend_year = 2020\n").unwrap();

    seedtally(root.path())
        .arg("--config")
        .arg(&config)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid year range"));
}

#[test]
fn init_config_creates_file() {
    let root = TempDir::new().unwrap();

    seedtally(root.path())
        .arg("--init-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created .seedtally.toml"));

    let content = fs::read_to_string(root.path().join(".seedtally.toml")).unwrap();
    assert!(content.contains("[seeds]"));

    seedtally(root.path())
        .arg("--init-config")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn verbose_and_quiet_conflict() {
    let root = TempDir::new().unwrap();

    seedtally(root.path())
        .arg("--verbose")
        .arg("--quiet")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Cannot use both"));
}
