//! Integration tests for the read-only `check` and `sources` commands.

use predicates::prelude::*;
use serial_test::serial;

use super::common::TestEnv;

#[test]
#[serial]
fn sources_expands_wildcards_then_literals() {
  let env = TestEnv::new();
  env.source("src/b.c", 100);
  env.source("src/a.c", 100);
  env.source("extra.c", 100);

  env
    .rebake_cmd()
    .args(["sources", "-o", "main", "--sources", "src/*.c extra.c"])
    .assert()
    .success()
    .stdout("src/a.c\nsrc/b.c\nextra.c\n");
}

#[test]
#[serial]
fn sources_keeps_unmatched_pattern() {
  let env = TestEnv::new();
  env.source("main.c", 100);

  env
    .rebake_cmd()
    .args(["sources", "-o", "main", "--sources", "gen/*.c main.c"])
    .assert()
    .success()
    .stdout("gen/*.c\nmain.c\n");
}

#[test]
#[serial]
fn sources_json_is_an_array() {
  let env = TestEnv::new();
  env.source("main.c", 100);

  let output = env
    .rebake_cmd()
    .args(["--format", "json", "sources", "-o", "main", "--sources", "*.c"])
    .output()
    .unwrap();

  assert!(output.status.success());
  let parsed: Vec<String> = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(parsed, vec!["main.c"]);
}

#[test]
#[serial]
fn check_equal_timestamps_is_up_to_date() {
  let env = TestEnv::new();
  env.source("main.c", 100);
  env.binary("main", "old", 100);

  env
    .rebake_cmd()
    .args(["check", "-o", "main", "--source", "main.c"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Up to date"));

  assert!(env.events().is_empty());
}

#[test]
#[serial]
fn check_json_reports_newer_source() {
  let env = TestEnv::new();
  env.source("main.c", 101);
  env.binary("main", "old", 100);

  let output = env
    .rebake_cmd()
    .args(["--format", "json", "check", "-o", "main", "--source", "main.c"])
    .output()
    .unwrap();

  assert!(output.status.success());
  let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(report["stale"], serde_json::json!(true));
  assert_eq!(report["staleness"]["verdict"], serde_json::json!("source_newer"));
  assert_eq!(report["staleness"]["path"], serde_json::json!("main.c"));
  assert!(env.events().is_empty());
}

#[test]
#[serial]
fn check_missing_single_source_is_not_stale() {
  let env = TestEnv::new();
  env.binary("main", "old", 100);

  env
    .rebake_cmd()
    .args(["check", "-o", "main", "--source", "main.c"])
    .assert()
    .success()
    .stderr(predicate::str::contains("main.c is missing"));
}
