//! Build command integration tests.

use predicates::prelude::*;
use serial_test::serial;

use super::common::TestEnv;

#[test]
#[serial]
fn fresh_build_compiles_and_relaunches() {
  let env = TestEnv::new();
  env.source("main.c", 100);
  let cc = env.compiler();

  env
    .rebake_cmd()
    .args(["build", "-o", "main", "--source", "main.c", "--cc"])
    .arg(&cc)
    .assert()
    .success()
    .stdout(predicate::str::contains("Rebuilt and relaunched main"));

  assert_eq!(env.events(), vec!["cc -o main main.c", "new 1 "]);
  assert!(env.path("main").exists());
  assert!(!env.path("main.old").exists());
}

#[test]
#[serial]
fn up_to_date_binary_is_not_rebuilt() {
  let env = TestEnv::new();
  env.source("main.c", 100);
  env.binary("main", "old", 100);
  let cc = env.compiler();

  env
    .rebake_cmd()
    .args(["build", "-o", "main", "--source", "main.c", "--cc"])
    .arg(&cc)
    .assert()
    .success()
    .stdout(predicate::str::contains("main is up to date"));

  assert!(env.events().is_empty());
}

#[test]
#[serial]
fn marker_skips_even_a_stale_binary() {
  let env = TestEnv::new();
  env.source("main.c", 200);
  env.binary("main", "old", 100);
  let cc = env.compiler();

  env
    .rebake_cmd()
    .env("REBAKE_ALREADY_RAN", "1")
    .args(["build", "-o", "main", "--source", "main.c", "--cc"])
    .arg(&cc)
    .assert()
    .success()
    .stdout(predicate::str::contains("Already rebuilt"));

  assert!(env.events().is_empty());
}

#[test]
#[serial]
fn wildcard_sources_are_passed_in_order() {
  let env = TestEnv::new();
  env.binary("main", "old", 100);
  env.source("src/b.c", 90);
  env.source("src/a.c", 150);
  env.source("extra.c", 90);
  let cc = env.compiler();

  env
    .rebake_cmd()
    .args(["build", "-o", "main", "--sources", "src/*.c extra.c", "--cc"])
    .arg(&cc)
    .assert()
    .success();

  assert_eq!(env.events(), vec!["cc -o main src/a.c src/b.c extra.c", "new 1 "]);
  assert!(!env.path("main.old").exists());
}

#[test]
#[serial]
fn empty_source_list_fails_without_compiling() {
  let env = TestEnv::new();
  env.binary("main", "old", 100);
  let cc = env.compiler();

  env
    .rebake_cmd()
    .args(["build", "-o", "main", "--sources", " ", "--cc"])
    .arg(&cc)
    .assert()
    .code(1)
    .stderr(predicate::str::contains("no source files matched"));

  assert!(env.events().is_empty());
  assert!(env.path("main").exists());
}

#[test]
#[serial]
fn undisplaceable_binary_exits_one_without_compiling() {
  let env = TestEnv::new();
  env.source("main.c", 200);
  env.occupied_dir("main", 100);
  env.occupied_dir("main.old", 100);
  let cc = env.compiler();

  env
    .rebake_cmd()
    .args(["build", "-o", "main", "--source", "main.c", "--cc"])
    .arg(&cc)
    .assert()
    .code(1)
    .stderr(predicate::str::contains("failed to rename or remove current binary"));

  assert!(env.events().is_empty());
  assert!(env.path("main/keep").exists());
}

#[test]
#[serial]
fn failed_compile_still_exits_zero_and_runs_old_binary() {
  let env = TestEnv::new();
  env.source("main.c", 200);
  env.binary("main", "old", 100);
  let cc = env.broken_compiler();

  env
    .rebake_cmd()
    .args(["build", "-o", "main", "--source", "main.c", "--cc"])
    .arg(&cc)
    .assert()
    .success()
    .stderr(predicate::str::contains("Rebuild failed, relaunched the previous binary"));

  assert_eq!(env.events(), vec!["cc -o main main.c", "old 1 "]);
  assert!(!env.path("main.old").exists());
}

#[test]
#[serial]
fn relaunch_exit_status_is_not_propagated() {
  let env = TestEnv::new();
  env.source("main.c", 100);
  let cc = env.path("tools/failingbincc");
  std::fs::create_dir_all(env.path("tools")).unwrap();
  std::fs::write(
    &cc,
    "#!/bin/sh\nprintf '#!/bin/sh\\nexit 7\\n' > \"$2\"\nchmod +x \"$2\"\n",
  )
  .unwrap();
  {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(&cc, std::fs::Permissions::from_mode(0o755)).unwrap();
  }

  env
    .rebake_cmd()
    .args(["build", "-o", "main", "--source", "main.c", "--cc"])
    .arg(&cc)
    .assert()
    .success();
}

#[test]
#[serial]
fn trailing_args_reach_the_relaunched_binary() {
  let env = TestEnv::new();
  env.source("main.c", 100);
  let cc = env.compiler();

  env
    .rebake_cmd()
    .args(["build", "-o", "main", "--source", "main.c", "--cc"])
    .arg(&cc)
    .args(["--", "serve", "--port", "8080"])
    .assert()
    .success();

  assert_eq!(env.events().last().map(String::as_str), Some("new 1 serve --port 8080"));
}

#[test]
#[serial]
fn compiler_from_environment() {
  let env = TestEnv::new();
  env.source("main.c", 100);
  let cc = env.compiler();

  env
    .rebake_cmd()
    .env("REBAKE_CC", &cc)
    .env("REBAKE_CFLAGS", "-O2")
    .args(["build", "-o", "main", "--source", "main.c"])
    .assert()
    .success();

  // Extra flags are placed before the output flag.
  assert_eq!(env.events(), vec!["cc -O2 -o main main.c", "new 1 "]);
  assert!(env.path("main").exists());
  assert!(!env.path("-o").exists());
}

#[test]
#[serial]
fn json_summary_describes_the_handoff() {
  let env = TestEnv::new();
  env.source("main.c", 100);
  let cc = env.compiler();

  env
    .rebake_cmd()
    .args(["--format", "json", "build", "-o", "main", "--source", "main.c", "--cc"])
    .arg(&cc)
    .assert()
    .success()
    .stdout(predicate::str::contains("\"decision\": \"rebuilt\""))
    .stdout(predicate::str::contains("\"verdict\": \"output_missing\""));
}
