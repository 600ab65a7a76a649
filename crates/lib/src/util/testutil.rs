//! Test utilities for rebake-lib.
//!
//! Cross-platform helpers for tests that need to run a real process or set up
//! awkward filesystem states.

use std::path::Path;

/// Returns the shell command and args to execute a shell script.
#[cfg(unix)]
pub fn shell_cmd(script: &str) -> (&'static str, Vec<String>) {
  ("/bin/sh", vec!["-c".to_string(), script.to_string()])
}

#[cfg(windows)]
pub fn shell_cmd(script: &str) -> (&'static str, Vec<String>) {
  ("cmd.exe", vec!["/C".to_string(), script.to_string()])
}

/// Returns the command and args to echo a message.
///
/// On Unix, this uses /bin/echo directly.
/// On Windows, echo is a shell builtin, so we wrap it in cmd.exe.
#[cfg(unix)]
pub fn echo_msg(msg: &str) -> (&'static str, Vec<String>) {
  ("/bin/echo", vec![msg.to_string()])
}

#[cfg(windows)]
pub fn echo_msg(msg: &str) -> (&'static str, Vec<String>) {
  ("cmd.exe", vec!["/C".to_string(), format!("echo {}", msg)])
}

/// Make `path` a non-empty directory.
///
/// Such a directory can be neither renamed over another non-empty directory
/// nor deleted with `remove_file`, even by root, which makes it a reliable
/// binary that refuses to be displaced.
pub fn occupied_dir(path: &Path) {
  std::fs::create_dir_all(path).unwrap();
  std::fs::write(path.join("keep"), "").unwrap();
}
