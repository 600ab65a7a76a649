//! Re-entrancy guard.
//!
//! A rebuilt binary is relaunched with [`MARKER_ENV`] in its environment. The
//! relaunched process must not try to rebuild again, whatever the timestamps
//! say, so the marker short-circuits the whole bootstrap. The environment is
//! only read here, at the process boundary; the rest of the crate receives the
//! answer as an explicit `already_rebuilt` flag.

use std::process::Command;

use crate::consts::{MARKER_ENV, MARKER_VALUE};

/// Returns true iff the re-entrancy marker is present in this process'
/// environment. Any value counts, including an empty one.
pub fn should_skip_rebuild() -> bool {
  std::env::var_os(MARKER_ENV).is_some()
}

/// Sets the re-entrancy marker on the environment `command` will hand to its
/// child. The marker is never removed once set.
pub fn mark(command: &mut Command) -> &mut Command {
  command.env(MARKER_ENV, MARKER_VALUE)
}
