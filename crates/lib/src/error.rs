//! Error types for the rebuild bootstrap.
//!
//! Only conditions that leave no usable binary at the output path are errors.
//! Everything else (a failed compile, a missing single source, a backup that
//! could not be removed) is logged and degrades toward running whatever binary
//! exists.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Exit status reported when the bootstrap aborts.
pub const FATAL_EXIT_CODE: i32 = 1;

/// Fatal bootstrap errors. Each one terminates the process with a non-zero
/// status before (or instead of) invoking the compiler.
#[derive(Debug, Error)]
pub enum RebuildError {
  /// Multi-source specification resolved to no paths at all.
  #[error("no source files matched: '{spec}'")]
  NoSources { spec: String },

  /// The stale binary could neither be moved to the backup path nor removed.
  #[error("failed to rename or remove current binary {path}: {remove}")]
  Displace {
    path: PathBuf,
    rename: io::Error,
    #[source]
    remove: io::Error,
  },

  /// The running executable could not be located.
  #[error("failed to locate current executable: {0}")]
  CurrentExe(#[source] io::Error),
}

impl RebuildError {
  /// Process exit status for this error.
  pub fn exit_code(&self) -> i32 {
    FATAL_EXIT_CODE
  }
}
