//! Moving the stale binary out of the way before a rebuild.
//!
//! The binary at the output path is renamed to `<output>.old` (or deleted if
//! the rename is refused) so the compiler can write a fresh file there. The
//! backup is owned by a [`Backup`] value: it is removed when the value is
//! finished or dropped, and can be moved back if the compiler left nothing
//! behind.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::consts::BACKUP_SUFFIX;
use crate::error::RebuildError;
use crate::source::exists;

/// `<output>.old`, with the suffix appended to the full file name.
pub fn backup_path(output: &Path) -> PathBuf {
  let mut name = OsString::from(output.as_os_str());
  name.push(BACKUP_SUFFIX);
  PathBuf::from(name)
}

/// What happened to the binary that occupied the output path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Displaced {
  /// Nothing was there.
  Absent,
  /// Renamed to the backup path.
  Renamed,
  /// The rename failed and the binary was deleted instead.
  Removed,
}

/// Exclusive handle on the backup path for one rebuild attempt.
#[derive(Debug)]
pub struct Backup {
  output: PathBuf,
  path: PathBuf,
  displaced: Displaced,
  done: bool,
}

impl Backup {
  /// Clear any old backup, then move the binary at `output` aside.
  ///
  /// # Errors
  ///
  /// Returns [`RebuildError::Displace`] if the binary exists but can be neither
  /// renamed nor deleted. No backup is left behind in that case.
  pub fn displace(output: &Path) -> Result<Self, RebuildError> {
    let path = backup_path(output);
    remove_quietly(&path);

    let mut backup = Backup {
      output: output.to_path_buf(),
      path,
      displaced: Displaced::Absent,
      done: false,
    };

    if !exists(output) {
      debug!(output = ?output, "no existing binary to back up");
      return Ok(backup);
    }

    match std::fs::rename(output, &backup.path) {
      Ok(()) => {
        info!(from = ?output, to = ?backup.path, "renamed current binary");
        backup.displaced = Displaced::Renamed;
        Ok(backup)
      }
      Err(rename) => {
        warn!(output = ?output, error = %rename, "failed to rename old binary, trying to remove instead");
        match std::fs::remove_file(output) {
          Ok(()) => {
            info!(output = ?output, "removed current binary");
            backup.displaced = Displaced::Removed;
            Ok(backup)
          }
          Err(remove) => Err(RebuildError::Displace {
            path: output.to_path_buf(),
            rename,
            remove,
          }),
        }
      }
    }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  pub fn displaced(&self) -> Displaced {
    self.displaced
  }

  /// Move the backup back to the output path if the output is missing.
  ///
  /// Returns true if a restore happened.
  pub fn restore_if_missing(&mut self) -> bool {
    if self.displaced != Displaced::Renamed || exists(&self.output) {
      return false;
    }

    match std::fs::rename(&self.path, &self.output) {
      Ok(()) => {
        info!(from = ?self.path, to = ?self.output, "restored previous binary");
        self.displaced = Displaced::Absent;
        true
      }
      Err(e) => {
        warn!(backup = ?self.path, error = %e, "failed to restore previous binary");
        false
      }
    }
  }

  /// Remove the backup file. Failure is logged and otherwise ignored.
  pub fn finish(mut self) {
    self.cleanup();
  }

  fn cleanup(&mut self) {
    if self.done {
      return;
    }
    self.done = true;
    if exists(&self.path) {
      info!(backup = ?self.path, "removing backup");
    }
    remove_quietly(&self.path);
  }
}

impl Drop for Backup {
  fn drop(&mut self) {
    self.cleanup();
  }
}

fn remove_quietly(path: &Path) {
  match std::fs::remove_file(path) {
    Ok(()) => {}
    Err(e) if e.kind() == io::ErrorKind::NotFound => {}
    Err(e) => debug!(path = ?path, error = %e, "failed to remove backup"),
  }
}
