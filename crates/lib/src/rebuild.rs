//! Rebuild orchestration.
//!
//! Runs once the binary is known to be stale: back up, compile, clean up,
//! relaunch. Only failing to clear the output path is fatal. A failed compile
//! is reported and the previous binary, restored from the backup if needed,
//! is launched instead.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use serde::Serialize;
use tracing::{info, warn};

use crate::backup::Backup;
use crate::compiler::Compiler;
use crate::error::RebuildError;
use crate::guard;
use crate::runner::{Runner, display_command};

/// Outcome of the compiler subprocess.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum CompileStatus {
  Succeeded,
  /// Exited non-zero; `code` is `None` when killed by a signal.
  Failed { code: Option<i32> },
  /// The compiler could not be started at all.
  SpawnFailed { message: String },
}

impl CompileStatus {
  fn from_exit(status: ExitStatus) -> Self {
    if status.success() {
      CompileStatus::Succeeded
    } else {
      CompileStatus::Failed { code: status.code() }
    }
  }

  pub fn succeeded(&self) -> bool {
    matches!(self, CompileStatus::Succeeded)
  }
}

/// Record of a completed backup/compile/relaunch sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Handoff {
  pub output: PathBuf,
  pub compile: CompileStatus,
  /// The previous binary was put back because the compiler produced nothing.
  pub restored: bool,
  /// Exit code of the relaunched binary. `None` if it could not be started
  /// or was killed by a signal. Informational only.
  pub relaunch_code: Option<i32>,
  pub relaunched: bool,
}

/// Rebuilds one output path from resolved sources and relaunches it.
#[derive(Debug, Clone)]
pub struct Rebuilder {
  output: PathBuf,
  compiler: Compiler,
  relaunch_args: Vec<OsString>,
}

impl Rebuilder {
  pub fn new(output: impl Into<PathBuf>, compiler: Compiler) -> Self {
    Self {
      output: output.into(),
      compiler,
      relaunch_args: Vec::new(),
    }
  }

  /// Arguments passed to the relaunched binary. None by default.
  pub fn with_relaunch_args<I, S>(mut self, args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
  {
    self.relaunch_args = args.into_iter().map(Into::into).collect();
    self
  }

  /// Back up the current binary, compile `sources`, drop the backup and run
  /// whatever binary now sits at the output path with the re-entrancy marker
  /// set.
  ///
  /// # Errors
  ///
  /// Returns [`RebuildError::Displace`] when the current binary can be neither
  /// renamed nor removed. The compiler is not invoked in that case.
  pub fn rebuild_and_relaunch<R: Runner>(&self, sources: &[PathBuf], runner: &mut R) -> Result<Handoff, RebuildError> {
    let mut backup = Backup::displace(&self.output)?;

    let compile = self.compile(sources, runner);

    let restored = backup.restore_if_missing();

    backup.finish();

    let relaunch = self.relaunch(runner);

    Ok(Handoff {
      output: self.output.clone(),
      compile,
      restored,
      relaunched: relaunch.is_some(),
      relaunch_code: relaunch.and_then(|status| status.code()),
    })
  }

  fn compile<R: Runner>(&self, sources: &[PathBuf], runner: &mut R) -> CompileStatus {
    let mut command = self.compiler.command(&self.output, sources);
    let line = display_command(&command);
    info!(command = %line, "rebuilding");

    let status = match runner.run(&mut command) {
      Ok(status) => CompileStatus::from_exit(status),
      Err(e) => CompileStatus::SpawnFailed { message: e.to_string() },
    };

    match &status {
      CompileStatus::Succeeded => {}
      CompileStatus::Failed { code } => warn!(command = %line, code = ?code, "command failed"),
      CompileStatus::SpawnFailed { message } => warn!(command = %line, error = %message, "command failed to start"),
    }

    status
  }

  fn relaunch<R: Runner>(&self, runner: &mut R) -> Option<ExitStatus> {
    let program = launchable(&self.output);
    info!(binary = ?program, "relaunching");

    let mut command = Command::new(&program);
    command.args(&self.relaunch_args);
    guard::mark(&mut command);

    match runner.run(&mut command) {
      Ok(status) => {
        if !status.success() {
          warn!(binary = ?program, code = ?status.code(), "relaunched binary exited with failure");
        }
        Some(status)
      }
      Err(e) => {
        warn!(binary = ?program, error = %e, "failed to relaunch binary");
        None
      }
    }
  }
}

/// A bare file name would be looked up on `PATH`; anchor it to the current
/// directory instead.
fn launchable(output: &Path) -> PathBuf {
  if output.parent().is_some_and(|p| p.as_os_str().is_empty()) {
    Path::new(".").join(output)
  } else {
    output.to_path_buf()
  }
}
