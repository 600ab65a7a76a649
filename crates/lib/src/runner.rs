//! Subprocess execution seam.
//!
//! The orchestrator never spawns processes directly; it hands fully built
//! [`Command`]s to a [`Runner`]. Production code uses [`SystemRunner`], tests
//! substitute runners that record what would have been executed.

use std::io;
use std::process::{Command, ExitStatus};

use tracing::debug;

/// Runs a command to completion and reports how it exited.
pub trait Runner {
  fn run(&mut self, command: &mut Command) -> io::Result<ExitStatus>;
}

/// Spawns the command as a child process, inheriting stdio, and blocks until
/// it exits. There is no timeout.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl Runner for SystemRunner {
  fn run(&mut self, command: &mut Command) -> io::Result<ExitStatus> {
    debug!(program = ?command.get_program(), args = ?command.get_args().collect::<Vec<_>>(), "spawning process");
    command.status()
  }
}

/// Render a command as a single line for diagnostics. Not shell-quoted.
pub fn display_command(command: &Command) -> String {
  std::iter::once(command.get_program())
    .chain(command.get_args())
    .map(|arg| arg.to_string_lossy().into_owned())
    .collect::<Vec<_>>()
    .join(" ")
}
