//! Bootstrap entry point.
//!
//! Composes guard, resolver, detector and orchestrator. Nothing here exits the
//! process: [`bootstrap`] returns a [`Decision`] and the caller's `main`
//! turns it into an exit status via [`Decision::exit_code`] or
//! [`RebuildError::exit_code`].

use std::ffi::OsString;
use std::path::PathBuf;

use serde::Serialize;
use tracing::info;

use crate::compiler::Compiler;
use crate::error::RebuildError;
use crate::guard;
use crate::rebuild::{Handoff, Rebuilder};
use crate::runner::{Runner, SystemRunner};
use crate::source::{SourceSpec, display_sources, resolve_sources};
use crate::stale::{Staleness, check_staleness};

/// A binary and what it is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildTarget {
  pub output: PathBuf,
  pub sources: SourceSpec,
}

impl BuildTarget {
  pub fn new(output: impl Into<PathBuf>, sources: SourceSpec) -> Self {
    Self {
      output: output.into(),
      sources,
    }
  }
}

/// Knobs for one bootstrap run.
#[derive(Debug, Clone, Default)]
pub struct BootstrapOptions {
  /// Set when this process was launched by a rebuild. Skips everything.
  pub already_rebuilt: bool,
  pub compiler: Compiler,
  /// Arguments for the relaunched binary.
  pub relaunch_args: Vec<OsString>,
}

impl BootstrapOptions {
  /// Options taken from the process environment: the re-entrancy marker,
  /// `REBAKE_CC` and `REBAKE_CFLAGS`.
  pub fn from_env() -> Self {
    Self {
      already_rebuilt: guard::should_skip_rebuild(),
      compiler: Compiler::from_env(),
      relaunch_args: Vec::new(),
    }
  }
}

/// What the bootstrap did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "decision")]
pub enum Decision {
  /// The re-entrancy marker was set; nothing was checked.
  Skipped,
  /// The binary is current (or its only source is missing).
  UpToDate { staleness: Staleness },
  /// The binary was rebuilt and relaunched; the caller should exit.
  Rebuilt { staleness: Staleness, handoff: Handoff },
}

impl Decision {
  /// `Some(0)` when the current process has handed off and must terminate,
  /// `None` when the host program should carry on.
  pub fn exit_code(&self) -> Option<i32> {
    match self {
      Decision::Rebuilt { .. } => Some(0),
      Decision::Skipped | Decision::UpToDate { .. } => None,
    }
  }
}

/// Rebuild `target` if it is stale, relaunching it through `runner`.
///
/// # Errors
///
/// [`RebuildError::NoSources`] if a pattern list resolves to nothing, and
/// [`RebuildError::Displace`] if the stale binary cannot be moved out of the
/// way. In both cases no compiler has run.
pub fn bootstrap<R: Runner>(
  target: &BuildTarget,
  options: &BootstrapOptions,
  runner: &mut R,
) -> Result<Decision, RebuildError> {
  if options.already_rebuilt {
    info!(binary = ?target.output, "already rebuilt, skipping");
    return Ok(Decision::Skipped);
  }

  let sources = resolve_sources(&target.sources)?;
  info!(binary = ?target.output, sources = %display_sources(&sources), "checking binary");

  let staleness = check_staleness(&target.output, &sources);
  if !staleness.is_stale() {
    return Ok(Decision::UpToDate { staleness });
  }

  info!(binary = ?target.output, reason = ?staleness, "rebuild needed");

  let handoff = Rebuilder::new(&target.output, options.compiler.clone())
    .with_relaunch_args(options.relaunch_args.iter().cloned())
    .rebuild_and_relaunch(&sources, runner)?;

  Ok(Decision::Rebuilt { staleness, handoff })
}

/// Rebuild the running executable from `sources` if needed.
///
/// Meant as the first call in a host program's `main`. Progress and failures
/// are reported through `tracing` only, so the host must install a subscriber
/// first or nothing reaches the console:
///
/// ```no_run
/// use rebake_lib::{SourceSpec, rebuild_self};
///
/// tracing_subscriber::fmt().with_writer(std::io::stderr).without_time().init();
///
/// let decision = match rebuild_self(SourceSpec::single("main.c")) {
///   Ok(decision) => decision,
///   Err(e) => {
///     eprintln!("{e}");
///     std::process::exit(e.exit_code());
///   }
/// };
/// if let Some(code) = decision.exit_code() {
///   std::process::exit(code);
/// }
/// // normal program logic
/// ```
///
/// # Errors
///
/// See [`bootstrap`]; additionally [`RebuildError::CurrentExe`] if the running
/// executable cannot be located.
pub fn rebuild_self(sources: SourceSpec) -> Result<Decision, RebuildError> {
  let options = BootstrapOptions::from_env();
  if options.already_rebuilt {
    return Ok(Decision::Skipped);
  }

  let output = std::env::current_exe().map_err(RebuildError::CurrentExe)?;
  bootstrap(&BuildTarget::new(output, sources), &options, &mut SystemRunner)
}
