//! Implementation of the `rebake build` command.
//!
//! Rebuilds the target binary when it is older than its sources, then runs
//! it. The relaunched binary's exit status is not propagated.

use std::ffi::OsString;
use std::time::Instant;

use anyhow::Result;
use rebake_lib::{BootstrapOptions, Decision, Staleness, SystemRunner, bootstrap};
use tracing::debug;

use super::TargetArgs;
use crate::output::{OutputFormat, format_duration, print_info, print_json, print_step, print_success, print_warning};

/// Execute the build command.
///
/// # Arguments
///
/// * `args` - Target binary, sources and compiler overrides.
/// * `relaunch_args` - Arguments handed to the binary when it is relaunched.
/// * `format` - Text or JSON summary.
///
/// # Errors
///
/// Returns a [`rebake_lib::RebuildError`] when no sources match or the stale
/// binary cannot be moved out of the way.
pub fn cmd_build(args: &TargetArgs, relaunch_args: Vec<OsString>, format: OutputFormat) -> Result<()> {
  let start = Instant::now();

  let mut options = BootstrapOptions::from_env();
  options.compiler = args.compiler(options.compiler);
  options.relaunch_args = relaunch_args;
  debug!(compiler = ?options.compiler, already_rebuilt = options.already_rebuilt, "bootstrap options");

  let target = args.target();
  if !format.is_json() && !options.already_rebuilt {
    print_step(&format!("Binary: {}", target.output.display()));
    print_step(&format!("Source: {}", target.sources));
  }

  let decision = bootstrap(&target, &options, &mut SystemRunner)?;

  if format.is_json() {
    return print_json(&decision);
  }

  match &decision {
    Decision::Skipped => print_info("Already rebuilt in this chain, skipping"),
    Decision::UpToDate {
      staleness: Staleness::SourceMissing(path),
    } => print_warning(&format!("{} is missing, keeping existing binary", path.display())),
    Decision::UpToDate { .. } => print_success(&format!("{} is up to date", target.output.display())),
    Decision::Rebuilt { handoff, .. } if handoff.compile.succeeded() => print_success(&format!(
      "Rebuilt and relaunched {} in {}",
      target.output.display(),
      format_duration(start.elapsed())
    )),
    Decision::Rebuilt { handoff, .. } if handoff.restored => {
      print_warning("Rebuild failed, relaunched the previous binary")
    }
    Decision::Rebuilt { .. } => print_warning("Rebuild failed"),
  }

  Ok(())
}
