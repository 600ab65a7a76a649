//! Implementation of the `rebake check` command.
//!
//! Reports whether the target binary is stale. Never builds.

use std::path::PathBuf;

use anyhow::Result;
use rebake_lib::source::display_sources;
use rebake_lib::{Staleness, check_staleness, resolve_sources};
use serde::Serialize;

use super::TargetArgs;
use crate::output::{OutputFormat, print_info, print_json, print_field, print_success, print_warning};

#[derive(Debug, Serialize)]
struct CheckReport {
  output: PathBuf,
  sources: Vec<PathBuf>,
  stale: bool,
  staleness: Staleness,
}

/// Execute the check command.
///
/// # Errors
///
/// Returns an error if a pattern list resolves to no sources.
pub fn cmd_check(args: &TargetArgs, format: OutputFormat) -> Result<()> {
  let sources = resolve_sources(&args.spec())?;
  let staleness = check_staleness(&args.output, &sources);

  if format.is_json() {
    return print_json(&CheckReport {
      output: args.output.clone(),
      stale: staleness.is_stale(),
      sources,
      staleness,
    });
  }

  print_field("Binary", &args.output.display().to_string());
  print_field("Sources", &display_sources(&sources));
  println!();

  match &staleness {
    Staleness::OutputMissing => print_info("Binary does not exist, a build is needed"),
    Staleness::SourceNewer(path) => print_info(&format!("Stale: {} is newer than the binary", path.display())),
    Staleness::SourceMissing(path) => print_warning(&format!("{} is missing, no rebuild possible", path.display())),
    Staleness::UpToDate => print_success("Up to date"),
  }

  Ok(())
}
