//! Implementation of the `rebake sources` command.
//!
//! Prints the resolved source set without checking or building anything.

use anyhow::Result;
use rebake_lib::resolve_sources;

use super::TargetArgs;
use crate::output::OutputFormat;

pub fn cmd_sources(args: &TargetArgs, format: OutputFormat) -> Result<()> {
  let sources = resolve_sources(&args.spec())?;

  if format.is_json() {
    return crate::output::print_json(&sources);
  }

  for source in &sources {
    println!("{}", source.display());
  }

  Ok(())
}
