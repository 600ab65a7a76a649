mod build;
mod check;
mod sources;

use std::path::PathBuf;

use clap::Args;
use rebake_lib::{BuildTarget, Compiler, SourceSpec};

pub use build::cmd_build;
pub use check::cmd_check;
pub use sources::cmd_sources;

/// Target selection shared by every subcommand.
#[derive(Debug, Clone, Args)]
pub struct TargetArgs {
  /// Binary to check, rebuild and relaunch
  #[arg(short, long)]
  pub output: PathBuf,

  /// Single source file, taken literally (no wildcard expansion)
  #[arg(long, conflicts_with = "sources")]
  pub source: Option<PathBuf>,

  /// Whitespace-separated glob patterns; unmatched patterns are kept literally
  #[arg(short, long, default_value = "*.c")]
  pub sources: String,

  /// Compiler program (overrides REBAKE_CC)
  #[arg(long)]
  pub cc: Option<String>,

  /// Flag that precedes the output path on the compiler command line
  #[arg(long)]
  pub output_flag: Option<String>,
}

impl TargetArgs {
  pub fn spec(&self) -> SourceSpec {
    match &self.source {
      Some(path) => SourceSpec::single(path),
      None => SourceSpec::patterns(self.sources.clone()),
    }
  }

  pub fn target(&self) -> BuildTarget {
    BuildTarget::new(&self.output, self.spec())
  }

  /// Apply command-line overrides on top of `base`.
  pub fn compiler(&self, base: Compiler) -> Compiler {
    let mut compiler = base;
    if let Some(cc) = &self.cc {
      compiler.program = cc.clone();
    }
    if let Some(flag) = &self.output_flag {
      compiler.output_flag = flag.clone();
    }
    compiler
  }
}
