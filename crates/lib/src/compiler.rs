//! External compiler invocation.
//!
//! The compiler is an opaque program that receives an output path and a list
//! of sources and either produces an executable or exits non-zero. Arguments
//! are passed as a vector, never through a shell.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::consts::{COMPILER_ENV, COMPILER_FLAGS_ENV, DEFAULT_COMPILER, DEFAULT_OUTPUT_FLAG};

/// How to invoke the compiler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compiler {
  /// Program name or path.
  pub program: String,
  /// Flag preceding the output path.
  pub output_flag: String,
  /// Arguments placed before the output flag.
  pub extra_args: Vec<String>,
}

impl Default for Compiler {
  fn default() -> Self {
    Self::new(DEFAULT_COMPILER)
  }
}

impl Compiler {
  pub fn new(program: impl Into<String>) -> Self {
    Self {
      program: program.into(),
      output_flag: DEFAULT_OUTPUT_FLAG.to_string(),
      extra_args: Vec::new(),
    }
  }

  /// Default compiler with `REBAKE_CC` and `REBAKE_CFLAGS` applied.
  pub fn from_env() -> Self {
    let mut compiler = match std::env::var(COMPILER_ENV) {
      Ok(program) if !program.trim().is_empty() => Self::new(program.trim()),
      _ => Self::default(),
    };

    if let Ok(flags) = std::env::var(COMPILER_FLAGS_ENV) {
      compiler.extra_args = flags.split_whitespace().map(str::to_string).collect();
    }

    compiler
  }

  pub fn with_output_flag(mut self, flag: impl Into<String>) -> Self {
    self.output_flag = flag.into();
    self
  }

  /// Build `program [extra_args] output_flag output sources...`.
  pub fn command(&self, output: &Path, sources: &[PathBuf]) -> Command {
    let mut command = Command::new(&self.program);
    command
      .args(&self.extra_args)
      .arg(&self.output_flag)
      .arg(output)
      .args(sources);
    command
  }
}
