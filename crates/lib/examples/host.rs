//! A program that keeps itself built from its C source.
//!
//! Run it from a directory containing `main.c` (or pass another source path):
//! the first run compiles `main.c` over this executable and launches the
//! result, later runs carry straight on.

use std::path::PathBuf;
use std::process::ExitCode;

use rebake_lib::{SourceSpec, rebuild_self};

fn main() -> ExitCode {
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let source = std::env::args_os()
    .nth(1)
    .map_or_else(|| PathBuf::from("main.c"), PathBuf::from);

  match rebuild_self(SourceSpec::single(source)) {
    Ok(decision) => {
      if let Some(code) = decision.exit_code() {
        return ExitCode::from(u8::try_from(code).unwrap_or(1));
      }
    }
    Err(e) => {
      eprintln!("{e}");
      return ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(1));
    }
  }

  println!("binary is current");
  ExitCode::SUCCESS
}
