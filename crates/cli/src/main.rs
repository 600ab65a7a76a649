mod cmd;
mod output;

use std::ffi::OsString;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use rebake_lib::RebuildError;
use tracing_subscriber::EnvFilter;

use crate::cmd::TargetArgs;
use crate::output::{OutputFormat, print_error};

/// rebake - rebuild a binary from its sources when they change, then run it
#[derive(Parser)]
#[command(name = "rebake")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Output format
  #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
  format: OutputFormat,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Rebuild the binary if any source is newer, then relaunch it
  Build {
    #[command(flatten)]
    target: TargetArgs,

    /// Arguments passed to the relaunched binary
    #[arg(last = true)]
    args: Vec<OsString>,
  },

  /// Report whether the binary is stale without building
  Check {
    #[command(flatten)]
    target: TargetArgs,
  },

  /// Print the resolved source files
  Sources {
    #[command(flatten)]
    target: TargetArgs,
  },
}

fn init_tracing(verbose: bool) {
  // Library progress lines are on by default; RUST_LOG overrides everything.
  let default = if verbose { "debug" } else { "warn,rebake_lib=info" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();
}

fn main() -> ExitCode {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  let result = match &cli.command {
    Commands::Build { target, args } => cmd::cmd_build(target, args.clone(), cli.format),
    Commands::Check { target } => cmd::cmd_check(target, cli.format),
    Commands::Sources { target } => cmd::cmd_sources(target, cli.format),
  };

  match result {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      print_error(&format!("{:#}", e));
      let code = e.downcast_ref::<RebuildError>().map_or(1, RebuildError::exit_code);
      ExitCode::from(u8::try_from(code).unwrap_or(1))
    }
  }
}
