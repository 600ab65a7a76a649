//! Terminal output for the CLI.
//!
//! Every human-readable line is a status mark followed by a message. Results go
//! to stdout, anything the user should notice goes to stderr so that stdout
//! stays clean for the relaunched binary and for `--format json`.

use std::time::Duration;

use anyhow::Context;
use clap::ValueEnum;
use owo_colors::{OwoColorize, Stream};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
  #[default]
  Text,
  Json,
}

impl OutputFormat {
  pub fn is_json(self) -> bool {
    matches!(self, OutputFormat::Json)
  }
}

/// Leading mark of a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
  Success,
  Error,
  Warning,
  Info,
  Step,
}

impl Mark {
  fn symbol(self) -> &'static str {
    match self {
      Mark::Success => "✓",
      Mark::Error => "✗",
      Mark::Warning => "⚠",
      Mark::Info => "•",
      Mark::Step => "→",
    }
  }

  fn stream(self) -> Stream {
    match self {
      Mark::Success | Mark::Info => Stream::Stdout,
      Mark::Error | Mark::Warning | Mark::Step => Stream::Stderr,
    }
  }

  /// Errors and warnings color the whole line, the rest only the mark.
  fn colors_message(self) -> bool {
    matches!(self, Mark::Error | Mark::Warning)
  }
}

fn paint(mark: Mark, text: &str) -> String {
  let stream = mark.stream();
  match mark {
    Mark::Success => text.if_supports_color(stream, |s| s.green()).to_string(),
    Mark::Error => text.if_supports_color(stream, |s| s.red()).to_string(),
    Mark::Warning => text.if_supports_color(stream, |s| s.yellow()).to_string(),
    Mark::Info => text.if_supports_color(stream, |s| s.blue()).to_string(),
    Mark::Step => text.if_supports_color(stream, |s| s.cyan()).to_string(),
  }
}

fn status_line(mark: Mark, message: &str) -> String {
  let body = if mark.colors_message() {
    paint(mark, message)
  } else {
    message.to_string()
  };
  format!("{} {}", paint(mark, mark.symbol()), body)
}

fn emit(mark: Mark, message: &str) {
  let line = status_line(mark, message);
  match mark.stream() {
    Stream::Stdout => println!("{line}"),
    _ => eprintln!("{line}"),
  }
}

pub fn print_success(message: &str) {
  emit(Mark::Success, message);
}

pub fn print_error(message: &str) {
  emit(Mark::Error, message);
}

pub fn print_warning(message: &str) {
  emit(Mark::Warning, message);
}

pub fn print_info(message: &str) {
  emit(Mark::Info, message);
}

/// Progress before a possibly long-running step.
pub fn print_step(message: &str) {
  emit(Mark::Step, message);
}

/// An indented `label: value` line on stdout.
pub fn print_field(label: &str, value: &str) {
  println!("  {}: {}", label.if_supports_color(Stream::Stdout, |s| s.dimmed()), value);
}

/// Human-friendly elapsed time: `850ms`, `1.50s` or `2m 5s`.
pub fn format_duration(duration: Duration) -> String {
  let secs = duration.as_secs();
  match secs {
    0 => format!("{}ms", duration.subsec_millis()),
    1..60 => format!("{}.{:02}s", secs, duration.subsec_millis() / 10),
    _ => format!("{}m {}s", secs / 60, secs % 60),
  }
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
  println!("{json}");
  Ok(())
}
