//! Staleness detection by modification time.
//!
//! A binary is stale when it is missing or when any source is strictly newer.
//! Equal timestamps never trigger a rebuild; coarse filesystem clocks would
//! otherwise flip between always and never rebuilding.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::Serialize;
use tracing::{debug, info};

/// Why a binary is or is not considered stale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "verdict", content = "path")]
pub enum Staleness {
  /// Nothing exists at the output path.
  OutputMissing,
  /// This source is newer than the output. Checking stopped here.
  SourceNewer(PathBuf),
  /// The only source is missing, so there is nothing to rebuild from.
  SourceMissing(PathBuf),
  /// Every existing source is at most as new as the output.
  UpToDate,
}

impl Staleness {
  pub fn is_stale(&self) -> bool {
    matches!(self, Staleness::OutputMissing | Staleness::SourceNewer(_))
  }
}

/// Modification time of `path`, or `None` if it cannot be read.
pub fn mtime(path: &Path) -> Option<SystemTime> {
  std::fs::metadata(path).and_then(|m| m.modified()).ok()
}

/// Decide staleness from already-collected modification times.
///
/// `sources` yields each source path with its mtime (`None` when missing) and
/// is consumed lazily, so the first newer source ends the scan.
pub fn evaluate<I>(output_mtime: Option<SystemTime>, sources: I) -> Staleness
where
  I: IntoIterator<Item = (PathBuf, Option<SystemTime>)>,
{
  let Some(output_mtime) = output_mtime else {
    return Staleness::OutputMissing;
  };

  let mut missing = None;
  let mut seen = 0usize;

  for (path, source_mtime) in sources {
    seen += 1;
    match source_mtime {
      Some(source_mtime) if source_mtime > output_mtime => return Staleness::SourceNewer(path),
      Some(_) => {}
      None => {
        if missing.is_none() {
          missing = Some(path);
        }
      }
    }
  }

  match missing {
    // A lone missing source means there is nothing to build from.
    Some(path) if seen == 1 => Staleness::SourceMissing(path),
    _ => Staleness::UpToDate,
  }
}

/// Compare `output` against every source on disk.
pub fn check_staleness(output: &Path, sources: &[PathBuf]) -> Staleness {
  let output_mtime = mtime(output);
  if output_mtime.is_none() {
    debug!(output = ?output, "output binary does not exist");
  }

  let verdict = evaluate(output_mtime, sources.iter().map(|path| (path.clone(), mtime(path))));

  match &verdict {
    Staleness::SourceMissing(path) => info!(source = ?path, "source is missing, skipping rebuild"),
    Staleness::SourceNewer(path) => debug!(source = ?path, "source is newer than binary"),
    _ => {}
  }

  verdict
}

/// True if `output` must be rebuilt from `sources`.
pub fn is_stale(output: &Path, sources: &[PathBuf]) -> bool {
  check_staleness(output, sources).is_stale()
}
