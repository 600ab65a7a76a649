//! Source resolution.
//!
//! Turns a source specification into the ordered list of paths used both for
//! the staleness comparison and as compiler arguments.
//!
//! Two modes exist and behave differently on purpose:
//! - [`SourceSpec::Single`] is taken verbatim. A missing file is not an error
//!   here; the staleness check treats it as "nothing to rebuild from".
//! - [`SourceSpec::Patterns`] is split on whitespace and every token is
//!   globbed. Tokens that match nothing are kept literally, so a list may name
//!   a file that does not exist yet. Only an empty result is fatal.

use std::fmt;
use std::path::{Path, PathBuf};

use glob::MatchOptions;
use serde::Serialize;
use tracing::debug;

use crate::error::RebuildError;

/// What the build target is compiled from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "mode", content = "value")]
pub enum SourceSpec {
  /// One literal path, no expansion.
  Single(PathBuf),
  /// Whitespace-separated glob patterns.
  Patterns(String),
}

impl SourceSpec {
  pub fn single(path: impl Into<PathBuf>) -> Self {
    SourceSpec::Single(path.into())
  }

  pub fn patterns(spec: impl Into<String>) -> Self {
    SourceSpec::Patterns(spec.into())
  }
}

impl fmt::Display for SourceSpec {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      SourceSpec::Single(path) => write!(f, "{}", path.display()),
      SourceSpec::Patterns(spec) => write!(f, "{}", spec),
    }
  }
}

/// Resolve a source specification into concrete paths.
///
/// # Errors
///
/// Returns [`RebuildError::NoSources`] when a pattern list resolves to nothing,
/// which only happens if it is empty or all whitespace.
pub fn resolve_sources(spec: &SourceSpec) -> Result<Vec<PathBuf>, RebuildError> {
  match spec {
    SourceSpec::Single(path) => Ok(vec![path.clone()]),
    SourceSpec::Patterns(patterns) => {
      let resolved = expand_patterns(patterns);
      if resolved.is_empty() {
        return Err(RebuildError::NoSources { spec: patterns.clone() });
      }
      Ok(resolved)
    }
  }
}

/// Expand each whitespace-separated token, left to right.
fn expand_patterns(patterns: &str) -> Vec<PathBuf> {
  let mut resolved = Vec::new();

  for token in patterns.split_whitespace() {
    let matches = expand_token(token);
    if matches.is_empty() {
      debug!(pattern = %token, "pattern matched nothing, keeping it literally");
      resolved.push(PathBuf::from(token));
    } else {
      debug!(pattern = %token, count = matches.len(), "pattern expanded");
      resolved.extend(matches);
    }
  }

  resolved
}

/// Glob a single token. Invalid patterns yield no matches.
fn expand_token(token: &str) -> Vec<PathBuf> {
  let pattern = expand_tilde(token);

  // Same rules as glob(3): `*` never crosses `/` and never matches a leading dot.
  let options = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
  };

  let paths = match glob::glob_with(&pattern, options) {
    Ok(paths) => paths,
    Err(e) => {
      debug!(pattern = %pattern, error = %e, "invalid glob pattern");
      return Vec::new();
    }
  };

  paths
    .filter_map(|entry| match entry {
      Ok(path) => Some(path),
      Err(e) => {
        debug!(path = ?e.path(), error = %e.error(), "skipping unreadable entry");
        None
      }
    })
    .collect()
}

/// Replace a leading `~` with the home directory, if one is known.
fn expand_tilde(token: &str) -> String {
  let rest = match token.strip_prefix('~') {
    Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
    _ => return token.to_string(),
  };

  match dirs::home_dir() {
    Some(home) => format!("{}{}", home.display(), rest),
    None => token.to_string(),
  }
}

/// Render resolved paths as a single space-separated line for display.
pub fn display_sources(sources: &[PathBuf]) -> String {
  sources
    .iter()
    .map(|p| p.display().to_string())
    .collect::<Vec<_>>()
    .join(" ")
}

/// True if `path` names an existing filesystem entry.
pub(crate) fn exists(path: &Path) -> bool {
  path.symlink_metadata().is_ok()
}
