//! rebake-lib: self-rebuilding binaries
//!
//! A program calls into this crate at startup to check whether its binary is
//! older than its sources. If so the binary is rebuilt with an external
//! compiler, relaunched, and the caller is told to exit:
//! - `guard`: re-entrancy marker that stops a relaunched binary from rebuilding again
//! - `source`: single-path and glob-pattern source resolution
//! - `stale`: modification-time comparison
//! - `rebuild`: backup, compile, restore and relaunch
//! - `bootstrap`: the entry point tying the above together

pub mod backup;
pub mod bootstrap;
pub mod compiler;
pub mod consts;
pub mod error;
pub mod guard;
pub mod rebuild;
pub mod runner;
pub mod source;
pub mod stale;
pub mod util;

pub use bootstrap::{BootstrapOptions, BuildTarget, Decision, bootstrap, rebuild_self};
pub use compiler::Compiler;
pub use error::RebuildError;
pub use rebuild::{CompileStatus, Handoff, Rebuilder};
pub use runner::{Runner, SystemRunner};
pub use source::{SourceSpec, resolve_sources};
pub use stale::{Staleness, check_staleness, is_stale};
