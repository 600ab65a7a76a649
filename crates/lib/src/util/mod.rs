//! Shared utilities.
//!
//! Test helpers live here; the crate has no other shared code yet.

#[cfg(test)]
pub mod testutil;
