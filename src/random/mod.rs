//! Deterministic key-stream generation.
//!
//! Provides the Blum Blum Shub generator and the prime sources that seed it.

pub mod bbs;
pub mod prime_source;
