//! Filesystem utilities for dialplan.
//!
//! Provides the atomic write used when scaffolding configuration files, so a
//! crash mid-write never leaves a half-written YAML behind.

pub mod atomic;

pub use atomic::atomic_write_file;
