//! Shared utilities for Duet binaries and libraries.

pub mod logger;
pub mod time;
