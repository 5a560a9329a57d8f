//! Shared utilities for hubcast binaries.

pub mod logger;
pub mod time;
