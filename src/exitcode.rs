//! Process exit codes
//!
//! Scripts only distinguish success from failure, so every failure kind
//! shares status 1.

/// Successful termination
pub const OK: i32 = 0;

/// Filesystem, template, lookup or toolchain failure
pub const FAILURE: i32 = 1;

/// Command line usage error
pub const USAGE: i32 = 1;
