//! grind75: scaffold, test and run Grind75 practice problems.
//!
//! Layers:
//! - `domain`: problems, placeholders, prefix matching (no I/O)
//! - `application`: scaffold and runner services
//! - `infrastructure`: filesystem/process traits and service wiring
//! - `cli`: argument parsing and command dispatch

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
