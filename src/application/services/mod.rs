//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem, CommandRunner)
//! but are themselves concrete structs, not traits.

mod runner;
mod scaffold;

pub use runner::{RunnerService, ALL_TARGET};
pub use scaffold::{ScaffoldService, TemplateInit};
