//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent problem lookup and validation failures.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("no problem found with number {0}")]
    ProblemNotFound(String),

    #[error("ambiguous problem number {number}: matches {}", .matches.join(", "))]
    AmbiguousProblem { number: String, matches: Vec<String> },

    #[error("invalid problem: {0}")]
    InvalidProblem(String),
}
