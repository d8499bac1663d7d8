pub mod client;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod executor;
pub mod store;
pub mod templates;

#[cfg(test)]
mod client_tests;
#[cfg(test)]
mod testing;

pub use client::{HttpJudge, JudgeApi, SubmissionClient};
pub use config::LanguageRegistry;
pub use error::{JudgeError, RunError};
pub use evaluator::OutputPolicy;
pub use executor::{Executor, NewProblem, ProblemCreation, RunRequest, ValidationRequest};
pub use store::{InMemoryStore, ProblemSeed, ProblemStore};
