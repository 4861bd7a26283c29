pub mod candidates;
pub mod error;
pub mod export;
pub mod models;
pub mod tally;

pub use candidates::{Candidate, CANDIDATES};
pub use error::{Error, Result};
pub use models::*;
pub use tally::Tally;

#[cfg(test)]
mod tests;
