use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    #[error("This device has already voted")]
    DuplicateVote,
    #[error("No candidate selected")]
    NoSelection,
    #[error("Failed to submit vote: {0}")]
    Submission(String),
    #[error("Failed to fetch results: {0}")]
    Fetch(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Postgres unique-violation code, surfaced verbatim in PostgREST error bodies.
const UNIQUE_VIOLATION: &str = "23505";

/// Maps a failed insert response to the submit taxonomy. PostgREST answers a
/// unique-constraint hit with 409 and code 23505 in the body; older proxies
/// have been seen passing only the "duplicate key" message through.
pub fn classify_insert_failure(status: u16, body: &str) -> Error {
    let body_lc = body.to_lowercase();
    if status == 409 || body_lc.contains(UNIQUE_VIOLATION) || body_lc.contains("duplicate") {
        Error::DuplicateVote
    } else {
        Error::Submission(format!("status {status}: {body}"))
    }
}

/// Local guard run before any network traffic. The authoritative check is the
/// backend's unique constraint; this only saves a doomed round trip.
pub fn check_can_submit(selected: Option<&str>, has_voted: bool) -> Result<()> {
    if has_voted {
        return Err(Error::DuplicateVote);
    }
    if selected.is_none() {
        return Err(Error::NoSelection);
    }
    Ok(())
}
