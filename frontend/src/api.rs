use gloo_net::http::Request;
use shared::error::{classify_insert_failure, Error};
use shared::models::{AggregateRow, NewVote};

use crate::config::Config;

fn with_auth(request: Request, config: &Config) -> Request {
    request
        .header("apikey", config.anon_key)
        .header("Authorization", &format!("Bearer {}", config.anon_key))
}

/// Full snapshot of the aggregate view. Callers treat a failure as "keep the
/// previous snapshot"; the next poll tick supersedes it.
pub async fn fetch_totals(config: Config) -> Result<Vec<AggregateRow>, Error> {
    let response = with_auth(
        Request::get(&format!("{}?select=*", config.rest_url("votes_aggregate"))),
        &config,
    )
    .send()
    .await
    .map_err(|e| Error::Fetch(e.to_string()))?;

    if !response.ok() {
        return Err(Error::Fetch(format!("status {}", response.status())));
    }
    response
        .json::<Vec<AggregateRow>>()
        .await
        .map_err(|e| Error::Fetch(e.to_string()))
}

/// Single fire-and-report insert attempt, no retries. A unique-constraint hit
/// on device_id comes back as `Error::DuplicateVote`.
pub async fn insert_vote(config: Config, vote: NewVote) -> Result<(), Error> {
    let request = with_auth(Request::post(&config.rest_url("votes")), &config)
        .header("Prefer", "return=minimal")
        .json(&vote)
        .map_err(|e| Error::Submission(e.to_string()))?;

    let response = request
        .send()
        .await
        .map_err(|e| Error::Submission(e.to_string()))?;

    if response.ok() {
        return Ok(());
    }
    let body = response.text().await.unwrap_or_default();
    Err(classify_insert_failure(response.status(), &body))
}
