use serde::{Deserialize, Deserializer, Serialize};

/// One row of the backend's `votes_aggregate` view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AggregateRow {
    pub candidate_id: String,
    #[serde(deserialize_with = "lenient_count", default)]
    pub total: u64,
}

/// The single insert the widget ever performs. The backend holds a unique
/// constraint on `device_id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewVote {
    pub device_id: String,
    pub candidate_id: String,
}

/// Aggregate views over bigint columns may serialize totals as strings;
/// anything unreadable counts as zero rather than poisoning the snapshot.
fn lenient_count<'de, D: Deserializer<'de>>(de: D) -> Result<u64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(u64),
        Float(f64),
        Text(String),
    }

    Ok(match Raw::deserialize(de)? {
        Raw::Int(n) => n,
        Raw::Float(f) if f.is_finite() && f >= 0.0 => f as u64,
        Raw::Float(_) => 0,
        Raw::Text(s) => s.trim().parse().unwrap_or(0),
    })
}

/// Channel topic for vote-insert notifications.
pub const VOTES_TOPIC: &str = "realtime:public:votes";

/// Phoenix socket envelope used by the realtime service in both directions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocketMessage {
    pub topic: String,
    pub event: String,
    #[serde(default)]
    pub payload: serde_json::Value,
    #[serde(rename = "ref")]
    pub reference: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChangePayload {
    data: ChangeData,
}

#[derive(Debug, Deserialize)]
struct ChangeData {
    #[serde(rename = "type")]
    kind: String,
    record: InsertedVote,
}

#[derive(Debug, Deserialize)]
struct InsertedVote {
    candidate_id: String,
}

impl SocketMessage {
    pub fn join(reference: u64) -> Self {
        Self {
            topic: VOTES_TOPIC.into(),
            event: "phx_join".into(),
            payload: serde_json::json!({
                "config": {
                    "postgres_changes": [
                        { "event": "INSERT", "schema": "public", "table": "votes" }
                    ]
                }
            }),
            reference: Some(reference.to_string()),
        }
    }

    pub fn heartbeat(reference: u64) -> Self {
        Self {
            topic: "phoenix".into(),
            event: "heartbeat".into(),
            payload: serde_json::json!({}),
            reference: Some(reference.to_string()),
        }
    }

    pub fn to_json(&self) -> String {
        // Serialization of these fixed shapes cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Extracts the candidate id from a raw socket frame, if the frame is a
/// postgres INSERT notification on our topic. Everything else (join replies,
/// heartbeat acks, system events, malformed frames) yields `None`.
pub fn decode_vote_insert(frame: &str) -> Option<String> {
    let msg: SocketMessage = serde_json::from_str(frame).ok()?;
    if msg.topic != VOTES_TOPIC || msg.event != "postgres_changes" {
        return None;
    }
    let change: ChangePayload = serde_json::from_value(msg.payload).ok()?;
    if change.data.kind != "INSERT" {
        return None;
    }
    Some(change.data.record.candidate_id)
}
