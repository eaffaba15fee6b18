use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::user::UserSummary;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Message {
    pub id: i64,
    pub from_username: String,
    pub to_username: String,
    pub body: String,
    pub sent_at: DateTime<Utc>,
    pub read_at: Option<DateTime<Utc>>,
}

impl Message {
    /// Participants are the two fixed endpoints of a message.
    pub fn is_participant(&self, username: &str) -> bool {
        self.from_username == username || self.to_username == username
    }
}

/// Message enriched with both participant summaries, for detail reads.
#[derive(Debug, Clone, Serialize)]
pub struct MessageDetail {
    pub id: i64,
    pub body: String,
    pub sent_at: DateTime<Utc>,
    pub read_at: Option<DateTime<Utc>>,
    pub from_user: UserSummary,
    pub to_user: UserSummary,
}

/// Sender's view of an outbound message.
#[derive(Debug, Clone, Serialize)]
pub struct SentMessageView {
    pub id: i64,
    pub to_user: UserSummary,
    pub body: String,
    pub sent_at: DateTime<Utc>,
    pub read_at: Option<DateTime<Utc>>,
}

/// Recipient's view of an inbound message.
#[derive(Debug, Clone, Serialize)]
pub struct ReceivedMessageView {
    pub id: i64,
    pub from_user: UserSummary,
    pub body: String,
    pub sent_at: DateTime<Utc>,
    pub read_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub to_username: String,
    pub body: String,
}
