use sqlx::{Pool, Postgres};

use crate::error::{AppError, AppResult};
use crate::models::message::{Message, MessageDetail, ReceivedMessageView, SentMessageView};
use crate::services::user_service::UserService;

pub struct MessageService;

impl MessageService {
    /// Create a message. Both endpoints must be registered users; the
    /// foreign key constraints turn an unknown sender or recipient into
    /// `NotFound`. `read_at` starts NULL.
    pub async fn create(
        db: &Pool<Postgres>,
        from_username: &str,
        to_username: &str,
        body: &str,
    ) -> AppResult<Message> {
        if body.trim().is_empty() {
            return Err(AppError::BadRequest("message body must not be empty".into()));
        }

        let message = sqlx::query_as::<_, Message>(
            r#"
            INSERT INTO messages (from_username, to_username, body, sent_at)
            VALUES ($1, $2, $3, CURRENT_TIMESTAMP)
            RETURNING *
            "#,
        )
        .bind(from_username)
        .bind(to_username)
        .bind(body)
        .fetch_one(db)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                AppError::NotFound
            }
            other => AppError::Database(other),
        })?;

        tracing::info!(id = message.id, from = %from_username, to = %to_username, "message created");
        Ok(message)
    }

    pub async fn fetch(db: &Pool<Postgres>, id: i64) -> AppResult<Message> {
        sqlx::query_as::<_, Message>("SELECT * FROM messages WHERE id = $1")
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or(AppError::NotFound)
    }

    /// Detail view: the message plus both participant summaries. Two-step
    /// read: fetch the row, then resolve display info from the users table.
    pub async fn get(db: &Pool<Postgres>, id: i64) -> AppResult<MessageDetail> {
        let message = Self::fetch(db, id).await?;
        Self::enrich(db, message).await
    }

    /// Mark a message read. Only the recipient may mark; the first call
    /// wins. The `read_at IS NULL` guard makes concurrent calls serialize
    /// at the row so the timestamp is set exactly once, and repeat calls
    /// are no-ops that return the original `read_at`.
    pub async fn mark_read(
        db: &Pool<Postgres>,
        id: i64,
        requesting_username: &str,
    ) -> AppResult<MessageDetail> {
        let message = Self::fetch(db, id).await?;

        if message.to_username != requesting_username {
            return Err(AppError::Forbidden);
        }

        let updated = sqlx::query_as::<_, Message>(
            r#"
            UPDATE messages SET read_at = CURRENT_TIMESTAMP
            WHERE id = $1 AND read_at IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;

        match updated {
            Some(m) => {
                tracing::info!(id = m.id, to = %m.to_username, "message marked read");
                Self::enrich(db, m).await
            }
            // Already read; re-fetch so the original read_at is returned.
            None => {
                let m = Self::fetch(db, id).await?;
                Self::enrich(db, m).await
            }
        }
    }

    /// All messages sent by a user, each enriched with recipient display
    /// info. Empty when the user has sent nothing.
    pub async fn messages_from(
        db: &Pool<Postgres>,
        username: &str,
    ) -> AppResult<Vec<SentMessageView>> {
        let rows = sqlx::query_as::<_, EnrichedRow>(
            r#"
            SELECT m.id, m.body, m.sent_at, m.read_at,
                   t.username, t.first_name, t.last_name, t.phone
            FROM messages AS m
            JOIN users AS t ON m.to_username = t.username
            WHERE m.from_username = $1
            ORDER BY m.id
            "#,
        )
        .bind(username)
        .fetch_all(db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| SentMessageView {
                id: r.id,
                to_user: crate::models::UserSummary {
                    username: r.username,
                    first_name: r.first_name,
                    last_name: r.last_name,
                    phone: r.phone,
                },
                body: r.body,
                sent_at: r.sent_at,
                read_at: r.read_at,
            })
            .collect())
    }

    /// All messages received by a user, each enriched with sender display
    /// info. Empty when none received.
    pub async fn messages_to(
        db: &Pool<Postgres>,
        username: &str,
    ) -> AppResult<Vec<ReceivedMessageView>> {
        let rows = sqlx::query_as::<_, EnrichedRow>(
            r#"
            SELECT m.id, m.body, m.sent_at, m.read_at,
                   f.username, f.first_name, f.last_name, f.phone
            FROM messages AS m
            JOIN users AS f ON m.from_username = f.username
            WHERE m.to_username = $1
            ORDER BY m.id
            "#,
        )
        .bind(username)
        .fetch_all(db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| ReceivedMessageView {
                id: r.id,
                from_user: crate::models::UserSummary {
                    username: r.username,
                    first_name: r.first_name,
                    last_name: r.last_name,
                    phone: r.phone,
                },
                body: r.body,
                sent_at: r.sent_at,
                read_at: r.read_at,
            })
            .collect())
    }

    /// Resolve both participant summaries for an already-fetched message.
    pub(crate) async fn enrich(db: &Pool<Postgres>, message: Message) -> AppResult<MessageDetail> {
        let from_user = UserService::summary(db, &message.from_username).await?;
        let to_user = UserService::summary(db, &message.to_username).await?;

        Ok(MessageDetail {
            id: message.id,
            body: message.body,
            sent_at: message.sent_at,
            read_at: message.read_at,
            from_user,
            to_user,
        })
    }
}

// Flat row for the list queries; folded into the view structs above.
#[derive(sqlx::FromRow)]
struct EnrichedRow {
    id: i64,
    body: String,
    sent_at: chrono::DateTime<chrono::Utc>,
    read_at: Option<chrono::DateTime<chrono::Utc>>,
    username: String,
    first_name: String,
    last_name: String,
    phone: String,
}
