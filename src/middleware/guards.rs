//! Authorization guards that enforce "is this the correct user" checks
//! before handlers touch user or message records.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::error::AppError;
use crate::models::Message;

/// The authenticated identity extracted from the request context.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub username: String,
}

/// Pure identity extraction: the username the requester proved via the
/// auth middleware, or None when the request carries no valid identity.
pub fn identity_of(extensions: &axum::http::Extensions) -> Option<String> {
    extensions.get::<AuthUser>().map(|u| u.username.clone())
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let username = identity_of(&parts.extensions).ok_or(AppError::Unauthorized)?;
        Ok(AuthUser { username })
    }
}

impl AuthUser {
    /// Forbidden unless the identity matches the target username.
    pub fn ensure_is_user(&self, target_username: &str) -> Result<(), AppError> {
        if self.username != target_username {
            return Err(AppError::Forbidden);
        }
        Ok(())
    }

    /// Forbidden unless the identity is the message's sender or recipient.
    pub fn ensure_is_participant(&self, message: &Message) -> Result<(), AppError> {
        if !message.is_participant(&self.username) {
            return Err(AppError::Forbidden);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn message(from: &str, to: &str) -> Message {
        Message {
            id: 1,
            from_username: from.to_string(),
            to_username: to.to_string(),
            body: "hi".to_string(),
            sent_at: Utc::now(),
            read_at: None,
        }
    }

    fn auth(username: &str) -> AuthUser {
        AuthUser {
            username: username.to_string(),
        }
    }

    #[test]
    fn test_ensure_is_user_matching() {
        assert!(auth("alice").ensure_is_user("alice").is_ok());
    }

    #[test]
    fn test_ensure_is_user_mismatch_is_forbidden() {
        let err = auth("bob").ensure_is_user("alice").unwrap_err();
        assert!(matches!(err, AppError::Forbidden));
    }

    #[test]
    fn test_sender_is_participant() {
        let m = message("alice", "bob");
        assert!(auth("alice").ensure_is_participant(&m).is_ok());
    }

    #[test]
    fn test_recipient_is_participant() {
        let m = message("alice", "bob");
        assert!(auth("bob").ensure_is_participant(&m).is_ok());
    }

    #[test]
    fn test_third_party_is_not_participant() {
        let m = message("alice", "bob");
        let err = auth("mallory").ensure_is_participant(&m).unwrap_err();
        assert!(matches!(err, AppError::Forbidden));
    }
}
