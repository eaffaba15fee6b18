use sqlx::{Pool, Postgres};

use crate::config::HashingConfig;
use crate::error::{AppError, AppResult};
use crate::models::user::{RegisterRequest, User, UserDetail, UserSummary};
use crate::security::password;

pub struct UserService;

impl UserService {
    /// Register a new user. The password is hashed before it reaches the
    /// database; duplicate usernames surface as `Conflict` via the primary
    /// key constraint, so concurrent registrations cannot both succeed.
    pub async fn register(
        db: &Pool<Postgres>,
        hashing: &HashingConfig,
        req: &RegisterRequest,
    ) -> AppResult<User> {
        if req.username.trim().is_empty() {
            return Err(AppError::BadRequest("username must not be empty".into()));
        }
        if req.password.is_empty() {
            return Err(AppError::BadRequest("password must not be empty".into()));
        }

        let password_hash = password::hash_password(&req.password, hashing)?;

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password_hash, first_name, last_name, phone, join_at, last_login_at)
            VALUES ($1, $2, $3, $4, $5, CURRENT_TIMESTAMP, CURRENT_TIMESTAMP)
            RETURNING *
            "#,
        )
        .bind(&req.username)
        .bind(&password_hash)
        .bind(&req.first_name)
        .bind(&req.last_name)
        .bind(&req.phone)
        .fetch_one(db)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::Conflict
            }
            other => AppError::Database(other),
        })?;

        tracing::info!(username = %user.username, "user registered");
        Ok(user)
    }

    /// Check a username/password pair and return the matched user.
    /// Unknown usernames fail the same way as bad passwords so login errors
    /// do not reveal which usernames exist. Does NOT stamp `last_login_at`;
    /// callers do that explicitly via `record_login`.
    pub async fn authenticate(
        db: &Pool<Postgres>,
        username: &str,
        plaintext: &str,
    ) -> AppResult<User> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(db)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        password::verify_password(plaintext, &user.password_hash)?;

        Ok(user)
    }

    /// Update last login timestamp
    pub async fn record_login(db: &Pool<Postgres>, username: &str) -> AppResult<()> {
        let result = sqlx::query("UPDATE users SET last_login_at = CURRENT_TIMESTAMP WHERE username = $1")
            .bind(username)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    /// Basic info on all users, ordered by username. No pagination.
    pub async fn list(db: &Pool<Postgres>) -> AppResult<Vec<UserSummary>> {
        let users = sqlx::query_as::<_, UserSummary>(
            "SELECT username, first_name, last_name, phone FROM users ORDER BY username",
        )
        .fetch_all(db)
        .await?;

        Ok(users)
    }

    /// Full profile excluding the password hash.
    pub async fn get(db: &Pool<Postgres>, username: &str) -> AppResult<UserDetail> {
        sqlx::query_as::<_, UserDetail>(
            r#"
            SELECT username, first_name, last_name, phone, join_at, last_login_at
            FROM users WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(db)
        .await?
        .ok_or(AppError::NotFound)
    }

    /// Participant display info for message enrichment.
    pub(crate) async fn summary(db: &Pool<Postgres>, username: &str) -> AppResult<UserSummary> {
        sqlx::query_as::<_, UserSummary>(
            "SELECT username, first_name, last_name, phone FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(db)
        .await?
        .ok_or(AppError::NotFound)
    }
}
