use message_service::middleware::auth::{issue_token, verify_token, Claims};

const SECRET: &str = "unit-test-secret";

#[test]
fn rejects_invalid_token() {
    let res = verify_token("not_a_jwt", SECRET);
    assert!(res.is_err(), "invalid token must be rejected");
}

#[test]
fn issue_then_verify_round_trip() {
    let token = issue_token("alice", SECRET).unwrap();
    let claims = verify_token(&token, SECRET).unwrap();
    assert_eq!(claims.sub, "alice");
    assert!(claims.exp > claims.iat);
}

#[test]
fn rejects_token_signed_with_other_secret() {
    let token = issue_token("alice", "some-other-secret").unwrap();
    assert!(verify_token(&token, SECRET).is_err());
}

#[test]
fn rejects_expired_token() {
    use jsonwebtoken::{encode, EncodingKey, Header};

    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: "alice".to_string(),
        iat: now - 7200,
        exp: now - 3600,
        jti: "expired".to_string(),
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap();

    assert!(verify_token(&token, SECRET).is_err());
}
