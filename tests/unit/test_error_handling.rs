use message_service::error::AppError;
use message_service::middleware::error_handling::map_error;

#[test]
fn maps_not_found_to_404() {
    let (status, body) = map_error(&AppError::NotFound);
    assert_eq!(status.as_u16(), 404);
    assert_eq!(body.code, "NOT_FOUND");
}

#[test]
fn maps_forbidden_to_403() {
    let (status, body) = map_error(&AppError::Forbidden);
    assert_eq!(status.as_u16(), 403);
    assert_eq!(body.code, "FORBIDDEN");
}

#[test]
fn maps_credential_failures_to_401() {
    let (status, _) = map_error(&AppError::InvalidCredentials);
    assert_eq!(status.as_u16(), 401);
    let (status, _) = map_error(&AppError::Unauthorized);
    assert_eq!(status.as_u16(), 401);
}

#[test]
fn maps_conflict_to_409() {
    let (status, body) = map_error(&AppError::Conflict);
    assert_eq!(status.as_u16(), 409);
    assert_eq!(body.code, "USERNAME_TAKEN");
}

#[test]
fn maps_bad_request_to_400() {
    let (status, msg) = map_error(&AppError::BadRequest("missing field".into()));
    assert_eq!(status.as_u16(), 400);
    assert!(msg.message.contains("missing field"));
}

#[test]
fn database_errors_are_opaque_500s() {
    let (status, body) = map_error(&AppError::Database(sqlx::Error::RowNotFound));
    assert_eq!(status.as_u16(), 500);
    assert!(!body.message.contains("row"), "store detail must not leak");
}
