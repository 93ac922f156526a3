use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use validator::ValidationErrors;

use crate::models::UserId;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("User with id '{0}' not found")]
    NotFound(UserId),

    #[error("Username '{0}' already exists")]
    UsernameTaken(String),

    #[error("Email '{0}' already exists")]
    EmailTaken(String),

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationErrors),
}

pub type UserResult<T> = Result<T, UserError>;

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => AppError::NotFound(err.to_string()),
            UserError::UsernameTaken(_) | UserError::EmailTaken(_) => {
                AppError::Conflict(err.to_string())
            }
            UserError::Validation(errors) => AppError::ValidationError(errors),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_messages_name_the_offending_value() {
        assert_eq!(
            UserError::NotFound(UserId::from("abc")).to_string(),
            "User with id 'abc' not found"
        );
        assert_eq!(
            UserError::UsernameTaken("andy".into()).to_string(),
            "Username 'andy' already exists"
        );
        assert_eq!(
            UserError::EmailTaken("a@b.io".into()).to_string(),
            "Email 'a@b.io' already exists"
        );
    }

    #[test]
    fn test_status_mapping() {
        let status = |e: UserError| AppError::from(e).status();
        assert_eq!(status(UserError::NotFound(UserId::from("x"))), StatusCode::NOT_FOUND);
        assert_eq!(status(UserError::UsernameTaken("x".into())), StatusCode::CONFLICT);
        assert_eq!(status(UserError::EmailTaken("x".into())), StatusCode::CONFLICT);
        assert_eq!(
            status(UserError::Validation(ValidationErrors::new())),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }
}
