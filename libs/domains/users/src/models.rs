use axum_helpers::lenient_bool;
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidateEmail, ValidationError};

/// Opaque user identifier.
///
/// Generated ids are UUID v4 text, but any string is accepted on lookup so an
/// id that was never issued is simply not found.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = String, example = "3f2b8c1e-8d0a-4f55-9c61-2a9e4b7d1c90")]
pub struct UserId(String);

impl UserId {
    /// Fresh random id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for UserId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// User entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Unique identifier, assigned on creation
    pub id: UserId,
    /// Login name (unique, immutable)
    pub username: String,
    /// Contact email (unique)
    pub email: String,
    /// Display name
    pub full_name: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
    /// False once the user has been soft-deleted
    pub is_active: bool,
}

impl User {
    /// Builds a fresh active user from validated input.
    pub fn new(input: CreateUser) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::generate(),
            username: input.username,
            email: input.email,
            full_name: input.full_name,
            created_at: now,
            updated_at: now,
            is_active: true,
        }
    }

    /// Refresh `updated_at`. Never goes backwards and never repeats, even when
    /// two mutations land inside one clock tick.
    pub fn touch(&mut self) {
        let now = Utc::now();
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at + TimeDelta::microseconds(1)
        };
    }

    /// Apply the provided fields and refresh `updated_at`.
    pub fn apply_update(&mut self, update: UpdateUser) {
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(full_name) = update.full_name {
            self.full_name = full_name;
        }
        self.touch();
    }

    /// Mark inactive (soft delete).
    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.touch();
    }
}

/// DTO for creating a new user
///
/// Fields not listed here (such as a client-chosen `id`) are ignored.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(length(min = 3, max = 50))]
    #[schema(min_length = 3, max_length = 50)]
    pub username: String,
    #[validate(custom(function = "validate_email_address"))]
    pub email: String,
    #[validate(length(min = 1, max = 100))]
    #[schema(min_length = 1, max_length = 100)]
    pub full_name: String,
}

/// DTO for updating an existing user
///
/// `username` and `is_active` cannot be changed here; if sent they are ignored.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateUser {
    #[validate(custom(function = "validate_email_address"))]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 100))]
    #[schema(min_length = 1, max_length = 100)]
    pub full_name: Option<String>,
}

/// Email syntax check plus a dotted domain (`user@example.com`, not `user@localhost`).
pub fn validate_email_address(email: &str) -> Result<(), ValidationError> {
    let dotted_domain = email.rsplit_once('@').is_some_and(|(_, domain)| {
        domain.contains('.') && domain.split('.').all(|label| !label.is_empty())
    });

    if dotted_domain && email.validate_email() {
        return Ok(());
    }

    let mut err = ValidationError::new("email");
    err.message = Some("value is not a valid email address".into());
    Err(err)
}

/// Lowercases the domain part. The local part is kept as sent.
pub fn normalize_email(email: &str) -> String {
    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{}@{}", local, domain.to_lowercase()),
        None => email.to_string(),
    }
}

impl CreateUser {
    /// Same input with the email domain lowercased.
    pub fn normalized(self) -> Self {
        Self {
            email: normalize_email(&self.email),
            ..self
        }
    }
}

impl UpdateUser {
    /// Same input with the email domain lowercased.
    pub fn normalized(self) -> Self {
        Self {
            email: self.email.as_deref().map(normalize_email),
            ..self
        }
    }
}

fn default_active_only() -> bool {
    true
}

/// Query parameters for listing users
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListUsersQuery {
    /// Only return active users (default: true)
    #[serde(default = "default_active_only", deserialize_with = "lenient_bool")]
    #[param(default = true)]
    pub active_only: bool,
}

impl Default for ListUsersQuery {
    fn default() -> Self {
        Self {
            active_only: default_active_only(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_input() -> CreateUser {
        CreateUser {
            username: "andy".to_string(),
            email: "andy@example.com".to_string(),
            full_name: "Andy Example".to_string(),
        }
    }

    #[test]
    fn test_new_user_is_active_with_equal_timestamps() {
        let user = User::new(create_input());
        assert!(user.is_active);
        assert_eq!(user.created_at, user.updated_at);
        assert!(Uuid::parse_str(user.id.as_str()).is_ok());
    }

    #[test]
    fn test_touch_strictly_advances() {
        let mut user = User::new(create_input());
        let mut previous = user.updated_at;
        for _ in 0..100 {
            user.touch();
            assert!(user.updated_at > previous);
            previous = user.updated_at;
        }
    }

    #[test]
    fn test_apply_update_keeps_missing_fields() {
        let mut user = User::new(create_input());
        user.apply_update(UpdateUser {
            email: None,
            full_name: Some("Andrew".to_string()),
        });
        assert_eq!(user.full_name, "Andrew");
        assert_eq!(user.email, "andy@example.com");
    }

    #[test]
    fn test_create_user_validation_bounds() {
        let mut input = create_input();
        input.username = "ab".to_string();
        assert!(input.validate().is_err());

        input.username = "a".repeat(50);
        assert!(input.validate().is_ok());

        input.full_name = String::new();
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_create_user_ignores_unknown_fields() {
        let input: CreateUser = serde_json::from_value(serde_json::json!({
            "id": "chosen-by-client",
            "username": "andy",
            "email": "andy@example.com",
            "full_name": "Andy"
        }))
        .unwrap();
        assert_eq!(input.username, "andy");
    }

    #[test]
    fn test_create_user_length_boundaries() {
        let mut input = create_input();
        input.username = "a".repeat(51);
        assert!(input.validate().is_err());

        let mut input = create_input();
        input.full_name = "x".repeat(100);
        assert!(input.validate().is_ok());

        input.full_name = "x".repeat(101);
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_update_user_full_name_bounds() {
        let update = |full_name: String| UpdateUser {
            email: None,
            full_name: Some(full_name),
        };
        assert!(update(String::new()).validate().is_err());
        assert!(update("x".to_string()).validate().is_ok());
        assert!(update("x".repeat(100)).validate().is_ok());
        assert!(update("x".repeat(101)).validate().is_err());
    }

    #[test]
    fn test_email_requires_dotted_domain() {
        for bad in ["andy@gmail", "andy@localhost", "a@b", "andy@example.", "andy@.com", "andy"] {
            assert!(validate_email_address(bad).is_err(), "{bad} should be rejected");
        }
        for good in ["andy@example.com", "andy.smith@mail.example.co.uk", "andy@Example.COM"] {
            assert!(validate_email_address(good).is_ok(), "{good} should be accepted");
        }

        let mut input = create_input();
        input.email = "andy@gmail".to_string();
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_normalize_email_lowercases_domain_only() {
        assert_eq!(normalize_email("Andy@Example.COM"), "Andy@example.com");
        assert_eq!(normalize_email("andy@example.com"), "andy@example.com");

        let update = UpdateUser {
            email: Some("andy@EXAMPLE.com".to_string()),
            full_name: None,
        }
        .normalized();
        assert_eq!(update.email.as_deref(), Some("andy@example.com"));
    }

    #[test]
    fn test_update_user_rejects_bad_email() {
        let update = UpdateUser {
            email: Some("not-an-email".to_string()),
            full_name: None,
        };
        assert!(update.validate().is_err());
        assert!(UpdateUser::default().validate().is_ok());
    }

    #[test]
    fn test_user_serializes_id_as_plain_string() {
        let user = User::new(create_input());
        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["id"], user.id.as_str());
        assert_eq!(value["is_active"], true);
    }
}
