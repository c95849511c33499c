//! User domain entity and the shapes that cross the HTTP boundary.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// User domain entity. Only `UserResponse` leaves the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

impl User {
    /// Overwrite the mutable profile fields. Id and password stay as they are.
    pub fn apply_profile(&mut self, name: String, email: String) {
        self.name = name;
        self.email = email;
    }

    /// Check whether this user owns the given email address
    pub fn owns_email(&self, email: &str) -> bool {
        self.email == email
    }
}

/// A user that has not been persisted yet (storage assigns the id)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// Create/update payload.
///
/// `senha` is required when creating and ignored when updating.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UserRequest {
    /// Display name
    #[serde(rename = "nome")]
    #[validate(length(min = 1, message = "nome is required"))]
    #[schema(example = "Ana")]
    pub name: String,
    /// Email address, unique across all users
    #[validate(email(message = "email is invalid"))]
    #[schema(example = "ana@x.com")]
    pub email: String,
    /// Plain text password
    #[serde(rename = "senha", default)]
    #[schema(example = "p1")]
    pub password: Option<String>,
}

/// User response (safe to return to client)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    /// Storage-assigned identifier
    #[schema(example = 1)]
    pub id: i64,
    /// Display name
    #[serde(rename = "nome")]
    #[schema(example = "Ana")]
    pub name: String,
    /// Email address
    #[schema(example = "ana@x.com")]
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: 1,
            name: "Ana".to_string(),
            email: "ana@x.com".to_string(),
            password_hash: "$argon2id$secret".to_string(),
        }
    }

    #[test]
    fn test_response_drops_password() {
        let json = serde_json::to_value(UserResponse::from(sample_user())).unwrap();
        assert!(json.get("senha").is_none());
        assert!(!json.to_string().contains("secret"));
    }

    #[test]
    fn test_response_uses_wire_names() {
        let json = serde_json::to_value(UserResponse::from(sample_user())).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "id": 1, "nome": "Ana", "email": "ana@x.com" })
        );
    }

    #[test]
    fn test_request_reads_wire_names() {
        let req: UserRequest =
            serde_json::from_str(r#"{"nome":"Ana","email":"ana@x.com","senha":"p1"}"#).unwrap();
        assert_eq!(req.name, "Ana");
        assert_eq!(req.password.as_deref(), Some("p1"));
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_request_without_password_parses() {
        let req: UserRequest =
            serde_json::from_str(r#"{"nome":"Ana","email":"ana@x.com"}"#).unwrap();
        assert!(req.password.is_none());
    }

    #[test]
    fn test_request_validation_rejects_bad_fields() {
        let req = UserRequest {
            name: String::new(),
            email: "not-an-email".to_string(),
            password: None,
        };
        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("email"));
    }

    #[test]
    fn test_apply_profile_keeps_id_and_password() {
        let mut user = sample_user();
        user.apply_profile("Bia".to_string(), "bia@x.com".to_string());

        assert_eq!(user.id, 1);
        assert_eq!(user.password_hash, "$argon2id$secret");
        assert_eq!(user.name, "Bia");
        assert!(user.owns_email("bia@x.com"));
    }
}
