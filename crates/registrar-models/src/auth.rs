use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::users::User;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub message: String,
    pub user: User,
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VerifyResponse {
    pub user: User,
}

/// Body of responses that only carry a message, e.g. logout and delete.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_validation() {
        let ok = LoginRequest {
            email: "admin@example.com".to_string(),
            password: "x".to_string(),
        };
        assert!(ok.validate().is_ok());

        let empty = LoginRequest {
            email: "admin@example.com".to_string(),
            password: String::new(),
        };
        assert!(empty.validate().is_err());

        let bad_email = LoginRequest {
            email: "admin".to_string(),
            password: "x".to_string(),
        };
        assert!(bad_email.validate().is_err());
    }
}
