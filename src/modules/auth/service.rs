use registrar_auth::create_access_token;
use registrar_config::JwtConfig;
use registrar_core::{AppError, verify_password};
use registrar_db::UserRepository;
use registrar_models::{LoginRequest, LoginResponse};
use tracing::{info, instrument, warn};

use crate::metrics::{track_jwt_issued, track_login};
use crate::modules::with_fallback;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

pub struct AuthService;

impl AuthService {
    /// Checks the password against the stored hash and issues a token.
    ///
    /// An unknown email and a wrong password give the same 401.
    #[instrument(skip(users, dto, jwt_config), fields(email = %dto.email))]
    pub async fn authenticate(
        users: &dyn UserRepository,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        let credentials =
            with_fallback("get_credentials", users.get_credentials(&dto.email).await, None)?;

        let Some(credentials) = credentials else {
            warn!("Login failed: unknown email");
            track_login(false);
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        };

        if !verify_password(&dto.password, &credentials.password_hash)? {
            warn!("Login failed: wrong password");
            track_login(false);
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        let user = credentials.user;
        let token = create_access_token(user.id, &user.email, &user.role, jwt_config)?;
        track_jwt_issued();
        track_login(true);
        info!(user_id = user.id, "Login successful");

        Ok(LoginResponse {
            message: "Login successful".to_string(),
            user,
            token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use registrar_auth::verify_token;
    use registrar_core::hash_password;
    use registrar_db::MemoryStore;
    use registrar_models::NewUser;

    fn jwt_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key-that-is-long-enough".to_string(),
            token_expiry: 3600,
        }
    }

    async fn store_with_admin() -> MemoryStore {
        let store = MemoryStore::new();
        store
            .create_user(NewUser {
                email: "admin@university.edu".to_string(),
                name: "Admin User".to_string(),
                role: "admin".to_string(),
                password_hash: hash_password("admin123", 4).unwrap(),
            })
            .await
            .unwrap();
        store
    }

    fn login(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_authenticate_success_issues_valid_token() {
        let store = store_with_admin().await;
        let config = jwt_config();

        let response =
            AuthService::authenticate(&store, login("admin@university.edu", "admin123"), &config)
                .await
                .unwrap();

        assert_eq!(response.message, "Login successful");
        assert_eq!(response.user.email, "admin@university.edu");
        let claims = verify_token(&response.token, &config).unwrap();
        assert_eq!(claims.user_id, response.user.id);
        assert_eq!(claims.role, "admin");
    }

    #[tokio::test]
    async fn test_authenticate_wrong_password() {
        let store = store_with_admin().await;
        let err =
            AuthService::authenticate(&store, login("admin@university.edu", "nope"), &jwt_config())
                .await
                .unwrap_err();
        assert_eq!(err.status.as_u16(), 401);
        assert_eq!(err.public_message(), INVALID_CREDENTIALS);
    }

    #[tokio::test]
    async fn test_authenticate_unknown_email() {
        let store = store_with_admin().await;
        let err =
            AuthService::authenticate(&store, login("ghost@example.com", "admin123"), &jwt_config())
                .await
                .unwrap_err();
        assert_eq!(err.status.as_u16(), 401);
    }

    #[tokio::test]
    async fn test_authenticate_with_storage_down_is_no_match() {
        let store = store_with_admin().await;
        store.set_available(false);
        let err = AuthService::authenticate(
            &store,
            login("admin@university.edu", "admin123"),
            &jwt_config(),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status.as_u16(), 401);
    }
}
