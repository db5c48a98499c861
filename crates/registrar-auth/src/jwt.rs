//! Token issuance and verification.
//!
//! A failed verification is always reported as `403 Forbidden` with the same
//! message, whether the signature is wrong, the token is malformed or it has
//! expired. A *missing* token is the caller's concern (`401`).

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};

use registrar_config::JwtConfig;
use registrar_core::AppError;

use crate::claims::Claims;

/// Signs a token for the given user valid for `jwt_config.token_expiry` seconds.
///
/// # Errors
///
/// Returns an internal error if encoding fails.
pub fn create_access_token(
    user_id: i64,
    email: &str,
    role: &str,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;
    let exp = now + jwt_config.token_expiry as usize;

    let claims = Claims {
        user_id,
        email: email.to_string(),
        role: role.to_string(),
        exp,
        iat: now,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(AppError::internal)
}

/// Verifies signature and expiry, returning the embedded claims.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::forbidden("Invalid or expired token"))
}
