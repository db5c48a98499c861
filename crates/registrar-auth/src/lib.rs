//! # Registrar Auth
//!
//! Bearer token types and JWT utilities for the Registrar API.
//!
//! - [`claims`]: the claim set carried by every token
//! - [`jwt`]: token issuance and verification
//!
//! Tokens are HS256-signed with the server secret from
//! [`registrar_config::JwtConfig`] and expire after the configured
//! lifetime (24 hours by default).
//!
//! # Example
//!
//! ```ignore
//! use registrar_auth::{create_access_token, verify_token};
//! use registrar_config::JwtConfig;
//!
//! let config = JwtConfig::from_env()?;
//! let token = create_access_token(1, "admin@university.edu", "admin", &config)?;
//! let claims = verify_token(&token, &config)?;
//! assert_eq!(claims.user_id, 1);
//! ```

pub mod claims;
pub mod jwt;

// Re-export commonly used types at crate root
pub use claims::Claims;
pub use jwt::{create_access_token, verify_token};
