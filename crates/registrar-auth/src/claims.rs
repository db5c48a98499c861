//! JWT claim structure for access tokens.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Claims embedded in every access token.
///
/// Serialized as `{"userId", "email", "role", "exp", "iat"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    /// Numeric id of the authenticated user
    pub user_id: i64,
    /// User's email address
    pub email: String,
    /// User's role, e.g. `admin`
    pub role: String,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: usize,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: usize,
}
