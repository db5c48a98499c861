//! Request middleware and extractors.
//!
//! - [`auth`]: bearer token extractor and the `require_auth` route layer
//!
//! # Authentication Flow
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. `require_auth` verifies the token for every protected route
//! 3. Handlers take [`auth::AuthUser`] to read the caller's claims

pub mod auth;
