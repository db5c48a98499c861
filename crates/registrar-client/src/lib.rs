//! # Registrar Client
//!
//! Client side of the Registrar API.
//!
//! - [`ApiClient`]: one typed method per HTTP route
//! - [`AuthCache`]: the signed-in token and user, persisted to a JSON file
//! - [`DataCache`]: last fetched student list and dashboard stats
//! - [`Session`]: ties the three together and guards submissions
//!
//! # Example
//!
//! ```ignore
//! use registrar_client::{ApiClient, AuthCache, Session};
//!
//! let auth = AuthCache::load(AuthCache::default_path()?)?;
//! let session = Session::new(ApiClient::new("http://localhost:3000"), auth);
//! session.login("admin@university.edu", "admin123").await?;
//! let students = session.students(false).await?;
//! ```

pub mod api;
pub mod auth_cache;
pub mod data_cache;
pub mod error;
pub mod session;

pub use api::ApiClient;
pub use auth_cache::{AuthCache, StoredAuth};
pub use data_cache::DataCache;
pub use error::ClientError;
pub use session::Session;
