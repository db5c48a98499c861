//! # Registrar Core
//!
//! Core types, errors, and utilities for the Registrar API.
//!
//! This crate provides foundational types used throughout the application:
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`password`]: Salted password hashing and verification
//! - [`serde`]: Custom serde deserialization helpers
//!
//! # Example
//!
//! ```ignore
//! use registrar_core::errors::AppError;
//! use registrar_core::password::{hash_password, verify_password};
//!
//! let error = AppError::not_found(anyhow::anyhow!("Student not found"));
//!
//! let hash = hash_password("secure_password", 10)?;
//! assert!(verify_password("secure_password", &hash)?);
//! ```

pub mod errors;
pub mod password;
pub mod serde;

// Re-export commonly used types at crate root
pub use errors::{AppError, ErrorResponse, FieldError};
pub use password::{DEFAULT_HASH_COST, hash_password, verify_password};
