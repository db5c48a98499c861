//! # Registrar CLI
//!
//! Administrative and seeding utilities for Registrar.
//!
//! This library crate holds the logic behind the `registrar-cli` binary. It
//! only talks to storage through the repository traits, so the same code
//! runs against PostgreSQL in production and [`registrar_db::MemoryStore`]
//! in tests.
//!
//! ## Usage
//!
//! ```ignore
//! use registrar_cli::seeder;
//!
//! let created = seeder::seed_students(&store, 100).await?;
//! ```

pub mod admin;
pub mod seeder;
