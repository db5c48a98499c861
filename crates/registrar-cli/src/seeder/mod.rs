//! Database seeding for development and demos.
//!
//! Fake records are generated in parallel with `rayon` and then written one
//! by one through [`StudentRepository`](registrar_db::StudentRepository), so
//! numeric ids and student ids come from the same sequence the API uses.

pub mod students;

pub use students::{COURSES, SeedReport, clear_students, generate_students, seed_students};
