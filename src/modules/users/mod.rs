//! User accounts. There are no user routes; accounts are created by the
//! first-run seed and the admin CLI.

pub mod service;
