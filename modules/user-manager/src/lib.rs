//! Users and user profiles CRUD module.
//!
//! Users own at most one profile; a profile may also exist standalone.
//! The REST surface lives in [`api::rest`], business rules in [`domain`],
//! and the sea-orm storage layer in [`infra::storage`].

pub mod api;
pub mod domain;
pub mod infra;
