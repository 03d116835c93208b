//! # cur-auth
//!
//! Reviewer credential store for Curator.
//!
//! Credentials live in a JSON users file (`username -> PHC hash`), hashed
//! with argon2id. This crate is an external collaborator of the review
//! engine: the engine only ever asks "does this username/password pair
//! verify" — the hashing scheme is an implementation detail here.

mod error;
mod password;
mod user_store;

pub use error::AuthError;
pub use password::{hash_password, verify_password};
pub use user_store::UserStore;
