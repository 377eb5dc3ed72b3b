//! Credential lifecycle side-store

pub mod store;

pub use store::{CredentialRecord, CredentialStore};
