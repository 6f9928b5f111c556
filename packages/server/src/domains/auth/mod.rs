//! Auth domain - API key lookup
//!
//! Key issuance and rotation live elsewhere; this service only resolves an
//! inbound `x-apikey` header to a known credential.

pub mod models;

pub use models::Key;
