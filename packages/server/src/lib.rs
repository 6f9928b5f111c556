// devdir - curated resource directory API
//
// This crate provides the backend API for a community-curated directory of
// learning resources. Clients update resources, vote on them, and track
// clicks; an external search index is kept eventually consistent with the
// primary datastore.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
