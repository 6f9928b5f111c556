//! Tag domain - languages and categories attached to resources
//!
//! Both tag kinds are deduplicated by name (the natural key) and garbage
//! collected once no resource references them.

pub mod models;

pub use models::{Category, Language};
