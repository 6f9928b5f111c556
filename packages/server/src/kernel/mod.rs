//! Kernel module - server infrastructure and dependencies.

pub mod algolia_client;
pub mod deps;
pub mod test_dependencies;
pub mod traits;

pub use algolia_client::{AlgoliaClient, NoopSearchIndex};
pub use deps::ServerDeps;
pub use test_dependencies::MockSearchIndex;
pub use traits::*;
