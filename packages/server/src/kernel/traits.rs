// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Business logic (like "apply a resource update") lives in domain functions
// that use these traits.
//
// Naming convention: Base* for trait names (e.g., BaseSearchIndex)

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

// =============================================================================
// Search Index Trait (Infrastructure)
// =============================================================================

/// Failure modes of the external search index. Exactly two kinds are
/// recognized; everything the client cannot classify lands in `Service`.
#[derive(Debug, Error)]
pub enum SearchIndexError {
    /// The index host could not be reached at all (connect or timeout).
    #[error("search index unreachable: {0}")]
    Unreachable(String),

    /// The index was reached but rejected or failed the request.
    #[error("search index request failed: {0}")]
    Service(String),
}

#[async_trait]
pub trait BaseSearchIndex: Send + Sync {
    /// Push a partial-document patch for the object with the given id.
    ///
    /// `fields` must contain only the fields that changed; the index merges
    /// them into the stored document. Unchanged fields are never sent.
    async fn partial_update(
        &self,
        object_id: i32,
        fields: &Map<String, Value>,
    ) -> Result<(), SearchIndexError>;
}
