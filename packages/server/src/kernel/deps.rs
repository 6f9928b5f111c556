//! Server dependencies for domain actions (using traits for testability)
//!
//! This module provides the central dependency container handed to every
//! domain action. The search index is behind a trait so tests can script its
//! behavior.

use sqlx::PgPool;
use std::sync::Arc;

use crate::kernel::BaseSearchIndex;

/// Server dependencies accessible to domain actions
#[derive(Clone)]
pub struct ServerDeps {
    pub db_pool: PgPool,
    pub search_index: Arc<dyn BaseSearchIndex>,
    /// Abort resource mutations when the index update fails. Off in
    /// development, where a missing index should not block local work.
    pub strict_index_sync: bool,
}

impl ServerDeps {
    /// Create new ServerDeps with the given dependencies
    pub fn new(
        db_pool: PgPool,
        search_index: Arc<dyn BaseSearchIndex>,
        strict_index_sync: bool,
    ) -> Self {
        Self {
            db_pool,
            search_index,
            strict_index_sync,
        }
    }
}
