// Mock implementations for testing
//
// Provides a scriptable search index that can be injected into ServerDeps.

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::{Arc, Mutex};

use super::{BaseSearchIndex, SearchIndexError};

#[derive(Debug, Clone, Copy)]
enum ScriptedFailure {
    Unreachable,
    Service,
}

/// In-memory search index that records every patch it receives and can be
/// scripted to fail, for exercising the strict/tolerant sync policies.
pub struct MockSearchIndex {
    calls: Arc<Mutex<Vec<(i32, Map<String, Value>)>>>,
    failure: Arc<Mutex<Option<(ScriptedFailure, String)>>>,
}

impl MockSearchIndex {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            failure: Arc::new(Mutex::new(None)),
        }
    }

    /// Make every subsequent call fail as unreachable-host.
    pub fn with_unreachable(self, message: &str) -> Self {
        *self.failure.lock().unwrap() = Some((ScriptedFailure::Unreachable, message.to_string()));
        self
    }

    /// Make every subsequent call fail as a generic service error.
    pub fn with_service_error(self, message: &str) -> Self {
        *self.failure.lock().unwrap() = Some((ScriptedFailure::Service, message.to_string()));
        self
    }

    /// All patches received so far, in call order.
    pub fn calls(&self) -> Vec<(i32, Map<String, Value>)> {
        self.calls.lock().unwrap().clone()
    }

    /// The most recent patch, if any call was made.
    pub fn last_patch(&self) -> Option<(i32, Map<String, Value>)> {
        self.calls.lock().unwrap().last().cloned()
    }

    /// Whether a patch was pushed for the given object.
    pub fn was_updated(&self, object_id: i32) -> bool {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .any(|(id, _)| *id == object_id)
    }
}

impl Default for MockSearchIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseSearchIndex for MockSearchIndex {
    async fn partial_update(
        &self,
        object_id: i32,
        fields: &Map<String, Value>,
    ) -> Result<(), SearchIndexError> {
        // Record the call even when scripted to fail - the patch was "sent"
        self.calls
            .lock()
            .unwrap()
            .push((object_id, fields.clone()));

        match self.failure.lock().unwrap().as_ref() {
            Some((ScriptedFailure::Unreachable, msg)) => {
                Err(SearchIndexError::Unreachable(msg.clone()))
            }
            Some((ScriptedFailure::Service, msg)) => Err(SearchIndexError::Service(msg.clone())),
            None => Ok(()),
        }
    }
}
