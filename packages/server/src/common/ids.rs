//! Entity-id aliases for the domain tables.
//!
//! All primary keys are serial integers; the aliases keep signatures readable
//! and make it harder to hand a language id to a category query by accident
//! (at review time, not compile time).

/// Id of a directory resource.
pub type ResourceId = i32;

/// Id of a language tag.
pub type LanguageId = i32;

/// Id of a category tag.
pub type CategoryId = i32;

/// Id of an API key row.
pub type KeyId = i32;
