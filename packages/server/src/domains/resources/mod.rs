//! Resources domain - directory entries and the operations that mutate them
//!
//! A resource is one curated directory entry: scalar fields, a category, a
//! set of languages, and three counters (upvotes, downvotes, clicks). All
//! writes go through the actions in this module so that tag garbage
//! collection and search-index synchronization stay coupled to the commit.

pub mod actions;
pub mod data;
pub mod models;

// Re-export models
pub use models::{Resource, ResourceRepr, VoteDirection, VoteInformation};

// Re-export data types
pub use data::{IndexPatch, UpdateResourceInput};

// Re-export actions
pub use actions::{add_click, apply_update, cast_vote, get_resource};
