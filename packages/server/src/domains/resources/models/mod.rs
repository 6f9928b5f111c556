pub mod resource;
pub mod resource_language;
pub mod vote;

pub use resource::{Resource, ResourceRepr};
pub use resource_language::ResourceLanguage;
pub use vote::{VoteDirection, VoteInformation};
