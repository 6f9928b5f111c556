pub mod mutations;
pub mod queries;

pub use mutations::{add_click, apply_update, cast_vote};
pub use queries::get_resource;
