pub mod tag;

pub use tag::{Category, Language};
