// Common types and utilities shared across the application

pub mod error;
pub mod ids;
pub mod utils;

pub use error::{ApiError, FieldError};
pub use ids::*;
