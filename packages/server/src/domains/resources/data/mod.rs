//! Request/patch data types for the resources domain

pub mod update_input;

pub use update_input::{IndexPatch, UpdateResourceInput};
