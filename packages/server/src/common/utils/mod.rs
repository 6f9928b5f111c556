// Small shared helpers

pub mod boolean;

pub use boolean::ensure_bool;
