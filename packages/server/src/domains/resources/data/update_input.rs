//! Typed partial-update input and the matching search-index patch.
//!
//! The apply rules are uneven on purpose; they mirror the public API
//! contract, which clients have long depended on:
//!
//! - `languages` is applied when present and not null,
//! - `category`, `name` and `url` are applied when present and non-empty
//!   (an empty string or null is silently skipped),
//! - `free` and `notes` are applied whenever the key is present at all,
//!   so `"notes": null` clears the column while omitting `notes` leaves it
//!   untouched.
//!
//! Unifying these rules would be an API break; callers wanting symmetric
//! semantics need a versioned contract change first.

use serde_json::{Map, Value};

use crate::common::{FieldError, ResourceId};
use crate::common::utils::ensure_bool;

/// A validated partial update for one resource.
///
/// `None` always means "leave the field untouched". For `notes` the inner
/// option distinguishes "set to this text" from "clear".
#[derive(Debug, Default, Clone)]
pub struct UpdateResourceInput {
    pub languages: Option<Vec<String>>,
    pub category: Option<String>,
    pub name: Option<String>,
    pub url: Option<String>,
    pub free: Option<bool>,
    pub notes: Option<Option<String>>,
}

impl UpdateResourceInput {
    /// Parse and validate a raw JSON body.
    ///
    /// All field-level problems are collected into one error list so the
    /// client sees everything wrong with the request at once. Nothing is
    /// mutated until validation has passed in full.
    pub fn from_value(body: &Value) -> Result<Self, Vec<FieldError>> {
        let Some(obj) = body.as_object() else {
            return Err(vec![FieldError::new("body", "expected a resource object")]);
        };

        let mut errors = Vec::new();
        let mut input = UpdateResourceInput::default();

        match obj.get("languages") {
            None | Some(Value::Null) => {}
            Some(Value::Array(items)) => {
                let mut names: Vec<String> = Vec::with_capacity(items.len());
                for item in items {
                    match item.as_str() {
                        Some(s) if !s.is_empty() => {
                            if !names.iter().any(|n| n == s) {
                                names.push(s.to_string());
                            }
                        }
                        _ => {
                            errors.push(FieldError::new(
                                "languages",
                                "must be a list of non-empty strings",
                            ));
                            break;
                        }
                    }
                }
                names.sort();
                input.languages = Some(names);
            }
            Some(_) => {
                errors.push(FieldError::new("languages", "must be a list of strings"));
            }
        }

        input.category = match string_field(obj, "category", &mut errors) {
            Some(s) if !s.is_empty() => Some(s),
            _ => None,
        };

        input.name = match string_field(obj, "name", &mut errors) {
            Some(s) if !s.is_empty() => Some(s),
            _ => None,
        };

        input.url = match string_field(obj, "url", &mut errors) {
            Some(s) if !s.is_empty() => {
                if s.starts_with("http://") || s.starts_with("https://") {
                    Some(s)
                } else {
                    errors.push(FieldError::new("url", "must be an http(s) URL"));
                    None
                }
            }
            _ => None,
        };

        if let Some(raw) = obj.get("free") {
            match ensure_bool(raw) {
                Some(free) => input.free = Some(free),
                None => errors.push(FieldError::new("free", "must be a boolean-like value")),
            }
        }

        if let Some(raw) = obj.get("notes") {
            match raw {
                Value::Null => input.notes = Some(None),
                Value::String(s) => input.notes = Some(Some(s.clone())),
                _ => errors.push(FieldError::new("notes", "must be a string or null")),
            }
        }

        if errors.is_empty() {
            Ok(input)
        } else {
            Err(errors)
        }
    }

    /// True when the update names no applicable field at all.
    pub fn is_noop(&self) -> bool {
        self.languages.is_none()
            && self.category.is_none()
            && self.name.is_none()
            && self.url.is_none()
            && self.free.is_none()
            && self.notes.is_none()
    }
}

/// Read a string-typed field, recording a field error on a wrong type.
/// Null and absent both come back as `None` (the falsy-skip rule).
fn string_field(
    obj: &Map<String, Value>,
    field: &str,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    match obj.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            errors.push(FieldError::new(field, "must be a string"));
            None
        }
    }
}

/// Partial document patch for the search index.
///
/// Carries only the fields an update actually changed; the index merges them
/// into the document keyed by the resource id.
#[derive(Debug, Clone)]
pub struct IndexPatch {
    object_id: ResourceId,
    fields: Map<String, Value>,
}

impl IndexPatch {
    pub fn new(object_id: ResourceId) -> Self {
        Self {
            object_id,
            fields: Map::new(),
        }
    }

    pub fn set(&mut self, field: &str, value: Value) {
        self.fields.insert(field.to_string(), value);
    }

    pub fn object_id(&self) -> ResourceId {
        self.object_id
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
