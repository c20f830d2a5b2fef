//! Usage notes for property documentation.
//!
//! Notes describe a property's semantics in plain words ("you can change the
//! value of this property", "the result is cached", ...) and are appended to
//! the documentation text by [`Property::documentation`]. They are metadata
//! only and never change how a property behaves.
//!
//! [`Property::documentation`]: crate::Property::documentation

use crate::kind::PropertyKind;

pub const CUSTOM_PROPERTY_NOTE: &str = "The `{name}` property is a `{kind}` property.";

pub const ENVIRONMENT_PROPERTY_NOTE: &str =
    "If the environment variable `${variable}` is set it overrides the computed value of this property.";

pub const REQUIRED_PROPERTY_NOTE: &str = "You are required to provide a value for this property \
     by passing a keyword argument named `{name}` when constructing the type that defines it \
     (unless it defines a custom constructor, in which case refer to that constructor's documentation).";

pub const KEY_PROPERTY_NOTE: &str =
    "Once this property has been assigned a value you are not allowed to assign a new value to the property.";

pub const WRITABLE_PROPERTY_NOTE: &str =
    "You can change the value of this property by assigning a new value with `set`.";

pub const CACHED_PROPERTY_NOTE: &str =
    "This property's value is computed once (the first time it is accessed) and the result is cached.";

pub const RESETTABLE_CACHED_PROPERTY_NOTE: &str = "To clear the cached value you can use `reset`.";

pub const RESETTABLE_WRITABLE_PROPERTY_NOTE: &str =
    "To reset it to its default (computed) value you can use `reset`.";

/// Kind name used in notes for kinds derived with `customize`, which have no
/// documentation of their own to point at.
const DYNAMIC_KIND_NAME: &str = "custom";

/// Describe the semantics of a property of the given kind.
pub fn compose_usage_notes(name: &str, kind: &PropertyKind) -> Vec<String> {
    let policy = kind.policy();
    let kind_name = if policy.dynamic {
        DYNAMIC_KIND_NAME
    } else {
        kind.name()
    };

    let mut notes = vec![CUSTOM_PROPERTY_NOTE
        .replace("{name}", name)
        .replace("{kind}", kind_name)];

    if let Some(variable) = policy.environment_variable {
        notes.push(ENVIRONMENT_PROPERTY_NOTE.replace("{variable}", variable));
    }
    if policy.required {
        notes.push(REQUIRED_PROPERTY_NOTE.replace("{name}", name));
    }
    if policy.key {
        notes.push(KEY_PROPERTY_NOTE.to_string());
    }
    if policy.writable {
        notes.push(WRITABLE_PROPERTY_NOTE.to_string());
    }
    if policy.cached {
        notes.push(CACHED_PROPERTY_NOTE.to_string());
    }
    if policy.resettable {
        if policy.cached {
            notes.push(RESETTABLE_CACHED_PROPERTY_NOTE.to_string());
        } else {
            notes.push(RESETTABLE_WRITABLE_PROPERTY_NOTE.to_string());
        }
    }
    notes
}

/// Append notes to documentation text as a trailing paragraph.
pub fn inject_usage_notes(doc: &str, notes: &[String]) -> String {
    if notes.is_empty() {
        return doc.to_string();
    }
    format!("{}\n\n**Note:** {}", doc.trim_end(), notes.join(" "))
}
