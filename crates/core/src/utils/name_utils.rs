//! Helpers for prefixed (`prefix:Local`) taxonomy names.

use crate::constants::{AXIS_SUFFIX, DEFAULT_NAMESPACE_PREFIX};

/// Adds the default namespace prefix to a name that has none.
pub fn qualify(name: &str) -> String {
    if name.contains(':') {
        name.to_string()
    } else {
        format!("{}:{}", DEFAULT_NAMESPACE_PREFIX, name)
    }
}

/// The part of a name after its namespace prefix.
pub fn local_name(name: &str) -> &str {
    name.rsplit_once(':').map_or(name, |(_, local)| local)
}

/// The namespace prefix of a name, if any.
pub fn prefix_of(name: &str) -> Option<&str> {
    name.split_once(':').map(|(prefix, _)| prefix)
}

/// Whether a keyword or aspect key names an axis.
pub fn is_axis_name(name: &str) -> bool {
    local_name(name).ends_with(AXIS_SUFFIX)
}

/// Whether a name is a numbered duplicate such as `solar:Foo_1`.
pub fn is_duplicate_name(name: &str) -> bool {
    match local_name(name).rsplit_once('_') {
        Some((stem, digits)) => {
            !stem.is_empty() && !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}
