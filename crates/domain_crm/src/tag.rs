//! Tags attached to parties, opportunities and cases

use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::PortError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
}

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Path segment for a tag name; spaces and reserved characters are escaped
///
/// Blank names and the dot segments `.` and `..` are rejected; they would
/// resolve to the parent's own path.
pub fn escape_tag(name: &str) -> Result<String, PortError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(PortError::record_invalid("Tag", vec!["Name can't be blank".into()]));
    }
    if matches!(trimmed, "." | "..") {
        return Err(PortError::record_invalid(
            "Tag",
            vec![format!("Name '{trimmed}' is not a valid tag")],
        ));
    }
    Ok(urlencoding::encode(name).into_owned())
}
