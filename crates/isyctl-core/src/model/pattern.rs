// ── Free-text name patterns ──
//
// Matching is deliberately permissive to absorb speech-to-text noise.
// A query matches when it is a case-insensitive substring of the stored
// name. Seed entries may list aliases as "hall light|hallway"; the query
// must then be contained in one of the alternatives.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::CoreError;

/// A registered name, split into lower-cased alternatives at registration.
#[derive(Debug, Clone)]
pub struct NamePattern {
    text: String,
    alternatives: Vec<String>,
}

impl NamePattern {
    pub fn new(text: &str) -> Result<Self, CoreError> {
        let text = text.trim();
        let alternatives: Vec<String> = text
            .split('|')
            .map(str::trim)
            .filter(|alt| !alt.is_empty())
            .map(str::to_lowercase)
            .collect();
        if alternatives.is_empty() {
            return Err(CoreError::Validation {
                message: "device name cannot be empty".into(),
            });
        }

        Ok(Self {
            text: text.to_owned(),
            alternatives,
        })
    }

    /// Does a spoken/typed name refer to this entry?
    ///
    /// Only the stored name is searched; a stored name that merely occurs
    /// inside the query does not match.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return false;
        }
        self.alternatives.iter().any(|alt| alt.contains(&query))
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl PartialEq for NamePattern {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for NamePattern {}

impl fmt::Display for NamePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl Serialize for NamePattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}
