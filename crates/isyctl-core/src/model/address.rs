// ── Controller addresses ──
//
// Device addresses arrive as space-separated hex groups ("12 AB 3 1") and
// are stored in the controller's path form ("12%20AB%203%201"). Scene
// addresses are plain decimal IDs.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Path-ready address of a node or scene.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    /// Normalize a controller address: trim, then escape every whitespace
    /// run as `%20`. Idempotent on already-escaped input.
    pub fn from_controller(raw: &str) -> Self {
        Self(raw.split_whitespace().collect::<Vec<_>>().join("%20"))
    }

    /// Scenes have purely numeric addresses; device addresses never do.
    ///
    /// Only ASCII digits count. Decimal or signed forms such as `1.5` or
    /// `-12` are not accepted as scene ids even though they parse as numbers.
    pub fn is_scene(&self) -> bool {
        !self.0.is_empty() && self.0.bytes().all(|b| b.is_ascii_digit())
    }

    /// Registry uniqueness check (hex groups compare case-insensitively).
    pub fn same_as(&self, other: &Address) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Address {
    fn from(raw: &str) -> Self {
        Self::from_controller(raw)
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spaces_are_escaped() {
        assert_eq!(Address::from_controller(" 12 AB  3 1 ").as_str(), "12%20AB%203%201");
    }

    #[test]
    fn escaping_is_idempotent() {
        let once = Address::from_controller("12 AB 3 1");
        let twice = Address::from_controller(once.as_str());
        assert_eq!(once, twice);
    }

    #[test]
    fn numeric_addresses_are_scenes() {
        assert!(Address::from("12345").is_scene());
        assert!(Address::from(" 20109 ").is_scene());
    }

    #[test]
    fn device_addresses_are_not_scenes() {
        assert!(!Address::from("12 AB 3 1").is_scene());
        assert!(!Address::from("1.5").is_scene());
        assert!(!Address::from("").is_scene());
        assert!(!Address::from("-12").is_scene());
    }

    #[test]
    fn comparison_ignores_hex_case() {
        assert!(Address::from("12 ab 3 1").same_as(&Address::from("12 AB 3 1")));
        assert!(!Address::from("12 AB 3 1").same_as(&Address::from("12 AB 3 2")));
    }
}
