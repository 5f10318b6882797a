// ── Registry records ──

use std::fmt;

use serde::Serialize;

use super::address::Address;
use super::pattern::NamePattern;
use crate::error::CoreError;

/// What an address refers to on the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Device,
    #[strum(serialize = "dimmable")]
    #[serde(rename = "dimmable")]
    DimmableDevice,
    Scene,
}

impl EntityKind {
    /// Scenes are never individually dimmable, whatever was registered.
    pub fn classify(address: &Address, dimmable: bool) -> Self {
        if address.is_scene() {
            Self::Scene
        } else if dimmable {
            Self::DimmableDevice
        } else {
            Self::Device
        }
    }
}

/// One registered device or scene. Immutable once inserted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityRecord {
    pub pattern: NamePattern,
    pub address: Address,
    pub dimmable: bool,
}

impl EntityRecord {
    pub fn new(name: &str, address: &str, dimmable: bool) -> Result<Self, CoreError> {
        let address = Address::from_controller(address);
        if address.is_empty() {
            return Err(CoreError::Validation {
                message: format!("'{}' has an empty address", name.trim()),
            });
        }
        Ok(Self {
            pattern: NamePattern::new(name)?,
            address,
            dimmable,
        })
    }

    pub fn kind(&self) -> EntityKind {
        EntityKind::classify(&self.address, self.dimmable)
    }
}

impl fmt::Display for EntityRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}' ({})", self.kind(), self.pattern, self.address)
    }
}
