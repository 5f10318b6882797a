// ── On-levels and power state ──
//
// The controller speaks 0-255 natively and reports status as a formatted
// string ("On", "Off", "37%", "37"). `Level` is the single typed
// representation; parsing and scaling happen only here.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Brightness as a percentage, `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Level(u8);

impl Level {
    pub const OFF: Level = Level(0);
    pub const FULL: Level = Level(100);

    /// Validate a requested percentage.
    pub fn new(percent: i64) -> Result<Self, CoreError> {
        u8::try_from(percent)
            .ok()
            .filter(|p| *p <= 100)
            .map(Self)
            .ok_or_else(|| CoreError::Validation {
                message: format!("level must be between 0 and 100, got {percent}"),
            })
    }

    pub fn percent(self) -> u8 {
        self.0
    }

    /// Scale to the controller's 0-255 range: `round(percent * 2.55)`.
    ///
    /// Integer arithmetic keeps half-way values exact (50% -> 128).
    pub fn to_native(self) -> u8 {
        let scaled = (u16::from(self.0) * 255 + 50) / 100;
        u8::try_from(scaled).unwrap_or(u8::MAX)
    }

    /// Interpret a formatted status string.
    ///
    /// `"On"` is 100, `"Off"` is 0, otherwise an integer percentage with an
    /// optional trailing `%`. Readings above 100 are clamped.
    pub fn parse_status(raw: &str) -> Result<Self, CoreError> {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("on") {
            return Ok(Self::FULL);
        }
        if trimmed.eq_ignore_ascii_case("off") {
            return Ok(Self::OFF);
        }
        leading_percent(trimmed)
            .map(|p| Self(u8::try_from(p.min(100)).unwrap_or(100)))
            .ok_or_else(|| CoreError::UnparseableStatus {
                raw: raw.to_owned(),
            })
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// On/off view of a status reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum PowerState {
    On,
    Off,
    /// Any other reading, passed through verbatim.
    Other(String),
}

impl PowerState {
    /// A positive numeric reading is `On`; the literals `On`/`Off` map to
    /// themselves; everything else is passed through.
    pub fn from_status(raw: &str) -> Self {
        let trimmed = raw.trim();
        if leading_percent(trimmed).is_some_and(|p| p > 0) || trimmed.eq_ignore_ascii_case("on") {
            Self::On
        } else if trimmed.eq_ignore_ascii_case("off") {
            Self::Off
        } else {
            Self::Other(raw.to_owned())
        }
    }

    pub fn is_on(&self) -> bool {
        matches!(self, Self::On)
    }

    pub fn is_off(&self) -> bool {
        matches!(self, Self::Off)
    }
}

impl fmt::Display for PowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::On => f.write_str("On"),
            Self::Off => f.write_str("Off"),
            Self::Other(raw) => f.write_str(raw),
        }
    }
}

/// `"37"` or `"37%"` -> 37.
fn leading_percent(s: &str) -> Option<u32> {
    s.strip_suffix('%').unwrap_or(s).trim_end().parse().ok()
}
