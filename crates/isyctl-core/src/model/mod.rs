// ── Domain model ──
//
// Value types shared by the registry, discovery, and entity operations.

mod address;
mod level;
mod pattern;
mod record;

pub use address::Address;
pub use level::{Level, PowerState};
pub use pattern::NamePattern;
pub use record::{EntityKind, EntityRecord};
