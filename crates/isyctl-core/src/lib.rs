// isyctl-core: device registry and command translation between isyctl-api
// and the front end.

pub mod command;
pub mod config;
pub mod controller;
pub mod discovery;
pub mod entity;
pub mod error;
pub mod model;
pub mod registry;

// ── Primary re-exports ──────────────────────────────────────────────
pub use command::Command;
pub use config::{ConnectionDescriptor, SeedRecord, TlsVerification};
pub use controller::Controller;
pub use discovery::{Discovered, DiscoveryReport, Origin};
pub use entity::Entity;
pub use error::CoreError;
pub use registry::Registry;

pub use model::{Address, EntityKind, EntityRecord, Level, NamePattern, PowerState};
