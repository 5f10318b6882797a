// isyctl-api: Async Rust client for the ISY controller REST API

pub mod client;
pub mod error;
pub mod models;
pub mod nodes;
pub mod transport;

pub use client::RestClient;
pub use error::Error;
pub use models::{CommandAck, GroupInfo, NodeInfo, Property, StatusProperties, Topology};
pub use transport::{TlsMode, TransportConfig};
