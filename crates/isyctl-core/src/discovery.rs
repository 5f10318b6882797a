// ── Topology discovery ──
//
// Pulls `/rest/nodes` and registers every enabled, controllable, visible
// node plus every numeric-addressed group. Filtering is a pure function
// over the decoded topology so it can be tested without a controller.

use serde::Serialize;
use tracing::{debug, info};

use isyctl_api::{GroupInfo, NodeInfo, RestClient, Topology};

use crate::error::CoreError;
use crate::model::{Address, EntityRecord};
use crate::registry::Registry;

/// Node categories that accept on/off style commands: dimmable, relay,
/// irrigation, climate, pool, sensor, energy, shade, access, security, X10.
const CONTROLLABLE_CATEGORIES: &[&str] = &[
    "1", "2", "4", "5", "6", "7", "9", "14", "15", "16", "113",
];

/// Category code of dimmable lighting.
const DIMMABLE_CATEGORY: &str = "1";

/// Controller convention for hidden/internal nodes.
const HIDDEN_PREFIX: char = '~';

/// Where a discovered entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    Node,
    Group,
}

/// A topology entry that passed filtering, ready to register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Discovered {
    pub name: String,
    pub address: Address,
    pub dimmable: bool,
    pub origin: Origin,
}

/// Outcome of a discovery run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DiscoveryReport {
    pub added: Vec<EntityRecord>,
    /// Topology entries that were filtered out or already registered.
    pub skipped: usize,
}

/// Filter a topology down to entries not yet in `registry`.
pub fn plan(topology: &Topology, registry: &Registry) -> Vec<Discovered> {
    let nodes = topology.nodes.iter().filter_map(|node| {
        let found = accept_node(node)?;
        (!registry.contains_address(&found.address)).then_some(found)
    });
    let groups = topology.groups.iter().filter_map(|group| {
        let found = accept_group(group)?;
        (!registry.contains_address(&found.address)).then_some(found)
    });
    nodes.chain(groups).collect()
}

/// Query the controller topology and register everything new.
pub async fn discover(
    client: &RestClient,
    registry: &Registry,
) -> Result<DiscoveryReport, CoreError> {
    let topology = client.list_nodes().await?;
    let total = topology.nodes.len() + topology.groups.len();
    debug!(
        nodes = topology.nodes.len(),
        groups = topology.groups.len(),
        "topology fetched"
    );

    let batch = plan(&topology, registry)
        .into_iter()
        .filter_map(|d| EntityRecord::new(&d.name, d.address.as_str(), d.dimmable).ok())
        .collect();

    let added: Vec<EntityRecord> = registry
        .extend(batch)
        .into_iter()
        .map(|record| {
            info!(name = %record.pattern, address = %record.address, kind = %record.kind(), "discovered");
            EntityRecord::clone(&record)
        })
        .collect();

    Ok(DiscoveryReport {
        skipped: total.saturating_sub(added.len()),
        added,
    })
}

fn accept_node(node: &NodeInfo) -> Option<Discovered> {
    if !node.is_enabled() {
        return None;
    }
    let category = node.category()?;
    if !CONTROLLABLE_CATEGORIES.contains(&category) {
        return None;
    }
    if node.name.trim_start().starts_with(HIDDEN_PREFIX) {
        return None;
    }

    let address = Address::from_controller(&node.address);
    let name = normalize_name(&node.name);
    if address.is_empty() || name.is_empty() {
        return None;
    }

    Some(Discovered {
        name,
        address,
        dimmable: category == DIMMABLE_CATEGORY,
        origin: Origin::Node,
    })
}

fn accept_group(group: &GroupInfo) -> Option<Discovered> {
    let address = Address::from_controller(&group.address);
    if !address.is_scene() {
        return None;
    }
    let name = normalize_name(&group.name);
    if name.is_empty() {
        return None;
    }

    Some(Discovered {
        name,
        address,
        dimmable: false,
        origin: Origin::Group,
    })
}

/// Lower-case, drop everything but ASCII letters, digits and spaces, then
/// collapse whitespace.
pub fn normalize_name(raw: &str) -> String {
    let kept: String = raw
        .to_lowercase()
        .chars()
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == ' ')
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}
