// REST API response types
//
// The controller answers with XML. Fields use `#[serde(default)]` liberally
// because element presence varies across firmware versions; attributes are
// mapped with quick-xml's `@name` convention.

use serde::{Deserialize, Serialize};

// ── Topology (/rest/nodes) ───────────────────────────────────────────

/// Full controller topology from `GET /rest/nodes`.
///
/// ```xml
/// <nodes>
///   <root>Network</root>
///   <folder>...</folder>
///   <node flag="128"><address>12 AB 3 1</address><name>Kitchen</name>
///     <type>1.32.65.0</type><enabled>true</enabled></node>
///   <group flag="132"><address>20109</address><name>Evening</name></group>
/// </nodes>
/// ```
///
/// Root and folder elements are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Topology {
    #[serde(rename = "node", default)]
    pub nodes: Vec<NodeInfo>,
    #[serde(rename = "group", default)]
    pub groups: Vec<GroupInfo>,
}

/// A single device node.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeInfo {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub name: String,
    /// Dotted type code, e.g. `1.32.65.0`. The first segment is the category.
    #[serde(rename = "type", default)]
    pub type_code: String,
    /// `"true"` / `"false"` as reported by the controller.
    #[serde(default)]
    pub enabled: String,
}

impl NodeInfo {
    pub fn is_enabled(&self) -> bool {
        self.enabled.trim().eq_ignore_ascii_case("true")
    }

    /// Device category: the first segment of the dotted type code.
    pub fn category(&self) -> Option<&str> {
        self.type_code
            .trim()
            .split('.')
            .next()
            .filter(|c| !c.is_empty())
    }
}

/// A controller-defined group (scene).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroupInfo {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub name: String,
}

// ── Status (/rest/status/{address}) ─────────────────────────────────

/// Status properties from `GET /rest/status/{address}`.
///
/// ```xml
/// <properties><property id="ST" value="255" formatted="On" uom="%/on/off"/></properties>
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusProperties {
    #[serde(rename = "property", default)]
    pub properties: Vec<Property>,
}

impl StatusProperties {
    /// The primary status property: `ST` when present, otherwise the first.
    pub fn primary(&self) -> Option<&Property> {
        self.properties
            .iter()
            .find(|p| p.id == "ST")
            .or_else(|| self.properties.first())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Property {
    #[serde(rename = "@id", default)]
    pub id: String,
    /// Native value, 0-255 for lighting.
    #[serde(rename = "@value", default)]
    pub value: Option<String>,
    /// Human-readable value: `On`, `Off`, `42%`, ...
    #[serde(rename = "@formatted", default)]
    pub formatted: Option<String>,
    /// Unit of measure; `%`-prefixed units indicate a dimmable channel.
    #[serde(rename = "@uom", default)]
    pub uom: Option<String>,
}

// ── Command acknowledgement ──────────────────────────────────────────

/// Envelope returned by node commands.
///
/// ```xml
/// <RestResponse succeeded="true"><status>200</status></RestResponse>
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RestResponse {
    #[serde(rename = "@succeeded", default)]
    pub succeeded: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Lenient view of a command response.
///
/// Commands are fire-and-forget: any non-error HTTP response counts as
/// success, so both fields are `None` when the body was empty or unparseable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CommandAck {
    pub succeeded: Option<bool>,
    pub status: Option<u16>,
}

impl From<RestResponse> for CommandAck {
    fn from(raw: RestResponse) -> Self {
        Self {
            succeeded: raw
                .succeeded
                .map(|s| s.trim().eq_ignore_ascii_case("true")),
            status: raw.status.and_then(|s| s.trim().parse().ok()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::client::decode;

    #[test]
    fn category_is_first_type_segment() {
        let node = NodeInfo {
            type_code: " 2.42.68.0 ".into(),
            ..NodeInfo::default()
        };
        assert_eq!(node.category(), Some("2"));
    }

    #[test]
    fn missing_type_has_no_category() {
        assert_eq!(NodeInfo::default().category(), None);
    }

    #[test]
    fn primary_prefers_st() {
        let xml = r#"<properties>
            <property id="CLISPH" value="136" formatted="68" uom="degrees"/>
            <property id="ST" value="0" formatted="Off" uom="%/on/off"/>
        </properties>"#;
        let status: StatusProperties = decode(xml).unwrap();
        let primary = status.primary().unwrap();
        assert_eq!(primary.id, "ST");
        assert_eq!(primary.formatted.as_deref(), Some("Off"));
    }

    #[test]
    fn rest_response_maps_to_ack() {
        let xml = r#"<RestResponse succeeded="true"><status>200</status></RestResponse>"#;
        let raw: RestResponse = decode(xml).unwrap();
        assert_eq!(
            CommandAck::from(raw),
            CommandAck {
                succeeded: Some(true),
                status: Some(200)
            }
        );
    }
}
