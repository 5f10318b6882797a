// Node, group, and status endpoints
//
// Topology listing via /rest/nodes, status via /rest/status/{address},
// and node commands via /rest/nodes/{address}/cmd/{CMD}[/{arg}].

use tracing::{debug, warn};

use crate::client::{RestClient, decode};
use crate::error::Error;
use crate::models::{CommandAck, RestResponse, StatusProperties, Topology};

impl RestClient {
    /// List every node and group known to the controller.
    ///
    /// `GET /rest/nodes`
    pub async fn list_nodes(&self) -> Result<Topology, Error> {
        debug!("listing nodes");
        self.get_document("nodes").await
    }

    /// Read the live status of a single node.
    ///
    /// `GET /rest/status/{address}`
    pub async fn node_status(&self, address: &str) -> Result<StatusProperties, Error> {
        debug!(address, "reading node status");
        self.get_document(&format!("status/{address}")).await
    }

    /// Send a command to a node or scene.
    ///
    /// `GET /rest/nodes/{address}/cmd/{code}[/{arg}]`
    pub async fn node_command(
        &self,
        address: &str,
        code: &str,
        arg: Option<u8>,
    ) -> Result<CommandAck, Error> {
        let path = match arg {
            Some(arg) => format!("nodes/{address}/cmd/{code}/{arg}"),
            None => format!("nodes/{address}/cmd/{code}"),
        };
        debug!(address, code, ?arg, "sending node command");

        let body = self.get_text(&path).await?;
        let ack = if body.trim().is_empty() {
            CommandAck::default()
        } else {
            decode::<RestResponse>(&body)
                .map(CommandAck::from)
                .unwrap_or_default()
        };

        if ack.succeeded == Some(false) {
            warn!(address, code, status = ?ack.status, "controller reported command failure");
        }
        Ok(ack)
    }
}
