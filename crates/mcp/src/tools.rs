//! The fixed tool catalog.
//!
//! Each tool maps one-to-one onto a Splunk saved search of the same name.
//! Tools take no parameters; the saved search defines the whole query.

use std::fmt;
use std::sync::Arc;

use rmcp::model::{JsonObject, Tool};

/// A saved search exposed as an MCP tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SavedSearchTool {
    /// Nodes whose latency is above the slow threshold.
    SlowNetworkNodes,
    /// Links between network nodes.
    NetworkTopologies,
}

impl SavedSearchTool {
    /// Every registered tool, in listing order.
    pub const ALL: [Self; 2] = [Self::SlowNetworkNodes, Self::NetworkTopologies];

    /// Tool name advertised to MCP clients.
    pub fn name(self) -> &'static str {
        match self {
            Self::SlowNetworkNodes => "mcp_get_slow_network_nodes",
            Self::NetworkTopologies => "mcp_get_network_topologies",
        }
    }

    /// Name of the Splunk saved search backing this tool.
    pub fn saved_search(self) -> &'static str {
        self.name()
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::SlowNetworkNodes => {
                "Run the Splunk saved search 'mcp_get_slow_network_nodes' and return the slow \
                 network nodes it reports. Each row has the fields node, latency and region."
            }
            Self::NetworkTopologies => {
                "Run the Splunk saved search 'mcp_get_network_topologies' and return the network \
                 links it reports. Each row has the fields node_from and node_to."
            }
        }
    }

    /// Fields every result row is expected to carry.
    pub fn expected_fields(self) -> &'static [&'static str] {
        match self {
            Self::SlowNetworkNodes => &["node", "latency", "region"],
            Self::NetworkTopologies => &["node_from", "node_to"],
        }
    }

    /// Look up a tool by its advertised name. Matching is exact.
    pub fn from_tool_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.name() == name)
    }

    /// MCP descriptor with an empty-object parameter schema.
    pub fn descriptor(self) -> Tool {
        Tool {
            name: self.name().into(),
            description: Some(self.description().into()),
            input_schema: empty_object_schema(),
            annotations: Default::default(),
        }
    }
}

impl fmt::Display for SavedSearchTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn empty_object_schema() -> Arc<JsonObject> {
    let mut schema = JsonObject::new();
    schema.insert("type".to_string(), serde_json::Value::from("object"));
    schema.insert(
        "properties".to_string(),
        serde_json::Value::Object(JsonObject::new()),
    );
    Arc::new(schema)
}
