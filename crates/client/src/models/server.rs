//! Server info model.

use serde::{Deserialize, Serialize};

/// Server information from `/services/server/info`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerInfo {
    #[serde(rename = "serverName", default)]
    pub server_name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub build: String,
    pub mode: Option<String>,
    #[serde(default)]
    pub server_roles: Vec<String>,
    pub os_name: Option<String>,
}
