//! API request and response models for the provisioner backend

use serde::{Deserialize, Deserializer, Serialize};

/// Kind of server to provision
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerType {
    #[default]
    Tool,
    Agent,
}

/// Server creation request
#[derive(Debug, Serialize)]
pub struct CreateServerRequest {
    pub server_type: ServerType,
    pub agents: Vec<String>,
}

/// Connection details returned for a provisioned server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSummary {
    pub server_id: String,
    pub endpoint: String,
    pub mcp_endpoint: String,
}

/// Extended server detail with deployment metadata
#[derive(Debug, Clone, Deserialize)]
pub struct ServerDetails {
    pub server_id: String,
    pub endpoint: String,
    pub mcp_endpoint: String,
    pub docker_image: String,
    pub container_name: String,
    pub server_type_exe: String,
    pub base_port: String,
    pub path_prefix: String,
    pub traefik_network: String,
    pub host_domain: String,
    /// The backend sends either a single string or a list
    #[serde(deserialize_with = "string_or_list")]
    pub supported_agents: Vec<String>,
}

/// List servers response
#[derive(Debug, Deserialize)]
pub struct ListServersResponse {
    pub servers: Vec<ServerSummary>,
}

/// Server deletion response
#[derive(Debug, Deserialize)]
pub struct DeleteServerResponse {
    pub success: bool,
    pub message: String,
}

/// Body for the detail and delete endpoints
#[derive(Debug, Serialize)]
pub(crate) struct ServerIdRequest {
    pub(crate) server_id: String,
}

/// Chat creation request
#[derive(Debug, Serialize)]
pub struct CreateChatRequest {
    pub id: String,
    pub title: String,
    #[serde(rename = "agentId")]
    pub agent_id: String,
}

/// Chat creation acknowledgement; fields beyond the id are backend-optional
#[derive(Debug, Deserialize)]
pub struct ChatAck {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
}

fn string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrList {
        One(String),
        Many(Vec<String>),
    }

    Ok(match StringOrList::deserialize(deserializer)? {
        StringOrList::One(value) => vec![value],
        StringOrList::Many(values) => values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_create_server_request_wire_shape() {
        let request = CreateServerRequest {
            server_type: ServerType::Tool,
            agents: vec!["a1".to_string(), "a2".to_string()],
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({ "server_type": "tool", "agents": ["a1", "a2"] })
        );
    }

    #[test]
    fn test_create_chat_request_uses_camel_case_agent_id() {
        let request = CreateChatRequest {
            id: "chat-1".to_string(),
            title: "First chat".to_string(),
            agent_id: "a1".to_string(),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({ "id": "chat-1", "title": "First chat", "agentId": "a1" })
        );
    }

    #[test]
    fn test_supported_agents_accepts_single_string() {
        let details: ServerDetails = serde_json::from_value(json!({
            "server_id": "srv-1",
            "endpoint": "https://host/srv-1",
            "mcp_endpoint": "https://host/srv-1/mcp",
            "docker_image": "mesh/tool:latest",
            "container_name": "mesh-srv-1",
            "server_type_exe": "tool-server",
            "base_port": "8000",
            "path_prefix": "/srv-1",
            "traefik_network": "mesh",
            "host_domain": "mesh.example.com",
            "supported_agents": "a1"
        }))
        .unwrap();

        assert_eq!(details.supported_agents, vec!["a1".to_string()]);
    }

    #[test]
    fn test_supported_agents_accepts_list() {
        let details: ServerDetails = serde_json::from_value(json!({
            "server_id": "srv-1",
            "endpoint": "https://host/srv-1",
            "mcp_endpoint": "https://host/srv-1/mcp",
            "docker_image": "mesh/tool:latest",
            "container_name": "mesh-srv-1",
            "server_type_exe": "tool-server",
            "base_port": "8000",
            "path_prefix": "/srv-1",
            "traefik_network": "mesh",
            "host_domain": "mesh.example.com",
            "supported_agents": ["a1", "a2"]
        }))
        .unwrap();

        assert_eq!(
            details.supported_agents,
            vec!["a1".to_string(), "a2".to_string()]
        );
    }
}
