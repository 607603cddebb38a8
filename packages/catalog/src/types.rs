// ABOUTME: Public agent model plus the raw wire shapes behind it
// ABOUTME: Normalizes the catalog payload into a filtered, sorted agent list

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Author attributed to agents that do not carry one
pub const DEFAULT_AUTHOR: &str = "Heurist";

/// A catalog agent as presented to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    pub id: String,
    pub name: String,
    pub author: String,
    pub description: String,
    pub tags: Vec<String>,
    pub image_url: Option<String>,
    pub total_calls: Option<u64>,
    pub recommended: bool,
}

/// Wire shape of `GET {base}/agents`: a mapping from agent id to record
#[derive(Debug, Deserialize)]
pub(crate) struct AgentsPayload {
    pub(crate) agents: HashMap<String, RawAgentRecord>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawAgentRecord {
    #[serde(default)]
    pub(crate) metadata: RawAgentMetadata,
}

/// Backend metadata with every field optional
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawAgentMetadata {
    pub(crate) name: Option<String>,
    pub(crate) author: Option<String>,
    pub(crate) description: Option<String>,
    #[serde(default)]
    pub(crate) tags: Vec<String>,
    pub(crate) image_url: Option<String>,
    pub(crate) total_calls: Option<u64>,
    #[serde(default)]
    pub(crate) recommended: bool,
    #[serde(default)]
    pub(crate) hidden: bool,
}

/// Turn a raw catalog payload into the presented agent list
///
/// Records that are hidden or carry no name are dropped. Remaining fields
/// fall back to defaults. The result is sorted by usage count descending,
/// with ties broken by id so the order is stable across refreshes.
pub(crate) fn normalize(payload: AgentsPayload) -> Vec<Agent> {
    let mut agents: Vec<Agent> = payload
        .agents
        .into_iter()
        .filter_map(|(id, record)| {
            let metadata = record.metadata;
            if metadata.hidden {
                return None;
            }
            let name = metadata.name.filter(|name| !name.is_empty())?;

            Some(Agent {
                id,
                name,
                author: metadata.author.unwrap_or_else(|| DEFAULT_AUTHOR.to_string()),
                description: metadata.description.unwrap_or_default(),
                tags: metadata.tags,
                image_url: metadata.image_url,
                total_calls: metadata.total_calls,
                recommended: metadata.recommended,
            })
        })
        .collect();

    agents.sort_by(|a, b| {
        b.total_calls
            .unwrap_or(0)
            .cmp(&a.total_calls.unwrap_or(0))
            .then_with(|| a.id.cmp(&b.id))
    });

    agents
}

/// Agents flagged as recommended, in catalog order
///
/// Recomputed from the full list on every refresh rather than cached.
pub fn recommended(agents: &[Agent]) -> Vec<Agent> {
    agents
        .iter()
        .filter(|agent| agent.recommended)
        .cloned()
        .collect()
}
