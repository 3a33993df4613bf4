//! Discovered tool value objects.

use serde::{Deserialize, Serialize};

/// Description used when a remote tool does not describe itself.
pub const DEFAULT_TOOL_DESCRIPTION: &str = "No description available";

/// Tool entry as reported by a remote catalog, before normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteToolDescriptor {
    /// Tool identifier reported by the remote.
    pub name: String,
    /// Optional human-readable text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl RemoteToolDescriptor {
    /// Creates a descriptor.
    #[must_use]
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            name: name.into(),
            description,
        }
    }
}

/// Callable capability discovered on a provider.
///
/// Tools only live inside cache entries; they are never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiscoveredTool {
    name: String,
    description: String,
}

impl DiscoveredTool {
    /// Creates a tool, substituting [`DEFAULT_TOOL_DESCRIPTION`] when the
    /// description is absent or blank.
    #[must_use]
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        let resolved = description
            .filter(|text| !text.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TOOL_DESCRIPTION.to_owned());
        Self {
            name: name.into(),
            description: resolved,
        }
    }

    /// Returns the tool name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the tool description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

impl From<RemoteToolDescriptor> for DiscoveredTool {
    fn from(descriptor: RemoteToolDescriptor) -> Self {
        Self::new(descriptor.name, descriptor.description)
    }
}
