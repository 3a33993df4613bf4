//! User-triggered provider actions and their displayable outcomes.

use crate::tool_registry::domain::{DiscoveredTool, ProviderDraft, ProviderId, ToolProvider};

/// Action raised by the user interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderAction {
    /// Add a new provider.
    Register(ProviderDraft),
    /// Replace the settings of an existing provider.
    Update {
        /// Provider to change.
        id: ProviderId,
        /// New settings.
        draft: ProviderDraft,
    },
    /// Delete a provider.
    Remove {
        /// Provider to delete.
        id: ProviderId,
        /// Display name used in the confirmation message.
        name: String,
    },
    /// Show the tools a provider exposes.
    Expand {
        /// Provider to expand.
        provider_id: ProviderId,
    },
}

/// Whether an action succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionStatus {
    /// The action completed.
    Success,
    /// The action failed; the message says why.
    Failure,
}

/// Result of dispatching a [`ProviderAction`], ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    /// Success or failure.
    pub status: ActionStatus,
    /// Human-readable notification naming the affected provider.
    pub message: String,
    /// Provider affected by a successful register, update or remove.
    pub provider: Option<ToolProvider>,
    /// Tools returned by a successful expansion.
    pub tools: Vec<DiscoveredTool>,
}

impl ActionOutcome {
    /// Creates a successful outcome with no payload.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: ActionStatus::Success,
            message: message.into(),
            provider: None,
            tools: Vec::new(),
        }
    }

    /// Creates a failed outcome.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status: ActionStatus::Failure,
            message: message.into(),
            provider: None,
            tools: Vec::new(),
        }
    }

    /// Attaches the affected provider.
    #[must_use]
    pub fn with_provider(mut self, provider: Option<ToolProvider>) -> Self {
        self.provider = provider;
        self
    }

    /// Attaches discovered tools.
    #[must_use]
    pub fn with_tools(mut self, tools: Vec<DiscoveredTool>) -> Self {
        self.tools = tools;
        self
    }

    /// Returns whether the action succeeded.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.status, ActionStatus::Success)
    }
}
