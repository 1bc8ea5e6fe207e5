//! Stop request outcome value objects

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::InstanceId;

/// Lifecycle state of a compute instance
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InstanceState {
    /// Booting
    Pending,
    /// Running
    Running,
    /// Being terminated
    ShuttingDown,
    /// Terminated
    Terminated,
    /// Being stopped
    Stopping,
    /// Stopped
    Stopped,
    /// State name not known to this crate
    Unknown(String),
}

impl InstanceState {
    /// Map a provider state name onto a state
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "pending" => Self::Pending,
            "running" => Self::Running,
            "shutting-down" => Self::ShuttingDown,
            "terminated" => Self::Terminated,
            "stopping" => Self::Stopping,
            "stopped" => Self::Stopped,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Provider state name
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::ShuttingDown => "shutting-down",
            Self::Terminated => "terminated",
            Self::Stopping => "stopping",
            Self::Stopped => "stopped",
            Self::Unknown(name) => name,
        }
    }

    /// Whether the instance is on its way to, or already in, the stopped state
    #[must_use]
    pub const fn is_stopping_or_stopped(&self) -> bool {
        matches!(self, Self::Stopping | Self::Stopped)
    }
}

impl fmt::Display for InstanceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State transition reported for one instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateChange {
    /// Instance the change applies to
    pub instance_id: InstanceId,
    /// State before the request
    pub previous: InstanceState,
    /// State after the request was accepted
    pub current: InstanceState,
}

impl fmt::Display for StateChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} -> {}", self.instance_id, self.previous, self.current)
    }
}

/// Outcome of a stop request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopReport {
    /// Per-instance state transitions
    pub changes: Vec<StateChange>,
}

impl StopReport {
    /// Report holding a single transition
    #[must_use]
    pub fn single(change: StateChange) -> Self {
        Self {
            changes: vec![change],
        }
    }

    /// Transition reported for `id`, if any
    #[must_use]
    pub fn change_for(&self, id: &InstanceId) -> Option<&StateChange> {
        self.changes.iter().find(|c| &c.instance_id == id)
    }
}
