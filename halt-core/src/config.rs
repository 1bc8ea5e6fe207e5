//! Deployment-time configuration
//!
//! The target resolution strategy is fixed when the process starts. There is
//! no per-invocation fallback from one strategy to the other.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

use crate::{AlarmEvent, Error, InstanceId, Result, instance_id_from_value};

/// Environment variable selecting the strategy
pub const TARGET_SOURCE_VAR: &str = "TARGET_SOURCE";

/// Environment variable holding the configured instance
pub const INSTANCE_ID_VAR: &str = "INSTANCE_ID";

/// Where the handler finds the instance to stop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", content = "instance_id", rename_all = "snake_case")]
pub enum TargetSource {
    /// Read the instance from the alarm event's metric dimensions
    Event,
    /// Always stop this instance, whatever the event says
    Environment(InstanceId),
}

impl TargetSource {
    /// Strategy name as accepted by `TARGET_SOURCE`
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Event => "event",
            Self::Environment(_) => "environment",
        }
    }

    /// Work out which instance a trigger event targets
    ///
    /// With [`TargetSource::Environment`] the event is not inspected at all.
    ///
    /// # Errors
    /// Returns error if the event is malformed or lacks the instance dimension
    pub fn resolve(&self, event: &Value) -> Result<InstanceId> {
        match self {
            Self::Environment(id) => Ok(id.clone()),
            Self::Event => {
                match AlarmEvent::from_value(event) {
                    Ok(alarm) => debug!(
                        alarm_name = alarm.alarm_name().unwrap_or("<unnamed>"),
                        state = alarm.state_value().unwrap_or("<unknown>"),
                        "Parsed alarm event"
                    ),
                    Err(e) => debug!(error = %e, "Alarm event has an unexpected shape"),
                }
                instance_id_from_value(event)
            }
        }
    }
}

impl fmt::Display for TargetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Event => f.write_str("event"),
            Self::Environment(id) => write!(f, "environment ({id})"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SourceKind {
    Event,
    Environment,
}

impl FromStr for SourceKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "event" => Ok(Self::Event),
            "environment" | "env" => Ok(Self::Environment),
            other => Err(Error::InvalidConfig {
                message: format!(
                    "{TARGET_SOURCE_VAR} must be 'event' or 'environment', got '{other}'"
                ),
            }),
        }
    }
}

/// Handler configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlerConfig {
    /// Active target resolution strategy
    pub target: TargetSource,
}

impl HandlerConfig {
    /// Create a configuration with an explicit strategy
    #[must_use]
    pub const fn new(target: TargetSource) -> Self {
        Self { target }
    }

    /// Load configuration from the process environment
    ///
    /// # Errors
    /// Returns error if `TARGET_SOURCE` is unrecognised, or if the environment
    /// strategy is selected and `INSTANCE_ID` is missing or invalid
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// Without `TARGET_SOURCE`, the environment strategy is chosen when
    /// `INSTANCE_ID` is set and the event strategy otherwise.
    ///
    /// # Errors
    /// Same as [`HandlerConfig::from_env`]
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let instance_id = lookup(INSTANCE_ID_VAR).filter(|v| !v.trim().is_empty());

        let kind = match lookup(TARGET_SOURCE_VAR).filter(|v| !v.trim().is_empty()) {
            Some(raw) => raw.parse()?,
            None if instance_id.is_some() => SourceKind::Environment,
            None => SourceKind::Event,
        };

        let target = match kind {
            SourceKind::Event => {
                if let Some(ignored) = instance_id {
                    warn!(
                        instance_id = %ignored,
                        "{INSTANCE_ID_VAR} is set but {TARGET_SOURCE_VAR}=event; ignoring it"
                    );
                }
                TargetSource::Event
            }
            SourceKind::Environment => {
                let raw = instance_id.ok_or(Error::MissingConfig {
                    name: INSTANCE_ID_VAR,
                })?;
                TargetSource::Environment(InstanceId::new(raw.trim())?)
            }
        };

        Ok(Self { target })
    }
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self::new(TargetSource::Event)
    }
}
