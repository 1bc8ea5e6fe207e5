//! EC2 backend implementation

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_ec2::Client;
use aws_sdk_ec2::error::DisplayErrorContext;
use aws_sdk_ec2::types::{InstanceState as Ec2InstanceState, InstanceStateChange};
use halt_core::{Error, InstanceId, InstanceState, Result, StateChange, StopReport};
use tracing::{debug, info, warn};

use crate::ComputeBackend;

/// Backend issuing `StopInstances` against the EC2 API
///
/// The client carries region and credentials from the host's provider chain.
#[derive(Debug, Clone)]
pub struct Ec2Backend {
    client: Client,
}

impl Ec2Backend {
    /// Wrap an existing EC2 client
    #[must_use]
    pub const fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a backend from a loaded AWS configuration
    #[must_use]
    pub fn from_conf(config: &SdkConfig) -> Self {
        Self::new(Client::new(config))
    }
}

#[async_trait]
impl ComputeBackend for Ec2Backend {
    async fn stop_instance(&self, id: &InstanceId) -> Result<StopReport> {
        debug!(instance_id = %id, "Sending StopInstances");

        let output = self
            .client
            .stop_instances()
            .instance_ids(id.as_str())
            .send()
            .await
            .map_err(|e| {
                debug!(
                    instance_id = %id,
                    error = %DisplayErrorContext(&e),
                    "StopInstances request failed"
                );
                Error::stop_request(id.clone(), e)
            })?;

        info!(response = ?output, "StopInstances response");

        let changes = output
            .stopping_instances()
            .iter()
            .filter_map(|change| convert_change(change, id))
            .collect();

        Ok(StopReport { changes })
    }
}

fn convert_change(change: &InstanceStateChange, requested: &InstanceId) -> Option<StateChange> {
    let instance_id = match change.instance_id() {
        Some(raw) => match InstanceId::new(raw) {
            Ok(id) => id,
            Err(e) => {
                warn!(raw, error = %e, "Ignoring state change with unusable instance ID");
                return None;
            }
        },
        None => requested.clone(),
    };

    Some(StateChange {
        instance_id,
        previous: convert_state(change.previous_state()),
        current: convert_state(change.current_state()),
    })
}

fn convert_state(state: Option<&Ec2InstanceState>) -> InstanceState {
    state
        .and_then(Ec2InstanceState::name)
        .map_or_else(
            || InstanceState::Unknown(String::new()),
            |name| InstanceState::from_name(name.as_str()),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_ec2::types::InstanceStateName;

    fn ec2_state(name: InstanceStateName) -> Ec2InstanceState {
        Ec2InstanceState::builder().name(name).build()
    }

    #[test]
    fn test_convert_change() {
        let requested = InstanceId::new("i-aaaa").unwrap();
        let change = InstanceStateChange::builder()
            .instance_id("i-aaaa")
            .previous_state(ec2_state(InstanceStateName::Running))
            .current_state(ec2_state(InstanceStateName::Stopping))
            .build();

        let converted = convert_change(&change, &requested).unwrap();
        assert_eq!(converted.instance_id, requested);
        assert_eq!(converted.previous, InstanceState::Running);
        assert_eq!(converted.current, InstanceState::Stopping);
    }

    #[test]
    fn test_convert_change_without_instance_id() {
        let requested = InstanceId::new("i-aaaa").unwrap();
        let change = InstanceStateChange::builder()
            .current_state(ec2_state(InstanceStateName::Stopped))
            .build();

        let converted = convert_change(&change, &requested).unwrap();
        assert_eq!(converted.instance_id, requested);
        assert_eq!(converted.previous, InstanceState::Unknown(String::new()));
        assert_eq!(converted.current, InstanceState::Stopped);
    }

    #[test]
    fn test_convert_change_rejects_bad_id() {
        let requested = InstanceId::new("i-aaaa").unwrap();
        let change = InstanceStateChange::builder().instance_id("i aaaa").build();
        assert!(convert_change(&change, &requested).is_none());
    }
}
