//! Alarm handler

use halt_compute::ComputeBackend;
use halt_core::{HandlerConfig, HandlerResponse, InstanceId, Result, TargetSource};
use lambda_runtime::LambdaEvent;
use serde_json::Value;
use tracing::{Instrument, debug, error, info, info_span};

/// Stops the instance an alarm points at
///
/// Holds no per-invocation state, so one handler serves every invocation
/// of the execution environment.
#[derive(Debug)]
pub struct AlarmHandler<B> {
    backend: B,
    target: TargetSource,
}

impl<B: ComputeBackend> AlarmHandler<B> {
    /// Create a handler with an explicit strategy
    #[must_use]
    pub const fn new(backend: B, target: TargetSource) -> Self {
        Self { backend, target }
    }

    /// Create a handler from loaded configuration
    #[must_use]
    pub fn from_config(backend: B, config: HandlerConfig) -> Self {
        Self::new(backend, config.target)
    }

    /// Active target resolution strategy
    #[must_use]
    pub const fn target(&self) -> &TargetSource {
        &self.target
    }

    /// Backend used for stop requests
    #[must_use]
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Work out which instance this event targets, without stopping it
    pub fn resolve(&self, event: &Value) -> Result<InstanceId> {
        self.target.resolve(event)
    }

    /// Handle one trigger event
    ///
    /// Stop failures are logged and returned unchanged; no success response
    /// is produced for them.
    pub async fn handle(&self, event: &Value) -> Result<HandlerResponse> {
        info!(event = %event, "Received event");

        let instance_id = self.resolve(event)?;
        info!(
            instance_id = %instance_id,
            source = self.target.name(),
            "Resolved target instance"
        );

        let report = match self.backend.stop_instance(&instance_id).await {
            Ok(report) => report,
            Err(e) => {
                error!(instance_id = %instance_id, error = %e, "Error stopping instance");
                return Err(e);
            }
        };

        info!(instance_id = %instance_id, "Stopping instance");
        info!(response = ?report, "Stop response");

        for change in &report.changes {
            debug!(
                instance_id = %change.instance_id,
                previous = %change.previous,
                current = %change.current,
                "Instance state change"
            );
        }

        HandlerResponse::stopped()
    }

    /// Entry point for the Lambda runtime loop
    pub async fn invoke(
        &self,
        event: LambdaEvent<Value>,
    ) -> std::result::Result<HandlerResponse, lambda_runtime::Error> {
        let (payload, context) = event.into_parts();
        let span = info_span!("invocation", request_id = %context.request_id);

        self.handle(&payload)
            .instrument(span)
            .await
            .map_err(lambda_runtime::Error::from)
    }
}
