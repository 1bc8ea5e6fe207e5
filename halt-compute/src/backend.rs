//! Compute backend trait for pluggable implementations

use async_trait::async_trait;
use halt_core::{Error, InstanceId, InstanceState, Result, StateChange, StopReport};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Trait for compute backends
///
/// This allows for different implementations:
/// - [`Ec2Backend`](crate::Ec2Backend) - Production EC2 API
/// - [`MockBackend`] - Testing without network access
///
/// # Thread Safety
/// All implementations must be `Send + Sync` so a handler can be shared by
/// the runtime loop.
#[async_trait]
pub trait ComputeBackend: Send + Sync {
    /// Request that a single instance be stopped
    ///
    /// The request is issued once. The instance is not awaited into the
    /// stopped state.
    ///
    /// # Errors
    /// Returns [`Error::StopRequest`] carrying the provider failure unchanged
    async fn stop_instance(&self, id: &InstanceId) -> Result<StopReport>;
}

#[async_trait]
impl<B: ComputeBackend + ?Sized> ComputeBackend for Arc<B> {
    async fn stop_instance(&self, id: &InstanceId) -> Result<StopReport> {
        (**self).stop_instance(id).await
    }
}

/// Mock backend for testing (doesn't touch the network)
///
/// # Example
/// ```
/// use halt_compute::{ComputeBackend, InstanceId, MockBackend};
///
/// # async fn example() -> halt_core::Result<()> {
/// let backend = MockBackend::new();
/// let id = InstanceId::new("i-0123456789abcdef0")?;
///
/// let report = backend.stop_instance(&id).await?;
/// assert_eq!(report.changes.len(), 1);
/// assert_eq!(backend.stopped().await, vec![id]);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct MockBackend {
    state: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    requests: Vec<InstanceId>,
    failure: Option<String>,
}

impl MockBackend {
    /// Create a new mock backend
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState::default())),
        }
    }

    /// Create a mock whose stop requests all fail with `message`
    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState {
                failure: Some(message.into()),
                ..MockState::default()
            })),
        }
    }

    /// Make subsequent stop requests fail with `message`
    pub async fn fail_with(&self, message: impl Into<String>) {
        self.state.lock().await.failure = Some(message.into());
    }

    /// Every instance a stop was requested for, in order
    pub async fn stopped(&self) -> Vec<InstanceId> {
        self.state.lock().await.requests.clone()
    }

    /// Get the number of stop requests made (for testing)
    pub async fn call_count(&self) -> usize {
        self.state.lock().await.requests.len()
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MockBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockBackend").finish_non_exhaustive()
    }
}

#[async_trait]
impl ComputeBackend for MockBackend {
    async fn stop_instance(&self, id: &InstanceId) -> Result<StopReport> {
        let mut state = self.state.lock().await;
        state.requests.push(id.clone());

        if let Some(message) = &state.failure {
            tracing::debug!(instance_id = %id, message = %message, "Mock: Stop failed");
            return Err(Error::stop_request(id.clone(), message.clone()));
        }

        tracing::debug!(
            instance_id = %id,
            total_requests = state.requests.len(),
            "Mock: Stopped instance"
        );

        Ok(StopReport::single(StateChange {
            instance_id: id.clone(),
            previous: InstanceState::Running,
            current: InstanceState::Stopping,
        }))
    }
}
