//! Compute backends with pluggable implementations
//!
//! This crate provides a trait-based abstraction over the "stop instances"
//! call, with an EC2 implementation and an in-memory mock.

#![warn(missing_docs, clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod backend;
pub mod ec2;

pub use backend::{ComputeBackend, MockBackend};
pub use ec2::Ec2Backend;

// Re-export commonly used types
pub use halt_core::{InstanceId, StopReport};
