//! Halt Lambda - alarm handler that stops a compute instance
//!
//! [`AlarmHandler`] resolves the target instance with the deployment's
//! [`TargetSource`](halt_core::TargetSource), issues one stop request
//! through a [`ComputeBackend`](halt_compute::ComputeBackend) and returns a
//! fixed response.

#![warn(missing_docs, clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]

pub mod handler;

pub use handler::AlarmHandler;
