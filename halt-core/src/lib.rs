//! Halt Core - Foundation types for the alarm-triggered instance stopper
//!
//! This crate provides the event model, identifiers, configuration and
//! error types shared by the handler, the compute backends and the CLI.

#![warn(missing_docs, clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod event;
pub mod report;
pub mod response;
pub mod types;

pub use config::{HandlerConfig, TargetSource};
pub use error::{Error, Result};
pub use event::{AlarmEvent, instance_id_from_value};
pub use report::{InstanceState, StateChange, StopReport};
pub use response::HandlerResponse;
pub use types::InstanceId;
