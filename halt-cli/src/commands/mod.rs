use crate::cli::{Commands, TargetArgs};
use anyhow::{Context, Result};
use halt_core::{InstanceId, TargetSource};
use serde_json::Value;
use std::io::Read;
use std::path::Path;

pub mod invoke;
pub mod resolve;
pub mod sample_event;

/// Dispatch command to appropriate handler
pub async fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Resolve(args) => resolve::execute(&args),
        Commands::Invoke(args) => invoke::execute(&args).await,
        Commands::SampleEvent {
            instance_id,
            alarm_name,
        } => sample_event::execute(&instance_id, &alarm_name),
    }
}

/// Pick the strategy and load the event the handler will see
///
/// An explicit instance ID mirrors a deployment with `INSTANCE_ID` set; the
/// event is then only read if a path was given.
pub fn load_target(args: &TargetArgs) -> Result<(TargetSource, Value)> {
    match &args.instance_id {
        Some(raw) => {
            let id = InstanceId::new(raw.as_str()).context("Invalid instance ID")?;
            let event = match &args.event {
                Some(path) => read_event(path)?,
                None => Value::Object(serde_json::Map::new()),
            };
            Ok((TargetSource::Environment(id), event))
        }
        None => {
            let path = args.event.as_deref().unwrap_or_else(|| Path::new("-"));
            Ok((TargetSource::Event, read_event(path)?))
        }
    }
}

fn read_event(path: &Path) -> Result<Value> {
    let raw = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read event from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read event file {}", path.display()))?
    };

    serde_json::from_str(&raw).context("Event is not valid JSON")
}
