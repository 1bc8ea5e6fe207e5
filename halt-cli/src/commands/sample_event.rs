//! Sample event command implementation

use anyhow::{Context, Result};
use halt_core::{AlarmEvent, InstanceId};

pub fn execute(instance_id: &str, alarm_name: &str) -> Result<()> {
    let id = InstanceId::new(instance_id).context("Invalid instance ID")?;
    let event = AlarmEvent::for_instance(&id, alarm_name);

    println!("{}", serde_json::to_string_pretty(&event)?);

    Ok(())
}
