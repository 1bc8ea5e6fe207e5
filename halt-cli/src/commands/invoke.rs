//! Invoke command implementation

use anyhow::{Context, Result};
use aws_config::BehaviorVersion;
use halt_compute::Ec2Backend;
use halt_lambda::AlarmHandler;

use super::load_target;
use crate::cli::TargetArgs;

pub async fn execute(args: &TargetArgs) -> Result<()> {
    let (target, event) = load_target(args)?;

    // Resolve before touching AWS so a bad event fails fast
    let instance_id = target
        .resolve(&event)
        .context("Could not resolve target instance")?;
    tracing::info!(instance_id = %instance_id, "Invoking alarm handler");

    let aws = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let handler = AlarmHandler::new(Ec2Backend::from_conf(&aws), target);

    let response = handler
        .handle(&event)
        .await
        .context("Alarm handler failed")?;

    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
