//! Resolve command implementation

use anyhow::{Context, Result};

use super::load_target;
use crate::cli::TargetArgs;

pub fn execute(args: &TargetArgs) -> Result<()> {
    let (target, event) = load_target(args)?;
    tracing::debug!(target_source = %target, "Resolving target");

    let instance_id = target
        .resolve(&event)
        .context("Could not resolve target instance")?;

    println!("{instance_id}");

    Ok(())
}
