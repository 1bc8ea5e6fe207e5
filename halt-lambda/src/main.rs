//! Lambda bootstrap for the alarm handler

use aws_config::BehaviorVersion;
use halt_compute::Ec2Backend;
use halt_core::HandlerConfig;
use halt_lambda::AlarmHandler;
use lambda_runtime::{Error, LambdaEvent, service_fn};
use serde_json::Value;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // CloudWatch Logs stamps every line, so no timestamps or colours
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .without_time()
        .init();

    // Invalid configuration fails the cold start rather than every invocation
    let config = HandlerConfig::from_env()?;
    info!(target_source = %config.target, "Starting alarm handler");

    let aws = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let handler = AlarmHandler::from_config(Ec2Backend::from_conf(&aws), config);
    let handler = &handler;

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        handler.invoke(event).await
    }))
    .await
}
