//! CLI argument definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "halt")]
#[command(about = "Stop the EC2 instance a CloudWatch alarm points at", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the instance an alarm event targets, without stopping it
    Resolve(TargetArgs),

    /// Run the alarm handler locally against EC2
    Invoke(TargetArgs),

    /// Print an alarm event naming an instance
    SampleEvent {
        /// Instance ID to put in the metric dimensions
        #[arg(short, long)]
        instance_id: String,

        /// Alarm name
        #[arg(long, default_value = "halt-sample")]
        alarm_name: String,
    },
}

#[derive(Args)]
pub struct TargetArgs {
    /// Alarm event JSON file ("-" for stdin, the default when no instance ID is given)
    #[arg(short, long, value_name = "PATH")]
    pub event: Option<PathBuf>,

    /// Always target this instance and ignore the event
    #[arg(short, long)]
    pub instance_id: Option<String>,
}
