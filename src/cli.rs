use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;

/// Small task board served over HTTP, backed by a single CSV file.
/// Storage defaults to ./tasks.csv or a path passed via --db.
#[derive(Parser)]
#[command(name = "taskboard", version, about = "Task board web app and CLI")]
pub struct Cli {
    /// Path to the CSV task file.
    #[arg(long, global = true, env = "TASKBOARD_DB", default_value = "tasks.csv")]
    pub db: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}
