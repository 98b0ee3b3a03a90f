use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

use commands::{export_plan, import_plan, serve};

use crate::config::StateSource;

#[derive(Parser)]
#[command(name = "famplan")]
#[command(about = "FamPlan application with CLI tools and web server")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve {
        /// Bind address, e.g. 0.0.0.0:3000
        #[arg(short, long, env = "BIND_ADDRESS")]
        bind: Option<String>,

        /// Load the plan from a backup file instead of the demo data
        #[arg(short, long, env = "FAMPLAN_DATA")]
        data: Option<PathBuf>,

        /// Start with an empty plan
        #[arg(long, conflicts_with = "data")]
        empty: bool,
    },
    /// Write the demo plan as a backup document
    Export {
        /// Output file path
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Re-export a backup document, normalizing its shape
    Import {
        /// Input backup file
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (defaults to overwriting the input)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Serve { bind, data, empty } => {
                let bind = bind.unwrap_or_else(crate::config::get_bind_address);
                let source = StateSource::resolve(data, empty);
                serve(source, &bind).await?;
            }
            Commands::Export { output } => {
                export_plan(&output)?;
            }
            Commands::Import { input, output } => {
                import_plan(&input, output.as_deref())?;
            }
        }
        Ok(())
    }
}
