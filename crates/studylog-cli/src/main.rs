use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod logging;
mod render;

#[derive(Parser)]
#[command(name = "studylog")]
#[command(about = "studylog - record what you studied and for how long", long_about = None)]
struct Cli {
    /// Path to config.toml (defaults to ~/.config/studylog/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a config.toml template if none exists
    Init,
    /// Show all records and the total against the goal
    List {
        /// Print the records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Record a new study session
    Add {
        /// What you studied
        title: String,
        /// How long, in hours
        #[arg(allow_negative_numbers = true)]
        hours: f64,
    },
    /// Change the title and hours of a record
    Edit {
        id: String,
        title: String,
        #[arg(allow_negative_numbers = true)]
        hours: f64,
    },
    /// Delete a record
    Remove { id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Commands::Init => commands::init::run()?,
        Commands::List { json } => {
            let reconciler = commands::connect(cli.config.as_deref()).await?;
            commands::list::run(&reconciler, json).await?
        }
        Commands::Add { title, hours } => {
            let reconciler = commands::connect(cli.config.as_deref()).await?;
            commands::add::run(&reconciler, title, hours).await?
        }
        Commands::Edit { id, title, hours } => {
            let reconciler = commands::connect(cli.config.as_deref()).await?;
            commands::edit::run(&reconciler, id, title, hours).await?
        }
        Commands::Remove { id } => {
            let reconciler = commands::connect(cli.config.as_deref()).await?;
            commands::remove::run(&reconciler, id).await?
        }
    }

    Ok(())
}
