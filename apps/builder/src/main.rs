mod config;
mod document;
mod errors;
mod models;
mod render;
mod storage;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::document::store::DocumentStore;
use crate::document::transfer::{self, EXPORT_FILENAME};
use crate::models::resume::DEFAULT_SKILL_LEVEL;
use crate::storage::FileStorage;

#[derive(Parser)]
#[command(name = "builder")]
#[command(about = "Structured résumé builder with JSON import/export", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the printable preview of the current document
    Show,
    /// Print the current document as pretty JSON
    Json,
    /// Write the JSON export to a file
    Export {
        #[arg(default_value = EXPORT_FILENAME)]
        path: PathBuf,
    },
    /// Replace the document with a normalized JSON import
    Import { path: PathBuf },
    /// Restore the blank template and clear saved data
    Reset,
    /// Add a skill to the document
    AddSkill {
        name: String,
        #[arg(long, default_value = DEFAULT_SKILL_LEVEL)]
        level: String,
    },
    /// Remove a skill by its id
    RemoveSkill { id: String },
    /// Replace the summary text
    SetSummary { text: String },
}

fn main() -> Result<()> {
    // Load configuration first; everything in it is defaulted.
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let storage = FileStorage::open(&config.data_dir);
    let mut store = DocumentStore::open(storage);

    match cli.command {
        Commands::Show => println!("{}", render::render_markdown(store.document())),
        Commands::Json => println!("{}", store.export_json()),
        Commands::Export { path } => {
            transfer::export_to_file(&store, &path)?;
            info!("Exported document to {}", path.display());
        }
        Commands::Import { path } => {
            transfer::import_from_file(&mut store, &path)?;
            info!("Imported document from {}", path.display());
        }
        Commands::Reset => {
            store.reset();
            info!("Document reset to the blank template");
        }
        Commands::AddSkill { name, level } => match store.add_skill(&name, &level) {
            Some(id) => info!("Added skill '{}' ({id})", name.trim()),
            None => anyhow::bail!("skill name must not be blank"),
        },
        Commands::RemoveSkill { id } => {
            store.remove_skill(&id);
            info!("Removed skill {id}");
        }
        Commands::SetSummary { text } => {
            store.set_summary(text);
            info!("Summary updated");
        }
    }

    Ok(())
}
