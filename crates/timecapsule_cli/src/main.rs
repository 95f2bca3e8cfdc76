//! Local command-line front end for the time-capsule store.
//!
//! # Responsibility
//! - Offer add/list/remove against the same backing file the server uses.
//! - Apply the presentation-time lock computation when listing.

use anyhow::Context;
use chrono::Local;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use timecapsule_core::{CapsuleDraft, CapsuleService, JsonFileStore};

#[derive(Debug, Parser)]
#[command(name = "timecapsule", about = "Create, list and delete time capsules")]
struct Args {
    /// Path to the JSON backing file.
    #[arg(long, env = "TIMECAPSULE_DATA", default_value = "capsules.json")]
    data_file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Creates a new capsule.
    Add {
        title: String,
        message: String,
        /// Open date as YYYY-MM-DD.
        open_date: String,
    },
    /// Lists capsules, unlocked first; sealed capsules hide their message.
    List,
    /// Deletes a capsule by id.
    Remove { id: String },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let service = CapsuleService::new(JsonFileStore::new(&args.data_file));

    match args.command {
        Command::Add {
            title,
            message,
            open_date,
        } => {
            let draft = CapsuleDraft {
                title,
                message,
                open_date,
            };
            let created = service.create(&draft).context("failed to create capsule")?;
            println!(
                "Created capsule {} `{}` (opens {})",
                created.id, created.title, created.open_date
            );
        }
        Command::List => {
            let today = Local::now().date_naive();
            let views = service
                .list_with_state(today)
                .context("failed to list capsules")?;
            if views.is_empty() {
                println!("No capsules created yet. Make one!");
                return Ok(());
            }
            for view in views {
                if view.locked {
                    println!(
                        "[{}] {} — This capsule is sealed. Unlocks on {}.",
                        view.id, view.title, view.open_date
                    );
                } else {
                    let message = view.message.as_deref().unwrap_or_default();
                    println!(
                        "[{}] {} — {} (opened {})",
                        view.id, view.title, message, view.open_date
                    );
                }
            }
        }
        Command::Remove { id } => {
            service
                .remove(&id)
                .with_context(|| format!("failed to delete capsule {id}"))?;
            println!("Capsule deleted successfully.");
        }
    }
    Ok(())
}
