use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

mod case;
mod convert;
mod embedded;
mod patterns;
mod walker;

use convert::FileChange;

#[derive(Parser)]
#[command(name = "snakeify")]
#[command(about = "Convert camelCase game framework API identifiers to snake_case", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite registration-table string literals in wrap_*.cpp files
    Registrations {
        /// Source tree to scan
        root_dir: PathBuf,

        /// Report would-be changes without writing anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Rewrite API call sites in .lua files
    Calls {
        /// Source tree to scan
        root_dir: PathBuf,

        /// Report would-be changes without writing anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Rewrite call sites inside the byte-array payload of a generated header
    Embedded {
        /// Path to the generated header (e.g. nogame.lua.h)
        header: PathBuf,

        /// Report would-be changes without writing anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Generate a fresh header embedding a Lua payload as a byte array
    GenerateHeader {
        /// Lua file to embed
        payload: PathBuf,

        /// Output header path
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Registrations { root_dir, dry_run } => {
            info!("Converting registration tables under {}", root_dir.display());
            let summary = convert::convert_registrations(&root_dir, dry_run)?;
            summary.print();
            Ok(())
        }

        Commands::Calls { root_dir, dry_run } => {
            info!("Converting Lua call sites under {}", root_dir.display());
            let summary = convert::convert_calls(&root_dir, dry_run)?;
            summary.print();
            Ok(())
        }

        Commands::Embedded { header, dry_run } => {
            if dry_run {
                println!("Analyzing {} (dry run)...", header.display());
            } else {
                println!("Processing {}...", header.display());
            }

            match convert::convert_embedded(&header, dry_run)? {
                FileChange::WouldChange => {
                    println!("\nDry run complete. The file would be modified.")
                }
                FileChange::Changed => println!("\nConversion complete! The file was modified."),
                FileChange::Unchanged if dry_run => {
                    println!("\nDry run complete. No changes would be made.")
                }
                FileChange::Unchanged => println!("\nNo changes were necessary."),
            }
            Ok(())
        }

        Commands::GenerateHeader { payload, output } => {
            println!("Generating {} from {}...", output.display(), payload.display());
            convert::generate_embedded_header(&payload, &output)?;
            println!("Done!");
            Ok(())
        }
    }
}
