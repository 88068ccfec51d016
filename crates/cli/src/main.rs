//! UMKM-GO CLI - Database migrations, seeding and map-link diagnostics.
//!
//! # Usage
//!
//! ```bash
//! # Run SQL migrations and create the session tables
//! umkm-cli migrate
//!
//! # Insert demo listings from a YAML file
//! umkm-cli seed seeds/tiro-sompe.yaml
//!
//! # Check what a map link resolves to
//! umkm-cli maps "https://maps.app.goo.gl/abc123" --resolve
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed` - Insert UMKM and products from YAML
//! - `maps` - Print validity and coordinates of a map link

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "umkm-cli")]
#[command(author, version, about = "UMKM-GO CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run SQL migrations and the session store migrations
    Migrate,
    /// Insert UMKM listings and their products from a YAML file
    Seed {
        /// Path to the seed file
        file: String,
    },
    /// Print validity and extracted coordinates of a map link
    Maps {
        /// The map link to inspect
        url: String,

        /// Follow a shortened link once over the network
        #[arg(long)]
        resolve: bool,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed { file } => commands::seed::from_file(&file).await?,
        Commands::Maps { url, resolve } => commands::maps::inspect(&url, resolve).await?,
    }
    Ok(())
}
