use clap::{Parser, Subcommand};

use crate::commands;

#[derive(Parser)]
#[command(name = "goldcalc")]
#[command(about = "Gold buy-price calculator service", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server (price endpoint + lead relay)
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value_t = 8787)]
        port: u16,
    },
    /// Fetch and print the current spot price
    Price {
        /// Bypass the cached quote and fetch live
        #[arg(short, long)]
        refresh: bool,
    },
    /// Print the per-gram payout table for every grade and tier
    Rates {
        /// Bypass the cached quote and fetch live
        #[arg(short, long)]
        refresh: bool,
    },
    /// Price a set of weight entries (e.g. --luxury 24=10 --standard 14=3)
    Estimate {
        /// Luxury-tier entry, KARAT=GRAMS (repeatable)
        #[arg(short, long)]
        luxury: Vec<String>,
        /// Standard-tier entry, KARAT=GRAMS (repeatable)
        #[arg(short, long)]
        standard: Vec<String>,
        /// Bypass the cached quote and fetch live
        #[arg(short, long)]
        refresh: bool,
    },
}

pub async fn run() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port } => {
            commands::serve::run(port).await;
        }
        Commands::Price { refresh } => {
            commands::price::run(refresh).await;
        }
        Commands::Rates { refresh } => {
            commands::rates::run(refresh).await;
        }
        Commands::Estimate { luxury, standard, refresh } => {
            commands::estimate::run(luxury, standard, refresh).await;
        }
    }
}
