//! qmaze CLI - train and inspect tabular Q-learning maze agents

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "qmaze")]
#[command(version, about = "Tabular Q-learning on randomly generated mazes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train an agent and optionally evaluate it greedily
    Train(qmaze::cli::commands::train::TrainArgs),

    /// Generate a maze and print it
    Generate(qmaze::cli::commands::generate::GenerateArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Train(args) => qmaze::cli::commands::train::execute(args),
        Commands::Generate(args) => qmaze::cli::commands::generate::execute(args),
    }
}
