//! Generate command - print a randomly generated maze

use anyhow::{Context, Result};
use clap::Parser;
use rand::{SeedableRng, rngs::StdRng};

use crate::{cli::output::print_kv, maze};

#[derive(Parser, Debug)]
#[command(about = "Generate a maze and print it")]
pub struct GenerateArgs {
    /// Maze dimension (NxN grid)
    #[arg(long, short = 's', default_value_t = 6)]
    pub size: usize,

    /// Wall density in [0, 1)
    #[arg(long, short = 'c', default_value_t = 0.3)]
    pub complexity: f64,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,
}

pub fn execute(args: GenerateArgs) -> Result<()> {
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    let grid = maze::generate(args.size, args.complexity, &mut rng)
        .context("maze generation failed")?;

    print!("{grid}");
    print_kv("start", &grid.start().to_string());
    print_kv("goal", &grid.goal().to_string());
    print_kv("solvable", &grid.has_path().to_string());

    Ok(())
}
