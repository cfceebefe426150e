//! Train command - run Q-learning on randomly generated mazes

use std::{
    fs::File,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use serde_json::to_writer_pretty;

use crate::{
    cli::output::{print_kv, print_section},
    env::{MazeConfig, MazeEnvironment},
    pipeline::{
        EvaluationConfig, EvaluationPipeline, EvaluationResult, JsonlObserver, ProgressObserver,
        TrainingConfig, TrainingPipeline, TrainingResult, VerboseObserver,
    },
    q_learning::QLearningAgent,
};

#[derive(Debug, Serialize)]
struct SummaryMetadata {
    size: usize,
    complexity: f64,
    episodes: usize,
    step_limit: usize,
    seed: Option<u64>,
}

#[derive(Debug, Serialize)]
struct TrainingSummaryFile {
    training: TrainingResult,
    evaluation: Option<EvaluationResult>,
    metadata: SummaryMetadata,
}

/// Normalize a `--summary` argument to a concrete .json file path
///
/// A trailing separator (or a path with no filename) means "put the default
/// file in this directory"; anything else gets a .json extension if it lacks
/// one.
fn sanitize_summary_path(raw: &Path) -> PathBuf {
    let names_directory =
        raw.as_os_str().to_string_lossy().ends_with(std::path::MAIN_SEPARATOR);
    if names_directory || raw.file_name().is_none() {
        return raw.join("training_summary.json");
    }

    let has_json_extension = raw
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if has_json_extension {
        raw.to_path_buf()
    } else {
        raw.with_extension("json")
    }
}

#[derive(Parser, Debug)]
#[command(about = "Train a Q-learning agent on random mazes")]
pub struct TrainArgs {
    /// Maze dimension (NxN grid)
    #[arg(long, short = 's', default_value_t = 6)]
    pub size: usize,

    /// Wall density in [0, 1)
    #[arg(long, short = 'c', default_value_t = 0.3)]
    pub complexity: f64,

    /// Number of training episodes
    #[arg(long, short = 'e', default_value_t = 200)]
    pub episodes: usize,

    /// Per-episode step budget
    #[arg(long, default_value_t = 200)]
    pub step_limit: usize,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Greedy evaluation episodes after training (0 to skip)
    #[arg(long, default_value_t = 100)]
    pub eval_episodes: usize,

    /// Optional file for per-episode JSONL observations
    #[arg(long)]
    pub observations: Option<PathBuf>,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Disable the progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Print per-episode milestones to stderr
    #[arg(long)]
    pub verbose: bool,
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let maze_config = MazeConfig {
        size: args.size,
        complexity: args.complexity,
    };
    let mut env = MazeEnvironment::new(maze_config)
        .context("failed to create maze environment")?;
    let mut agent = QLearningAgent::new(args.size);

    let training_config = TrainingConfig {
        episodes: args.episodes,
        step_limit: args.step_limit,
        seed: args.seed,
    };

    let mut pipeline = TrainingPipeline::new(training_config);
    if !args.no_progress {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    }
    if args.verbose {
        pipeline = pipeline.with_observer(Box::new(VerboseObserver));
    }
    if let Some(path) = &args.observations {
        pipeline = pipeline.with_observer(Box::new(
            JsonlObserver::new(path).context("failed to open observations file")?,
        ));
    }

    let training = pipeline
        .run(&mut env, &mut agent)
        .context("training failed")?;

    print_section("Training");
    print_kv("episodes", &training.episodes.to_string());
    print_kv("successes", &training.successes.to_string());
    print_kv("timeouts", &training.timeouts.to_string());
    print_kv("success rate", &format!("{:.2}%", training.success_rate * 100.0));
    print_kv("mean steps", &format!("{:.1}", training.mean_steps));
    print_kv("final epsilon", &format!("{:.4}", training.final_epsilon));

    let evaluation = if args.eval_episodes > 0 {
        let eval_pipeline = EvaluationPipeline::new(EvaluationConfig {
            episodes: args.eval_episodes,
            step_limit: args.step_limit,
        });
        let result = eval_pipeline
            .run(&mut env, &agent)
            .context("evaluation failed")?;

        print_section("Greedy evaluation");
        print_kv("episodes", &result.episodes.to_string());
        print_kv("successes", &result.successes.to_string());
        print_kv("success rate", &format!("{:.2}%", result.success_rate * 100.0));
        if let Some(mean) = result.mean_steps_to_goal {
            print_kv("mean steps to goal", &format!("{mean:.1}"));
        }

        Some(result)
    } else {
        None
    };

    if let Some(raw_path) = &args.summary {
        let path = sanitize_summary_path(raw_path);
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
        }

        let summary = TrainingSummaryFile {
            training,
            evaluation,
            metadata: SummaryMetadata {
                size: args.size,
                complexity: args.complexity,
                episodes: args.episodes,
                step_limit: args.step_limit,
                seed: args.seed,
            },
        };
        let file = File::create(&path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        to_writer_pretty(file, &summary)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("\nSummary written to {}", path.display());
    }

    Ok(())
}
