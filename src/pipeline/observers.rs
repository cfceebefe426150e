//! Observer implementations for training pipelines
//!
//! Observers allow composable data collection during training without
//! coupling the training loop to specific output formats.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    env::EpisodeOutcome,
    maze::{Grid, Position},
    ports::Observer,
};

/// Progress bar observer - shows training progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    successes: usize,
    timeouts: usize,
}

impl ProgressObserver {
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            successes: 0,
            timeouts: 0,
        }
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes ({msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(
        &mut self,
        episode: usize,
        outcome: EpisodeOutcome,
        _steps: usize,
        _total_reward: f64,
    ) -> Result<()> {
        match outcome {
            EpisodeOutcome::Success => self.successes += 1,
            EpisodeOutcome::TimedOut => self.timeouts += 1,
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(episode as u64 + 1);
            pb.set_message(format!("S:{} T:{}", self.successes, self.timeouts));
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(format!("S:{} T:{}", self.successes, self.timeouts));
        }
        Ok(())
    }
}

/// Metrics observer - tracks per-episode statistics in memory
pub struct MetricsObserver {
    steps_per_episode: Vec<usize>,
    rewards_per_episode: Vec<f64>,
    successes: usize,
    /// (episode, success rate) pairs from rolling-window reports
    windows: Vec<(usize, f64)>,
}

impl MetricsObserver {
    pub fn new() -> Self {
        Self {
            steps_per_episode: Vec::new(),
            rewards_per_episode: Vec::new(),
            successes: 0,
            windows: Vec::new(),
        }
    }

    pub fn episodes(&self) -> usize {
        self.steps_per_episode.len()
    }

    pub fn successes(&self) -> usize {
        self.successes
    }

    pub fn success_rate(&self) -> f64 {
        if self.steps_per_episode.is_empty() {
            0.0
        } else {
            self.successes as f64 / self.steps_per_episode.len() as f64
        }
    }

    pub fn mean_steps(&self) -> f64 {
        if self.steps_per_episode.is_empty() {
            0.0
        } else {
            self.steps_per_episode.iter().sum::<usize>() as f64
                / self.steps_per_episode.len() as f64
        }
    }

    pub fn mean_reward(&self) -> f64 {
        if self.rewards_per_episode.is_empty() {
            0.0
        } else {
            self.rewards_per_episode.iter().sum::<f64>() / self.rewards_per_episode.len() as f64
        }
    }

    pub fn windows(&self) -> &[(usize, f64)] {
        &self.windows
    }
}

impl Default for MetricsObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for MetricsObserver {
    fn on_episode_end(
        &mut self,
        _episode: usize,
        outcome: EpisodeOutcome,
        steps: usize,
        total_reward: f64,
    ) -> Result<()> {
        if outcome == EpisodeOutcome::Success {
            self.successes += 1;
        }
        self.steps_per_episode.push(steps);
        self.rewards_per_episode.push(total_reward);
        Ok(())
    }

    fn on_window(&mut self, episode: usize, success_rate: f64) -> Result<()> {
        self.windows.push((episode, success_rate));
        Ok(())
    }
}

/// One line of JSONL output: a completed episode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeRecord {
    /// Episode number
    pub episode: usize,
    /// Final outcome
    pub outcome: String,
    /// Steps taken
    pub steps: usize,
    /// Accumulated reward
    pub total_reward: f64,
    /// Exploration rate after the episode's last update
    pub epsilon: f64,
}

/// JSONL observer - writes one record per episode to a file
pub struct JsonlObserver {
    writer: BufWriter<File>,
    last_epsilon: f64,
}

impl JsonlObserver {
    /// Create an observer writing to the given path
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path.as_ref()).map_err(|source| crate::Error::Io {
            operation: format!("create observations file {}", path.as_ref().display()),
            source,
        })?;
        Ok(Self {
            writer: BufWriter::new(file),
            last_epsilon: f64::NAN,
        })
    }
}

impl Observer for JsonlObserver {
    fn on_step(
        &mut self,
        _episode: usize,
        _step: usize,
        _position: Position,
        _reward: f64,
        epsilon: f64,
    ) -> Result<()> {
        self.last_epsilon = epsilon;
        Ok(())
    }

    fn on_episode_end(
        &mut self,
        episode: usize,
        outcome: EpisodeOutcome,
        steps: usize,
        total_reward: f64,
    ) -> Result<()> {
        let record = EpisodeRecord {
            episode,
            outcome: outcome.to_string(),
            steps,
            total_reward,
            epsilon: self.last_epsilon,
        };
        serde_json::to_writer(&mut self.writer, &record)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Verbose observer - prints episode milestones to stderr
///
/// Stands in for the reference implementation's log pane without putting any
/// I/O inside the environment.
pub struct VerboseObserver;

impl Observer for VerboseObserver {
    fn on_episode_start(&mut self, episode: usize, _grid: &Grid, _start: Position) -> Result<()> {
        eprintln!("episode {} started", episode + 1);
        Ok(())
    }

    fn on_episode_end(
        &mut self,
        episode: usize,
        outcome: EpisodeOutcome,
        steps: usize,
        _total_reward: f64,
    ) -> Result<()> {
        match outcome {
            EpisodeOutcome::Success => {
                eprintln!("episode {} completed in {} steps", episode + 1, steps);
            }
            EpisodeOutcome::TimedOut => {
                eprintln!("episode {} failed after {} steps", episode + 1, steps);
            }
        }
        Ok(())
    }

    fn on_window(&mut self, _episode: usize, success_rate: f64) -> Result<()> {
        eprintln!(
            "success rate over last {} episodes: {:.2}%",
            super::training::SUCCESS_WINDOW,
            success_rate * 100.0
        );
        Ok(())
    }
}
