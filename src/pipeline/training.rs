//! Training pipeline for the Q-learning maze agent

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    env::{EpisodeOutcome, MazeEnvironment},
    ports::Observer,
    q_learning::QLearningAgent,
};

/// Rolling window length for periodic success-rate reports
pub const SUCCESS_WINDOW: usize = 20;

/// Training configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of training episodes
    pub episodes: usize,

    /// Per-episode step budget
    pub step_limit: usize,

    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            episodes: 200,
            step_limit: 200,
            seed: None,
        }
    }
}

/// Result of a training run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Total episodes played
    pub episodes: usize,

    /// Episodes that reached the goal
    pub successes: usize,

    /// Episodes that exhausted the step budget
    pub timeouts: usize,

    /// Overall success rate
    pub success_rate: f64,

    /// Mean steps per episode (successes and timeouts alike)
    pub mean_steps: f64,

    /// Agent exploration rate after the final update
    pub final_epsilon: f64,
}

impl TrainingResult {
    pub fn new(episodes: usize, successes: usize, total_steps: usize, final_epsilon: f64) -> Self {
        let success_rate = if episodes > 0 {
            successes as f64 / episodes as f64
        } else {
            0.0
        };
        let mean_steps = if episodes > 0 {
            total_steps as f64 / episodes as f64
        } else {
            0.0
        };

        Self {
            episodes,
            successes,
            timeouts: episodes - successes,
            success_rate,
            mean_steps,
            final_epsilon,
        }
    }

    /// Save result to JSON file
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load result from JSON file
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let result = serde_json::from_reader(file)?;
        Ok(result)
    }
}

/// Training pipeline driving one environment and one agent
///
/// Runs the select/step/update loop for a configured number of episodes,
/// tracking successes and reporting rolling success rates to observers.
/// Hitting the step budget ends an episode as an ordinary timeout; every
/// transition taken still feeds a learning update.
pub struct TrainingPipeline {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl TrainingPipeline {
    /// Create a new training pipeline
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Run training to completion
    pub fn run(
        &mut self,
        env: &mut MazeEnvironment,
        agent: &mut QLearningAgent,
    ) -> Result<TrainingResult> {
        self.seed_pair(env, agent);

        let mut successes = 0;
        let mut window_successes = 0;
        let mut total_steps = 0;

        for observer in &mut self.observers {
            observer.on_training_start(self.config.episodes)?;
        }

        for episode in 0..self.config.episodes {
            let outcome = self.run_episode(episode, env, agent, &mut total_steps)?;

            if outcome == EpisodeOutcome::Success {
                successes += 1;
                window_successes += 1;
            }

            // Report after each full window of episodes; the counter
            // restarts each time, so every rate is out of SUCCESS_WINDOW
            if (episode + 1).is_multiple_of(SUCCESS_WINDOW) {
                let rate = window_successes as f64 / SUCCESS_WINDOW as f64;
                for observer in &mut self.observers {
                    observer.on_window(episode, rate)?;
                }
                window_successes = 0;
            }
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        Ok(TrainingResult::new(
            self.config.episodes,
            successes,
            total_steps,
            agent.epsilon(),
        ))
    }

    fn run_episode(
        &mut self,
        episode: usize,
        env: &mut MazeEnvironment,
        agent: &mut QLearningAgent,
        total_steps: &mut usize,
    ) -> Result<EpisodeOutcome> {
        let mut state = env.reset()?;

        for observer in &mut self.observers {
            observer.on_episode_start(episode, env.grid(), state)?;
        }

        let mut steps = 0;
        let mut total_reward = 0.0;
        let mut done = false;

        while !done && steps < self.config.step_limit {
            let action = agent.select_action(state);
            let step = env.step(action);
            agent.update(state, action, step.reward, step.position);

            state = step.position;
            total_reward += step.reward;
            done = step.done;
            steps += 1;

            for observer in &mut self.observers {
                observer.on_step(episode, steps, state, step.reward, agent.epsilon())?;
            }
        }

        *total_steps += steps;

        let outcome = if done {
            EpisodeOutcome::Success
        } else {
            EpisodeOutcome::TimedOut
        };

        for observer in &mut self.observers {
            observer.on_episode_end(episode, outcome, steps, total_reward)?;
        }

        Ok(outcome)
    }

    fn seed_pair(&self, env: &mut MazeEnvironment, agent: &mut QLearningAgent) {
        if let Some(seed) = self.config.seed {
            env.set_rng_seed(seed);
            agent.set_rng_seed(seed.wrapping_add(1));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MazeConfig;

    #[test]
    fn test_training_pipeline_counts_episodes() {
        let config = TrainingConfig {
            episodes: 10,
            step_limit: 50,
            seed: Some(42),
        };

        let mut env = MazeEnvironment::with_seed(
            MazeConfig {
                size: 3,
                complexity: 0.0,
            },
            42,
        )
        .unwrap();
        let mut agent = QLearningAgent::new(3);

        let mut pipeline = TrainingPipeline::new(config);
        let result = pipeline.run(&mut env, &mut agent).unwrap();

        assert_eq!(result.episodes, 10);
        assert_eq!(result.successes + result.timeouts, 10);
        assert!(result.final_epsilon < 1.0);
    }

    #[test]
    fn test_window_rate_never_exceeds_one() {
        use std::sync::{Arc, Mutex};

        struct WindowRecorder {
            windows: Arc<Mutex<Vec<(usize, f64)>>>,
        }

        impl crate::ports::Observer for WindowRecorder {
            fn on_window(&mut self, episode: usize, success_rate: f64) -> crate::Result<()> {
                self.windows.lock().unwrap().push((episode, success_rate));
                Ok(())
            }
        }

        // On a wall-free 2x2 maze every seeded episode reaches the goal,
        // so a full window must report exactly 1.0, not 21/20
        let windows = Arc::new(Mutex::new(Vec::new()));
        let config = TrainingConfig {
            episodes: 2 * SUCCESS_WINDOW,
            step_limit: 200,
            seed: Some(6),
        };

        let mut env = MazeEnvironment::with_seed(
            MazeConfig {
                size: 2,
                complexity: 0.0,
            },
            6,
        )
        .unwrap();
        let mut agent = QLearningAgent::new(2);

        let result = TrainingPipeline::new(config)
            .with_observer(Box::new(WindowRecorder {
                windows: Arc::clone(&windows),
            }))
            .run(&mut env, &mut agent)
            .unwrap();

        assert_eq!(result.successes, 2 * SUCCESS_WINDOW);
        let windows = windows.lock().unwrap();
        assert_eq!(
            *windows,
            vec![(SUCCESS_WINDOW - 1, 1.0), (2 * SUCCESS_WINDOW - 1, 1.0)]
        );
    }

    #[test]
    fn test_result_rates() {
        let result = TrainingResult::new(20, 15, 400, 0.01);
        assert_eq!(result.timeouts, 5);
        assert!((result.success_rate - 0.75).abs() < 1e-12);
        assert!((result.mean_steps - 20.0).abs() < 1e-12);
    }
}
