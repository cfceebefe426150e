//! Greedy evaluation of a trained agent

use serde::{Deserialize, Serialize};

use crate::{Result, env::MazeEnvironment, q_learning::QLearningAgent};

/// Evaluation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// Number of evaluation episodes
    pub episodes: usize,

    /// Per-episode step budget
    pub step_limit: usize,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            episodes: 100,
            step_limit: 200,
        }
    }
}

/// Result of an evaluation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Episodes played
    pub episodes: usize,

    /// Episodes that reached the goal
    pub successes: usize,

    /// Overall success rate
    pub success_rate: f64,

    /// Mean steps across successful episodes, if any succeeded
    pub mean_steps_to_goal: Option<f64>,
}

/// Evaluation pipeline: greedy rollouts with exploration switched off
///
/// The agent's Q-table is read but never updated, and action selection is
/// pure exploitation (the ε-greedy policy with ε forced to zero).
pub struct EvaluationPipeline {
    config: EvaluationConfig,
}

impl EvaluationPipeline {
    pub fn new(config: EvaluationConfig) -> Self {
        Self { config }
    }

    /// Run greedy rollouts and summarize the outcomes
    pub fn run(
        &self,
        env: &mut MazeEnvironment,
        agent: &QLearningAgent,
    ) -> Result<EvaluationResult> {
        let mut successes = 0;
        let mut goal_steps = 0;

        for _ in 0..self.config.episodes {
            let mut state = env.reset()?;
            let mut steps = 0;

            while steps < self.config.step_limit {
                let action = agent.greedy_action(state);
                let step = env.step(action);
                state = step.position;
                steps += 1;

                if step.done {
                    successes += 1;
                    goal_steps += steps;
                    break;
                }
            }
        }

        let success_rate = if self.config.episodes > 0 {
            successes as f64 / self.config.episodes as f64
        } else {
            0.0
        };
        let mean_steps_to_goal =
            (successes > 0).then(|| goal_steps as f64 / successes as f64);

        Ok(EvaluationResult {
            episodes: self.config.episodes,
            successes,
            success_rate,
            mean_steps_to_goal,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        env::{Action, MazeConfig},
        maze::Position,
    };

    #[test]
    fn test_untrained_agent_times_out_against_zero_table() {
        // All-zero Q-table ties break to Up, which collides forever at (0,0)
        let mut env = MazeEnvironment::with_seed(
            MazeConfig {
                size: 3,
                complexity: 0.0,
            },
            1,
        )
        .unwrap();
        let agent = QLearningAgent::new(3);

        let pipeline = EvaluationPipeline::new(EvaluationConfig {
            episodes: 3,
            step_limit: 20,
        });
        let result = pipeline.run(&mut env, &agent).unwrap();

        assert_eq!(result.successes, 0);
        assert_eq!(result.mean_steps_to_goal, None);
        assert_eq!(agent.greedy_action(Position::new(0, 0)), Action::Up);
    }
}
