//! End-to-end training behavior: exploration decay and greedy convergence.

use std::sync::{Arc, Mutex};

use qmaze::{
    MazeConfig, MazeEnvironment, QLearningAgent, TrainingConfig, TrainingPipeline,
    pipeline::{EvaluationConfig, EvaluationPipeline, Observer},
};

fn wall_free_env(size: usize, seed: u64) -> MazeEnvironment {
    MazeEnvironment::with_seed(
        MazeConfig {
            size,
            complexity: 0.0,
        },
        seed,
    )
    .unwrap()
}

#[test]
fn epsilon_is_monotone_and_bounded() {
    let mut env = wall_free_env(4, 7);
    let mut agent = QLearningAgent::new(4).with_seed(8);

    let config = TrainingConfig {
        episodes: 100,
        step_limit: 100,
        seed: Some(7),
    };
    let result = TrainingPipeline::new(config)
        .run(&mut env, &mut agent)
        .unwrap();

    // Every 4x4 episode takes at least 6 steps, so at least 600 decays
    // have happened and epsilon sits on its floor
    assert_eq!(result.final_epsilon, 0.01);
    assert_eq!(agent.epsilon(), 0.01);
}

#[test]
fn trained_agent_solves_wall_free_maze_in_minimal_steps() {
    // 3x3 with no walls: the shortest path is 4 moves
    let mut env = wall_free_env(3, 13);
    let mut agent = QLearningAgent::new(3).with_seed(14);

    let config = TrainingConfig {
        episodes: 400,
        step_limit: 50,
        seed: Some(13),
    };
    TrainingPipeline::new(config)
        .run(&mut env, &mut agent)
        .unwrap();

    let eval = EvaluationPipeline::new(EvaluationConfig {
        episodes: 20,
        step_limit: 50,
    });
    let result = eval.run(&mut env, &agent).unwrap();

    assert_eq!(result.successes, 20);
    assert_eq!(result.mean_steps_to_goal, Some(4.0));
}

#[test]
fn greedy_policy_matches_highest_q_value() {
    let mut env = wall_free_env(3, 23);
    let mut agent = QLearningAgent::new(3).with_seed(24);

    let config = TrainingConfig {
        episodes: 200,
        step_limit: 50,
        seed: Some(23),
    };
    TrainingPipeline::new(config)
        .run(&mut env, &mut agent)
        .unwrap();

    for row in 0..3 {
        for col in 0..3 {
            let state = qmaze::Position::new(row, col);
            let chosen = agent.greedy_action(state);
            let chosen_q = agent.q_table().get(state, chosen);
            assert_eq!(chosen_q, agent.q_table().max_q(state));
        }
    }
}

#[derive(Default)]
struct CapturingObserver {
    episodes: Arc<Mutex<Vec<usize>>>,
    windows: Arc<Mutex<Vec<(usize, f64)>>>,
}

impl Observer for CapturingObserver {
    fn on_episode_end(
        &mut self,
        episode: usize,
        _outcome: qmaze::EpisodeOutcome,
        _steps: usize,
        _total_reward: f64,
    ) -> qmaze::Result<()> {
        self.episodes.lock().unwrap().push(episode);
        Ok(())
    }

    fn on_window(&mut self, episode: usize, success_rate: f64) -> qmaze::Result<()> {
        self.windows.lock().unwrap().push((episode, success_rate));
        Ok(())
    }
}

#[test]
fn observers_see_every_episode_and_window() {
    let mut env = wall_free_env(3, 31);
    let mut agent = QLearningAgent::new(3).with_seed(32);

    let observer = CapturingObserver::default();
    let episodes = Arc::clone(&observer.episodes);
    let windows = Arc::clone(&observer.windows);

    let config = TrainingConfig {
        episodes: 100,
        step_limit: 50,
        seed: Some(31),
    };
    TrainingPipeline::new(config)
        .with_observer(Box::new(observer))
        .run(&mut env, &mut agent)
        .unwrap();

    let episodes = episodes.lock().unwrap();
    assert_eq!(episodes.len(), 100);
    assert_eq!(episodes.first(), Some(&0));
    assert_eq!(episodes.last(), Some(&99));

    // A report lands after every 20th episode, so each window covers
    // exactly 20 episodes and every rate is some k/20 in [0, 1]
    let windows = windows.lock().unwrap();
    let boundaries: Vec<usize> = windows.iter().map(|&(e, _)| e).collect();
    assert_eq!(boundaries, vec![19, 39, 59, 79, 99]);
    for &(_, rate) in windows.iter() {
        assert!((0.0..=1.0).contains(&rate), "window rate {rate} out of range");
        let twentieths = rate * 20.0;
        assert_eq!(twentieths, twentieths.round());
    }
}

#[test]
fn timeouts_are_outcomes_not_errors() {
    // One-step budget on a 6x6 maze: nothing can reach the goal
    let mut env = wall_free_env(6, 41);
    let mut agent = QLearningAgent::new(6).with_seed(42);

    let config = TrainingConfig {
        episodes: 5,
        step_limit: 1,
        seed: Some(41),
    };
    let result = TrainingPipeline::new(config)
        .run(&mut env, &mut agent)
        .unwrap();

    assert_eq!(result.successes, 0);
    assert_eq!(result.timeouts, 5);
    // Learning still applied: epsilon decayed once per step taken
    assert!(result.final_epsilon < 1.0);
}
