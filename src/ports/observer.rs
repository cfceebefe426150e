//! Observer port - abstraction for training observation and data collection
//!
//! This port defines the interface for observing training events, allowing
//! composable data collection without coupling the training loop to specific
//! output formats. The environment and agent never see observers; everything
//! an observer learns arrives through the values the training loop already
//! has in hand.

use crate::{
    Result,
    env::EpisodeOutcome,
    maze::{Grid, Position},
};

/// Observer trait for monitoring training
///
/// Observers can be composed to collect different kinds of data during a
/// training run: progress bars, metrics, JSONL export.
///
/// # Event Sequence
///
/// 1. `on_training_start(total_episodes)` - once at the beginning
/// 2. For each episode:
///    - `on_episode_start(episode, grid, start)` - fresh maze and start cell
///    - `on_step(...)` - for each environment transition
///    - `on_episode_end(episode, outcome, steps, total_reward)`
///    - `on_window(episode, success_rate)` - at rolling-window boundaries
/// 3. `on_training_end()` - once at the end
///
/// All methods default to no-ops, so observers only implement the events
/// they care about.
pub trait Observer: Send {
    /// Called when training starts, with the total episode count.
    fn on_training_start(&mut self, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    /// Called after each reset, with the freshly generated maze and the
    /// agent's starting position.
    fn on_episode_start(&mut self, _episode: usize, _grid: &Grid, _start: Position) -> Result<()> {
        Ok(())
    }

    /// Called after each environment transition.
    ///
    /// `position` is the post-move position, `epsilon` the agent's
    /// exploration rate after the corresponding update.
    fn on_step(
        &mut self,
        _episode: usize,
        _step: usize,
        _position: Position,
        _reward: f64,
        _epsilon: f64,
    ) -> Result<()> {
        Ok(())
    }

    /// Called when an episode terminates, either at the goal or at the step
    /// budget.
    fn on_episode_end(
        &mut self,
        _episode: usize,
        _outcome: EpisodeOutcome,
        _steps: usize,
        _total_reward: f64,
    ) -> Result<()> {
        Ok(())
    }

    /// Called at each rolling-window boundary with the success rate over the
    /// window just closed.
    fn on_window(&mut self, _episode: usize, _success_rate: f64) -> Result<()> {
        Ok(())
    }

    /// Called when training completes.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}
