//! Trajectory and experience buffer for training data collection.
//!
//! A trajectory records one game from self-play:
//! - the canonical board and current area at each decision point
//! - the target policy at that point
//! - the player who moved
//! - the final game outcome, which provides the value targets

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::core::{CurrentArea, FlatBoard, Outcome, Player, ACTION_SIZE};
use crate::rules::{outcome_value, BoardState};
use crate::symmetry::AugmentConfig;

use super::sample::TrainingSample;

/// A single decision point.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// Board from the mover's perspective.
    pub board: FlatBoard,

    /// Target policy, indexed by action.
    pub policy: Vec<f32>,

    pub current_area: CurrentArea,

    /// The player who made this decision.
    pub player: Player,

    /// Move number in the game (0-indexed).
    pub move_number: usize,
}

impl Step {
    /// Record the position `state` with a target policy.
    ///
    /// # Panics
    ///
    /// Panics if `policy` does not have exactly 81 entries.
    pub fn new(state: &BoardState, policy: Vec<f32>) -> Self {
        assert_eq!(policy.len(), ACTION_SIZE, "expected {ACTION_SIZE} policy values");
        let player = state.current_player();
        Self {
            board: state.canonical_view(player),
            policy,
            current_area: state.current_area(),
            player,
            move_number: state.move_count(),
        }
    }
}

/// A complete game from self-play.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Trajectory {
    /// All steps in the game.
    pub steps: Vec<Step>,

    /// Final game outcome; `Undetermined` until set.
    pub outcome: Outcome,

    /// Random seed used for this game.
    pub seed: u64,
}

impl Trajectory {
    /// Create a new trajectory.
    pub fn new(seed: u64) -> Self {
        Self {
            steps: Vec::new(),
            outcome: Outcome::Undetermined,
            seed,
        }
    }

    /// Add a step to the trajectory.
    pub fn push(&mut self, step: Step) {
        self.steps.push(step);
    }

    /// Set the final outcome.
    pub fn set_outcome(&mut self, outcome: Outcome) {
        self.outcome = outcome;
    }

    /// Get the number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Check if trajectory is empty.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Get steps for a specific player.
    pub fn player_steps(&self, player: Player) -> impl Iterator<Item = &Step> {
        self.steps.iter().filter(move |s| s.player == player)
    }

    /// Get the value target for a specific player.
    pub fn player_outcome(&self, player: Player) -> f32 {
        outcome_value(self.outcome, player)
    }

    /// Convert to training samples, value from each mover's perspective.
    pub fn to_training_samples(&self) -> Vec<TrainingSample> {
        self.steps
            .iter()
            .map(|step| TrainingSample {
                board: step.board,
                policy: step.policy.clone(),
                current_area: step.current_area,
                value: self.player_outcome(step.player),
            })
            .collect()
    }
}

/// Buffer for storing trajectories during training.
///
/// Uses a FIFO strategy: when full, oldest trajectories are removed.
#[derive(Clone, Debug)]
pub struct ExperienceBuffer {
    trajectories: VecDeque<Trajectory>,
    max_trajectories: usize,
}

impl ExperienceBuffer {
    /// Create a new experience buffer.
    pub fn new(max_trajectories: usize) -> Self {
        Self {
            trajectories: VecDeque::with_capacity(max_trajectories),
            max_trajectories,
        }
    }

    /// Add a trajectory, evicting the oldest one when full.
    pub fn push(&mut self, trajectory: Trajectory) {
        if self.max_trajectories == 0 {
            return;
        }
        if self.trajectories.len() >= self.max_trajectories {
            self.trajectories.pop_front();
        }
        self.trajectories.push_back(trajectory);
    }

    pub fn len(&self) -> usize {
        self.trajectories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trajectories.is_empty()
    }

    /// Get the maximum capacity.
    pub fn capacity(&self) -> usize {
        self.max_trajectories
    }

    pub fn clear(&mut self) {
        self.trajectories.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Trajectory> {
        self.trajectories.iter()
    }

    /// Get the total number of steps across all trajectories.
    pub fn total_steps(&self) -> usize {
        self.trajectories.iter().map(Trajectory::len).sum()
    }

    /// Extract all training samples from the buffer.
    pub fn to_training_samples(&self) -> Vec<TrainingSample> {
        self.trajectories
            .iter()
            .flat_map(Trajectory::to_training_samples)
            .collect()
    }

    /// Extract all training samples together with their symmetries.
    pub fn augmented_samples(&self, config: &AugmentConfig) -> Vec<TrainingSample> {
        self.to_training_samples()
            .iter()
            .flat_map(|sample| sample.symmetries(config))
            .collect()
    }

    /// Sample a random batch of training samples without replacement.
    ///
    /// The same seed on the same buffer gives the same batch.
    pub fn sample_batch(&self, batch_size: usize, seed: u64) -> Vec<TrainingSample> {
        let mut all_samples = self.to_training_samples();
        if all_samples.is_empty() || batch_size == 0 {
            return vec![];
        }

        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        // Partial Fisher-Yates over the first `limit` slots
        let n = all_samples.len();
        let limit = batch_size.min(n);
        for i in 0..limit {
            let j = rng.gen_range(i..n);
            all_samples.swap(i, j);
        }
        all_samples.truncate(limit);
        all_samples
    }
}

impl Default for ExperienceBuffer {
    fn default() -> Self {
        Self::new(10000)
    }
}
