//! Self-play game generation.
//!
//! Tree search lives outside this crate. The worker here plays directly from
//! the network's masked policy, which is enough to produce bootstrap data and
//! to smoke-test a network binding end to end.

use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::nn::{mask_policy, PolicyValueNetwork, StateEncoder};
use crate::rules::{BoardState, MoveError};

use super::trajectory::{Step, Trajectory};

/// Configuration for self-play games.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SelfPlayConfig {
    /// Temperature for move sampling (0 = greedy).
    pub temperature: f64,

    /// Move number at which to switch to greedy (temperature = 0).
    /// 0 = always use temperature.
    pub temperature_threshold: usize,

    /// Seed of the first game in `play_games`; game `i` uses `seed_offset + i`.
    pub seed_offset: u64,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        Self {
            temperature: 1.0,
            temperature_threshold: 15,
            seed_offset: 0,
        }
    }
}

impl SelfPlayConfig {
    /// Set temperature for early game exploration.
    pub fn with_temperature(mut self, temp: f64) -> Self {
        self.temperature = temp;
        self
    }

    /// Set the move number at which play turns greedy.
    pub fn with_temperature_threshold(mut self, threshold: usize) -> Self {
        self.temperature_threshold = threshold;
        self
    }

    /// Set the seed of the first game.
    pub fn with_seed_offset(mut self, offset: u64) -> Self {
        self.seed_offset = offset;
        self
    }

    /// Get the temperature for a given move number.
    pub fn effective_temperature(&self, move_number: usize) -> f64 {
        if self.temperature_threshold > 0 && move_number >= self.temperature_threshold {
            0.0
        } else {
            self.temperature
        }
    }
}

/// Worker for running self-play games.
pub struct SelfPlayWorker {
    encoder: Box<dyn StateEncoder>,
    config: SelfPlayConfig,
}

impl SelfPlayWorker {
    /// Create a new self-play worker.
    pub fn new(encoder: Box<dyn StateEncoder>, config: SelfPlayConfig) -> Self {
        Self { encoder, config }
    }

    /// Play one game from the initial position.
    ///
    /// Every step records the masked network policy as its target.
    pub fn play_game<N: PolicyValueNetwork + ?Sized>(&self, network: &N, seed: u64) -> Trajectory {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut state = BoardState::new();
        let mut trajectory = Trajectory::new(seed);

        while !state.is_terminal() {
            let player = state.current_player();
            let encoded = self.encoder.encode(&state, player);
            let (policy, _value) = network.predict(&encoded);
            let policy = mask_policy(&policy, &state.legal_mask());

            let temperature = self.config.effective_temperature(state.move_count());
            let Some(action) = select_action(&policy, temperature, &mut rng) else {
                break;
            };

            trajectory.push(Step::new(&state, policy));
            if let Err(err) = state.apply_action(action) {
                warn!(action, kind = err.kind(), "network chose an illegal action");
                break;
            }
        }

        trajectory.set_outcome(state.outcome());
        if !state.is_terminal() {
            warn!(seed, moves = trajectory.len(), "self-play game stopped before a result");
        }
        debug!(seed, moves = trajectory.len(), outcome = %trajectory.outcome, "self-play game finished");
        trajectory
    }

    /// Play `count` games with consecutive seeds.
    pub fn play_games<N: PolicyValueNetwork + ?Sized>(
        &self,
        network: &N,
        count: usize,
    ) -> Vec<Trajectory> {
        (0..count)
            .map(|i| self.play_game(network, self.config.seed_offset.wrapping_add(i as u64)))
            .collect()
    }

    /// Get the encoder.
    pub fn encoder(&self) -> &dyn StateEncoder {
        self.encoder.as_ref()
    }

    /// Get the configuration.
    pub fn config(&self) -> &SelfPlayConfig {
        &self.config
    }
}

/// Pick an action from a probability vector.
///
/// Temperature 0 takes the first most probable action; otherwise actions
/// are sampled proportionally to `p^(1/temperature)`. Returns `None` when no
/// action has positive probability.
///
/// Weights are taken relative to the largest probability, so the most
/// probable actions keep weight 1 however small the temperature.
pub fn select_action<R: Rng + ?Sized>(probs: &[f32], temperature: f64, rng: &mut R) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (k, &p) in probs.iter().enumerate() {
        if p > 0.0 && best.map_or(true, |(_, b)| p > b) {
            best = Some((k, p));
        }
    }
    let (best_action, max) = best?;
    if temperature <= 0.0 {
        return Some(best_action);
    }

    let exponent = 1.0 / temperature;
    let max = f64::from(max);
    let weights: Vec<f64> = probs
        .iter()
        .map(|&p| (f64::from(p.max(0.0)) / max).powf(exponent))
        .collect();
    match WeightedIndex::new(&weights) {
        Ok(dist) => Some(dist.sample(rng)),
        Err(_) => Some(best_action),
    }
}

/// Play uniformly random legal moves until the game ends.
pub fn random_playout<R: Rng + ?Sized>(state: &BoardState, rng: &mut R) -> Result<BoardState, MoveError> {
    let mut state = *state;
    while !state.is_terminal() {
        let moves = state.legal_moves();
        let Some(&addr) = moves.choose(rng) else {
            break;
        };
        state.apply_move(addr)?;
    }
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Outcome;
    use crate::nn::{TwoPlaneEncoder, UniformPolicyZeroValue};

    fn worker(config: SelfPlayConfig) -> SelfPlayWorker {
        SelfPlayWorker::new(Box::new(TwoPlaneEncoder::new()), config)
    }

    #[test]
    fn test_self_play_config_default() {
        let config = SelfPlayConfig::default();
        assert_eq!(config.temperature, 1.0);
        assert_eq!(config.temperature_threshold, 15);
    }

    #[test]
    fn test_effective_temperature() {
        let config = SelfPlayConfig::default()
            .with_temperature(1.5)
            .with_temperature_threshold(10);

        assert_eq!(config.effective_temperature(0), 1.5);
        assert_eq!(config.effective_temperature(9), 1.5);
        assert_eq!(config.effective_temperature(10), 0.0);

        let always = config.with_temperature_threshold(0);
        assert_eq!(always.effective_temperature(100), 1.5);
    }

    #[test]
    fn test_select_action_greedy() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(select_action(&[0.1, 0.6, 0.3], 0.0, &mut rng), Some(1));
        // Ties go to the first action.
        assert_eq!(select_action(&[0.0, 0.5, 0.5], 0.0, &mut rng), Some(1));
        assert_eq!(select_action(&[0.0, 0.0], 0.0, &mut rng), None);
        assert_eq!(select_action(&[0.0, 0.0], 1.0, &mut rng), None);
    }

    #[test]
    fn test_select_action_never_picks_zero() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..200 {
            let k = select_action(&[0.0, 0.5, 0.0, 0.5], 1.0, &mut rng).unwrap();
            assert!(k == 1 || k == 3);
        }
    }

    #[test]
    fn test_select_action_low_temperature() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let uniform = [1.0 / 9.0; 9];
        for _ in 0..50 {
            let k = select_action(&uniform, 1e-3, &mut rng).unwrap();
            assert!(k < 9);
        }
        for _ in 0..50 {
            assert_eq!(select_action(&[0.4, 0.6, 0.0], 1e-3, &mut rng), Some(1));
        }
        assert_eq!(select_action(&[0.0, 0.0], 1e-3, &mut rng), None);
    }

    #[test]
    fn test_play_game_low_temperature_finishes() {
        let network = UniformPolicyZeroValue::new(81);
        let config = SelfPlayConfig::default()
            .with_temperature(1e-3)
            .with_temperature_threshold(0);
        let traj = worker(config).play_game(&network, 9);

        assert!(traj.outcome.is_decided());
        assert!(traj.len() >= 17);
    }

    #[test]
    fn test_play_game() {
        let network = UniformPolicyZeroValue::new(81);
        let traj = worker(SelfPlayConfig::default()).play_game(&network, 42);

        assert!(!traj.is_empty());
        assert!(traj.outcome.is_decided());
        assert_eq!(traj.seed, 42);
        for (n, step) in traj.steps.iter().enumerate() {
            assert_eq!(step.move_number, n);
            assert!((step.policy.iter().sum::<f32>() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_play_game_deterministic() {
        let network = UniformPolicyZeroValue::new(81);
        let worker = worker(SelfPlayConfig::default());
        let a = worker.play_game(&network, 7);
        let b = worker.play_game(&network, 7);
        assert_eq!(a.steps, b.steps);
        assert_eq!(a.outcome, b.outcome);
    }

    #[test]
    fn test_play_games_seeds() {
        let network = UniformPolicyZeroValue::new(81);
        let games = worker(SelfPlayConfig::default().with_seed_offset(100)).play_games(&network, 3);
        let seeds: Vec<_> = games.iter().map(|t| t.seed).collect();
        assert_eq!(seeds, vec![100, 101, 102]);
    }

    #[test]
    fn test_random_playout_terminates() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..20 {
            let end = random_playout(&BoardState::new(), &mut rng).unwrap();
            assert!(end.is_terminal());
            assert!(end.legal_moves().is_empty());
            assert_ne!(end.outcome(), Outcome::Undetermined);
        }
    }
}
