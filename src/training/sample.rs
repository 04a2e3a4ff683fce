//! Training samples and their augmentation.

use serde::{Deserialize, Serialize};

use crate::core::{CurrentArea, FlatBoard};
use crate::symmetry::{AugmentConfig, SymmetrySample};

/// A single training example.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrainingSample {
    /// Canonical board of the player to move.
    pub board: FlatBoard,

    /// Target policy, indexed by action.
    pub policy: Vec<f32>,

    /// Where the player to move had to play.
    pub current_area: CurrentArea,

    /// Target value (game result from the mover's perspective).
    pub value: f32,
}

impl TrainingSample {
    /// Create a new sample.
    ///
    /// # Panics
    ///
    /// Panics if `policy` does not have exactly 81 entries.
    pub fn new(board: FlatBoard, policy: Vec<f32>, current_area: CurrentArea, value: f32) -> Self {
        SymmetrySample::new(board, policy, current_area).with_value(value)
    }

    /// Augmented copies; `value` is carried unchanged.
    pub fn symmetries(&self, config: &AugmentConfig) -> Vec<TrainingSample> {
        let base = SymmetrySample {
            board: self.board,
            policy: self.policy.clone(),
            current_area: self.current_area,
        };
        base.symmetries(config)
            .into_iter()
            .map(|s| s.with_value(self.value))
            .collect()
    }
}

impl SymmetrySample {
    /// Attach a value target.
    pub fn with_value(self, value: f32) -> TrainingSample {
        TrainingSample {
            board: self.board,
            policy: self.policy,
            current_area: self.current_area,
            value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Area, ACTION_SIZE};
    use crate::symmetry::SymmetryGroup;

    fn sample() -> TrainingSample {
        let mut board = [[0i8; 9]; 9];
        board[0][4] = 1;
        board[8][8] = -1;
        let mut policy = vec![0.0; ACTION_SIZE];
        policy[3] = 0.75;
        policy[40] = 0.25;
        TrainingSample::new(board, policy, CurrentArea::Fixed(Area::new(0, 1)), -1.0)
    }

    #[test]
    fn test_symmetries_carry_value() {
        let original = sample();
        let augmented = original.symmetries(&AugmentConfig::default());

        assert_eq!(augmented.len(), 64);
        assert_eq!(augmented[0], original);
        assert!(augmented.iter().all(|s| s.value == -1.0));
        assert!(augmented
            .iter()
            .all(|s| (s.policy.iter().sum::<f32>() - 1.0).abs() < 1e-6));
    }

    #[test]
    fn test_dihedral_symmetries() {
        let config = AugmentConfig::default().with_group(SymmetryGroup::Dihedral);
        assert_eq!(sample().symmetries(&config).len(), 8);
    }

    #[test]
    fn test_serialization() {
        let original = sample();
        let json = serde_json::to_string(&original).unwrap();
        let deserialized: TrainingSample = serde_json::from_str(&json).unwrap();
        assert_eq!(original, deserialized);
    }
}
