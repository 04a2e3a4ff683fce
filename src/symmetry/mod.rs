//! Symmetry augmentation of training samples.
//!
//! A sample is a canonical 9×9 board, an 81-entry policy indexed by action and
//! the current area. Every [`Transform`] moves board entries, policy entries
//! and the current area consistently: a board entry at cell `c` and the
//! policy mass on action `c` both end up at `t.map_cell(c)`, and a fixed
//! current area `a` becomes `t.map_area(a)`.
//!
//! ## Groups
//!
//! The default [`SymmetryGroup::Full`] emits all 64 macro/micro combinations
//! for every sample, including the 56 that are not rotations of the physical
//! board. [`SymmetryGroup::Dihedral`] restricts the orbit to the 8 geometric
//! transforms.

pub mod config;
pub mod transform;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{
    actions_to_nested, flat_to_nested, nested_to_actions, nested_to_flat, CurrentArea, FlatBoard,
    ACTION_SIZE,
};

pub use config::{AugmentConfig, SymmetryGroup};
pub use transform::Transform;

/// Board, policy and current area as fed to training.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SymmetrySample {
    pub board: FlatBoard,
    /// Probabilities indexed by action, length 81.
    pub policy: Vec<f32>,
    pub current_area: CurrentArea,
}

impl SymmetrySample {
    /// Create a sample.
    ///
    /// # Panics
    ///
    /// Panics if `policy` does not have exactly 81 entries.
    pub fn new(board: FlatBoard, policy: Vec<f32>, current_area: CurrentArea) -> Self {
        assert_eq!(
            policy.len(),
            ACTION_SIZE,
            "expected {ACTION_SIZE} policy values, got {}",
            policy.len()
        );
        Self {
            board,
            policy,
            current_area,
        }
    }

    /// Apply a single transform.
    #[must_use]
    pub fn transformed(&self, t: Transform) -> Self {
        let board = nested_to_flat(&t.apply_nested(&flat_to_nested(&self.board)));
        let policy = nested_to_actions(&t.apply_nested(&actions_to_nested(&self.policy)));
        Self {
            board,
            policy: policy.to_vec(),
            current_area: t.apply_current_area(self.current_area),
        }
    }

    /// All transformed copies for the configured group, untransformed first.
    pub fn symmetries(&self, config: &AugmentConfig) -> Vec<Self> {
        let mut orbit: Vec<Self> = config
            .group
            .transforms()
            .map(|t| self.transformed(t))
            .collect();

        if config.dedup {
            let mut seen = FxHashSet::default();
            orbit.retain(|sample| seen.insert(sample.dedup_key()));
        }

        debug!(
            group = ?config.group,
            dedup = config.dedup,
            orbit = orbit.len(),
            "generated symmetries"
        );
        orbit
    }

    fn dedup_key(&self) -> (FlatBoard, Vec<u32>, CurrentArea) {
        let bits = self.policy.iter().map(|p| p.to_bits()).collect();
        (self.board, bits, self.current_area)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{to_action, to_flat, Area, CellAddr};

    fn one_hot(addr: CellAddr) -> SymmetrySample {
        let mut board = [[0i8; 9]; 9];
        let pos = to_flat(addr);
        board[pos.m][pos.n] = 1;
        let mut policy = vec![0.0; ACTION_SIZE];
        policy[to_action(addr)] = 1.0;
        SymmetrySample::new(board, policy, CurrentArea::Fixed(addr.area()))
    }

    #[test]
    fn test_identity_first() {
        let sample = one_hot(CellAddr::new(0, 1, 2, 0));
        let orbit = sample.symmetries(&AugmentConfig::default());
        assert_eq!(orbit.len(), 64);
        assert_eq!(orbit[0], sample);
    }

    #[test]
    fn test_board_and_policy_move_together() {
        let addr = CellAddr::new(0, 0, 0, 0);
        let sample = one_hot(addr);
        let turned = sample.transformed(Transform::new(false, false, 1, 0));

        // Macro quarter turn: area (0, 0) -> (2, 0).
        let target = CellAddr::new(2, 0, 0, 0);
        assert_eq!(turned.board[6][0], 1);
        assert_eq!(turned.board.iter().flatten().map(|&v| v as i32).sum::<i32>(), 1);
        assert_eq!(turned.policy[to_action(target)], 1.0);
        assert_eq!(turned.current_area, CurrentArea::Fixed(Area::new(2, 0)));
    }

    #[test]
    fn test_every_transform_is_consistent() {
        let sample = one_hot(CellAddr::new(1, 2, 0, 1));
        for t in Transform::all() {
            let moved = sample.transformed(t);
            let target = t.map_cell(CellAddr::new(1, 2, 0, 1));
            let pos = to_flat(target);
            assert_eq!(moved.board[pos.m][pos.n], 1);
            assert_eq!(moved.policy[to_action(target)], 1.0);
            assert_eq!(moved.policy.iter().sum::<f32>(), 1.0);
        }
    }

    #[test]
    fn test_dihedral_group() {
        let sample = one_hot(CellAddr::new(0, 1, 2, 0));
        let config = AugmentConfig::default().with_group(SymmetryGroup::Dihedral);
        let orbit = sample.symmetries(&config);
        assert_eq!(orbit.len(), 8);
        assert_eq!(orbit[0], sample);
    }

    #[test]
    fn test_dedup_keeps_first_seen() {
        let sample = SymmetrySample::new(
            [[0; 9]; 9],
            vec![1.0 / 81.0; ACTION_SIZE],
            CurrentArea::Fixed(Area::new(1, 1)),
        );
        let config = AugmentConfig::default().with_dedup(true);
        assert_eq!(sample.symmetries(&config), vec![sample.clone()]);

        let corner = one_hot(CellAddr::new(0, 0, 0, 0));
        let orbit = corner.symmetries(&config);
        // Four area corners times four cell corners; flips only reorder them.
        assert_eq!(orbit.len(), 16);
        assert_eq!(orbit[0], corner);
    }

    #[test]
    #[should_panic(expected = "expected 81 policy values")]
    fn test_short_policy_panics() {
        let _ = SymmetrySample::new([[0; 9]; 9], vec![0.0; 9], CurrentArea::Free);
    }
}
