//! Augmentation configuration.

use serde::{Deserialize, Serialize};

use super::transform::Transform;

/// Which transforms to generate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SymmetryGroup {
    /// All 64 combinations of macro/micro flips and turns.
    #[default]
    Full,
    /// Only the 8 rotations/reflections of the whole board.
    Dihedral,
}

impl SymmetryGroup {
    /// Transforms of this group, identity first.
    pub fn transforms(self) -> Box<dyn Iterator<Item = Transform>> {
        match self {
            SymmetryGroup::Full => Box::new(Transform::all()),
            SymmetryGroup::Dihedral => Box::new(Transform::dihedral()),
        }
    }

    /// Number of transforms in the group.
    #[must_use]
    pub const fn order(self) -> usize {
        match self {
            SymmetryGroup::Full => 64,
            SymmetryGroup::Dihedral => 8,
        }
    }
}

/// Symmetry augmentation parameters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AugmentConfig {
    /// Transform set to apply.
    pub group: SymmetryGroup,

    /// Drop samples identical to an earlier one.
    /// Order of the remaining samples is kept.
    pub dedup: bool,
}

impl AugmentConfig {
    /// Create a new config with a different transform set.
    pub fn with_group(mut self, group: SymmetryGroup) -> Self {
        self.group = group;
        self
    }

    /// Create a new config with deduplication switched on or off.
    pub fn with_dedup(mut self, dedup: bool) -> Self {
        self.dedup = dedup;
        self
    }
}
