//! Board transforms built from independent macro and micro flips/rotations.
//!
//! A transform acts on the outer `(x, y)` indices (which area) and the inner
//! `(i, j)` indices (which cell of the area) separately:
//!
//! 1. macro flip: `x -> 2 - x`
//! 2. micro flip: `i -> 2 - i`
//! 3. macro rotation, `macro_turns` quarter turns: `(x, y) -> (2 - y, x)`
//! 4. micro rotation, `micro_turns` quarter turns: `(i, j) -> (2 - j, i)`
//!
//! Every transform maps lines to lines on both levels, so area and game
//! outcomes are preserved. Only the eight with matching flips and matching
//! turn counts are rotations/reflections of the physical 9×9 board, though.
//! The other 56 break the link between a cell's place inside its area and
//! the area it sends the opponent to. Whether to train on them is left to
//! [`SymmetryGroup`](super::SymmetryGroup).

use serde::{Deserialize, Serialize};

use crate::core::{Area, CellAddr, CurrentArea, Nested, AREA_SIZE};

/// One element of the 64-element transform set.
///
/// Turn counts are always kept in `0..4`, so two transforms are equal
/// exactly when they move cells the same way.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "TransformParts")]
pub struct Transform {
    macro_flip: bool,
    micro_flip: bool,
    macro_turns: u8,
    micro_turns: u8,
}

#[derive(Deserialize)]
struct TransformParts {
    macro_flip: bool,
    micro_flip: bool,
    macro_turns: u8,
    micro_turns: u8,
}

impl From<TransformParts> for Transform {
    fn from(parts: TransformParts) -> Self {
        Transform::new(parts.macro_flip, parts.micro_flip, parts.macro_turns, parts.micro_turns)
    }
}

impl Transform {
    /// The transform that changes nothing.
    pub const IDENTITY: Transform = Transform {
        macro_flip: false,
        micro_flip: false,
        macro_turns: 0,
        micro_turns: 0,
    };

    /// Create a transform. Turn counts are taken modulo 4.
    #[must_use]
    pub const fn new(macro_flip: bool, micro_flip: bool, macro_turns: u8, micro_turns: u8) -> Self {
        Self {
            macro_flip,
            micro_flip,
            macro_turns: macro_turns % 4,
            micro_turns: micro_turns % 4,
        }
    }

    /// Whether the area arrangement is flipped.
    #[must_use]
    pub const fn macro_flip(&self) -> bool {
        self.macro_flip
    }

    /// Whether the cells inside every area are flipped.
    #[must_use]
    pub const fn micro_flip(&self) -> bool {
        self.micro_flip
    }

    /// Quarter turns of the area arrangement, `0..4`.
    #[must_use]
    pub const fn macro_turns(&self) -> u8 {
        self.macro_turns
    }

    /// Quarter turns inside every area, `0..4`.
    #[must_use]
    pub const fn micro_turns(&self) -> u8 {
        self.micro_turns
    }

    /// A transform of the whole board: macro and micro parts in lockstep.
    #[must_use]
    pub const fn geometric(flip: bool, turns: u8) -> Self {
        Self::new(flip, flip, turns, turns)
    }

    /// All 64 transforms.
    ///
    /// Ordered by macro flip, micro flip, macro turns, micro turns; the first
    /// one is [`Transform::IDENTITY`].
    pub fn all() -> impl Iterator<Item = Transform> {
        [false, true].into_iter().flat_map(|macro_flip| {
            [false, true].into_iter().flat_map(move |micro_flip| {
                (0..4).flat_map(move |macro_turns| {
                    (0..4).map(move |micro_turns| {
                        Transform::new(macro_flip, micro_flip, macro_turns, micro_turns)
                    })
                })
            })
        })
    }

    /// The eight transforms of the physical board.
    pub fn dihedral() -> impl Iterator<Item = Transform> {
        Self::all().filter(|t| t.is_geometric())
    }

    /// Check whether this is a rotation/reflection of the whole board.
    #[must_use]
    pub const fn is_geometric(&self) -> bool {
        self.macro_flip == self.micro_flip && self.macro_turns == self.micro_turns
    }

    /// Check whether this is the identity.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Where an area ends up.
    #[must_use]
    pub fn map_area(&self, area: Area) -> Area {
        let (x, y) = map_3x3(area.x, area.y, self.macro_flip, self.macro_turns);
        Area { x, y }
    }

    /// Where a cell ends up.
    #[must_use]
    pub fn map_cell(&self, addr: CellAddr) -> CellAddr {
        let (x, y) = map_3x3(addr.x, addr.y, self.macro_flip, self.macro_turns);
        let (i, j) = map_3x3(addr.i, addr.j, self.micro_flip, self.micro_turns);
        CellAddr { x, y, i, j }
    }

    /// Move every value of a nested grid to its transformed position.
    #[must_use]
    pub fn apply_nested<T: Copy>(&self, grid: &Nested<T>) -> Nested<T> {
        let mut out = *grid;
        for addr in CellAddr::all() {
            self.map_cell(addr).set(&mut out, addr.get(grid));
        }
        out
    }

    /// Transform the current area; `Free` stays `Free`.
    #[must_use]
    pub fn apply_current_area(&self, current_area: CurrentArea) -> CurrentArea {
        match current_area {
            CurrentArea::Free => CurrentArea::Free,
            CurrentArea::Fixed(area) => CurrentArea::Fixed(self.map_area(area)),
        }
    }
}

/// Flip rows (if asked), then rotate a quarter turn `turns` times.
///
/// The quarter turn sends `(r, c)` to `(2 - c, r)`, the same direction as
/// `numpy.rot90` on the first two axes.
fn map_3x3(row: usize, col: usize, flip: bool, turns: u8) -> (usize, usize) {
    let last = AREA_SIZE - 1;
    let mut r = if flip { last - row } else { row };
    let mut c = col;
    for _ in 0..turns {
        (r, c) = (last - c, r);
    }
    (r, c)
}
