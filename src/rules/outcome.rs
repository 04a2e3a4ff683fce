//! Outcome evaluation for a 3×3 grid.
//!
//! The same function decides an area (over its cells) and the whole game
//! (over the area outcomes). A grid entry is a [`Mark`]: it may belong to a
//! player, be settled without an owner (a drawn area), or still be open
//! (an empty cell or an undetermined area).
//!
//! ## Tie-break
//!
//! Lines are scanned rows top to bottom, then columns left to right, then
//! the main diagonal and the anti-diagonal. The first completed line decides.
//! Two winners at once cannot arise in play, but the scan order keeps the
//! result reproducible for hand-built grids.

use crate::core::{Cell, Grid3, Outcome, Player};

/// A value that can sit in a 3×3 grid being evaluated.
pub trait Mark: Copy {
    /// The player this entry counts for when completing a line.
    fn owner(self) -> Option<Player>;

    /// Whether the entry is filled for the purpose of the draw check.
    fn is_settled(self) -> bool;
}

impl Mark for Cell {
    fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Taken(player) => Some(player),
        }
    }

    fn is_settled(self) -> bool {
        !self.is_empty()
    }
}

impl Mark for Outcome {
    fn owner(self) -> Option<Player> {
        self.winner()
    }

    fn is_settled(self) -> bool {
        self.is_decided()
    }
}

/// The eight lines of a 3×3 grid in scan order, as `(row, col)` triples.
pub const LINES: [[(usize, usize); 3]; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

/// Get the player who completed `line`, if anyone did.
#[must_use]
pub fn line_winner<M: Mark>(grid: &Grid3<M>, line: &[(usize, usize); 3]) -> Option<Player> {
    let [first, rest @ ..] = line.map(|(r, c)| grid[r][c].owner());
    let owner = first?;
    rest.iter().all(|o| *o == Some(owner)).then_some(owner)
}

/// Evaluate a 3×3 grid.
///
/// Returns `Won(p)` for the first completed line, `Draw` if every entry is
/// settled without one, and `Undetermined` otherwise.
#[must_use]
pub fn evaluate<M: Mark>(grid: &Grid3<M>) -> Outcome {
    if let Some(winner) = LINES.iter().find_map(|line| line_winner(grid, line)) {
        return Outcome::Won(winner);
    }

    if grid.iter().flatten().all(|entry| entry.is_settled()) {
        Outcome::Draw
    } else {
        Outcome::Undetermined
    }
}
