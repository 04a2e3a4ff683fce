//! Cell contents, outcomes and the current-area restriction.

use serde::{Deserialize, Serialize};

use super::index::Area;
use super::player::Player;

/// Contents of one cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Taken(Player),
}

impl Cell {
    /// Value in the flat board encoding: `0`, `+1` or `-1`.
    #[must_use]
    pub const fn sign(self) -> i8 {
        match self {
            Cell::Empty => 0,
            Cell::Taken(player) => player.sign(),
        }
    }

    /// Decode from the flat board encoding.
    #[must_use]
    pub const fn from_sign(sign: i8) -> Option<Self> {
        match sign {
            0 => Some(Cell::Empty),
            _ => match Player::from_sign(sign) {
                Some(player) => Some(Cell::Taken(player)),
                None => None,
            },
        }
    }

    /// Check whether nobody has played here.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }
}

/// Status of an area or of the whole game.
///
/// Replaces the `{0, ±1, NaN}` float encoding with a closed enum so draws
/// compare like any other value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    #[default]
    Undetermined,
    Draw,
    Won(Player),
}

impl Outcome {
    /// Check whether the outcome is still open.
    #[must_use]
    pub const fn is_undetermined(self) -> bool {
        matches!(self, Outcome::Undetermined)
    }

    /// Check whether the outcome is decided (won or drawn).
    #[must_use]
    pub const fn is_decided(self) -> bool {
        !self.is_undetermined()
    }

    /// Get the winner, if any.
    #[must_use]
    pub const fn winner(self) -> Option<Player> {
        match self {
            Outcome::Won(player) => Some(player),
            _ => None,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Undetermined => write!(f, "undetermined"),
            Outcome::Draw => write!(f, "draw"),
            Outcome::Won(player) => write!(f, "won by {player}"),
        }
    }
}

/// Which area the player to move must play in.
///
/// `Fixed(area)` is only ever held while `area` is undetermined.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CurrentArea {
    /// Any undetermined area.
    #[default]
    Free,
    /// Exactly this area.
    Fixed(Area),
}

impl CurrentArea {
    /// Get the fixed area, if any.
    #[must_use]
    pub const fn fixed(self) -> Option<Area> {
        match self {
            CurrentArea::Free => None,
            CurrentArea::Fixed(area) => Some(area),
        }
    }

    /// Check whether a move in `area` satisfies the restriction.
    #[must_use]
    pub fn permits(self, area: Area) -> bool {
        match self {
            CurrentArea::Free => true,
            CurrentArea::Fixed(required) => required == area,
        }
    }
}

impl From<Option<Area>> for CurrentArea {
    fn from(value: Option<Area>) -> Self {
        value.map_or(CurrentArea::Free, CurrentArea::Fixed)
    }
}

impl std::fmt::Display for CurrentArea {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CurrentArea::Free => write!(f, "free"),
            CurrentArea::Fixed(area) => write!(f, "{area}"),
        }
    }
}
