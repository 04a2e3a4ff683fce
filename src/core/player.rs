//! Player identification.
//!
//! ## Player
//!
//! Ultimate Tic-Tac-Toe is strictly two-player. `Player::A` always moves
//! first and is rendered as `X`; `Player::B` is rendered as `O`.
//!
//! Each player carries a sign (`A = +1`, `B = -1`) which is the value its
//! marks take in the flat board wire format and the factor applied when
//! canonicalizing a board to a player's perspective.

use serde::{Deserialize, Serialize};

/// One of the two players.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// First player, sign `+1`.
    A,
    /// Second player, sign `-1`.
    B,
}

impl Player {
    /// Both players in turn order.
    pub const ALL: [Player; 2] = [Player::A, Player::B];

    /// Get the opponent.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Player::A => Player::B,
            Player::B => Player::A,
        }
    }

    /// Get the player's sign in the flat board encoding.
    ///
    /// ```
    /// use uttt_core::core::Player;
    ///
    /// assert_eq!(Player::A.sign(), 1);
    /// assert_eq!(Player::B.sign(), -1);
    /// ```
    #[must_use]
    pub const fn sign(self) -> i8 {
        match self {
            Player::A => 1,
            Player::B => -1,
        }
    }

    /// Look up a player by sign. Returns `None` for anything other than `±1`.
    #[must_use]
    pub const fn from_sign(sign: i8) -> Option<Self> {
        match sign {
            1 => Some(Player::A),
            -1 => Some(Player::B),
            _ => None,
        }
    }

    /// Get the board symbol used when rendering.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Player::A => 'X',
            Player::B => 'O',
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "player {}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_other() {
        assert_eq!(Player::A.other(), Player::B);
        assert_eq!(Player::B.other(), Player::A);
        assert_eq!(Player::A.other().other(), Player::A);
    }

    #[test]
    fn test_player_sign_roundtrip() {
        for player in Player::ALL {
            assert_eq!(Player::from_sign(player.sign()), Some(player));
        }
        assert_eq!(Player::from_sign(0), None);
        assert_eq!(Player::from_sign(2), None);
    }

    #[test]
    fn test_player_display() {
        assert_eq!(format!("{}", Player::A), "player X");
        assert_eq!(format!("{}", Player::B), "player O");
    }

    #[test]
    fn test_player_serialization() {
        let json = serde_json::to_string(&Player::B).unwrap();
        let deserialized: Player = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, Player::B);
    }
}
