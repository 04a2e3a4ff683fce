//! Board state and move application.
//!
//! `BoardState` is a plain `Copy` value. Simulating a continuation means
//! taking a copy (`with_move`) and playing on that; nothing is ever
//! re-initialised in place, so search workers on different threads can hold
//! their own states without locking.
//!
//! ## Lifecycle
//!
//! A new state is empty, `Player::A` to move, current area `Free`. The only
//! mutator is [`BoardState::apply_move`]; everything else is a query.
//! Once the game outcome is decided no move is legal.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::core::{
    nested_to_actions, nested_to_flat, to_nested, Area, Cell, CellAddr, CurrentArea, Flat,
    FlatBoard, FlatPos, Grid3, Nested, Outcome, Player, ACTION_SIZE,
};

use super::error::{BoardError, MoveError};
use super::outcome::evaluate;

/// Result reported for a drawn game by [`BoardState::result_for`].
///
/// Small and non-zero so a consumer can tell "over, drawn" from "still
/// running" (`0`), a win (`+1`) and a loss (`-1`).
pub const DRAW_VALUE: f32 = 1e-1;

/// Legal move list.
///
/// Nine entries are stored inline, which covers every `Fixed` position. A
/// `Free` position can have up to 81 and spills to the heap;
/// [`BoardState::legal_mask`] is the allocation-free query.
pub type MoveList = SmallVec<[CellAddr; 9]>;

/// Complete game state.
///
/// Serialized as cells, player to move and current area only. Outcomes are
/// derived again on deserialization through [`BoardState::from_cells`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "StoredBoard", into = "StoredBoard")]
pub struct BoardState {
    cells: Nested<Cell>,
    areas: Grid3<Outcome>,
    outcome: Outcome,
    player: Player,
    current_area: CurrentArea,
}

/// Wire form of a [`BoardState`].
#[derive(Clone, Copy, Serialize, Deserialize)]
struct StoredBoard {
    cells: Nested<Cell>,
    player: Player,
    current_area: CurrentArea,
}

impl From<StoredBoard> for BoardState {
    fn from(stored: StoredBoard) -> Self {
        Self::from_cells(stored.cells, stored.player, stored.current_area)
    }
}

impl From<BoardState> for StoredBoard {
    fn from(state: BoardState) -> Self {
        Self {
            cells: state.cells,
            player: state.player,
            current_area: state.current_area,
        }
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardState {
    /// Create the initial position.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cells: Default::default(),
            areas: Default::default(),
            outcome: Outcome::Undetermined,
            player: Player::A,
            current_area: CurrentArea::Free,
        }
    }

    /// Build a state from raw cells, recomputing every outcome.
    ///
    /// A `Fixed` current area that names an already decided area is
    /// replaced by `Free`.
    #[must_use]
    pub fn from_cells(cells: Nested<Cell>, player: Player, current_area: CurrentArea) -> Self {
        let areas: Grid3<Outcome> =
            std::array::from_fn(|x| std::array::from_fn(|y| evaluate(&cells[x][y])));
        let mut state = Self {
            cells,
            areas,
            outcome: evaluate(&areas),
            player,
            current_area: CurrentArea::Free,
        };
        if let CurrentArea::Fixed(area) = current_area {
            state.current_area = state.restriction_towards(area);
        }
        state
    }

    /// Build a state from the flat 9×9 wire format.
    pub fn from_flat(
        board: &FlatBoard,
        player: Player,
        current_area: CurrentArea,
    ) -> Result<Self, BoardError> {
        let mut cells: Nested<Cell> = Default::default();
        for (m, row) in board.iter().enumerate() {
            for (n, &value) in row.iter().enumerate() {
                let pos = FlatPos { m, n };
                let cell = Cell::from_sign(value)
                    .ok_or(BoardError::InvalidCellValue { pos, value })?;
                to_nested(pos).set(&mut cells, cell);
            }
        }
        Ok(Self::from_cells(cells, player, current_area))
    }

    // === Queries ===

    /// All cells in nested layout.
    #[must_use]
    pub fn cells(&self) -> &Nested<Cell> {
        &self.cells
    }

    /// Get one cell.
    #[must_use]
    pub fn cell(&self, addr: CellAddr) -> Cell {
        addr.get(&self.cells)
    }

    /// The nine cells of one area.
    #[must_use]
    pub fn area_cells(&self, area: Area) -> &Grid3<Cell> {
        &self.cells[area.x][area.y]
    }

    /// Outcome of one area.
    #[must_use]
    pub fn area_outcome(&self, area: Area) -> Outcome {
        self.areas[area.x][area.y]
    }

    /// Outcomes of all areas, indexed `[x][y]`.
    #[must_use]
    pub fn area_outcomes(&self) -> &Grid3<Outcome> {
        &self.areas
    }

    /// Outcome of the game.
    #[must_use]
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Check whether the game is over.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_decided()
    }

    /// The player to move.
    #[must_use]
    pub fn current_player(&self) -> Player {
        self.player
    }

    /// The area restriction for the player to move.
    #[must_use]
    pub fn current_area(&self) -> CurrentArea {
        self.current_area
    }

    /// Number of cells played so far.
    #[must_use]
    pub fn move_count(&self) -> usize {
        self.cells.iter().flatten().flatten().flatten().filter(|c| !c.is_empty()).count()
    }

    // === Moves ===

    /// Validate a move without applying it.
    ///
    /// Conditions are checked in a fixed order and the first violation is
    /// returned: game decided, area decided, wrong area, cell taken.
    pub fn check_move(&self, addr: CellAddr) -> Result<(), MoveError> {
        if self.outcome.is_decided() {
            return Err(MoveError::GameAlreadyDecided {
                outcome: self.outcome,
            });
        }

        let area = addr.area();
        let area_outcome = self.area_outcome(area);
        if area_outcome.is_decided() {
            return Err(MoveError::AreaAlreadyDecided {
                area,
                outcome: area_outcome,
            });
        }

        if let CurrentArea::Fixed(required) = self.current_area {
            if required != area {
                return Err(MoveError::WrongArea {
                    required,
                    attempted: area,
                });
            }
        }

        match self.cell(addr) {
            Cell::Empty => Ok(()),
            Cell::Taken(occupant) => Err(MoveError::CellAlreadyPlayed {
                cell: addr,
                occupant,
            }),
        }
    }

    /// Check whether a move is legal.
    #[must_use]
    pub fn is_legal(&self, addr: CellAddr) -> bool {
        self.check_move(addr).is_ok()
    }

    /// Check whether an action index is legal.
    #[must_use]
    pub fn is_legal_action(&self, k: usize) -> bool {
        self.is_legal(CellAddr::from_action(k))
    }

    /// Play a move for the current player.
    ///
    /// On error nothing changes.
    pub fn apply_move(&mut self, addr: CellAddr) -> Result<(), MoveError> {
        if let Err(err) = self.check_move(addr) {
            debug!(cell = %addr, kind = err.kind(), "move rejected");
            return Err(err);
        }

        let mover = self.player;
        let area = addr.area();
        addr.set(&mut self.cells, Cell::Taken(mover));

        self.areas[area.x][area.y] = evaluate(&self.cells[area.x][area.y]);
        if self.areas[area.x][area.y].is_decided() {
            trace!(area = %area, outcome = %self.areas[area.x][area.y], "area decided");
        }

        self.outcome = evaluate(&self.areas);
        if self.outcome.is_decided() {
            trace!(outcome = %self.outcome, "game decided");
        }

        self.player = mover.other();
        self.current_area = self.restriction_towards(addr.target());
        trace!(cell = %addr, player = %mover, next = %self.current_area, "move applied");
        Ok(())
    }

    /// Play an action index for the current player.
    pub fn apply_action(&mut self, k: usize) -> Result<(), MoveError> {
        self.apply_move(CellAddr::from_action(k))
    }

    /// Get the state after a move, leaving `self` untouched.
    pub fn with_move(&self, addr: CellAddr) -> Result<Self, MoveError> {
        let mut next = *self;
        next.apply_move(addr)?;
        Ok(next)
    }

    /// Get the state after an action index, leaving `self` untouched.
    pub fn with_action(&self, k: usize) -> Result<Self, MoveError> {
        self.with_move(CellAddr::from_action(k))
    }

    /// All legal moves in action order.
    #[must_use]
    pub fn legal_moves(&self) -> MoveList {
        CellAddr::all().filter(|addr| self.is_legal(*addr)).collect()
    }

    /// Legal moves as a mask indexed by action.
    #[must_use]
    pub fn legal_mask(&self) -> [bool; ACTION_SIZE] {
        std::array::from_fn(|k| self.is_legal_action(k))
    }

    /// Legal moves as a mask in the flat 9×9 layout.
    #[must_use]
    pub fn legal_mask_flat(&self) -> Flat<bool> {
        let mask: Nested<bool> = std::array::from_fn(|x| {
            std::array::from_fn(|y| {
                std::array::from_fn(|i| {
                    std::array::from_fn(|j| self.is_legal(CellAddr { x, y, i, j }))
                })
            })
        });
        nested_to_flat(&mask)
    }

    fn restriction_towards(&self, area: Area) -> CurrentArea {
        if self.area_outcome(area).is_undetermined() {
            CurrentArea::Fixed(area)
        } else {
            CurrentArea::Free
        }
    }

    // === Results and views ===

    /// Game result from `player`'s point of view.
    ///
    /// `0` while running, `1` for a win, `-1` for a loss and
    /// [`DRAW_VALUE`] for a draw.
    #[must_use]
    pub fn result_for(&self, player: Player) -> f32 {
        outcome_value(self.outcome, player)
    }

    /// The board in the flat wire format.
    #[must_use]
    pub fn to_flat(&self) -> FlatBoard {
        let signs = self
            .cells
            .map(|area_row| area_row.map(|area| area.map(|row| row.map(Cell::sign))));
        nested_to_flat(&signs)
    }

    /// The flat board seen by `player`: their own marks are `+1`.
    #[must_use]
    pub fn canonical_view(&self, player: Player) -> FlatBoard {
        canonicalize(&self.to_flat(), player)
    }

    /// Compact key for transposition tables: the 81 cells in action order
    /// followed by the current area.
    #[must_use]
    pub fn key(&self) -> String {
        let cells: String = nested_to_actions(&self.cells)
            .iter()
            .map(|cell| match cell {
                Cell::Empty => '-',
                Cell::Taken(player) => player.symbol(),
            })
            .collect();
        format!("{cells} {}", self.current_area)
    }

    // === Snapshots ===

    /// Encode the state as bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, BoardError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a state from bytes produced by [`BoardState::to_bytes`].
    ///
    /// Outcomes are recomputed from the decoded cells; out-of-range
    /// coordinates are rejected.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, BoardError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

/// Numeric value of a game outcome for `player`, as in [`BoardState::result_for`].
#[must_use]
pub fn outcome_value(outcome: Outcome, player: Player) -> f32 {
    match outcome {
        Outcome::Undetermined => 0.0,
        Outcome::Draw => DRAW_VALUE,
        Outcome::Won(winner) if winner == player => 1.0,
        Outcome::Won(_) => -1.0,
    }
}

/// Multiply every entry by `player`'s sign.
///
/// Applying it twice with the same player gives back the input.
#[must_use]
pub fn canonicalize(board: &FlatBoard, player: Player) -> FlatBoard {
    let sign = player.sign();
    board.map(|row| row.map(|value| value * sign))
}
