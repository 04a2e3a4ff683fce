//! Text rendering of a board.
//!
//! ```text
//! X-- --- ---
//! -O- --- ---
//! --- --- ---
//!
//! --- --- ---
//! ...
//!
//! game: undetermined
//! areas:
//! ...
//! ...
//! ...
//! to move: player X
//! current area: (1, 1)
//! ```

use std::fmt;

use crate::core::{to_nested, Cell, FlatPos, Outcome, AREA_SIZE, BOARD_SIZE};

use super::board::BoardState;

fn cell_symbol(cell: Cell) -> char {
    match cell {
        Cell::Empty => '-',
        Cell::Taken(player) => player.symbol(),
    }
}

fn outcome_symbol(outcome: Outcome) -> char {
    match outcome {
        Outcome::Undetermined => '.',
        Outcome::Draw => '#',
        Outcome::Won(player) => player.symbol(),
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for m in 0..BOARD_SIZE {
            if m > 0 && m % AREA_SIZE == 0 {
                writeln!(f)?;
            }
            for n in 0..BOARD_SIZE {
                if n > 0 && n % AREA_SIZE == 0 {
                    write!(f, " ")?;
                }
                let addr = to_nested(FlatPos { m, n });
                write!(f, "{}", cell_symbol(self.cell(addr)))?;
            }
            writeln!(f)?;
        }

        writeln!(f)?;
        writeln!(f, "game: {}", self.outcome())?;
        writeln!(f, "areas:")?;
        for row in self.area_outcomes() {
            let line: String = row.iter().map(|o| outcome_symbol(*o)).collect();
            writeln!(f, "{line}")?;
        }
        writeln!(f, "to move: {}", self.current_player())?;
        write!(f, "current area: {}", self.current_area())
    }
}
