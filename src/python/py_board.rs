//! Board bindings for Python.

use std::hash::{Hash, Hasher};

use numpy::{PyArray1, PyArray2, PyArrayMethods, PyReadonlyArray2};
use pyo3::prelude::*;
use pyo3::types::PyBytes;
use rustc_hash::FxHasher;

use crate::core::{Outcome, AREA_SIZE, BOARD_SIZE};
use crate::rules::{BoardError, BoardState, MoveError};

use super::py_core::{
    action_from_py, area_from_py, area_to_py, board_from_numpy, board_to_numpy, cell_from_py,
    player_from_py, value_error,
};
use super::IllegalMoveError;

fn move_error(err: MoveError) -> PyErr {
    IllegalMoveError::new_err(err.to_string())
}

fn board_error(err: BoardError) -> PyErr {
    value_error(err)
}

/// Python wrapper for BoardState.
///
/// Moves mutate the board in place; `copy()` or `with_action()` give an
/// independent board.
#[pyclass(name = "Board")]
#[derive(Clone, Debug)]
pub struct PyBoard(pub BoardState);

#[pymethods]
impl PyBoard {
    /// Create the initial position.
    #[new]
    fn new() -> Self {
        Self(BoardState::new())
    }

    /// Rebuild a board from a 9x9 array of -1/0/1, recomputing all outcomes.
    #[staticmethod]
    #[pyo3(signature = (board, player = 1, current_area = None))]
    fn from_numpy(
        board: PyReadonlyArray2<'_, i8>,
        player: i8,
        current_area: Option<(usize, usize)>,
    ) -> PyResult<Self> {
        let flat = board_from_numpy(&board)?;
        let state = BoardState::from_flat(&flat, player_from_py(player)?, area_from_py(current_area)?)
            .map_err(board_error)?;
        Ok(Self(state))
    }

    /// Play `(x, y, i, j)` for the player to move.
    ///
    /// Raises IllegalMoveError if the move breaks the rules.
    fn apply_move(&mut self, x: usize, y: usize, i: usize, j: usize) -> PyResult<()> {
        self.0
            .apply_move(cell_from_py(x, y, i, j)?)
            .map_err(move_error)
    }

    /// Play an action index for the player to move.
    fn apply_action(&mut self, action: usize) -> PyResult<()> {
        self.0
            .apply_action(action_from_py(action)?)
            .map_err(move_error)
    }

    /// The board after an action, leaving this one untouched.
    fn with_action(&self, action: usize) -> PyResult<Self> {
        self.0
            .with_action(action_from_py(action)?)
            .map(Self)
            .map_err(move_error)
    }

    fn is_legal(&self, x: usize, y: usize, i: usize, j: usize) -> PyResult<bool> {
        Ok(self.0.is_legal(cell_from_py(x, y, i, j)?))
    }

    /// Legal moves as `(x, y, i, j)` tuples in action order.
    fn legal_moves(&self) -> Vec<(usize, usize, usize, usize)> {
        self.0
            .legal_moves()
            .iter()
            .map(|a| (a.x, a.y, a.i, a.j))
            .collect()
    }

    /// Legal moves as a bool array of length 81, indexed by action.
    fn legal_mask<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<bool>> {
        PyArray1::from_slice_bound(py, &self.0.legal_mask())
    }

    /// Legal moves as a 9x9 bool array in flat layout.
    fn legal_mask_flat<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyArray2<bool>>> {
        PyArray1::from_iter_bound(py, self.0.legal_mask_flat().iter().flatten().copied())
            .reshape([BOARD_SIZE, BOARD_SIZE])
    }

    /// The 9x9 board: 1 for X, -1 for O, 0 for empty.
    fn to_numpy<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyArray2<i8>>> {
        board_to_numpy(py, &self.0.to_flat())
    }

    /// The 9x9 board with `player`'s marks as 1.
    fn canonical_view<'py>(&self, py: Python<'py>, player: i8) -> PyResult<Bound<'py, PyArray2<i8>>> {
        board_to_numpy(py, &self.0.canonical_view(player_from_py(player)?))
    }

    /// 0 while running, 1 win, -1 loss, a small positive value for a draw.
    fn result_for(&self, player: i8) -> PyResult<f32> {
        Ok(self.0.result_for(player_from_py(player)?))
    }

    /// Area outcomes as a 3x3 float array: 1/-1 for a winner, NaN for a
    /// draw, 0 while undecided.
    fn area_outcomes<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyArray2<f32>>> {
        let values = self.0.area_outcomes().iter().flatten().map(|o| match o {
            Outcome::Undetermined => 0.0,
            Outcome::Draw => f32::NAN,
            Outcome::Won(player) => f32::from(player.sign()),
        });
        PyArray1::from_iter_bound(py, values).reshape([AREA_SIZE, AREA_SIZE])
    }

    #[getter]
    fn current_player(&self) -> i8 {
        self.0.current_player().sign()
    }

    /// `(x, y)` of the area the next move must go to, or None if free.
    #[getter]
    fn current_area(&self) -> Option<(usize, usize)> {
        area_to_py(self.0.current_area())
    }

    /// Sign of the winner, or None.
    #[getter]
    fn winner(&self) -> Option<i8> {
        self.0.outcome().winner().map(|p| p.sign())
    }

    #[getter]
    fn is_terminal(&self) -> bool {
        self.0.is_terminal()
    }

    #[getter]
    fn is_draw(&self) -> bool {
        self.0.outcome() == Outcome::Draw
    }

    #[getter]
    fn move_count(&self) -> usize {
        self.0.move_count()
    }

    /// Compact string key for transposition tables.
    fn key(&self) -> String {
        self.0.key()
    }

    fn copy(&self) -> Self {
        self.clone()
    }

    fn __copy__(&self) -> Self {
        self.clone()
    }

    fn __deepcopy__(&self, _memo: &Bound<'_, PyAny>) -> Self {
        self.clone()
    }

    fn __getstate__<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyBytes>> {
        let bytes = self.0.to_bytes().map_err(board_error)?;
        Ok(PyBytes::new_bound(py, &bytes))
    }

    fn __setstate__(&mut self, state: &[u8]) -> PyResult<()> {
        self.0 = BoardState::from_bytes(state).map_err(board_error)?;
        Ok(())
    }

    fn __str__(&self) -> String {
        self.0.to_string()
    }

    fn __repr__(&self) -> String {
        format!(
            "Board(moves={}, to_move={}, area={}, outcome={})",
            self.0.move_count(),
            self.0.current_player().symbol(),
            self.0.current_area(),
            self.0.outcome()
        )
    }

    fn __eq__(&self, other: &Self) -> bool {
        self.0 == other.0
    }

    fn __hash__(&self) -> u64 {
        let mut hasher = FxHasher::default();
        self.0.hash(&mut hasher);
        hasher.finish()
    }
}
