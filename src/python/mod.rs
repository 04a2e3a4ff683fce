//! Python bindings for the Ultimate Tic-Tac-Toe engine.
//!
//! # Quick Start
//!
//! ```python
//! import pickle
//! import uttt_core as ut
//!
//! board = ut.Board()
//! board.apply_move(0, 0, 1, 1)
//! assert board.current_area == (1, 1)
//!
//! try:
//!     board.apply_move(0, 0, 0, 0)
//! except ut.IllegalMoveError as err:
//!     print(err)  # the next area is (1, 1), not allowed to play in (0, 0)
//!
//! planes = ut.encode(board)            # float32, (2, 9, 9)
//! copy = pickle.loads(pickle.dumps(board))
//! assert copy == board
//!
//! orbit = ut.symmetries(board.canonical_view(board.current_player),
//!                       board.legal_mask() / 9.0, board.current_area)
//! assert len(orbit) == 64
//! ```

use pyo3::create_exception;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

mod py_board;
mod py_core;
mod py_nn;
mod py_symmetry;
mod py_training;

pub use py_board::*;
pub use py_core::*;
pub use py_nn::*;
pub use py_symmetry::*;
pub use py_training::*;

create_exception!(
    uttt_core,
    IllegalMoveError,
    PyValueError,
    "Raised when a move breaks the rules; the board is left unchanged."
);

/// uttt_core: Ultimate Tic-Tac-Toe rules for AlphaZero-style training.
#[pymodule]
fn uttt_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("IllegalMoveError", m.py().get_type_bound::<IllegalMoveError>())?;

    // Board
    m.add_class::<PyBoard>()?;

    // Coordinate mapping
    m.add_function(wrap_pyfunction!(to_flat, m)?)?;
    m.add_function(wrap_pyfunction!(to_nested, m)?)?;
    m.add_function(wrap_pyfunction!(to_action, m)?)?;
    m.add_function(wrap_pyfunction!(from_action, m)?)?;

    // Augmentation and encoding
    m.add_function(wrap_pyfunction!(symmetries, m)?)?;
    m.add_function(wrap_pyfunction!(encode, m)?)?;

    // Networks, training data and self-play
    m.add_class::<PyPolicyValueNetwork>()?;
    m.add_class::<PyTrainingSample>()?;
    m.add_class::<PyTrajectory>()?;
    m.add_class::<PyExperienceBuffer>()?;
    m.add_class::<PySelfPlayConfig>()?;
    m.add_class::<PySelfPlayWorker>()?;

    Ok(())
}
