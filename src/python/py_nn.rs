//! Network bindings for Python.

use numpy::{PyArray1, PyArray3, PyArrayMethods};
use pyo3::prelude::*;
use tracing::warn;

use crate::core::{ACTION_SIZE, BOARD_SIZE};
use crate::nn::{EncodedState, PolicyValueNetwork, StateEncoder, TwoPlaneEncoder};

use super::py_board::PyBoard;
use super::py_core::player_from_py;

/// Encode a board as a float32 array of shape (2, 9, 9).
///
/// Plane 0 is the board from `perspective`'s side, plane 1 the legal mask.
#[pyfunction]
#[pyo3(signature = (board, perspective = None))]
pub fn encode<'py>(
    py: Python<'py>,
    board: &PyBoard,
    perspective: Option<i8>,
) -> PyResult<Bound<'py, PyArray3<f32>>> {
    let perspective = match perspective {
        Some(sign) => player_from_py(sign)?,
        None => board.0.current_player(),
    };
    let encoded = TwoPlaneEncoder::new().encode(&board.0, perspective);
    PyArray1::from_vec_bound(py, encoded.tensor).reshape([TwoPlaneEncoder::PLANES, BOARD_SIZE, BOARD_SIZE])
}

/// Python-implemented PolicyValueNetwork wrapper.
///
/// The callable receives a float32 array of shape (2, 9, 9) and returns
/// `(policy, value)`: 81 floats and one float.
#[pyclass(name = "PolicyValueNetwork")]
pub struct PyPolicyValueNetwork {
    callback: PyObject,
}

#[pymethods]
impl PyPolicyValueNetwork {
    #[new]
    fn new(callback: PyObject) -> Self {
        Self { callback }
    }

    /// Call the network on an encoded board.
    fn predict(&self, py: Python<'_>, board: &PyBoard) -> PyResult<(Vec<f32>, f32)> {
        let encoded = TwoPlaneEncoder::new().encode(&board.0, board.0.current_player());
        self.call(py, &encoded)
    }
}

impl PyPolicyValueNetwork {
    fn call(&self, py: Python<'_>, encoded: &EncodedState) -> PyResult<(Vec<f32>, f32)> {
        let array = PyArray1::from_slice_bound(py, &encoded.tensor).reshape(encoded.shape.clone())?;
        let result = self.callback.call1(py, (array,))?;
        result.extract(py)
    }

    fn fallback_prediction() -> (Vec<f32>, f32) {
        (vec![1.0 / ACTION_SIZE as f32; ACTION_SIZE], 0.0)
    }
}

impl PolicyValueNetwork for PyPolicyValueNetwork {
    fn predict(&self, encoded: &EncodedState) -> (Vec<f32>, f32) {
        Python::with_gil(|py| match self.call(py, encoded) {
            Ok((policy, value)) if policy.len() == ACTION_SIZE => (policy, value),
            Ok((policy, _)) => {
                warn!(len = policy.len(), "network returned a policy of the wrong length");
                Self::fallback_prediction()
            }
            Err(err) => {
                warn!(error = %err, "network callback failed");
                Self::fallback_prediction()
            }
        })
    }
}
