//! Coordinate mapping bindings and shared conversions.
//!
//! Players cross the boundary as signs (`1` for X, `-1` for O) and areas as
//! `(x, y)` tuples or `None` for a free choice.

use numpy::{PyArray1, PyArray2, PyArrayMethods, PyReadonlyArray2};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::core::{
    Area, CellAddr, CurrentArea, FlatBoard, FlatPos, Player, ACTION_SIZE, AREA_SIZE, BOARD_SIZE,
};

pub(crate) fn value_error(msg: impl std::fmt::Display) -> PyErr {
    PyErr::new::<PyValueError, _>(msg.to_string())
}

pub(crate) fn player_from_py(sign: i8) -> PyResult<Player> {
    Player::from_sign(sign).ok_or_else(|| value_error(format!("player must be 1 or -1, got {sign}")))
}

pub(crate) fn area_from_py(area: Option<(usize, usize)>) -> PyResult<CurrentArea> {
    match area {
        None => Ok(CurrentArea::Free),
        Some((x, y)) if x < AREA_SIZE && y < AREA_SIZE => Ok(CurrentArea::Fixed(Area { x, y })),
        Some((x, y)) => Err(value_error(format!("area ({x}, {y}) out of range"))),
    }
}

pub(crate) fn area_to_py(area: CurrentArea) -> Option<(usize, usize)> {
    area.fixed().map(|a| (a.x, a.y))
}

pub(crate) fn cell_from_py(x: usize, y: usize, i: usize, j: usize) -> PyResult<CellAddr> {
    if [x, y, i, j].iter().all(|&v| v < AREA_SIZE) {
        Ok(CellAddr { x, y, i, j })
    } else {
        Err(value_error(format!("cell ({x}, {y}, {i}, {j}) out of range")))
    }
}

pub(crate) fn action_from_py(action: usize) -> PyResult<usize> {
    if action < ACTION_SIZE {
        Ok(action)
    } else {
        Err(value_error(format!("action {action} out of range")))
    }
}

pub(crate) fn board_from_numpy(board: &PyReadonlyArray2<'_, i8>) -> PyResult<FlatBoard> {
    let view = board.as_array();
    if view.dim() != (BOARD_SIZE, BOARD_SIZE) {
        return Err(value_error(format!(
            "expected a {BOARD_SIZE}x{BOARD_SIZE} board, got {:?}",
            view.dim()
        )));
    }
    Ok(std::array::from_fn(|m| std::array::from_fn(|n| view[[m, n]])))
}

pub(crate) fn board_to_numpy<'py>(
    py: Python<'py>,
    board: &FlatBoard,
) -> PyResult<Bound<'py, PyArray2<i8>>> {
    PyArray1::from_iter_bound(py, board.iter().flatten().copied())
        .reshape([BOARD_SIZE, BOARD_SIZE])
}

/// Nested `(x, y, i, j)` to flat `(m, n)`.
#[pyfunction]
pub fn to_flat(x: usize, y: usize, i: usize, j: usize) -> PyResult<(usize, usize)> {
    let pos = cell_from_py(x, y, i, j)?.to_flat();
    Ok((pos.m, pos.n))
}

/// Flat `(m, n)` to nested `(x, y, i, j)`.
#[pyfunction]
pub fn to_nested(m: usize, n: usize) -> PyResult<(usize, usize, usize, usize)> {
    if m >= BOARD_SIZE || n >= BOARD_SIZE {
        return Err(value_error(format!("flat position ({m}, {n}) out of range")));
    }
    let addr = FlatPos { m, n }.to_nested();
    Ok((addr.x, addr.y, addr.i, addr.j))
}

/// Nested `(x, y, i, j)` to action index.
#[pyfunction]
pub fn to_action(x: usize, y: usize, i: usize, j: usize) -> PyResult<usize> {
    Ok(cell_from_py(x, y, i, j)?.to_action())
}

/// Action index to nested `(x, y, i, j)`.
#[pyfunction]
pub fn from_action(action: usize) -> PyResult<(usize, usize, usize, usize)> {
    let addr = CellAddr::from_action(action_from_py(action)?);
    Ok((addr.x, addr.y, addr.i, addr.j))
}
