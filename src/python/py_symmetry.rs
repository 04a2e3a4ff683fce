//! Symmetry augmentation bindings for Python.

use numpy::{PyArray1, PyArray2, PyReadonlyArray2};
use pyo3::prelude::*;

use crate::core::ACTION_SIZE;
use crate::symmetry::{AugmentConfig, SymmetryGroup, SymmetrySample};

use super::py_core::{area_from_py, area_to_py, board_from_numpy, board_to_numpy, value_error};

type PySample<'py> = (
    Bound<'py, PyArray2<i8>>,
    Bound<'py, PyArray1<f32>>,
    Option<(usize, usize)>,
);

pub(crate) fn augment_config(group: &str, dedup: bool) -> PyResult<AugmentConfig> {
    let group = match group {
        "full" => SymmetryGroup::Full,
        "dihedral" => SymmetryGroup::Dihedral,
        other => {
            return Err(value_error(format!(
                "unknown symmetry group {other:?}, expected \"full\" or \"dihedral\""
            )))
        }
    };
    Ok(AugmentConfig::default().with_group(group).with_dedup(dedup))
}

pub(crate) fn check_policy(policy: &[f32]) -> PyResult<()> {
    if policy.len() == ACTION_SIZE {
        Ok(())
    } else {
        Err(value_error(format!(
            "expected {ACTION_SIZE} policy values, got {}",
            policy.len()
        )))
    }
}

/// Equivalent `(board, policy, current_area)` triples, untransformed first.
///
/// `group="full"` yields 64 entries, `group="dihedral"` the 8 rotations and
/// reflections of the whole board.
#[pyfunction]
#[pyo3(signature = (board, policy, current_area = None, group = "full", dedup = false))]
pub fn symmetries<'py>(
    py: Python<'py>,
    board: PyReadonlyArray2<'py, i8>,
    policy: Vec<f32>,
    current_area: Option<(usize, usize)>,
    group: &str,
    dedup: bool,
) -> PyResult<Vec<PySample<'py>>> {
    check_policy(&policy)?;
    let config = augment_config(group, dedup)?;
    let sample = SymmetrySample::new(board_from_numpy(&board)?, policy, area_from_py(current_area)?);

    sample
        .symmetries(&config)
        .into_iter()
        .map(|s| {
            Ok((
                board_to_numpy(py, &s.board)?,
                PyArray1::from_vec_bound(py, s.policy),
                area_to_py(s.current_area),
            ))
        })
        .collect()
}
