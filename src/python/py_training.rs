//! Training data and self-play bindings for Python.

use numpy::{PyArray1, PyArray2, PyArray3, PyArrayMethods, PyReadonlyArray2};
use pyo3::prelude::*;

use crate::core::{Outcome, ACTION_SIZE, BOARD_SIZE};
use crate::nn::TwoPlaneEncoder;
use crate::training::{
    ExperienceBuffer, SelfPlayConfig, SelfPlayWorker, TrainingSample, Trajectory,
};

use super::py_core::{area_from_py, area_to_py, board_from_numpy, board_to_numpy};
use super::py_nn::PyPolicyValueNetwork;
use super::py_symmetry::{augment_config, check_policy};

/// Python wrapper for TrainingSample.
#[pyclass(name = "TrainingSample")]
#[derive(Clone)]
pub struct PyTrainingSample(pub TrainingSample);

#[pymethods]
impl PyTrainingSample {
    #[new]
    #[pyo3(signature = (board, policy, value, current_area = None))]
    fn new(
        board: PyReadonlyArray2<'_, i8>,
        policy: Vec<f32>,
        value: f32,
        current_area: Option<(usize, usize)>,
    ) -> PyResult<Self> {
        check_policy(&policy)?;
        let board = board_from_numpy(&board)?;
        Ok(Self(TrainingSample::new(
            board,
            policy,
            area_from_py(current_area)?,
            value,
        )))
    }

    /// Canonical board as a 9x9 int8 array.
    #[getter]
    fn board<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyArray2<i8>>> {
        board_to_numpy(py, &self.0.board)
    }

    #[getter]
    fn policy<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f32>> {
        PyArray1::from_slice_bound(py, &self.0.policy)
    }

    #[getter]
    fn current_area(&self) -> Option<(usize, usize)> {
        area_to_py(self.0.current_area)
    }

    #[getter]
    fn value(&self) -> f32 {
        self.0.value
    }

    /// Augmented copies of this sample; the value is unchanged.
    #[pyo3(signature = (group = "full", dedup = false))]
    fn symmetries(&self, group: &str, dedup: bool) -> PyResult<Vec<PyTrainingSample>> {
        let config = augment_config(group, dedup)?;
        Ok(self
            .0
            .symmetries(&config)
            .into_iter()
            .map(PyTrainingSample)
            .collect())
    }

    fn __repr__(&self) -> String {
        format!(
            "TrainingSample(area={}, value={})",
            self.0.current_area, self.0.value
        )
    }
}

/// Python wrapper for Trajectory.
#[pyclass(name = "Trajectory")]
#[derive(Clone)]
pub struct PyTrajectory(pub Trajectory);

#[pymethods]
impl PyTrajectory {
    #[getter]
    fn seed(&self) -> u64 {
        self.0.seed
    }

    /// Sign of the winner, or None for a draw or unfinished game.
    #[getter]
    fn winner(&self) -> Option<i8> {
        self.0.outcome.winner().map(|p| p.sign())
    }

    #[getter]
    fn is_draw(&self) -> bool {
        self.0.outcome == Outcome::Draw
    }

    /// Policy targets of every step as a [len, 81] array.
    fn policies<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyArray2<f32>>> {
        let flat: Vec<f32> = self.0.steps.iter().flat_map(|s| s.policy.iter().copied()).collect();
        PyArray1::from_vec_bound(py, flat).reshape([self.0.len(), ACTION_SIZE])
    }

    fn to_training_samples(&self) -> Vec<PyTrainingSample> {
        self.0
            .to_training_samples()
            .into_iter()
            .map(PyTrainingSample)
            .collect()
    }

    fn __len__(&self) -> usize {
        self.0.len()
    }

    fn __repr__(&self) -> String {
        format!(
            "Trajectory(seed={}, len={}, outcome={})",
            self.0.seed,
            self.0.len(),
            self.0.outcome
        )
    }
}

/// Python wrapper for ExperienceBuffer.
#[pyclass(name = "ExperienceBuffer")]
pub struct PyExperienceBuffer {
    inner: ExperienceBuffer,
}

#[pymethods]
impl PyExperienceBuffer {
    #[new]
    #[pyo3(signature = (max_trajectories = 10000))]
    fn new(max_trajectories: usize) -> Self {
        Self {
            inner: ExperienceBuffer::new(max_trajectories),
        }
    }

    fn push(&mut self, trajectory: &PyTrajectory) {
        self.inner.push(trajectory.0.clone());
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }

    #[getter]
    fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    fn total_steps(&self) -> usize {
        self.inner.total_steps()
    }

    fn clear(&mut self) {
        self.inner.clear();
    }

    /// Sample a random batch of training samples.
    fn sample_batch(&self, batch_size: usize, seed: u64) -> Vec<PyTrainingSample> {
        self.inner
            .sample_batch(batch_size, seed)
            .into_iter()
            .map(PyTrainingSample)
            .collect()
    }

    /// Get all samples as batched numpy arrays.
    ///
    /// Returns (boards, policies, values):
    /// - boards: [N, 9, 9] float32, canonical
    /// - policies: [N, 81] float32
    /// - values: [N] float32
    ///
    /// With `augment=True` every sample is expanded to its symmetries first.
    #[pyo3(signature = (augment = false, group = "full", dedup = false))]
    fn to_numpy_batch<'py>(
        &self,
        py: Python<'py>,
        augment: bool,
        group: &str,
        dedup: bool,
    ) -> PyResult<(
        Bound<'py, PyArray3<f32>>,
        Bound<'py, PyArray2<f32>>,
        Bound<'py, PyArray1<f32>>,
    )> {
        let samples = if augment {
            self.inner.augmented_samples(&augment_config(group, dedup)?)
        } else {
            self.inner.to_training_samples()
        };

        let n = samples.len();
        let mut boards: Vec<f32> = Vec::with_capacity(n * BOARD_SIZE * BOARD_SIZE);
        let mut policies: Vec<f32> = Vec::with_capacity(n * ACTION_SIZE);
        let mut values: Vec<f32> = Vec::with_capacity(n);

        for sample in &samples {
            boards.extend(sample.board.iter().flatten().map(|&v| f32::from(v)));
            policies.extend_from_slice(&sample.policy);
            values.push(sample.value);
        }

        let boards = PyArray1::from_vec_bound(py, boards)
            .reshape([n, BOARD_SIZE, BOARD_SIZE])?;
        let policies = PyArray1::from_vec_bound(py, policies)
            .reshape([n, ACTION_SIZE])?;
        let values = PyArray1::from_vec_bound(py, values);

        Ok((boards, policies, values))
    }

    fn __repr__(&self) -> String {
        format!(
            "ExperienceBuffer(len={}, capacity={})",
            self.inner.len(),
            self.inner.capacity()
        )
    }
}

/// Python wrapper for SelfPlayConfig.
#[pyclass(name = "SelfPlayConfig")]
#[derive(Clone)]
pub struct PySelfPlayConfig(pub SelfPlayConfig);

#[pymethods]
impl PySelfPlayConfig {
    #[new]
    #[pyo3(signature = (temperature = 1.0, temperature_threshold = 15, seed_offset = 0))]
    fn new(temperature: f64, temperature_threshold: usize, seed_offset: u64) -> Self {
        Self(
            SelfPlayConfig::default()
                .with_temperature(temperature)
                .with_temperature_threshold(temperature_threshold)
                .with_seed_offset(seed_offset),
        )
    }

    #[getter]
    fn temperature(&self) -> f64 {
        self.0.temperature
    }

    #[getter]
    fn temperature_threshold(&self) -> usize {
        self.0.temperature_threshold
    }

    #[getter]
    fn seed_offset(&self) -> u64 {
        self.0.seed_offset
    }

    fn __repr__(&self) -> String {
        format!(
            "SelfPlayConfig(temp={}, threshold={}, seed_offset={})",
            self.0.temperature, self.0.temperature_threshold, self.0.seed_offset
        )
    }
}

/// Self-play worker using the two-plane encoder.
#[pyclass(name = "SelfPlayWorker")]
pub struct PySelfPlayWorker {
    inner: SelfPlayWorker,
}

#[pymethods]
impl PySelfPlayWorker {
    #[new]
    #[pyo3(signature = (config = None))]
    fn new(config: Option<PySelfPlayConfig>) -> Self {
        let config = config.map(|c| c.0).unwrap_or_default();
        Self {
            inner: SelfPlayWorker::new(Box::new(TwoPlaneEncoder::new()), config),
        }
    }

    /// Play one game with the given network.
    fn play_game(&self, network: &PyPolicyValueNetwork, seed: u64) -> PyTrajectory {
        PyTrajectory(self.inner.play_game(network, seed))
    }

    /// Play `count` games with consecutive seeds.
    fn play_games(&self, network: &PyPolicyValueNetwork, count: usize) -> Vec<PyTrajectory> {
        self.inner
            .play_games(network, count)
            .into_iter()
            .map(PyTrajectory)
            .collect()
    }
}
