//! Wrapper of Gymnasium environments implemented in Python.
use crate::util::pyobj_to_arrayd;
use anyhow::Result;
use log::{info, trace, warn};
use ndarray::ArrayD;
use numpy::PyArrayDyn;
use pyo3::{
    types::{IntoPyDict, PyTuple},
    PyObject, Python,
};
use serde::{Deserialize, Serialize};
use stint_core::{Env, Frame, Step};

/// Observation of a [`GymEnv`]: a float array.
#[derive(Clone, Debug)]
pub struct GymObs(pub ArrayD<f32>);

impl From<ArrayD<f32>> for GymObs {
    fn from(obs: ArrayD<f32>) -> Self {
        Self(obs)
    }
}

/// Action of a [`GymEnv`]: an index into a discrete action space.
#[derive(Clone, Debug)]
pub struct GymAct(pub i64);

/// Configuration of [`GymEnv`].
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct GymEnvConfig {
    /// Registered name of the environment.
    pub name: String,

    /// Gymnasium render mode, e.g. `rgb_array`.
    pub render_mode: Option<String>,

    /// Optional step-count cap; a step hitting the cap is marked truncated.
    pub max_steps: Option<usize>,
}

impl Default for GymEnvConfig {
    fn default() -> Self {
        Self {
            name: "".to_string(),
            render_mode: None,
            max_steps: None,
        }
    }
}

impl GymEnvConfig {
    /// Set the name of the environment.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the render mode of the environment.
    pub fn render_mode(mut self, render_mode: Option<String>) -> Self {
        self.render_mode = render_mode;
        self
    }

    /// Set the maximum number of steps before an episode is truncated.
    pub fn max_steps(mut self, v: Option<usize>) -> Self {
        self.max_steps = v;
        self
    }
}

/// An environment registered in Gymnasium.
pub struct GymEnv {
    env: PyObject,

    count_steps: usize,

    max_steps: Option<usize>,

    /// Initial seed.
    ///
    /// This value will be used at the first call of the reset method.
    initial_seed: Option<i64>,
}

impl Env for GymEnv {
    type Config = GymEnvConfig;
    type Obs = GymObs;
    type Act = GymAct;

    /// Constructs [`GymEnv`] by calling `gymnasium.make`.
    ///
    /// * `seed` - The seed value of the random number generator.
    ///   This value will be used at the first call of the reset method.
    fn build(config: &Self::Config, seed: i64) -> Result<Self> {
        let env = Python::with_gil(|py| -> Result<PyObject> {
            let gym = py.import("gymnasium")?;
            let kwargs = config
                .render_mode
                .as_ref()
                .map(|mode| vec![("render_mode", mode.as_str())].into_py_dict(py));
            let env = gym.getattr("make")?.call((config.name.as_str(),), kwargs)?;
            Ok(env.into())
        })?;
        info!("Built Gymnasium environment {}", config.name);

        Ok(Self {
            env,
            count_steps: 0,
            max_steps: config.max_steps,
            initial_seed: Some(seed),
        })
    }

    /// Resets the environment and returns the observation half of the
    /// `(obs, info)` tuple.
    fn reset(&mut self) -> Result<GymObs> {
        trace!("GymEnv::reset()");
        self.count_steps = 0;

        Python::with_gil(|py| -> Result<GymObs> {
            let ret = if let Some(seed) = self.initial_seed.take() {
                let kwargs = vec![("seed", seed)].into_py_dict(py);
                self.env.call_method(py, "reset", (), Some(kwargs))?
            } else {
                self.env.call_method0(py, "reset")?
            };
            let ret: &PyTuple = ret.extract(py)?;
            let obs = pyobj_to_arrayd::<f32, f32>(ret.get_item(0))?;
            Ok(GymObs(obs))
        })
    }

    /// Runs a step of the environment's dynamics, mapping the
    /// `(obs, reward, terminated, truncated, info)` tuple.
    fn step(&mut self, act: &GymAct) -> Result<Step<Self>> {
        trace!("GymEnv::step()");

        let step = Python::with_gil(|py| -> Result<Step<Self>> {
            let ret = self.env.call_method1(py, "step", (act.0,))?;
            let ret: &PyTuple = ret.extract(py)?;
            let obs = GymObs(pyobj_to_arrayd::<f32, f32>(ret.get_item(0))?);
            let reward = ret.get_item(1).extract::<f64>()? as f32;
            let is_terminated: bool = ret.get_item(2).extract()?;
            let is_truncated: bool = ret.get_item(3).extract()?;
            Ok(Step::new(obs, reward, is_terminated, is_truncated))
        })?;

        self.count_steps += 1;
        let step = match self.max_steps {
            Some(max_steps) if self.count_steps >= max_steps => Step {
                is_truncated: true,
                ..step
            },
            _ => step,
        };

        Ok(step)
    }

    /// Renders the current state as an `rgb_array` frame.
    fn render(&mut self) -> Result<Frame> {
        Python::with_gil(|py| -> Result<Frame> {
            let ret = self.env.call_method0(py, "render")?;
            let arr: &PyArrayDyn<u8> = ret.extract(py)?;
            let arr = arr.to_owned_array();
            let (height, width) = match arr.shape() {
                [h, w, 3] => (*h as u32, *w as u32),
                shape => anyhow::bail!("expected an RGB frame, got shape {:?}", shape),
            };
            let data = arr.as_standard_layout().to_owned().into_raw_vec();
            Ok(Frame::new(width, height, data))
        })
    }
}

impl Drop for GymEnv {
    fn drop(&mut self) {
        let res = Python::with_gil(|py| -> pyo3::PyResult<()> {
            self.env.call_method0(py, "close")?;
            Ok(())
        });
        if let Err(e) = res {
            warn!("Failed to close the environment: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::GymEnvConfig;
    use anyhow::Result;

    #[test]
    fn config_serde_round_trip() -> Result<()> {
        let config = GymEnvConfig::default()
            .name("CartPole-v1")
            .render_mode(Some("rgb_array".to_string()));
        let yaml = serde_yaml::to_string(&config)?;
        let config_: GymEnvConfig = serde_yaml::from_str(&yaml)?;
        assert_eq!(config, config_);
        Ok(())
    }
}
