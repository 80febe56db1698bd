//! RLlib's PPO implementation bound as the policy-optimization engine.
use crate::gym::{GymAct, GymEnv, GymObs};
use anyhow::Result;
use log::info;
use numpy::PyArrayDyn;
use pyo3::{types::PyDict, PyAny, PyObject, PyResult, Python};
use serde::{Deserialize, Serialize};
use std::path::Path;
use stint_core::{Agent, Policy, TrainStats};

/// Configuration of [`Ppo`].
///
/// Defaults mirror RLlib's own; the binary overrides them per run.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct PpoConfig {
    /// Discount factor.
    pub gamma: f64,

    /// Learning rate.
    pub lr: f64,

    /// KL-divergence regularization coefficient.
    pub kl_coeff: f64,

    /// Training batch size in environment steps.
    pub train_batch_size: i64,

    /// Number of GPUs allocated to the learner.
    pub num_gpus: i64,

    /// Number of parallel environment-runner workers.
    pub num_env_runners: i64,
}

impl Default for PpoConfig {
    fn default() -> Self {
        Self {
            gamma: 0.99,
            lr: 5e-5,
            kl_coeff: 0.2,
            train_batch_size: 4000,
            num_gpus: 0,
            num_env_runners: 2,
        }
    }
}

impl PpoConfig {
    /// Sets the discount factor.
    pub fn gamma(mut self, v: f64) -> Self {
        self.gamma = v;
        self
    }

    /// Sets the learning rate.
    pub fn lr(mut self, v: f64) -> Self {
        self.lr = v;
        self
    }

    /// Sets the KL-divergence regularization coefficient.
    pub fn kl_coeff(mut self, v: f64) -> Self {
        self.kl_coeff = v;
        self
    }

    /// Sets the training batch size in environment steps.
    pub fn train_batch_size(mut self, v: i64) -> Self {
        self.train_batch_size = v;
        self
    }

    /// Sets the number of GPUs allocated to the learner.
    pub fn num_gpus(mut self, v: i64) -> Self {
        self.num_gpus = v;
        self
    }

    /// Sets the number of parallel environment-runner workers.
    pub fn num_env_runners(mut self, v: i64) -> Self {
        self.num_env_runners = v;
        self
    }
}

/// RLlib's PPO algorithm behind the [`Agent`] interface.
///
/// The learner and its sampling workers live in the Python process tree;
/// every method below is one blocking round trip over the GIL.
pub struct Ppo {
    algo: PyObject,
}

impl Ppo {
    /// Assembles the `PPOConfig` chain on the Python side.
    fn build_config<'py>(py: Python<'py>, config: &PpoConfig) -> PyResult<&'py PyAny> {
        let module = py.import("ray.rllib.algorithms.ppo")?;
        let mut cfg = module.getattr("PPOConfig")?.call0()?;

        let kwargs = PyDict::new(py);
        kwargs.set_item("gamma", config.gamma)?;
        kwargs.set_item("lr", config.lr)?;
        kwargs.set_item("kl_coeff", config.kl_coeff)?;
        kwargs.set_item("train_batch_size", config.train_batch_size)?;
        cfg = cfg.call_method("training", (), Some(kwargs))?;

        let kwargs = PyDict::new(py);
        kwargs.set_item("num_gpus", config.num_gpus)?;
        cfg = cfg.call_method("resources", (), Some(kwargs))?;

        let kwargs = PyDict::new(py);
        kwargs.set_item("num_env_runners", config.num_env_runners)?;
        cfg = cfg.call_method("env_runners", (), Some(kwargs))?;

        Ok(cfg)
    }
}

impl Policy<GymEnv> for Ppo {
    /// Computes a single action with exploration disabled.
    fn compute_action(&mut self, obs: &GymObs) -> Result<GymAct> {
        Python::with_gil(|py| -> Result<GymAct> {
            let obs = PyArrayDyn::<f32>::from_array(py, &obs.0);
            let kwargs = PyDict::new(py);
            kwargs.set_item("explore", false)?;
            let act = self
                .algo
                .call_method(py, "compute_single_action", (obs,), Some(kwargs))?;
            Ok(GymAct(act.extract::<i64>(py)?))
        })
    }
}

impl Agent<GymEnv> for Ppo {
    type Config = PpoConfig;

    fn build(env_id: &str, config: &PpoConfig) -> Result<Self> {
        let algo = Python::with_gil(|py| -> Result<PyObject> {
            let cfg = Self::build_config(py, config)?;
            let kwargs = PyDict::new(py);
            kwargs.set_item("env", env_id)?;
            let algo = cfg.call_method("build", (), Some(kwargs))?;
            Ok(algo.into())
        })?;
        info!("Built PPO learner for {}", env_id);
        Ok(Self { algo })
    }

    /// One blocking `algo.train()` call; sampling across the env runners
    /// happens inside it.
    fn train_step(&mut self) -> Result<TrainStats> {
        Python::with_gil(|py| -> Result<TrainStats> {
            let result = self.algo.call_method0(py, "train")?;
            let reward = result
                .as_ref(py)
                .get_item("env_runners")?
                .get_item("episode_reward_mean")?
                .extract::<f64>()? as f32;
            Ok(TrainStats {
                episode_reward_mean: reward,
            })
        })
    }

    fn save_params(&self, path: &Path) -> Result<()> {
        let path = path.to_string_lossy();
        Python::with_gil(|py| -> Result<()> {
            self.algo.call_method1(py, "save", (path.as_ref(),))?;
            Ok(())
        })
    }

    fn load_params(&mut self, path: &Path) -> Result<()> {
        let path = path.to_string_lossy();
        Python::with_gil(|py| -> Result<()> {
            self.algo.call_method1(py, "restore", (path.as_ref(),))?;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::PpoConfig;
    use anyhow::Result;

    #[test]
    fn builder_overrides_defaults() {
        let config = PpoConfig::default()
            .gamma(0.9)
            .lr(0.01)
            .kl_coeff(0.3)
            .train_batch_size(128)
            .num_gpus(0)
            .num_env_runners(1);
        assert_eq!(config.gamma, 0.9);
        assert_eq!(config.lr, 0.01);
        assert_eq!(config.kl_coeff, 0.3);
        assert_eq!(config.train_batch_size, 128);
        assert_eq!(config.num_env_runners, 1);
    }

    #[test]
    fn config_serde_round_trip() -> Result<()> {
        let config = PpoConfig::default().gamma(0.9).train_batch_size(128);
        let yaml = serde_yaml::to_string(&config)?;
        let config_: PpoConfig = serde_yaml::from_str(&yaml)?;
        assert_eq!(config, config_);
        Ok(())
    }
}
