//! Top-level sequencing of a single experiment run.
use crate::{
    checkpoint, error::StintError, paths::ArtifactPaths, Agent, Env, Evaluator, FrameSink,
    Runtime, Trainer,
};
use anyhow::Result;
use log::info;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::{Path, PathBuf},
};

/// How the policy of a run is produced.
///
/// Exactly one of the two occurs per run, never both, never neither;
/// evaluation follows either.
#[derive(Clone, Debug, PartialEq)]
pub enum Mode {
    /// Train a fresh policy, then persist it.
    Train,

    /// Restore a previously persisted policy from the given path.
    Load(PathBuf),
}

/// Configuration of an [`Experiment`].
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct ExperimentConfig {
    /// Name of the environment the engine trains against.
    pub env_id: String,

    /// Number of training iterations.
    pub train_iters: usize,

    /// Number of evaluation episodes.
    pub eval_episodes: usize,

    /// Path to save the model to, or to load it from when `load` is set.
    pub model_path: Option<String>,

    /// Restore a persisted policy instead of training.
    pub load: bool,

    /// Random seed of the evaluation environment.
    pub seed: i64,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            env_id: "".to_string(),
            train_iters: 0,
            eval_episodes: 0,
            model_path: None,
            load: false,
            seed: 0,
        }
    }
}

impl ExperimentConfig {
    /// Sets the environment name.
    pub fn env_id(mut self, v: impl Into<String>) -> Self {
        self.env_id = v.into();
        self
    }

    /// Sets the number of training iterations.
    pub fn train_iters(mut self, v: usize) -> Self {
        self.train_iters = v;
        self
    }

    /// Sets the number of evaluation episodes.
    pub fn eval_episodes(mut self, v: usize) -> Self {
        self.eval_episodes = v;
        self
    }

    /// Sets the model path.
    pub fn model_path(mut self, v: Option<String>) -> Self {
        self.model_path = v;
        self
    }

    /// Switches between restoring a persisted policy and training one.
    pub fn load(mut self, v: bool) -> Self {
        self.load = v;
        self
    }

    /// Sets the random seed of the evaluation environment.
    pub fn seed(mut self, v: i64) -> Self {
        self.seed = v;
        self
    }

    /// Resolves the load-vs-train choice.
    ///
    /// A load request without a model path is a user error, reported here
    /// so that it surfaces before the engine is built or any runtime
    /// resource is acquired.
    pub fn mode(&self) -> Result<Mode, StintError> {
        if !self.load {
            return Ok(Mode::Train);
        }
        match &self.model_path {
            Some(p) if !p.is_empty() => Ok(Mode::Load(PathBuf::from(p))),
            _ => Err(StintError::MissingModelPath),
        }
    }

    /// Constructs [`ExperimentConfig`] from a YAML file.
    pub fn load_yaml(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`ExperimentConfig`] as YAML.
    pub fn save_yaml(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}

/// Sequences one experiment run.
///
/// `Initializing` acquires the runtime guard and builds the engine; the run
/// then branches into `Training` (train, then checkpoint) or `Restoring`
/// (load a checkpoint), evaluates unconditionally, and shuts down. The
/// runtime guard, the environment and the video sink release their
/// resources when dropped, so teardown happens on every exit path; a fatal
/// failure inside training aborts before evaluation.
pub struct Experiment {
    config: ExperimentConfig,
    paths: ArtifactPaths,
}

impl Experiment {
    /// Constructs an experiment from a validated configuration and resolved
    /// artifact locations.
    pub fn new(config: ExperimentConfig, paths: ArtifactPaths) -> Self {
        Self { config, paths }
    }

    /// Runs the experiment to completion.
    pub fn run<RT, E, A, S>(
        &self,
        env_config: &E::Config,
        agent_config: &A::Config,
        sink: &mut S,
    ) -> Result<()>
    where
        RT: Runtime,
        E: Env,
        A: Agent<E>,
        S: FrameSink,
    {
        let mode = self.config.mode()?;
        let _runtime = RT::init()?;
        let mut agent = A::build(&self.config.env_id, agent_config)?;

        match &mode {
            Mode::Train => {
                Trainer::new(self.config.train_iters).train::<E, _>(&mut agent)?;
                checkpoint::save::<E, _>(&agent, &self.paths.model_dir)?;
            }
            Mode::Load(path) => checkpoint::restore::<E, _>(&mut agent, path)?,
        }

        let mut env = E::build(env_config, self.config.seed)?;
        Evaluator::new(self.config.eval_episodes).evaluate(&mut agent, &mut env, sink)?;

        info!("Run finished; releasing the runtime");
        Ok(())
    }
}
