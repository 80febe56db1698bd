//! Trainable policy.
use super::Env;
use anyhow::Result;
use std::path::Path;

/// A policy on an environment.
///
/// Maps an observation to an action. Action selection here is
/// deterministic; exploration, if any, lives inside the optimization
/// engine and is not exposed through this interface.
pub trait Policy<E: Env> {
    /// Computes an action given an observation.
    fn compute_action(&mut self, obs: &E::Obs) -> Result<E::Act>;
}

/// Metrics returned by a single training step.
#[derive(Clone, Debug)]
pub struct TrainStats {
    /// Mean episode reward observed under the current policy during the
    /// step's sampling phase.
    pub episode_reward_mean: f32,
}

/// A trainable policy driven by an external optimization engine.
///
/// The engine may parallelize sample collection across worker processes;
/// that parallelism is entirely encapsulated behind [`Agent::train_step`],
/// which the caller observes as one synchronous operation.
pub trait Agent<E: Env>: Policy<E> {
    /// Configuration of the optimization engine.
    type Config: Clone;

    /// Builds the engine for a named environment.
    fn build(env_id: &str, config: &Self::Config) -> Result<Self>
    where
        Self: Sized;

    /// Performs one blocking training step on newly sampled experience.
    fn train_step(&mut self) -> Result<TrainStats>;

    /// Save the parameters of the agent in the given directory.
    fn save_params(&self, path: &Path) -> Result<()>;

    /// Load the parameters of the agent from the given directory.
    ///
    /// Replaces the working parameters in place; the handle itself is
    /// unchanged.
    fn load_params(&mut self, path: &Path) -> Result<()>;
}
