//! Environment.
use super::{Frame, Step};
use anyhow::Result;
use std::fmt::Debug;

/// Represents an environment, typically an MDP with a renderable state.
///
/// The environment is exclusively owned by the evaluation loop for the
/// duration of a run; training happens against the optimization engine's
/// own internal runners.
pub trait Env {
    /// Configurations.
    type Config: Clone;

    /// Observation of the environment.
    type Obs: Clone + Debug;

    /// Action of the environment.
    type Act: Clone + Debug;

    /// Builds an environment with a given random seed.
    fn build(config: &Self::Config, seed: i64) -> Result<Self>
    where
        Self: Sized;

    /// Resets the environment and returns an initial observation.
    fn reset(&mut self) -> Result<Self::Obs>;

    /// Performs an environment step.
    fn step(&mut self, act: &Self::Act) -> Result<Step<Self>>
    where
        Self: Sized;

    /// Renders the current state as an RGB frame.
    fn render(&mut self) -> Result<Frame>;
}
