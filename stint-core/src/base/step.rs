//! Environment step.
use super::Env;

/// The outcome of a single environment step.
pub struct Step<E: Env> {
    /// Observation after the step.
    pub obs: E::Obs,

    /// Reward of the step.
    pub reward: f32,

    /// Flag denoting if the episode terminated naturally.
    pub is_terminated: bool,

    /// Flag denoting if the episode was cut off, e.g. by a step-count limit.
    pub is_truncated: bool,
}

impl<E: Env> Step<E> {
    /// Constructs a [`Step`] object.
    pub fn new(obs: E::Obs, reward: f32, is_terminated: bool, is_truncated: bool) -> Self {
        Step {
            obs,
            reward,
            is_terminated,
            is_truncated,
        }
    }

    #[inline]
    /// Terminated or truncated.
    pub fn is_done(&self) -> bool {
        self.is_terminated || self.is_truncated
    }
}
