#![warn(missing_docs)]
//! Bindings to the Python reinforcement-learning stack consumed by stint:
//! the process-wide Ray runtime, RLlib's PPO implementation, and
//! [Gymnasium](https://gymnasium.farama.org) environments.
//!
//! Every call crosses the GIL and blocks until the Python side returns;
//! whatever parallelism RLlib spreads across its workers stays invisible
//! behind these wrappers.
mod gym;
mod ppo;
mod runtime;
mod util;

pub use gym::{GymAct, GymEnv, GymEnvConfig, GymObs};
pub use ppo::{Ppo, PpoConfig};
pub use runtime::RayRuntime;
