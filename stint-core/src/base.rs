//! Interfaces of the external collaborators.
mod agent;
mod env;
mod runtime;
mod sink;
mod step;

pub use agent::{Agent, Policy, TrainStats};
pub use env::Env;
pub use runtime::Runtime;
pub use sink::{Frame, FrameSink, NullSink};
pub use step::Step;
