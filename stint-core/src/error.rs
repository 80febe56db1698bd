//! Errors in the library.
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the experiment orchestrator.
#[derive(Error, Debug)]
pub enum StintError {
    /// Load mode was requested without a model path.
    #[error("a model path is required when loading; pass --model_path")]
    MissingModelPath,

    /// No checkpoint exists at the given path.
    #[error("no checkpoint found at {0}")]
    CheckpointNotFound(PathBuf),
}
