//! Console progress lines.
//!
//! The line formats are part of the tool's output contract, so they live
//! here as pure functions rather than inline in the loops.

use std::path::Path;

/// Line reporting one training iteration.
///
/// Rewards print with a trailing `.0` for whole numbers, e.g.
/// `Iteration 0: reward = 10.0`.
pub fn iteration_line(ix: usize, reward: f32) -> String {
    format!("Iteration {}: reward = {:?}", ix, reward)
}

/// Line reporting one evaluation episode; `ordinal` is 1-based.
pub fn episode_line(ordinal: usize, reward: f32) -> String {
    format!("Episode {}: reward = {:?}", ordinal, reward)
}

/// Line reporting a completed save.
pub fn saved_line(path: &Path) -> String {
    format!("Model saved to: {}", path.display())
}

/// Line reporting a completed load.
pub fn loaded_line(path: &Path) -> String {
    format!("Model loaded from: {}", path.display())
}
