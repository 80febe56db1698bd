//! Artifact locations of a run.
use anyhow::Result;
use chrono::Local;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Base directory of model checkpoints when no override is given.
pub const MODEL_BASE_DIR: &str = "./saved_model";

/// Base directory of evaluation videos.
pub const VIDEO_BASE_DIR: &str = "./video";

/// Filesystem locations derived from a run timestamp.
///
/// A model and the evaluation videos of the same run share the timestamp,
/// so either artifact is discoverable from the other.
#[derive(Clone, Debug, PartialEq)]
pub struct ArtifactPaths {
    /// Where the trained model is saved to, or loaded from.
    pub model_dir: PathBuf,

    /// Where per-episode evaluation videos are written.
    pub video_dir: PathBuf,
}

/// Returns the timestamp token naming this run's artifacts.
pub fn stamp() -> String {
    Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Derives artifact locations from a timestamp and an optional explicit
/// model directory.
///
/// The video directory is derived from the timestamp regardless of the
/// override; the two are namespaced independently.
pub fn derive(stamp: &str, model_dir: Option<&str>) -> ArtifactPaths {
    let model_dir = match model_dir {
        Some(p) => PathBuf::from(p),
        None => Path::new(MODEL_BASE_DIR).join(stamp),
    };
    ArtifactPaths {
        model_dir,
        video_dir: Path::new(VIDEO_BASE_DIR).join(stamp),
    }
}

impl ArtifactPaths {
    /// Derives artifact locations and ensures the model directory exists,
    /// creating intermediate directories as needed.
    ///
    /// Creation is idempotent; an existing directory is left untouched.
    pub fn resolve(stamp: &str, model_dir: Option<&str>) -> Result<Self> {
        let paths = derive(stamp, model_dir);
        fs::create_dir_all(&paths.model_dir)?;
        Ok(paths)
    }
}

#[cfg(test)]
mod tests {
    use super::{derive, ArtifactPaths};
    use anyhow::Result;
    use std::path::PathBuf;
    use tempdir::TempDir;

    #[test]
    fn derive_with_override() {
        let paths = derive("20240101_000000", Some("/tmp/x"));
        assert_eq!(paths.model_dir, PathBuf::from("/tmp/x"));
        assert_eq!(paths.video_dir, PathBuf::from("./video/20240101_000000"));
    }

    #[test]
    fn derive_without_override() {
        let paths = derive("20240101_000000", None);
        assert_eq!(
            paths.model_dir,
            PathBuf::from("./saved_model/20240101_000000")
        );
        assert_eq!(paths.video_dir, PathBuf::from("./video/20240101_000000"));
    }

    #[test]
    fn resolve_is_idempotent() -> Result<()> {
        let tmp = TempDir::new("stint_paths")?;
        let model_dir = tmp.path().join("model");
        let model_dir = model_dir.to_str().unwrap();

        let first = ArtifactPaths::resolve("20240101_000000", Some(model_dir))?;
        let second = ArtifactPaths::resolve("20240101_000000", Some(model_dir))?;
        assert_eq!(first, second);
        assert!(first.model_dir.is_dir());
        Ok(())
    }
}
