//! Persist and restore policy state.
use crate::{error::StintError, report, Agent, Env};
use anyhow::Result;
use std::{fs, path::Path};

/// Serializes the agent's learned state into the given directory.
///
/// The directory is created if absent. A later [`restore`] on the same
/// path, in this process or another, reproduces equivalent decision
/// behavior.
pub fn save<E, A>(agent: &A, path: &Path) -> Result<()>
where
    E: Env,
    A: Agent<E>,
{
    fs::create_dir_all(path)?;
    agent.save_params(path)?;
    println!("{}", report::saved_line(path));
    Ok(())
}

/// Restores previously saved state into the agent, in place.
///
/// Fails if the path does not reference a saved checkpoint. There is no
/// fallback to a freshly initialized policy; silently substituting one
/// would mask an operator error.
pub fn restore<E, A>(agent: &mut A, path: &Path) -> Result<()>
where
    E: Env,
    A: Agent<E>,
{
    if !path.exists() {
        return Err(StintError::CheckpointNotFound(path.to_path_buf()).into());
    }
    agent.load_params(path)?;
    println!("{}", report::loaded_line(path));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{restore, save};
    use crate::error::StintError;
    use crate::mock::{MockAgent, MockEnv};
    use crate::Policy;
    use anyhow::Result;
    use tempdir::TempDir;

    #[test]
    fn save_creates_the_directory() -> Result<()> {
        let tmp = TempDir::new("stint_checkpoint")?;
        let dir = tmp.path().join("nested").join("model");
        let agent = MockAgent::with_param(7.0);

        save::<MockEnv, _>(&agent, &dir)?;
        assert!(dir.join("params").is_file());
        Ok(())
    }

    #[test]
    fn restore_on_unsaved_path_fails() {
        let mut agent = MockAgent::with_param(0.0);
        let err = restore::<MockEnv, _>(&mut agent, "/nonexistent/checkpoint".as_ref())
            .expect_err("restore must not invent a policy");
        assert!(matches!(
            err.downcast_ref::<StintError>(),
            Some(StintError::CheckpointNotFound(_))
        ));
    }

    #[test]
    fn round_trip_reproduces_decisions() -> Result<()> {
        let tmp = TempDir::new("stint_checkpoint")?;
        let dir = tmp.path().join("model");

        let mut trained = MockAgent::with_param(42.0);
        save::<MockEnv, _>(&trained, &dir)?;

        let mut restored = MockAgent::with_param(0.0);
        restore::<MockEnv, _>(&mut restored, &dir)?;

        for obs in [0.0f32, 1.0, 2.5].iter() {
            assert_eq!(
                restored.compute_action(obs)?,
                trained.compute_action(obs)?
            );
        }
        Ok(())
    }
}
