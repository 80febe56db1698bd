//! Train an [`Agent`] for a fixed iteration budget.
use crate::{report, Agent, Env};
use anyhow::Result;
use log::info;

/// Manages the training loop.
///
/// Performs a fixed number of strictly sequential training steps, so step
/// `i + 1` always observes the policy as updated by step `i`. Each step is
/// one blocking call into the optimization engine. A failed step aborts the
/// run: a partially optimized policy with an unknown failure cause must not
/// reach the checkpoint on disk.
pub struct Trainer {
    /// Number of training iterations.
    max_iters: usize,
}

impl Trainer {
    /// Constructs a trainer with the given iteration budget.
    pub fn new(max_iters: usize) -> Self {
        Self { max_iters }
    }

    /// Trains the agent, reporting one progress line per iteration.
    pub fn train<E, A>(&self, agent: &mut A) -> Result<()>
    where
        E: Env,
        A: Agent<E>,
    {
        info!("Starts training for {} iterations", self.max_iters);

        for ix in 0..self.max_iters {
            let stats = agent.train_step()?;
            println!("{}", report::iteration_line(ix, stats.episode_reward_mean));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Trainer;
    use crate::mock::{MockAgent, MockEnv};
    use anyhow::Result;

    #[test]
    fn runs_exactly_n_iterations() -> Result<()> {
        let mut agent = MockAgent::with_rewards(vec![10.0, 20.0, 30.0]);
        Trainer::new(3).train::<MockEnv, _>(&mut agent)?;
        assert_eq!(agent.train_steps(), 3);
        Ok(())
    }

    #[test]
    fn zero_budget_does_nothing() -> Result<()> {
        let mut agent = MockAgent::with_rewards(vec![]);
        Trainer::new(0).train::<MockEnv, _>(&mut agent)?;
        assert_eq!(agent.train_steps(), 0);
        Ok(())
    }

    #[test]
    fn failed_step_aborts() {
        // Steps 0 and 1 succeed, step 2 fails; the loop must not continue
        // to steps 3 and 4.
        let mut agent = MockAgent::failing_at(2);
        let res = Trainer::new(5).train::<MockEnv, _>(&mut agent);
        assert!(res.is_err());
        assert_eq!(agent.train_steps(), 3);
    }
}
