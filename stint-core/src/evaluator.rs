//! Evaluate a trained policy.
use crate::{report, Env, FrameSink, Policy};
use anyhow::Result;
use log::info;

/// Runs evaluation episodes with a policy in deterministic-action mode.
///
/// Episodes run strictly sequentially, never in parallel: they share one
/// environment instance and one policy query interface. Every episode is
/// rendered into the frame sink, keyed by episode index.
pub struct Evaluator {
    /// The number of episodes to run during evaluation.
    n_episodes: usize,
}

impl Evaluator {
    /// Constructs an evaluator running the given number of episodes.
    pub fn new(n_episodes: usize) -> Self {
        Self { n_episodes }
    }

    /// Runs the episodes and returns the per-episode total rewards.
    ///
    /// An episode is over when the environment reports either termination
    /// or truncation; the two are not distinguished in the reported
    /// outcome. One frame is captured after reset and one after every step.
    pub fn evaluate<E, P, S>(&self, policy: &mut P, env: &mut E, sink: &mut S) -> Result<Vec<f32>>
    where
        E: Env,
        P: Policy<E>,
        S: FrameSink,
    {
        info!("Starts evaluation for {} episodes", self.n_episodes);
        let mut returns = Vec::with_capacity(self.n_episodes);

        for ix in 0..self.n_episodes {
            sink.begin_episode(ix)?;
            let mut obs = env.reset()?;
            sink.push(env.render()?)?;
            let mut r_total = 0.0;

            loop {
                let act = policy.compute_action(&obs)?;
                let step = env.step(&act)?;
                sink.push(env.render()?)?;
                r_total += step.reward;
                if step.is_done() {
                    break;
                }
                obs = step.obs;
            }

            sink.end_episode()?;
            println!("{}", report::episode_line(ix + 1, r_total));
            returns.push(r_total);
        }

        Ok(returns)
    }
}

#[cfg(test)]
mod tests {
    use super::Evaluator;
    use crate::mock::{CountingSink, MockAgent, MockEnv, MockEnvConfig};
    use crate::Env;
    use anyhow::Result;

    fn env(episode_len: usize, step_reward: f32) -> MockEnv {
        let config = MockEnvConfig {
            episode_len,
            step_reward,
            fail_at_step: None,
        };
        MockEnv::build(&config, 0).unwrap()
    }

    #[test]
    fn runs_exactly_m_episodes() -> Result<()> {
        let mut policy = MockAgent::with_param(0.0);
        let mut env = env(3, 1.5);
        let mut sink = CountingSink::default();

        let returns = Evaluator::new(2).evaluate(&mut policy, &mut env, &mut sink)?;

        assert_eq!(returns, vec![4.5, 4.5]);
        assert_eq!(env.resets, 2);
        assert_eq!(sink.begins, vec![0, 1]);
        assert_eq!(sink.ends, 2);
        // One frame on reset plus one per step.
        assert_eq!(sink.frames, 2 * (1 + 3));
        assert_eq!(env.renders, sink.frames);
        Ok(())
    }

    #[test]
    fn zero_episodes_touch_nothing() -> Result<()> {
        let mut policy = MockAgent::with_param(0.0);
        let mut env = env(3, 1.0);
        let mut sink = CountingSink::default();

        let returns = Evaluator::new(0).evaluate(&mut policy, &mut env, &mut sink)?;

        assert!(returns.is_empty());
        assert_eq!(env.resets, 0);
        assert_eq!(sink.begins, Vec::<usize>::new());
        assert_eq!(sink.frames, 0);
        Ok(())
    }

    #[test]
    fn works_with_a_null_sink() -> Result<()> {
        let mut policy = MockAgent::with_param(0.0);
        let mut env = env(2, 1.0);
        let returns = Evaluator::new(1).evaluate(&mut policy, &mut env, &mut crate::NullSink)?;
        assert_eq!(returns, vec![2.0]);
        Ok(())
    }

    #[test]
    fn environment_failure_is_fatal() {
        let mut policy = MockAgent::with_param(0.0);
        let config = MockEnvConfig {
            episode_len: 3,
            step_reward: 1.0,
            fail_at_step: Some(1),
        };
        let mut env = MockEnv::build(&config, 0).unwrap();
        let mut sink = CountingSink::default();

        let res = Evaluator::new(2).evaluate(&mut policy, &mut env, &mut sink);
        assert!(res.is_err());
        // The first episode was in flight when the failure hit.
        assert_eq!(sink.begins, vec![0]);
        assert_eq!(sink.ends, 0);
    }
}
