//! Stand-in collaborators for tests.
use crate::{Agent, Env, Frame, FrameSink, Policy, Runtime, Step, TrainStats};
use anyhow::{anyhow, Result};
use std::{
    fs,
    path::Path,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

/// Counters observing a [`MockAgent`], shared through its config so they
/// survive the agent being built inside an orchestrated run.
#[derive(Default)]
pub struct AgentProbe {
    pub builds: AtomicUsize,
    pub train_steps: AtomicUsize,
    pub saves: AtomicUsize,
    pub loads: AtomicUsize,
}

#[derive(Clone)]
pub struct MockAgentConfig {
    pub param: f32,
    pub rewards: Vec<f32>,
    pub fails_at: Option<usize>,
    pub probe: Arc<AgentProbe>,
}

impl Default for MockAgentConfig {
    fn default() -> Self {
        Self {
            param: 0.0,
            rewards: vec![],
            fails_at: None,
            probe: Arc::new(AgentProbe::default()),
        }
    }
}

/// An agent whose single parameter is its whole learned state.
pub struct MockAgent {
    pub param: f32,
    rewards: Vec<f32>,
    fails_at: Option<usize>,
    pub probe: Arc<AgentProbe>,
}

impl MockAgent {
    pub fn new(config: &MockAgentConfig) -> Self {
        Self {
            param: config.param,
            rewards: config.rewards.clone(),
            fails_at: config.fails_at,
            probe: config.probe.clone(),
        }
    }

    pub fn with_param(param: f32) -> Self {
        Self::new(&MockAgentConfig {
            param,
            ..Default::default()
        })
    }

    pub fn with_rewards(rewards: Vec<f32>) -> Self {
        Self::new(&MockAgentConfig {
            rewards,
            ..Default::default()
        })
    }

    pub fn failing_at(ix: usize) -> Self {
        Self::new(&MockAgentConfig {
            fails_at: Some(ix),
            ..Default::default()
        })
    }

    /// Train-step calls so far, including a failing one.
    pub fn train_steps(&self) -> usize {
        self.probe.train_steps.load(Ordering::SeqCst)
    }
}

impl Policy<MockEnv> for MockAgent {
    fn compute_action(&mut self, obs: &f32) -> Result<i64> {
        Ok((obs + self.param) as i64)
    }
}

impl Agent<MockEnv> for MockAgent {
    type Config = MockAgentConfig;

    fn build(_env_id: &str, config: &Self::Config) -> Result<Self> {
        config.probe.builds.fetch_add(1, Ordering::SeqCst);
        Ok(Self::new(config))
    }

    fn train_step(&mut self) -> Result<TrainStats> {
        let ix = self.probe.train_steps.fetch_add(1, Ordering::SeqCst);
        if Some(ix) == self.fails_at {
            return Err(anyhow!("optimizer failure at step {}", ix));
        }
        let reward = self.rewards.get(ix).copied().unwrap_or(1.0);
        Ok(TrainStats {
            episode_reward_mean: reward,
        })
    }

    fn save_params(&self, path: &Path) -> Result<()> {
        fs::write(path.join("params"), self.param.to_string())?;
        self.probe.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn load_params(&mut self, path: &Path) -> Result<()> {
        let raw = fs::read_to_string(path.join("params"))?;
        self.param = raw.parse()?;
        self.probe.loads.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[derive(Clone)]
pub struct MockEnvConfig {
    pub episode_len: usize,
    pub step_reward: f32,
    pub fail_at_step: Option<usize>,
}

impl Default for MockEnvConfig {
    fn default() -> Self {
        Self {
            episode_len: 3,
            step_reward: 1.0,
            fail_at_step: None,
        }
    }
}

/// An environment whose episodes terminate after a fixed number of steps.
pub struct MockEnv {
    episode_len: usize,
    step_reward: f32,
    fail_at_step: Option<usize>,
    count: usize,
    pub resets: usize,
    pub renders: usize,
}

impl Env for MockEnv {
    type Config = MockEnvConfig;
    type Obs = f32;
    type Act = i64;

    fn build(config: &Self::Config, _seed: i64) -> Result<Self> {
        Ok(Self {
            episode_len: config.episode_len,
            step_reward: config.step_reward,
            fail_at_step: config.fail_at_step,
            count: 0,
            resets: 0,
            renders: 0,
        })
    }

    fn reset(&mut self) -> Result<f32> {
        self.count = 0;
        self.resets += 1;
        Ok(0.0)
    }

    fn step(&mut self, _act: &i64) -> Result<Step<Self>> {
        if Some(self.count) == self.fail_at_step {
            return Err(anyhow!("environment failure at step {}", self.count));
        }
        self.count += 1;
        let is_terminated = self.count >= self.episode_len;
        Ok(Step::new(
            self.count as f32,
            self.step_reward,
            is_terminated,
            false,
        ))
    }

    fn render(&mut self) -> Result<Frame> {
        self.renders += 1;
        Ok(Frame::new(2, 2, vec![0; 12]))
    }
}

#[derive(Default)]
pub struct CountingSink {
    pub begins: Vec<usize>,
    pub frames: usize,
    pub ends: usize,
}

impl FrameSink for CountingSink {
    fn begin_episode(&mut self, ix: usize) -> Result<()> {
        self.begins.push(ix);
        Ok(())
    }

    fn push(&mut self, _frame: Frame) -> Result<()> {
        self.frames += 1;
        Ok(())
    }

    fn end_episode(&mut self) -> Result<()> {
        self.ends += 1;
        Ok(())
    }
}

/// Declares a [`Runtime`] implementation backed by its own counters, so
/// tests running in parallel observe independent tallies.
macro_rules! probe_runtime {
    ($name:ident, $inits:ident, $drops:ident) => {
        pub static $inits: AtomicUsize = AtomicUsize::new(0);
        pub static $drops: AtomicUsize = AtomicUsize::new(0);

        pub struct $name;

        impl Runtime for $name {
            fn init() -> Result<Self> {
                $inits.fetch_add(1, Ordering::SeqCst);
                Ok(Self)
            }
        }

        impl Drop for $name {
            fn drop(&mut self) {
                $drops.fetch_add(1, Ordering::SeqCst);
            }
        }
    };
}

probe_runtime!(TrainRunRuntime, TRAIN_RUN_INITS, TRAIN_RUN_DROPS);
probe_runtime!(LoadRunRuntime, LOAD_RUN_INITS, LOAD_RUN_DROPS);
probe_runtime!(RejectedRunRuntime, REJECTED_RUN_INITS, REJECTED_RUN_DROPS);
probe_runtime!(FailedTrainRuntime, FAILED_TRAIN_INITS, FAILED_TRAIN_DROPS);
probe_runtime!(MissingCkptRuntime, MISSING_CKPT_INITS, MISSING_CKPT_DROPS);
