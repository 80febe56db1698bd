use anyhow::Result;
use clap::Parser;
use log::info;
use stint_core::{
    paths::{self, ArtifactPaths},
    Experiment, ExperimentConfig,
};
use stint_py::{GymEnv, GymEnvConfig, Ppo, PpoConfig, RayRuntime};
use stint_video::GifSink;

const ENV_ID: &str = "CartPole-v1";
const DISCOUNT_FACTOR: f64 = 0.9;
const LR: f64 = 0.01;
const KL_COEFF: f64 = 0.3;
const TRAIN_BATCH_SIZE: i64 = 128;
const NUM_GPUS: i64 = 0;
const NUM_ENV_RUNNERS: i64 = 1;
const NUM_TRAIN_ITERS: usize = 1000;

/// Train CartPole with RLlib's PPO, then replay the policy on video
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Load a pre-trained model
    #[arg(long, default_value_t = false)]
    load: bool,

    /// Path to save/load model
    #[arg(long = "model_path")]
    model_path: Option<String>,

    /// Number of evaluation episodes
    #[arg(long = "num_episodes", default_value_t = 4)]
    num_episodes: usize,
}

impl Args {
    fn experiment_config(&self) -> ExperimentConfig {
        ExperimentConfig::default()
            .env_id(ENV_ID)
            .train_iters(NUM_TRAIN_ITERS)
            .eval_episodes(self.num_episodes)
            .model_path(self.model_path.clone())
            .load(self.load)
    }
}

fn ppo_config() -> PpoConfig {
    PpoConfig::default()
        .gamma(DISCOUNT_FACTOR)
        .lr(LR)
        .kl_coeff(KL_COEFF)
        .train_batch_size(TRAIN_BATCH_SIZE)
        .num_gpus(NUM_GPUS)
        .num_env_runners(NUM_ENV_RUNNERS)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = args.experiment_config();

    // A load request without a path must fail before anything is created.
    config.mode()?;

    let stamp = paths::stamp();
    let paths = ArtifactPaths::resolve(&stamp, config.model_path.as_deref())?;
    info!("Artifacts of this run are keyed by {}", stamp);
    let mut sink = GifSink::new(paths.video_dir.clone());

    let env_config = GymEnvConfig::default()
        .name(ENV_ID)
        .render_mode(Some("rgb_array".to_string()));

    Experiment::new(config, paths).run::<RayRuntime, GymEnv, Ppo, _>(
        &env_config,
        &ppo_config(),
        &mut sink,
    )
}
