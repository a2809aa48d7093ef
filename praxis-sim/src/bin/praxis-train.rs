// Thin harness: generate a case pool, train a tabular agent against the
// simulated triage world, print the run summary as JSON.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use praxis_consultation::SimulatedExpert;
use praxis_core::config::PraxisConfig;
use praxis_core::traits::GenerationOptions;
use praxis_observability::tracing_setup::init_from_config;
use praxis_observability::{LoggingEventHandler, MetricsEventHandler};
use praxis_orchestrator::EpisodeOrchestrator;
use praxis_sim::{SyntheticCaseGenerator, TabularAgent, TabularConfig, TriageConfig, TriageEnvironment};

#[derive(Parser, Debug)]
#[command(name = "praxis-train", about = "Train a triage agent with active learning")]
struct Cli {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of episodes to run.
    #[arg(long, default_value_t = 50)]
    episodes: u64,

    /// Cases generated for the selection pool.
    #[arg(long, default_value_t = 40)]
    pool_size: usize,

    /// Seed for the generator, environment, agent and expert.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Probability the simulated expert answers correctly.
    #[arg(long, default_value_t = 0.9)]
    expert_accuracy: f64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => PraxisConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => PraxisConfig::default(),
    };
    init_from_config(&config.observability);

    let environment = TriageEnvironment::new(TriageConfig {
        seed: cli.seed,
        ..TriageConfig::default()
    });
    let agent = TabularAgent::new(TabularConfig {
        seed: cli.seed,
        ..TabularConfig::default()
    });
    let expert = SimulatedExpert::new(cli.seed).with_accuracy(cli.expert_accuracy);

    let mut orchestrator = EpisodeOrchestrator::new(config, environment, Box::new(agent))?
        .with_expert(expert);
    let metrics = Arc::new(MetricsEventHandler::new());
    orchestrator.register_handler(Arc::new(LoggingEventHandler::new()));
    orchestrator.register_handler(metrics.clone());

    let mut generator = SyntheticCaseGenerator::new(cli.seed.wrapping_add(1));
    orchestrator
        .generate_case_pool(&mut generator, cli.pool_size, &GenerationOptions::default())
        .await?;

    let control = orchestrator.control();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            control.stop();
        }
    });

    let report = orchestrator.train(cli.episodes).await;
    println!("{}", report.to_json()?);
    println!("{}", serde_json::to_string_pretty(&metrics.snapshot())?);
    println!("{}", serde_json::to_string_pretty(&orchestrator.agent().stats())?);
    Ok(())
}
