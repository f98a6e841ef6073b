//! MAS Log Generator CLI
//!
//! Writes a synthetic multi-agent log stream to `logs.json`. Without
//! arguments it generates the default stream (5 agents, 5 topics, 10
//! rounds, 30-day window) against the wall clock.

use clap::Parser;
use maslog_env::{format_timestamp, parse_timestamp, GenContext, GenError, MasId, SystemClock};
use maslog_sim::checks::{self, Violation};
use maslog_sim::{
    generate, load_records, write_json, write_records, CommunicationStats, GeneratorConfig,
    SimContext, Topic, DEFAULT_LOOKBACK_SECS, DEFAULT_OUTPUT,
};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, error, info, Level};
use tracing_subscriber::FmtSubscriber;

/// Failures that end a run with a non-zero exit status.
#[derive(Debug, Error)]
enum RunError {
    #[error(transparent)]
    Gen(#[from] GenError),

    #[error("Invariant violated: {0}")]
    Violation(#[from] Violation),

    #[error("Invalid --now value '{0}', expected YYYY-MM-DDTHH:MM:SS")]
    BadNow(String),
}

/// Synthetic MAS log stream generator
#[derive(Parser, Debug)]
#[command(name = "maslog-sim")]
#[command(about = "Generate a synthetic multi-agent system log stream", long_about = None)]
struct Args {
    /// Destination JSON file
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Size of the agent population
    #[arg(short, long, default_value = "5")]
    agents: u32,

    /// Generation rounds per topic
    #[arg(short, long, default_value = "10")]
    iterations: u32,

    /// Maximum age of a timestamp in seconds
    #[arg(short, long, default_value_t = DEFAULT_LOOKBACK_SECS)]
    lookback_secs: u64,

    /// Comma separated topics (error, debug, msg, status, app, beh)
    #[arg(short, long, default_value = "error,debug,msg,status,app")]
    topics: String,

    /// Simulation id stamped on every record
    #[arg(long, default_value = "0")]
    mas_id: u32,

    /// Seed for reproducible output (random, and logged, when absent)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Pin the generation time (YYYY-MM-DDTHH:MM:SS)
    #[arg(long)]
    now: Option<String>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Also write communication statistics to this file
    #[arg(long)]
    stats: Option<PathBuf>,

    /// Verify an existing log file instead of generating one
    #[arg(long)]
    check: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn config(&self) -> Result<GeneratorConfig, RunError> {
        Ok(GeneratorConfig {
            agent_count: self.agents,
            topics: Topic::parse_list(&self.topics)?,
            iterations: self.iterations,
            lookback_secs: self.lookback_secs,
            mas_id: MasId(self.mas_id),
        })
    }

    fn context(&self) -> Result<Box<dyn GenContext>, RunError> {
        let now = self
            .now
            .as_deref()
            .map(|s| parse_timestamp(s).ok_or_else(|| RunError::BadNow(s.to_string())))
            .transpose()?;

        let seed = self.seed.unwrap_or_else(SystemClock::fresh_seed);
        let epoch = now.unwrap_or_else(SystemClock::now);
        Ok(Box::new(SimContext::new(seed).with_epoch(epoch)))
    }
}

/// Generates, checks and writes one stream.
fn run_generate(args: &Args, config: &GeneratorConfig) -> Result<(), RunError> {
    let mut ctx = args.context()?;

    info!(
        "Generating {} records: {} agents, {} rounds, topics [{}]",
        config.expected_record_count(),
        config.agent_count,
        config.iterations,
        args.topics
    );
    info!("  now={} seed={}", format_timestamp(&ctx.now()), ctx.seed());

    let records = generate(config, ctx.as_mut())?;
    checks::verify(&records, config)?;

    let stats = CommunicationStats::from_records(&records);
    debug!(
        "  {} ACL exchanges between {} agents",
        stats.total_exchanges(),
        stats.agents().len()
    );

    write_records(&records, &args.output, args.pretty)?;
    info!("✓ Wrote {} records to {}", records.len(), args.output.display());

    if let Some(stats_path) = &args.stats {
        write_json(&stats.export(), stats_path, args.pretty)?;
        info!("✓ Wrote communication statistics to {}", stats_path.display());
    }

    Ok(())
}

/// Verifies an existing log file against the configuration.
fn run_check(path: &Path, config: &GeneratorConfig) -> Result<(), RunError> {
    let records = load_records(path)?;
    checks::verify(&records, config)?;
    info!("✓ {} records in {} hold every invariant", records.len(), path.display());
    Ok(())
}

fn main() {
    let args = Args::parse();

    // Initialize logging
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    let result = args.config().and_then(|config| {
        config.validate()?;
        match &args.check {
            Some(path) => run_check(path, &config),
            None => run_generate(&args, &config),
        }
    });

    if let Err(e) = result {
        error!("✗ {}", e);
        std::process::exit(1);
    }
}
