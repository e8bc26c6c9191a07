//! Frailty Qaly CLI
//!
//! Replays a recorded event log and prints FI and QALY results per individual

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use frailty_qaly::{
    events::load_events,
    health::{sentinel_to_nan, QalyOrigin},
    CohortSummary, HealthConfig, ReplayEngine,
};

#[derive(Parser, Debug)]
#[command(name = "frailty_qaly", version, about = "FI curves and QALY from recorded life events")]
struct Args {
    /// CSV event log (individual,time,event,deficits_tot,deficits_hub)
    events: PathBuf,

    /// JSON config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of deficit nodes in the network
    #[arg(long)]
    nodes: Option<u32>,

    /// Years between FI samples
    #[arg(long)]
    step: Option<f64>,

    /// Number of FI samples per curve
    #[arg(long)]
    length: Option<usize>,

    /// Only count QALY after the disease has ended
    #[arg(long)]
    qaly_from_disease_end: bool,

    /// Print per-individual results as JSON lines instead of a table
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => HealthConfig::from_json_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => HealthConfig::default(),
    };
    if let Some(nodes) = args.nodes {
        config.node_count = nodes;
    }
    if let Some(step) = args.step {
        config.sample_step = step;
    }
    if let Some(length) = args.length {
        config.curve_length = length;
    }
    if args.qaly_from_disease_end {
        config.qaly_origin = QalyOrigin::DiseaseEnd;
    }

    let engine = ReplayEngine::new(config).context("invalid configuration")?;
    let events = load_events(&args.events)
        .with_context(|| format!("loading events {}", args.events.display()))?;

    let results = engine.replay_cohort(&events).context("replaying events")?;
    info!("Replayed {} individuals", results.len());

    if args.json {
        for result in &results {
            println!("{}", serde_json::to_string(&result.summary.to_row(result.individual))?);
        }
    } else {
        println!("{:>6} {:>9} {:>9} {:>9} {:>9} {:>9} {:>9} {:>10} {:>10}",
            "Indiv", "FItotSt", "FItotEnd", "FItotDth", "FI30St", "FI30End", "FI30Dth", "QALYtot", "QALY30");
        println!("{}", "-".repeat(90));
        for result in &results {
            let c = result.summary.columns().map(sentinel_to_nan);
            println!("{:>6} {:>9.4} {:>9.4} {:>9.4} {:>9.4} {:>9.4} {:>9.4} {:>10.3} {:>10.3}",
                result.individual, c[0], c[1], c[2], c[3], c[4], c[5], c[6], c[7]);
        }
    }

    let cohort = CohortSummary::from_results(&results);
    println!("\nCohort Summary:");
    println!("  Individuals: {}", cohort.individuals);
    println!("  Reached disease start: {}", cohort.reached_disease_start);
    println!("  Reached disease end: {}", cohort.reached_disease_end);
    println!("  Too sick for disease: {}", cohort.too_sick);
    println!("  Mean QALYtot: {:.3}", cohort.mean_qaly_tot);
    println!("  Mean QALY30: {:.3}", cohort.mean_qaly_hub);

    println!("\nMean FI curve:");
    println!("{:>8} {:>8} {:>10} {:>10}", "Age", "Alive", "FItot", "FI30");
    for (i, age) in engine.schedule().ages().iter().enumerate() {
        if cohort.alive.get(i).copied().unwrap_or(0) == 0 {
            break;
        }
        println!("{:>8.2} {:>8} {:>10.4} {:>10.4}",
            age, cohort.alive[i], cohort.mean_fi_tot[i], cohort.mean_fi_hub[i]);
    }

    Ok(())
}
