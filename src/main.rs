use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;

use reorder_planner::io::{demand, reporting, Column, Dataset};
use reorder_planner::report::{interpret_or_fallback, ExplainedReport, TemplateInterpreter};
use reorder_planner::{telemetry, InventoryOptimizer, OptimizerParams};

#[derive(Parser)]
#[command(name = "reorder-planner")]
#[command(version, about = "Recommend a next-period order quantity", long_about = None)]
struct Cli {
    /// Demand history as CSV (with headers) or a JSON array of records
    #[arg(long)]
    data: Option<PathBuf>,

    /// Shape of the synthetic demand generated when no data is given
    #[arg(long, value_enum, default_value_t = Pattern::Poisson)]
    synthetic: Pattern,

    /// Days of synthetic demand
    #[arg(long, default_value_t = 275)]
    synthetic_days: usize,

    /// Mean of the synthetic demand
    #[arg(long, default_value_t = 100.0)]
    synthetic_mean: f64,

    /// JSON parameter document; flags below override its values
    #[arg(long)]
    params: Option<PathBuf>,

    #[arg(long)]
    holding_cost: Option<f64>,

    #[arg(long)]
    stockout_cost: Option<f64>,

    /// Planning horizon in days
    #[arg(long)]
    horizon: Option<u32>,

    /// Search iterations
    #[arg(long)]
    iterations: Option<u32>,

    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Write the full report as JSON
    #[arg(long)]
    output: Option<PathBuf>,

    /// Write the never-reorder baseline trace as CSV
    #[arg(long)]
    trace: Option<PathBuf>,

    /// Question passed along to the interpreter
    #[arg(long, default_value = "Optimize inventory to reduce costs")]
    query: String,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Pattern {
    Constant,
    Normal,
    Poisson,
    /// Mean level for the first half, then double
    Step,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    telemetry::init(cli.json_logs);

    // 1. PARAMETERS
    let params = load_params(&cli)?;
    let optimizer = InventoryOptimizer::new(params).context("invalid optimizer parameters")?;

    // 2. DATA
    let dataset = match &cli.data {
        Some(path) => load_dataset(path)?,
        None => synthetic_dataset(&cli, optimizer.params().seed)?,
    };

    // 3. SEARCH (off the async runtime; the search is CPU-bound and synchronous)
    let search = optimizer.clone();
    let run = tokio::task::spawn_blocking(move || search.optimize_dataset(&dataset))
        .await
        .context("search task panicked")?
        .context("optimization failed")?;

    // 4. EXPLANATION
    let interpretation = interpret_or_fallback(
        &TemplateInterpreter,
        &run.report,
        &cli.query,
        optimizer.params().interpretation_timeout(),
    )
    .await;

    let explained = ExplainedReport {
        report: run.report,
        interpretation,
    };

    // 5. EXPORT
    if let Some(path) = &cli.output {
        reporting::write_json(path, &explained)?;
    }
    if let Some(path) = &cli.trace {
        reporting::write_trace_csv(path, &run.baseline_trace)?;
    }

    println!("{}", serde_json::to_string_pretty(&explained)?);
    Ok(())
}

fn load_params(cli: &Cli) -> Result<OptimizerParams> {
    let mut params = match &cli.params {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            OptimizerParams::from_json(&raw)?
        }
        None => OptimizerParams::default(),
    };

    if let Some(v) = cli.holding_cost {
        params.holding_cost = v;
    }
    if let Some(v) = cli.stockout_cost {
        params.stockout_cost = v;
    }
    if let Some(v) = cli.horizon {
        params.horizon = v;
    }
    if let Some(v) = cli.iterations {
        params.iterations = v;
    }
    if cli.seed.is_some() {
        params.seed = cli.seed;
    }
    Ok(params)
}

fn load_dataset(path: &Path) -> Result<Dataset> {
    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let dataset = if is_json {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Dataset::from_json_str(&raw)?
    } else {
        Dataset::from_csv_path(path)?
    };
    Ok(dataset)
}

/// Daily sales of the chosen shape with a fixed on-hand level of 50 units.
fn synthetic_dataset(cli: &Cli, seed: Option<u64>) -> Result<Dataset> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let (days, mean) = (cli.synthetic_days, cli.synthetic_mean);
    let sales = match cli.synthetic {
        Pattern::Constant => demand::generate_constant_demand(days, mean),
        Pattern::Normal => demand::generate_normal_demand(days, mean, mean.sqrt(), &mut rng)?,
        Pattern::Poisson => demand::generate_poisson_demand(days, mean, &mut rng)?,
        Pattern::Step => demand::generate_step_demand(days, days / 2, mean, 2.0 * mean),
    };

    let dataset = Dataset::from_columns(vec![
        Column {
            name: "sales".to_string(),
            cells: sales.iter().map(|v| v.to_string()).collect(),
        },
        Column {
            name: "current_stock".to_string(),
            cells: vec!["50".to_string(); sales.len()],
        },
    ])?;
    Ok(dataset)
}
