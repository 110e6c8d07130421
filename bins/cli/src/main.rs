//! Finance mart command-line tool.
//!
//! Generates synthetic data sets, builds and validates the monthly mart, and
//! writes the results as CSV.
//!
//! Usage: finmart [--log-json] <generate|build|validate> [--seed N] [--out DIR]

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use finmart_core::Dataset;
use finmart_core::export::{DatasetCsvExporter, MART_FILE_NAME, MartCsvExporter};
use finmart_core::generator::DatasetGenerator;
use finmart_core::pipeline::MartPipeline;
use finmart_shared::{AppConfig, AppError};

/// File the validation report is written to.
const REPORT_FILE_NAME: &str = "validation_report.json";

#[derive(Parser)]
#[command(author, version, about = "Build and validate the monthly finance mart.")]
struct Cli {
    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate the five synthetic data sets as CSV.
    Generate(RunArgs),
    /// Generate data, build the mart and publish it if validation passes.
    Build(BuildArgs),
    /// Generate data, build the mart and print the validation report.
    Validate(RunArgs),
}

#[derive(Args)]
struct RunArgs {
    /// RNG seed, overriding configuration.
    #[arg(long)]
    seed: Option<u64>,

    /// Output directory, overriding configuration.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args)]
struct BuildArgs {
    #[command(flatten)]
    run: RunArgs,

    /// Aggregate each fiscal year in parallel.
    #[arg(long)]
    parallel: bool,
}

impl RunArgs {
    fn apply(&self, config: &mut AppConfig) {
        if let Some(seed) = self.seed {
            config.generator.seed = seed;
        }
        if let Some(out) = &self.out {
            config.export.out_dir = out.display().to_string();
        }
    }
}

fn main() {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.log_json);

    if let Err(err) = run(cli) {
        let code = err.downcast_ref::<AppError>().map_or(1, AppError::exit_code);
        error!(error = %err, exit_code = code, "finmart failed");
        eprintln!("error: {err:#}");
        std::process::exit(code);
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "finmart=info".into());
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry.with(fmt::layer().with_writer(std::io::stderr)).init();
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = AppConfig::load().map_err(AppError::from)?;

    match cli.command {
        Command::Generate(args) => {
            args.apply(&mut config);
            let dataset = generate(&config)?;
            write_dataset(&config, &dataset, Path::new(&config.export.out_dir))
        }
        Command::Build(args) => {
            args.run.apply(&mut config);
            config.mart.parallel_aggregation |= args.parallel;
            build(&config)
        }
        Command::Validate(args) => {
            args.apply(&mut config);
            validate(&config)
        }
    }
}

fn generate(config: &AppConfig) -> anyhow::Result<Dataset> {
    let generator = DatasetGenerator::new(config.generator.clone()).map_err(AppError::from)?;
    Ok(generator.generate().map_err(AppError::from)?)
}

fn write_dataset(config: &AppConfig, dataset: &Dataset, dir: &Path) -> anyhow::Result<()> {
    let files = DatasetCsvExporter::new(config.mart.amount_scale)
        .write_dir(dataset, dir)
        .map_err(AppError::from)?;

    for file in files {
        println!("- {} ({} rows)", file.path.display(), file.rows);
    }
    Ok(())
}

fn build(config: &AppConfig) -> anyhow::Result<()> {
    let out_dir = Path::new(&config.export.out_dir);
    let dataset = generate(config)?;
    write_dataset(config, &dataset, out_dir)?;

    let evaluation = MartPipeline::from_config(&config.mart)
        .evaluate(&dataset)
        .map_err(|e| AppError::from(finmart_core::MartError::from(e)))?;

    let report_path = out_dir.join(REPORT_FILE_NAME);
    let report_json = evaluation
        .report
        .to_json()
        .context("failed to render validation report")?;
    std::fs::write(&report_path, report_json)
        .map_err(|e| AppError::Export(format!("{}: {e}", report_path.display())))?;

    let published = evaluation.publish().map_err(AppError::from)?;

    let mart_path = out_dir.join(MART_FILE_NAME);
    MartCsvExporter::from_config(&config.mart)
        .write_file(&published.mart, &mart_path)
        .map_err(AppError::from)?;

    info!(
        rows = published.mart.len(),
        run_id = %published.report.run_id,
        mart = %mart_path.display(),
        "Mart build complete"
    );
    println!("- {} ({} rows)", mart_path.display(), published.mart.len());
    println!("- {}", report_path.display());
    Ok(())
}

fn validate(config: &AppConfig) -> anyhow::Result<()> {
    let dataset = generate(config)?;
    let evaluation = MartPipeline::from_config(&config.mart)
        .evaluate(&dataset)
        .map_err(|e| AppError::from(finmart_core::MartError::from(e)))?;

    println!(
        "{}",
        evaluation
            .report
            .to_json()
            .context("failed to render validation report")?
    );

    evaluation.publish().map_err(AppError::from)?;
    Ok(())
}
