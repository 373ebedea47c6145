//! Command-line entry point for the statistics walkthrough
//!
//! ```bash
//! # Reference run: figures in ./figures, report on stdout
//! stat-primer
//!
//! # Welch's test on a score table, JSON report, no figures
//! stat-primer --scores scores.csv --welch --no-figures --json
//! ```

use anyhow::{anyhow, Context};
use clap::{Parser, ValueEnum};
use stat_primer::{run_walkthrough, GroupedSamples, VarianceAssumption, WalkthroughConfig};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum LogFormat {
    #[default]
    Plain,
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "stat-primer",
    version,
    about = "Descriptive statistics, hypothesis tests and charts on synthetic data"
)]
struct Cli {
    /// JSON configuration file; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed of the synthetic data
    #[arg(long)]
    seed: Option<u64>,
    /// Directory for the SVG figures
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
    /// Skip rendering figures
    #[arg(long)]
    no_figures: bool,
    /// Significance level for verdicts
    #[arg(long)]
    alpha: Option<f64>,
    /// Use Welch's unequal-variance t-test
    #[arg(long)]
    welch: bool,
    /// CSV with `Group,Score` columns replacing the synthetic groups
    #[arg(long)]
    scores: Option<PathBuf>,
    /// Print the report as JSON
    #[arg(long)]
    json: bool,
    /// Log line format on stderr
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    log_format: LogFormat,
}

impl Cli {
    /// Configuration file (or defaults) with flag overrides applied
    fn config(&self) -> anyhow::Result<WalkthroughConfig> {
        let mut config = match &self.config {
            Some(path) => WalkthroughConfig::from_json_path(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => WalkthroughConfig::default(),
        };

        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(alpha) = self.alpha {
            config.alpha = alpha;
        }
        if self.no_figures {
            config.figures = false;
        }
        if self.welch {
            config.variance = VarianceAssumption::Unequal;
        }
        config.validate()?;
        Ok(config)
    }
}

fn init_tracing(format: LogFormat) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("stat_primer=info,primer_viz=info"))?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Plain => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    }
    .map_err(|e| anyhow!(e))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format)?;

    let config = cli.config()?;
    let scores = cli
        .scores
        .as_ref()
        .map(|path| {
            GroupedSamples::from_csv_path(path)
                .with_context(|| format!("reading scores {}", path.display()))
        })
        .transpose()?;

    info!(
        version = stat_primer::VERSION,
        seed = config.seed,
        figures = config.figures,
        "starting walkthrough"
    );
    let report = run_walkthrough(config, scores)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{report}");
    }
    Ok(())
}
