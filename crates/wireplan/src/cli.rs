//! Command line interface
//!
//! Loads a wiring graph document, resolves it and renders the report in
//! the requested format.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::info;
use wireplan_domain::error::Result;
use wireplan_infrastructure::config::{AppConfig, ConfigLoader};
use wireplan_infrastructure::error_ext::ErrorContext;
use wireplan_infrastructure::graph::GraphLoader;
use wireplan_resolve::{Reporter, ResolutionReport, WiringResolver};

/// Report rendering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Terminal summary with plan and diagnostics
    #[default]
    Human,
    /// Full report as JSON, for code generation
    Json,
    /// GitHub Actions summary and annotations
    Ci,
}

/// Command line interface for Wireplan
#[derive(Parser, Debug)]
#[command(name = "wireplan")]
#[command(about = "Wireplan - compile-time dependency-injection wiring resolver")]
#[command(version)]
pub struct Cli {
    /// Wiring graph document (`.json` or `.toml`)
    #[arg(value_name = "GRAPH")]
    pub graph: PathBuf,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,

    /// Write the report to a file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Resolve on a single thread
    #[arg(long)]
    pub sequential: bool,

    /// Skip edges already explored from earlier roots during cycle search
    #[arg(long)]
    pub memoize_cycles: bool,
}

impl Cli {
    /// Configuration from file and environment, with command line overrides
    pub fn load_config(&self) -> Result<AppConfig> {
        let mut loader = ConfigLoader::new();
        if let Some(path) = &self.config {
            loader = loader.with_config_path(path);
        }
        let mut config = loader.load()?;
        if self.sequential {
            config.resolver.parallel = false;
        }
        if self.memoize_cycles {
            config.resolver.memoize_cycle_search = true;
        }
        Ok(config)
    }

    /// Resolve the graph and emit the report
    pub fn execute(&self, config: &AppConfig) -> Result<ResolutionReport> {
        let graph = GraphLoader::load(&self.graph)?;
        let report = WiringResolver::new(config.resolver.clone()).resolve(&graph);

        let rendered = render(&report, self.format);
        match &self.output {
            Some(path) => {
                std::fs::write(path, rendered)
                    .io_context(format!("Failed to write report {}", path.display()))?;
                info!("Report written to {}", path.display());
            }
            None => println!("{rendered}"),
        }
        Ok(report)
    }
}

/// Render `report` in `format`
pub fn render(report: &ResolutionReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Human => Reporter::to_human_readable(report),
        OutputFormat::Json => Reporter::to_json(report),
        OutputFormat::Ci => Reporter::to_ci_summary(report),
    }
}
