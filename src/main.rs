use clap::Parser;
use miette::{IntoDiagnostic, Result, WrapErr};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use depsweep::config::Config;
use depsweep::discovery::FileFinder;
use depsweep::extract::ExtractorKind;
use depsweep::project::ProjectModel;
use depsweep::report::{ReportFormat, Reporter};
use depsweep::analysis;

/// depsweep - Find declared dependencies that no source file imports
#[derive(Parser, Debug)]
#[command(name = "depsweep")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the project directory (containing build.gradle(.kts) or pom.xml)
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Source directories to scan instead of the build's source sets (can be specified multiple times)
    #[arg(short, long)]
    source_dir: Vec<PathBuf>,

    /// Source path patterns to exclude (can be specified multiple times)
    #[arg(short, long)]
    exclude: Vec<String>,

    /// Dependency name patterns never to report (can be specified multiple times)
    #[arg(short, long)]
    retain: Vec<String>,

    /// Directory to write the report to (default: the build directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Report format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Import extraction strategy
    #[arg(long, value_enum)]
    extractor: Option<ExtractorArg>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode - only diagnostics and the report location
    #[arg(short, long)]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum OutputFormat {
    Text,
    Json,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => ReportFormat::Text,
            OutputFormat::Json => ReportFormat::Json,
        }
    }
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum ExtractorArg {
    Regex,
    TreeSitter,
}

impl From<ExtractorArg> for ExtractorKind {
    fn from(kind: ExtractorArg) -> Self {
        match kind {
            ExtractorArg::Regex => ExtractorKind::Regex,
            ExtractorArg::TreeSitter => ExtractorKind::TreeSitter,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    info!("depsweep v{}", env!("CARGO_PKG_VERSION"));

    let root = cli
        .path
        .canonicalize()
        .into_diagnostic()
        .wrap_err_with(|| format!("Cannot open project directory: {}", cli.path.display()))?;

    let config = load_config(&cli, &root)?;
    let model = ProjectModel::load(&root).into_diagnostic()?;
    debug!(
        "{:?} project with {} source sets and {} configurations",
        model.build_tool,
        model.source_sets.len(),
        model.configurations.len()
    );

    run_analysis(&config, &model)
}

fn init_logging(verbose: bool, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // stdout is reserved for the report location
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli, root: &Path) -> Result<Config> {
    let mut config = if let Some(config_path) = &cli.config {
        Config::from_file(config_path)?
    } else {
        Config::from_default_locations(root)?
    };

    // Override with CLI arguments
    if !cli.source_dir.is_empty() {
        config.source_dirs = cli.source_dir.clone();
    }
    if !cli.exclude.is_empty() {
        config.exclude.extend(cli.exclude.clone());
    }
    if !cli.retain.is_empty() {
        config.retain.extend(cli.retain.clone());
    }
    if let Some(output_dir) = &cli.output_dir {
        config.report.output_dir = Some(output_dir.clone());
    }
    if let Some(format) = cli.format {
        config.report.format = format.into();
    }
    if let Some(extractor) = cli.extractor {
        config.extractor = extractor.into();
    }

    Ok(config)
}

fn run_analysis(config: &Config, model: &ProjectModel) -> Result<()> {
    let source_dirs = if config.source_dirs.is_empty() {
        model.source_dirs()
    } else {
        config.resolved_source_dirs(&model.root)
    };
    for dir in &source_dirs {
        debug!("Source directory: {}", dir.display());
    }

    let finder = FileFinder::new(config)?;
    let retain = config.retain_set()?;
    let extractor = config.extractor.build();

    let analysis = analysis::analyze(&finder, extractor.as_ref(), &source_dirs, &model.configurations)
        .retain(&retain);

    info!(
        "{} of {} declared dependencies have no matching import",
        analysis.unused.len(),
        analysis.declared.len()
    );

    let output_dir = config
        .report
        .output_dir
        .as_ref()
        .map(|dir| model.root.join(dir))
        .unwrap_or_else(|| model.build_dir.clone());

    // A failed write has already been logged; the run still completes
    Reporter::new(config.report.format, output_dir).report(&analysis);

    Ok(())
}
