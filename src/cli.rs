use clap::Parser;

/// Resolve Python imports to verified PyPI packages and keep
/// requirements files honest
#[derive(Parser, Debug)]
#[command(name = "depure")]
#[command(version)]
#[command(
    about = "Resolve Python imports to verified PyPI packages",
    long_about = None
)]
pub struct Args {
    /// Path to the project directory (defaults to current directory)
    #[arg(short, long)]
    pub path: Option<String>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Write development dependencies to a separate -dev file
    #[arg(long = "split-dev")]
    pub split_dev: bool,

    /// Existing requirements file to read pinned versions from
    /// (defaults to the output file when it already exists)
    #[arg(long)]
    pub pinned: Option<String>,

    /// Maximum transitive expansion depth
    #[arg(long = "max-depth")]
    pub max_depth: Option<usize>,

    /// Maximum simultaneous registry requests
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Registry cache entry lifetime in seconds
    #[arg(long = "ttl-secs")]
    pub ttl_secs: Option<u64>,

    /// Skip transitive dependency graph expansion
    #[arg(long = "no-graph")]
    pub no_graph: bool,

    /// Oracle model name (overrides depure.config.yml)
    #[arg(long)]
    pub model: Option<String>,

    /// Explicit config file path (default: depure.config.yml in the
    /// project directory)
    #[arg(long)]
    pub config: Option<String>,

    /// Exclude directories matching these names while scanning.
    /// Can be specified multiple times: -e build -e docs
    #[arg(short, long = "exclude", value_name = "PATTERN")]
    pub exclude: Vec<String>,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Derives the development-partition output path from the production
/// one: `requirements.txt` becomes `requirements-dev.txt`.
pub fn dev_output_path(output: &str) -> String {
    match output.rsplit_once('.') {
        Some((stem, extension)) => format!("{}-dev.{}", stem, extension),
        None => format!("{}-dev", output),
    }
}
