mod adapters;
mod application;
mod cli;
mod config;
mod ports;
mod resolution;
mod shared;

use adapters::outbound::console::StderrProgressReporter;
use adapters::outbound::filesystem::{FileSystemScanner, FileSystemWriter, StdoutPresenter};
use adapters::outbound::network::{CachingRegistry, GeminiOracle, PyPiRegistry};
use application::dto::{ResolveOutcome, ResolveRequest, ResolveResponse};
use application::use_cases::ResolveDependenciesUseCase;
use cli::Args;
use owo_colors::OwoColorize;
use ports::outbound::OutputPresenter;
use resolution::domain::DependencyGraph;
use resolution::services::requirements;
use shared::{CancellationToken, ExitCode, ResolveError, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

const DEFAULT_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";

fn main() {
    if let Err(e) = run() {
        eprintln!();
        eprintln!("{}", "❌ An error occurred:".red().bold());
        eprintln!();
        eprintln!("{}", e);

        // Display error chain
        let mut source = e.source();
        while let Some(err) = source {
            eprintln!("\nCaused by: {}", err);
            source = err.source();
        }

        eprintln!();
        let exit_code = match e.downcast_ref::<ResolveError>() {
            Some(ResolveError::InvalidProjectPath { .. }) => ExitCode::InvalidArguments,
            _ => ExitCode::ApplicationError,
        };
        process::exit(exit_code.as_i32());
    }
}

#[tokio::main]
async fn run() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate project directory
    let project_dir = args.path.as_deref().unwrap_or(".");
    let project_path = PathBuf::from(project_dir);
    validate_project_path(&project_path)?;

    // Load configuration: explicit path wins, otherwise auto-discover
    // in the project directory
    let file_config = match &args.config {
        Some(path) => Some(config::load_config_from_path(Path::new(path))?),
        None => config::discover_config(&project_path)?,
    }
    .unwrap_or_default();

    let oracle_config = file_config.oracle.unwrap_or_default();
    let registry_config = file_config.registry.unwrap_or_default();

    // Effective settings: CLI flag over config file over default
    let model = args
        .model
        .clone()
        .or(oracle_config.model)
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());
    let api_key_env = oracle_config
        .api_key_env
        .unwrap_or_else(|| DEFAULT_API_KEY_ENV.to_string());
    let api_key = std::env::var(&api_key_env).map_err(|_| ResolveError::OracleNotConfigured {
        missing: "API key".to_string(),
        hint: format!("Export your key: export {}=<key>", api_key_env),
    })?;

    let max_depth = args
        .max_depth
        .or(file_config.max_depth)
        .unwrap_or(resolution::services::TransitiveGraphBuilder::DEFAULT_MAX_DEPTH);
    let concurrency = args
        .concurrency
        .or(file_config.concurrency)
        .unwrap_or(resolution::services::TransitiveGraphBuilder::DEFAULT_CONCURRENCY);
    let cache_ttl = Duration::from_secs(args.ttl_secs.or(file_config.cache_ttl_secs).unwrap_or(3600));

    let mut excludes = args.exclude.clone();
    excludes.extend(file_config.exclude.unwrap_or_default());

    // Create adapters (Dependency Injection)
    let scanner = FileSystemScanner::new(excludes);
    let oracle = match &oracle_config.endpoint {
        Some(endpoint) => GeminiOracle::with_endpoint(endpoint, &model, &api_key)?,
        None => GeminiOracle::new(&model, &api_key)?,
    };
    let pypi = match &registry_config.base_url {
        Some(base_url) => {
            let timeout = Duration::from_secs(registry_config.timeout_secs.unwrap_or(10));
            PyPiRegistry::with_base_url(base_url, timeout)?
        }
        None => PyPiRegistry::new()?,
    };
    let registry = CachingRegistry::with_ttl(pypi, cache_ttl);
    let progress_reporter = StderrProgressReporter::new();

    // Create use case with injected dependencies
    let use_case = ResolveDependenciesUseCase::new(scanner, oracle, registry, progress_reporter);

    // Read pinned versions from the existing artifact, if any
    let pinned = read_pinned_versions(&args)?;

    // Create request
    let request = ResolveRequest::new(project_path)
        .with_graph(!args.no_graph)
        .with_max_depth(max_depth)
        .with_concurrency(concurrency)
        .with_pinned(pinned);

    // Ctrl-C flips the token; in-flight work drains and the run ends
    // with a Cancelled outcome.
    let cancel = CancellationToken::new();
    let signal_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("\n⚠️  Cancellation requested, finishing in-flight work...");
            signal_token.cancel();
        }
    });

    // Execute use case
    let outcome = use_case.execute(request, &cancel).await?;

    match outcome {
        ResolveOutcome::Resolved(response) => present_response(&args, &response)?,
        ResolveOutcome::NoExternalDependencies => {
            eprintln!("💡 Hint: Nothing to write; this project only uses the standard library and local modules.");
        }
        ResolveOutcome::Cancelled => {
            eprintln!("⚠️  Run cancelled; no output written.");
        }
    }

    Ok(())
}

/// Pins come from the file named by `--pinned`, or from the output
/// file when it already exists. A missing `--pinned` file is an error;
/// a missing output file just means a fresh project.
fn read_pinned_versions(args: &Args) -> Result<HashMap<String, String>> {
    if let Some(path) = &args.pinned {
        let content = std::fs::read_to_string(path).map_err(|e| ResolveError::InvalidProjectPath {
            path: PathBuf::from(path),
            reason: format!("Failed to read pinned requirements file: {}", e),
        })?;
        return Ok(requirements::parse_pinned(&content));
    }

    if let Some(output) = &args.output {
        if Path::new(output).exists() {
            if let Ok(content) = std::fs::read_to_string(output) {
                return Ok(requirements::parse_pinned(&content));
            }
        }
    }

    Ok(HashMap::new())
}

/// Renders and writes the requirements artifact(s), then summarizes
/// the transitive graph on stderr.
fn present_response(args: &Args, response: &ResolveResponse) -> Result<()> {
    let dependencies = &response.dependencies;

    if args.split_dev {
        let prod_content = requirements::render(dependencies.production());
        let dev_content = requirements::render(dependencies.development());

        match &args.output {
            Some(output) => {
                FileSystemWriter::new(PathBuf::from(output)).present(&prod_content)?;
                if !dev_content.is_empty() {
                    let dev_path = cli::dev_output_path(output);
                    FileSystemWriter::new(PathBuf::from(dev_path)).present(&dev_content)?;
                }
            }
            None => {
                let mut combined = prod_content;
                if !dev_content.is_empty() {
                    combined.push_str("\n# Development dependencies\n");
                    combined.push_str(&dev_content);
                }
                StdoutPresenter::new().present(&combined)?;
            }
        }
    } else {
        let all: Vec<_> = dependencies.iter().cloned().collect();
        let content = requirements::render(&all);

        let presenter: Box<dyn OutputPresenter> = match &args.output {
            Some(output) => Box::new(FileSystemWriter::new(PathBuf::from(output))),
            None => Box::new(StdoutPresenter::new()),
        };
        presenter.present(&content)?;
    }

    if let Some(graph) = &response.graph {
        eprintln!("{}", render_graph_summary(graph));
    }

    Ok(())
}

/// One stderr block per BFS level: direct dependencies first, then
/// what they pull in.
fn render_graph_summary(graph: &DependencyGraph) -> String {
    let mut out = format!(
        "📦 Transitive graph: {} package(s), {} edge(s)",
        graph.nodes().len(),
        graph.edges().len()
    );

    let mut level = 0;
    loop {
        let nodes = graph.nodes_at_level(level);
        if nodes.is_empty() {
            break;
        }
        let names: Vec<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
        out.push_str(&format!("\n   level {}: {}", level, names.join(", ")));
        level += 1;
    }
    out
}

fn validate_project_path(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(ResolveError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: "Directory does not exist".to_string(),
        }
        .into());
    }

    // Security check: Reject symbolic links for project paths
    let metadata = std::fs::symlink_metadata(path).map_err(|e| ResolveError::InvalidProjectPath {
        path: path.to_path_buf(),
        reason: format!("Failed to read path metadata: {}", e),
    })?;

    if metadata.is_symlink() {
        return Err(ResolveError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: "Security: Project path is a symbolic link. For security reasons, symbolic links are not allowed.".to_string(),
        }
        .into());
    }

    if !path.is_dir() {
        return Err(ResolveError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: "Not a directory".to_string(),
        }
        .into());
    }

    Ok(())
}
