//! CLI entrypoint for math-solver
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use solver_application::{
    ImageUpload, LlmGateway, NoSolveLogger, SolveLogger, SolveSubmissionUseCase, SolverConfig,
    Submission,
};
use solver_domain::{ConfigIssue, ConfigIssueCode, Severity};
use solver_infrastructure::{
    ConfigLoader, FileConfig, FileGeminiConfig, GeminiGateway, GeminiSettings, JsonlSolveLogger,
};
use solver_presentation::{
    AppState, Cli, Command, ConsoleFormatter, OutputFormat, ProgressReporter, serve,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    let _log_guard = init_logging(cli.verbose, config.server.debug, config.logging.file.as_deref())?;

    info!("Starting math-solver");

    match cli.command {
        Command::ShowConfig => {
            show_config(&config, cli.config.as_ref(), cli.no_config)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Serve { host, port } => {
            run_server(&config, host, port).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Solve {
            question,
            image,
            output,
            quiet,
        } => run_solve(&config, question, image, output, quiet).await,
    }
}

/// Install the tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `-v` picks the level and `debug`
/// raises the floor to debug. With `log_file`, a plain-text copy of the
/// output is written there as well.
fn init_logging(verbose: u8, debug: bool, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if debug { verbose.max(2) } else { verbose };
        match level {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"), // -vvv or more
        }
    });

    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false));

    let Some(path) = log_file else {
        registry.init();
        return Ok(None);
    };

    let file_name = path
        .file_name()
        .with_context(|| format!("Log file path has no file name: {}", path.display()))?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));
    registry
        .with(fmt::layer().with_ansi(false).with_writer(writer))
        .init();
    Ok(Some(guard))
}

/// Log every issue and fail on the first error-severity one.
fn check_config(config: &FileConfig) -> Result<SolverConfig> {
    let issues = config.validate();
    report_issues(&issues);

    if let Some(fatal) = issues.iter().find(|i| i.is_error()) {
        if fatal.code == ConfigIssueCode::MissingApiKey {
            bail!(
                "{}\nPlease set {} in your environment or .env file",
                fatal.message,
                config.gemini.api_key_env
            );
        }
        bail!("Invalid configuration: {}", fatal.message);
    }

    Ok(config.solver.to_solver_config().0)
}

fn report_issues(issues: &[ConfigIssue]) {
    for issue in issues {
        match issue.severity {
            Severity::Error => tracing::error!("{}", issue.message),
            Severity::Warning => warn!("{}", issue.message),
        }
    }
}

fn build_gateway(config: &FileGeminiConfig) -> Result<Arc<dyn LlmGateway>> {
    let api_key = config
        .resolve_api_key()
        .with_context(|| format!("{} not found in environment variables", config.api_key_env))?;

    let gateway = GeminiGateway::new(GeminiSettings {
        api_key,
        base_url: config.base_url.clone(),
        model: config.model.clone(),
        vision_model: config.vision_model.clone(),
        timeout: Duration::from_secs(config.timeout_seconds),
    })
    .context("Failed to initialize the Gemini client")?;

    Ok(Arc::new(gateway))
}

fn build_logger(path: Option<&PathBuf>) -> Arc<dyn SolveLogger> {
    match path.and_then(JsonlSolveLogger::new) {
        Some(logger) => {
            info!("Logging failed solves to {}", logger.path().display());
            Arc::new(logger)
        }
        None => Arc::new(NoSolveLogger),
    }
}

async fn run_server(config: &FileConfig, host: Option<String>, port: Option<u16>) -> Result<()> {
    let solver_config = check_config(config)?;

    // === Dependency Injection ===
    let gateway = build_gateway(&config.gemini)?;
    let logger = build_logger(config.logging.failure_log.as_ref());
    let state = AppState::new(gateway, solver_config, logger);

    let mut server = config.server.clone();
    if let Some(host) = host {
        server.host = host;
    }
    if let Some(port) = port {
        server.port = port;
    }
    let addr = server.bind_address();

    println!("JEE Math Solver running on http://{}", addr);
    serve(&addr, state)
        .await
        .with_context(|| format!("Server on {} failed", addr))
}

async fn run_solve(
    config: &FileConfig,
    question: Option<String>,
    image: Option<PathBuf>,
    output: OutputFormat,
    quiet: bool,
) -> Result<ExitCode> {
    let solver_config = check_config(config)?;

    // === Dependency Injection ===
    let gateway = build_gateway(&config.gemini)?;
    let logger = build_logger(config.logging.failure_log.as_ref());
    let use_case = SolveSubmissionUseCase::with_logger(gateway, solver_config, logger);

    let mut submission = Submission::text(question.unwrap_or_default());
    if let Some(path) = image {
        let bytes = tokio::fs::read(&path)
            .await
            .with_context(|| format!("Failed to read image {}", path.display()))?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        submission = submission.with_image(ImageUpload::new(filename, bytes));
    }

    // Execute with or without progress reporting
    let outcome = if quiet || output == OutputFormat::Json {
        use_case.execute(submission).await
    } else {
        let progress = ProgressReporter::new();
        use_case.execute_with_progress(submission, &progress).await
    };

    let text = match output {
        OutputFormat::Pretty => ConsoleFormatter::format(&outcome.result),
        OutputFormat::Json => ConsoleFormatter::format_json(&outcome.result),
    };
    println!("{}", text);

    Ok(if outcome.result.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn show_config(config: &FileConfig, config_path: Option<&PathBuf>, no_config: bool) -> Result<()> {
    if no_config {
        println!("Configuration files disabled (--no-config); using built-in defaults.");
    } else {
        ConfigLoader::print_config_sources(config_path);
    }

    let api_key = config.gemini.resolve_api_key();
    let mut redacted = config.clone();
    redacted.gemini.api_key = api_key.as_deref().map(redact);

    println!();
    println!("Effective configuration:");
    println!(
        "{}",
        toml::to_string_pretty(&redacted).context("Failed to render configuration")?
    );

    let issues = config.validate();
    if issues.is_empty() {
        println!("No configuration issues found.");
    } else {
        println!("Issues:");
        for issue in &issues {
            let label = match issue.severity {
                Severity::Error => "error",
                Severity::Warning => "warning",
            };
            println!("  [{}] {}", label, issue.message);
        }
    }

    Ok(())
}

/// Keep the last four characters of a secret
fn redact(secret: &str) -> String {
    let tail: String = secret
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    if secret.chars().count() <= 8 {
        "********".to_string()
    } else {
        format!("********{}", tail)
    }
}
