//! CLI entrypoint for MedGuard
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Result, anyhow, bail};
use clap::Parser;
use medguard_application::{
    LlmGateway, PipelineGateways, RunLogger, RunPipelineUseCase, VectorSearchPort,
};
use medguard_domain::SpeculationMarkers;
use medguard_infrastructure::{
    ConfigLoader, FileConfig, IndexedRecordSearch, JsonlRunLogger, OpenAiChatGateway,
    OpenAiEmbeddingProvider,
};
use medguard_presentation::{ChatRepl, Cli, ConsoleFormatter, OutputFormatter, stage_reporter};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Layer};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).map_err(|e| anyhow!("{e}"))?
    };
    apply_overrides(&mut config, &cli);

    // Keep the guard alive so the file writer flushes on exit.
    let _log_guard = init_tracing(cli.verbose, config.logging.dir.as_deref());

    info!("Starting MedGuard");

    let warnings = config.check()?;
    for issue in &warnings {
        warn!("{}", issue.message);
        eprintln!("Warning: {}", issue.message);
    }

    if cli.no_color || !config.output.color {
        colored::control::set_override(false);
    }

    let show_progress = !cli.quiet && config.repl.show_progress;

    // === Dependency Injection ===
    let use_case = build_use_case(&config)?;

    // Chat mode
    if cli.chat {
        let mut repl = ChatRepl::new(Arc::new(use_case))
            .with_progress(show_progress)
            .with_format(config.output.format_for(true))
            .with_history_file(config.repl.history_path());

        repl.run().await?;
        return Ok(());
    }

    // Single question mode - question is required
    let question = match cli.question {
        Some(q) => q,
        None => bail!("Question is required. Use --chat for interactive mode."),
    };

    let cancellation = CancellationToken::new();
    let token = cancellation.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            token.cancel();
        }
    });
    let use_case = use_case.with_cancellation(cancellation);

    let state = if show_progress {
        let progress = stage_reporter();
        use_case
            .execute_with_progress(&question, None, progress.as_ref())
            .await?
    } else {
        use_case.execute(&question, None).await?
    };

    println!(
        "{}",
        ConsoleFormatter.render(&state, config.output.format_for(false))
    );

    Ok(())
}

/// Command-line flags take precedence over every config source.
fn apply_overrides(config: &mut FileConfig, cli: &Cli) {
    if let Some(format) = cli.format {
        config.output.format = Some(format.into());
    }
    if let Some(k) = cli.retrieval_k {
        config.pipeline.retrieval_k = k;
    }
    if let Some(top_k) = cli.top_k {
        config.pipeline.rerank_top_k = top_k;
    }
    if let Some(markers) = cli.markers {
        config.pipeline.speculation_markers = SpeculationMarkers::from(markers).to_string();
    }
    if let Some(index) = &cli.index {
        config.index.path = Some(index.display().to_string());
    }
}

/// Console logs by verbosity (or `RUST_LOG`), plus daily files when
/// `[logging].dir` is set.
fn init_tracing(verbose: u8, log_dir: Option<&str>) -> Option<WorkerGuard> {
    let filter = if std::env::var_os("RUST_LOG").is_some() {
        EnvFilter::from_default_env()
    } else {
        match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"), // -vvv or more
        }
    };

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(filter);

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "medguard.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer)
                .with_filter(EnvFilter::new("debug"));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .init();

    guard
}

fn build_use_case(config: &FileConfig) -> Result<RunPipelineUseCase> {
    let openai = &config.providers.openai;
    let models = &config.models;
    let gateway = |model: &str| -> Result<Arc<dyn LlmGateway>> {
        Ok(Arc::new(OpenAiChatGateway::from_config(openai, model)?))
    };
    let gateways = PipelineGateways {
        reranker: gateway(&models.reranker)?,
        generator: gateway(&models.generator)?,
        validator: gateway(&models.validator)?,
    };

    // `check()` has already rejected a missing path.
    let index_path = config
        .index
        .path
        .as_deref()
        .ok_or_else(|| anyhow!("index.path is not set"))?;
    let embedder = Arc::new(OpenAiEmbeddingProvider::from_config(&config.embeddings));
    let search: Arc<dyn VectorSearchPort> =
        Arc::new(IndexedRecordSearch::new(index_path, embedder));

    let mut use_case = RunPipelineUseCase::new(search, gateways, config.pipeline_params());

    if let Some(path) = &config.logging.run_log {
        match JsonlRunLogger::new(path) {
            Some(logger) => {
                info!("Run log: {}", logger.path().display());
                let logger: Arc<dyn RunLogger> = Arc::new(logger);
                use_case = use_case.with_run_logger(logger);
            }
            None => warn!("Run logging disabled"),
        }
    }

    Ok(use_case)
}
