use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use forminator::ai::extraction::client::{DEFAULT_BASE_URL, DEFAULT_MAX_TOKENS, DEFAULT_MODEL};
use forminator::batch::{BatchOptions, FailurePolicy, Orchestrator};
use forminator::export::{export_csv, ExportOutcome};
use forminator::settings::{Settings, SettingsStore};
use forminator::{ExtractionClient, ExtractionConfig, Result};

/// Convert photos of forms into a CSV file using OpenAI
#[derive(Debug, Parser)]
#[command(name = "forminator", version)]
struct Cli {
    /// Directory containing the form images (jpg, jpeg, png)
    #[arg(short, long)]
    directory: Option<PathBuf>,

    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Directory the CSV file is written to
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// CSV file name
    #[arg(short, long)]
    output_file: Option<String>,

    #[arg(long, default_value = DEFAULT_MODEL)]
    model: String,

    #[arg(long, env = "OPENAI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Completion token ceiling per image
    #[arg(long, default_value_t = DEFAULT_MAX_TOKENS)]
    max_tokens: u32,

    /// Images processed at the same time
    #[arg(short, long, default_value_t = 1)]
    concurrency: usize,

    /// Row written for an image that could not be extracted: placeholder or skip
    #[arg(long, default_value = "placeholder")]
    on_failure: FailurePolicy,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 120)]
    timeout: u64,

    /// Replace the output file if it already exists
    #[arg(long)]
    overwrite: bool,

    /// Do not remember these settings for the next run
    #[arg(long)]
    no_save: bool,
}

impl Cli {
    /// Flags take precedence over saved settings
    fn apply_to(&self, mut settings: Settings) -> Settings {
        if let Some(directory) = &self.directory {
            settings.directory = directory.clone();
        }
        if let Some(api_key) = &self.api_key {
            settings.api_key = api_key.clone();
        }
        if let Some(output_dir) = &self.output_dir {
            settings.output_dir = output_dir.clone();
        }
        if let Some(output_file) = &self.output_file {
            settings.output_file = output_file.clone();
        }
        settings
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Optional, lets OPENAI_API_KEY and RUST_LOG live in a .env file
    let _ = dotenvy::dotenv();

    // Default: warn for dependencies, info for batch progress
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,forminator=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let store = SettingsStore::new();
    let saved = match &store {
        Ok(store) => store.load().unwrap_or_else(|e| {
            tracing::warn!("Ignoring saved settings: {}", e);
            Settings::default()
        }),
        Err(e) => {
            tracing::warn!("{}", e);
            Settings::default()
        }
    };

    let settings = cli.apply_to(saved);
    settings.validate()?;

    if !cli.no_save {
        if let Ok(store) = &store {
            if let Err(e) = store.save(&settings) {
                tracing::warn!("{}", e);
            }
        }
    }

    let config = ExtractionConfig::new(settings.api_key.clone())
        .with_base_url(cli.base_url.clone())
        .with_model(cli.model.clone())
        .with_max_tokens(cli.max_tokens)
        .with_timeout(Duration::from_secs(cli.timeout));
    let client = ExtractionClient::new(config)?;

    let orchestrator = Orchestrator::new(Arc::new(client)).with_options(BatchOptions {
        concurrency: cli.concurrency.max(1),
        failure_policy: cli.on_failure,
    });

    let (progress_tx, mut progress_rx) = mpsc::unbounded_channel();
    let printer = tokio::spawn(async move {
        while let Some(message) = progress_rx.recv().await {
            println!("{}", message);
        }
    });

    let result = orchestrator
        .run(&settings.directory, Some(progress_tx))
        .await?;
    // The sender is dropped with the batch, which ends the printer
    let _ = printer.await;

    println!("Processing complete");
    println!(
        "Processed {} of {} images",
        result.succeeded(),
        result.file_count
    );
    println!("Completion tokens: {}", result.tokens.completion_tokens);
    println!("Prompt tokens: {}", result.tokens.prompt_tokens);

    let output_path = settings.output_path();
    match export_csv(&output_path, &result.records, cli.overwrite)? {
        ExportOutcome::Written { rows } => {
            println!("Results written to {} ({} rows)", output_path.display(), rows)
        }
        ExportOutcome::NothingToWrite => println!("No results to write"),
        ExportOutcome::AlreadyExists => println!(
            "{} already exists, rerun with --overwrite to replace it",
            output_path.display()
        ),
    }

    Ok(())
}
