mod catalog;
mod config;
mod download;
mod errors;
mod form;
mod service;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::form::{FormState, ResumeFile};
use crate::service::HttpCustomizeService;

/// Customize a resume against a job description via the ZenCV service.
#[derive(Debug, Parser)]
#[command(name = "zencv", version)]
struct Args {
    /// Path to the resume file (.pdf, .doc, .docx; max 5 MiB).
    #[arg(long, required_unless_present = "list_models")]
    resume: Option<PathBuf>,

    /// Path to a text file holding the job description.
    #[arg(long, required_unless_present = "list_models")]
    job_description: Option<PathBuf>,

    /// Model id from the catalog.
    #[arg(long, default_value = catalog::default_model().id)]
    model: String,

    /// Directory where the customized resume is written.
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Print the model catalog as JSON and exit.
    #[arg(long)]
    list_models: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if args.list_models {
        println!("{}", serde_json::to_string_pretty(catalog::MODEL_CATALOG)?);
        return Ok(());
    }

    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("ZenCV client v{}", env!("CARGO_PKG_VERSION"));

    // The form silently ignores disabled/unknown ids; the CLI rejects them
    // up front so the user is not left with the default model unawares.
    match catalog::find(&args.model) {
        Some(option) if option.available => {}
        Some(option) => bail!("Model '{}' is currently unavailable", option.id),
        None => bail!(
            "Unknown model '{}'; run with --list-models to see the catalog",
            args.model
        ),
    }

    let (Some(resume_path), Some(jd_path)) = (args.resume, args.job_description) else {
        bail!("--resume and --job-description are required");
    };

    let mut state = FormState::new();
    state.select_model(&args.model);

    let jd_text = std::fs::read_to_string(&jd_path)
        .with_context(|| format!("Failed to read job description '{}'", jd_path.display()))?;
    state.set_job_description(jd_text);

    let file = ResumeFile::from_path(&resume_path)?;
    if !file.has_accepted_extension() {
        warn!(
            "'{}' does not look like a PDF or Word document; sending it anyway",
            file.name
        );
    }
    state.select_file(file);
    if let Some(err) = state.error() {
        bail!("{err}");
    }

    let service = HttpCustomizeService::new(
        config.api_endpoint.clone(),
        config.request_timeout_secs.map(Duration::from_secs),
    );
    if config.request_timeout_secs.is_none() {
        // Matches the observed behavior of the original client. A hung
        // upstream hangs us too; set ZENCV_REQUEST_TIMEOUT_SECS to bound it.
        warn!("No request timeout configured; the request may wait indefinitely");
    }

    info!(
        "Submitting resume to {} (model: {})",
        config.api_endpoint, args.model
    );
    state.submit(&service).await;
    if let Some(err) = state.error() {
        bail!("{err}");
    }

    match state.download(&args.output_dir)? {
        Some(path) => info!("Customized resume saved to {}", path.display()),
        None => bail!("Service returned no document"),
    }

    Ok(())
}
