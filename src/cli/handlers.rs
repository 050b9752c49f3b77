use super::commands::{AssessArgs, RenderArgs};
use crate::audit::ExchangeLogger;
use crate::config::CreditLensConfig;
use crate::document::{find_document, read_document_text, DEFAULT_EXTENSIONS};
use crate::output::{read_combined, render_text, OutputWriter, WrittenOutputs};
use crate::pipeline::CreditAssessment;
use crate::progress::{LoggingHandler, ProgressHandler};
use crate::workflow_config::WorkflowConfig;
use anyhow::{bail, Context, Result};
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error, info};

pub async fn handle_assess(args: &AssessArgs, quiet: bool) -> i32 {
    match run_assess(args).await {
        Ok(written) => {
            for path in written.paths() {
                println!("{}", path.display());
            }
            if !quiet {
                info!("Credit assessment finished");
            }
            0
        }
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            1
        }
    }
}

pub fn handle_render(args: &RenderArgs) -> i32 {
    match read_combined(&args.path) {
        Ok(combined) => {
            print!("{}", render_text(&combined));
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn apply_overrides(config: &mut CreditLensConfig, args: &AssessArgs) {
    if let Some(provider) = args.backend {
        config.provider = provider;
    }
    if let Some(model) = &args.model {
        config.model = model.clone();
    }
    if let Some(timeout) = args.timeout {
        config.request_timeout_secs = timeout;
    }
    if let Some(dir) = &args.output_dir {
        config.output_dir = dir.clone();
    }
    if let Some(dir) = &args.config_dir {
        config.config_dir = dir.clone();
    }
    if let Some(path) = &args.exchange_log {
        config.exchange_log = Some(path.clone());
    }
}

fn default_search_dirs() -> Vec<PathBuf> {
    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    vec![cwd.clone(), cwd.join("input")]
}

async fn run_assess(args: &AssessArgs) -> Result<WrittenOutputs> {
    let mut config = CreditLensConfig::default();
    apply_overrides(&mut config, args);
    config.validate().context("Invalid configuration")?;
    debug!("{}", config);

    let workflow = WorkflowConfig::load(&config.config_dir)
        .context("Failed to load workflow configuration")?;

    let document_path = match &args.input {
        Some(path) if path.is_file() => path.clone(),
        Some(path) => bail!("Input document not found: {}", path.display()),
        None => find_document(&default_search_dirs(), DEFAULT_EXTENSIONS)?,
    };
    info!("Processing credit report: {}", document_path.display());
    let document_text = read_document_text(&document_path);

    let progress: Arc<dyn ProgressHandler> = Arc::new(LoggingHandler);
    let pipeline_config = config.pipeline_config(&workflow);
    let assessment = CreditAssessment::new(config.create_client(), pipeline_config)
        .with_exchange_log(ExchangeLogger::new(config.exchange_log.clone()))
        .with_progress_handler(progress);

    let combined = assessment
        .run(document_text)
        .await
        .context("Credit assessment failed")?;

    let writer = OutputWriter::new(&config.output_dir).with_formats(workflow.output_formats());
    let written = writer.write(&combined).context("Failed to save outputs")?;
    info!("Outputs saved in directory: {}", writer.output_dir().display());

    Ok(written)
}
