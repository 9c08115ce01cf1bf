use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tokio::io::AsyncWriteExt;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use optiresume::commands::{
    handle_match, handle_parse, handle_render, handle_templates, RenderFormat,
};
use optiresume::config::Config;
use optiresume::errors::AppError;
use optiresume::state::AppState;

#[derive(Parser)]
#[command(name = "optiresume")]
#[command(version)]
#[command(about = "Extract structured data from résumés, match skills, and render templates", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a résumé (PDF or DOCX) into structured JSON
    Parse {
        /// Résumé file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Score a résumé against the skills a job description requires
    Match {
        /// Résumé file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Job description text
        #[arg(long, conflicts_with = "job_file", required_unless_present = "job_file")]
        job_description: Option<String>,

        /// File containing the job description
        #[arg(long, value_name = "PATH")]
        job_file: Option<PathBuf>,
    },

    /// Render a résumé as HTML, LaTeX source, or PDF
    Render {
        /// Résumé file, or JSON holding a parsed résumé
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value = "html")]
        format: OutputFormat,

        /// Template name (e.g. modern.tex, billryan_modern)
        #[arg(long)]
        template: Option<String>,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// List available LaTeX templates
    Templates,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Html,
    Latex,
    Pdf,
}

impl From<OutputFormat> for RenderFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Html => RenderFormat::Html,
            OutputFormat::Latex => RenderFormat::Latex,
            OutputFormat::Pdf => RenderFormat::Pdf,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::from_env().context("Failed to load configuration") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", AppError::Validation(format!("{e:#}")).to_json());
            return ExitCode::FAILURE;
        }
    };

    // Logs go to stderr so stdout carries only command output.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting OptiResume v{}", env!("CARGO_PKG_VERSION"));

    let state = AppState::new(config);
    info!(
        "Entity recognizer: {}, match scorer: {}",
        state.recognizer.backend(),
        state.scorer.backend()
    );

    match run(&state, cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.to_json());
            ExitCode::FAILURE
        }
    }
}

async fn run(state: &AppState, command: Commands) -> Result<(), AppError> {
    match command {
        Commands::Parse { input, compact } => {
            let out = handle_parse(state, &input, compact).await?;
            write_output(None, &out).await
        }
        Commands::Match {
            input,
            job_description,
            job_file,
        } => {
            let job_description = match (job_description, job_file) {
                (Some(text), _) => text,
                (None, Some(path)) => read_job_file(&path).await?,
                (None, None) => {
                    return Err(AppError::Validation(
                        "either --job-description or --job-file is required".to_string(),
                    ))
                }
            };
            let out = handle_match(state, &input, &job_description).await?;
            write_output(None, &out).await
        }
        Commands::Render {
            input,
            format,
            template,
            output,
        } => {
            let out = handle_render(state, &input, format.into(), template.as_deref()).await?;
            write_output(output.as_deref(), &out).await
        }
        Commands::Templates => {
            let out = handle_templates(state)?;
            write_output(None, &out).await
        }
    }
}

async fn read_job_file(path: &Path) -> Result<String, AppError> {
    if !tokio::fs::try_exists(path).await? {
        return Err(AppError::NotFound(format!(
            "File not found: {}",
            path.display()
        )));
    }
    Ok(tokio::fs::read_to_string(path).await?)
}

async fn write_output(output: Option<&Path>, bytes: &[u8]) -> Result<(), AppError> {
    match output {
        Some(path) => {
            tokio::fs::write(path, bytes).await?;
            info!("Wrote {} bytes to {}", bytes.len(), path.display());
        }
        None => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(bytes).await?;
            stdout.flush().await?;
        }
    }
    Ok(())
}
