use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use tenderlens_common::{logger, AppConfig};
use tenderlens_llm::TenderAnalyzer;

/// Find project root by looking for .git directory
fn find_project_root() -> Option<PathBuf> {
    let mut current_dir = std::env::current_dir().ok()?;

    loop {
        if current_dir.join(".git").exists() {
            return Some(current_dir);
        }

        if !current_dir.pop() {
            break;
        }
    }

    None
}

/// Load .env file from project root
fn load_dotenv_from_project_root() {
    if let Some(root) = find_project_root() {
        let env_path = root.join(".env");
        if env_path.exists() {
            dotenv::from_path(&env_path).ok();
        }
    } else {
        dotenv::dotenv().ok();
    }
}

#[derive(Parser)]
#[command(name = "tenderlens")]
#[command(about = "TenderLens - LLM-assisted tender document analysis", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a plain-text tender document
    Analyze {
        /// Document path, or "-" for stdin
        input: PathBuf,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,

        /// Model name (overrides TENDERLENS_MODEL)
        #[arg(long)]
        model: Option<String>,

        /// API key (overrides OPENAI_API_KEY)
        #[arg(long)]
        api_key: Option<String>,

        /// Log level (overrides LOG_LEVEL)
        #[arg(long)]
        log_level: Option<String>,

        /// Also write logs to LOG_DIR/tenderlens.log
        #[arg(long)]
        log_file: bool,
    },
}

fn read_document(input: &Path) -> Result<String> {
    if input == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read document from stdin")?;
        return Ok(text);
    }

    std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read document {}", input.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    load_dotenv_from_project_root();

    match cli.command {
        Commands::Analyze { input, json, model, api_key, log_level, log_file } => {
            let mut config = AppConfig::from_env();
            if let Some(model) = model {
                config.model = model;
            }
            if let Some(key) = api_key {
                config.api_key = Some(key);
            }
            if let Some(level) = log_level {
                config.log_level = level;
            }
            config.validate()?;

            if log_file {
                logger::setup_logging(&config)?;
            } else {
                logger::setup_console_logging(&config.log_level)?;
            }

            // Fails here, before reading input, when no credential is set.
            let analyzer = TenderAnalyzer::from_config(&config)?;

            let text = read_document(&input)?;
            tracing::info!("Analyzing {} with model {}", input.display(), config.model);

            let result = analyzer.analyze(&text).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{}", result.full_analysis);
            }
        }
    }

    Ok(())
}
