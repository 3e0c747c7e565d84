mod configs;
mod extract;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "kyujin-cli")]
#[command(about = "Job-posting field extraction command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Extract one job posting into a JSON record
    Extract {
        /// Page URL (http/https) or path to a saved HTML file
        source: String,
        /// Output file (defaults to stdout)
        output: Option<PathBuf>,
        /// Site config id; resolved from the URL when omitted
        #[arg(long)]
        config: Option<String>,
        /// Directory of `<id>.json` site configs
        #[arg(long)]
        config_dir: Option<PathBuf>,
    },
    /// List available site configs
    ListConfigs {
        /// Directory of `<id>.json` site configs
        #[arg(long)]
        config_dir: Option<PathBuf>,
    },
    /// Print the site config id a URL resolves to
    Resolve {
        url: String,
        /// Directory of `<id>.json` site configs
        #[arg(long)]
        config_dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = kyujin_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Extract {
            source,
            output,
            config: site_id,
            config_dir,
        } => {
            let dir = config_dir.unwrap_or_else(|| config.config_dir.clone());
            extract::run_extract(&config, &dir, &source, output.as_deref(), site_id.as_deref())
                .await
        }
        Commands::ListConfigs { config_dir } => {
            let dir = config_dir.unwrap_or_else(|| config.config_dir.clone());
            configs::run_list_configs(&dir)
        }
        Commands::Resolve { url, config_dir } => {
            let dir = config_dir.unwrap_or_else(|| config.config_dir.clone());
            println!("{}", configs::resolve_site_id(&dir, &url));
            Ok(())
        }
    }
}
