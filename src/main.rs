//! VetKoto - terminal admin dashboard for a veterinary clinic
//!
//! Binary entry point: parses flags, loads settings, picks the backend and
//! hands an engine to the TUI runner.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::eyre;
use tracing::info;

use vetkoto_app::config::{
    apply_env_overrides, apply_overrides, default_config_path, init_config, load_settings,
};
use vetkoto_app::Engine;
use vetkoto_core::SchemaRegistry;
use vetkoto_remote::{CsvConverter, MemoryStore, PostgrestClient};

/// VetKoto - clinic admin dashboard
#[derive(Parser, Debug)]
#[command(name = "vetkoto")]
#[command(about = "Terminal admin dashboard for a veterinary clinic", long_about = None)]
struct Args {
    /// Config file (defaults to <config_dir>/vetkoto/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Backend base URL, overrides config and VETKOTO_URL
    #[arg(long)]
    url: Option<String>,

    /// Run against an in-memory store with sample clinic data
    #[arg(long)]
    demo: bool,

    /// Section to open first (dashboard, owners, patients, ...)
    #[arg(long, value_name = "ID")]
    section: Option<String>,

    /// Write a default config file and exit
    #[arg(long)]
    init_config: bool,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let config_path = args.config.unwrap_or_else(default_config_path);

    if args.init_config {
        if init_config(&config_path)? {
            eprintln!("Wrote {}", config_path.display());
        } else {
            eprintln!("{} already exists, leaving it alone", config_path.display());
        }
        return Ok(());
    }

    vetkoto_core::logging::init()?;

    let mut settings = load_settings(&config_path);
    apply_env_overrides(&mut settings);
    apply_overrides(&mut settings, args.url.as_deref(), None);
    if let Some(section) = args.section {
        settings.ui.start_section = section;
    }

    let registry = SchemaRegistry::clinic();
    let converter = CsvConverter::from_url(
        settings.import.converter_url.as_deref(),
        settings.backend.timeout(),
    )?;

    if args.demo {
        info!("Running against the in-memory demo store");
        // An empty url labels the header as demo
        settings.backend.url.clear();
        let store = Arc::new(MemoryStore::with_sample_data(registry.clone()));
        return Ok(vetkoto_tui::run(Engine::new(settings, registry, store, converter)).await?);
    }

    if !settings.backend.is_configured() {
        return Err(eyre!(
            "No backend configured. Set [backend] url in {}, pass --url or set VETKOTO_URL, \
             or try --demo",
            config_path.display()
        ));
    }

    info!("Connecting to {}", settings.backend.url);
    let store = Arc::new(PostgrestClient::new(
        &settings.backend.to_backend_config(),
        registry.clone(),
    )?);
    Ok(vetkoto_tui::run(Engine::new(settings, registry, store, converter)).await?)
}
