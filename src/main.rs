#![deny(unsafe_code)]

mod accents;
mod common;
mod config;
mod daemon;
mod gesture;
mod inject;
mod input;
mod picker;
mod x11;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::FmtSubscriber;

use accents::Language;
use config::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "accent-hold")]
#[command(version)]
#[command(about = "Hold a key and press space to type its accented variants", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable debug mode with verbose logging
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run the accent picker daemon (default)
    Run,
    /// Show or change the persistent settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// List the available character sets
    Languages,
}

#[derive(clap::Subcommand, Debug)]
enum ConfigAction {
    /// Print the current settings
    Show,
    /// Offer accents from these character sets, in this order (e.g. FR DE)
    SetLanguages {
        #[arg(required = true)]
        codes: Vec<String>,
    },
    /// Offer accents from every character set
    AllLanguages { state: Switch },
    /// Enable or disable gesture monitoring
    Active { state: Switch },
    /// Launch at login
    Autostart { state: Switch },
    StartHidden { state: Switch },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Switch {
    On,
    Off,
}

impl From<Switch> for bool {
    fn from(switch: Switch) -> Self {
        matches!(switch, Switch::On)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter_directives = if cli.debug {
        // Debug mode: detailed logs for our app, but keep noisy libraries (x11rb) at info
        "info,accent_hold=debug"
    } else {
        "info"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter_directives));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            let config = AppConfig::load()?;

            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .context("Failed to build Tokio runtime")?;

            rt.block_on(daemon::run_daemon(config))
        }
        Commands::Config { action } => run_config(action),
        Commands::Languages => {
            for language in Language::all() {
                println!("{:<8} {}", language.code(), language.name());
            }
            Ok(())
        }
    }
}

fn run_config(action: ConfigAction) -> Result<()> {
    let mut config = AppConfig::load()?;

    match action {
        ConfigAction::Show => {
            println!("{}", serde_json::to_string_pretty(&config)?);
            return Ok(());
        }
        ConfigAction::SetLanguages { codes } => config.set_character_sets(codes.as_slice())?,
        ConfigAction::AllLanguages { state } => config.set_all_character_sets(state.into()),
        ConfigAction::Active { state } => config.set_active(state.into()),
        ConfigAction::Autostart { state } => config.set_auto_start(state.into())?,
        ConfigAction::StartHidden { state } => config.set_start_hidden(state.into()),
    }

    config.save()?;
    if daemon::instance::notify_reload()? {
        println!("Running daemon reloaded its settings");
    }
    Ok(())
}
