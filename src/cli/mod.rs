use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

pub mod config;
pub mod display;
pub mod info;
pub mod init_config;
pub mod prepare_vote;
pub mod proposals;
pub mod version;
pub mod voted;

use config::{default_config_path, DaoboardConfig};

#[derive(Parser)]
#[command(name = "daoboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Dashboard CLI for DAO proposals and votes", long_about = None)]
pub struct Cli {
    /// Path to config file (default: ~/.config/daoboard/config.toml)
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show DAO headline figures and history
    Info,

    /// List proposals with vote tallies
    Proposals {
        /// Which proposals to list (active, approved, failed, past)
        #[arg(long, default_value = "active")]
        filter: String,

        /// Page number, starting at 1
        #[arg(long, default_value_t = 1)]
        page: u64,
    },

    /// List proposals an account has voted on
    Voted {
        /// Account to look up (defaults to the configured wallet account)
        #[arg(long)]
        account: Option<String>,

        /// Page number, starting at 1
        #[arg(long, default_value_t = 1)]
        page: u64,
    },

    /// Print the act_proposal call for a vote, ready for an external wallet to sign
    PrepareVote {
        /// Numeric proposal id
        #[arg(long)]
        proposal: u64,

        /// approve, reject or remove
        #[arg(long)]
        choice: String,

        /// DAO contract (defaults to the configured dao_id)
        #[arg(long)]
        contract: Option<String>,
    },

    /// Write a default config file
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Display version information
    Version,
}

/// Install the tracing subscriber. `RUST_LOG` wins over the configured level.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    // A subscriber may already be installed (tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

pub async fn execute(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = cli
        .config
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path);

    match cli.command {
        Commands::InitConfig { force } => return init_config::execute(&config_path, force),
        Commands::Version => {
            version::execute();
            return Ok(());
        }
        _ => {}
    }

    let config = DaoboardConfig::load_or_default(&config_path)?;
    init_logging(&config.logging.level);

    match cli.command {
        Commands::Info => info::execute(&config).await,
        Commands::Proposals { filter, page } => proposals::execute(&config, &filter, page).await,
        Commands::Voted { account, page } => voted::execute(&config, account, page).await,
        Commands::PrepareVote {
            proposal,
            choice,
            contract,
        } => prepare_vote::execute(&config, proposal, &choice, contract),
        Commands::InitConfig { .. } | Commands::Version => Ok(()),
    }
}
