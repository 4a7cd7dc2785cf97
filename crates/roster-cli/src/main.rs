use clap::{Parser, Subcommand};
use roster_core::config::load_config;
use std::path::PathBuf;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "roster", version, about = "Roster operator CLI")]
struct Cli {
    /// Configuration file (defaults to $ROSTER_CONFIG, then ./roster.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the clients and users tables. Existing tables are left alone.
    CreateTables,

    /// Load the development fixtures: five clients and four staff accounts.
    Seed {
        /// Password given to every seeded staff account
        #[arg(long, env = "ROSTER_SEED_PASSWORD")]
        password: String,
    },

    /// Print every client record as JSON.
    Clients,

    /// Signing secret helpers
    Secret {
        #[command(subcommand)]
        cmd: SecretCommand,
    },
}

#[derive(Subcommand, Debug)]
enum SecretCommand {
    /// Print a random 32-byte signing secret, base64 encoded.
    Generate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => roster_core::RosterConfig::from_file(path)?,
        None => load_config()?,
    };

    match cli.cmd {
        Command::CreateTables => commands::tables::create_tables(&config).await?,
        Command::Seed { password } => commands::seed::seed(&config, &password).await?,
        Command::Clients => commands::clients::print_clients(&config).await?,
        Command::Secret { cmd } => match cmd {
            SecretCommand::Generate => commands::secret::generate(),
        },
    }

    Ok(())
}
