//! Arena CLI
//!
//! Serves the JumpArena site and generates its crawler files.

use clap::Parser;
use color_eyre::eyre::Result;

/// Command-line interface for the JumpArena site.
#[derive(Parser)]
#[command(name = "arena", version, about = "JumpArena trampoline park website")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: std::path::PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve {
        /// Override server host
        #[arg(long)]
        host: Option<String>,
        /// Override server port
        #[arg(short, long)]
        port: Option<u16>,
        /// Keep articles in memory instead of SQLite
        #[arg(long)]
        memory: bool,
    },
    /// Write sitemap.xml and robots.txt
    Sitemap {
        /// Output directory
        #[arg(short, long, default_value = "public")]
        output: std::path::PathBuf,
        /// Read articles from an empty in-memory store
        #[arg(long)]
        memory: bool,
    },
    /// Validate configuration and catalog files
    Check {
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    arena::init_tracing(cli.verbose);

    match cli.command {
        Commands::Serve { host, port, memory } => {
            arena::cmd::serve::run(&cli.config, host.as_deref(), port, memory).await?;
        }
        Commands::Sitemap { output, memory } => {
            arena::cmd::sitemap::run(&cli.config, &output, memory).await?;
        }
        Commands::Check { strict } => {
            arena::cmd::check::run(&cli.config, strict)?;
        }
    }

    Ok(())
}
