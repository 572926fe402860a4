mod cmd;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "activities",
    about = "Extracurricular activity signups: list activities and serve the signup API",
    version,
    propagate_version = true
)]
struct Cli {
    /// YAML seed file (default: built-in activity catalogue)
    #[arg(long, global = true, env = "ACTIVITIES_SEED")]
    seed: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Address to bind
        #[arg(long, env = "ACTIVITIES_HOST", default_value = "127.0.0.1")]
        host: String,

        /// Port to listen on (0 = OS-assigned)
        #[arg(long, env = "ACTIVITIES_PORT", default_value = "8000")]
        port: u16,

        /// Directory served under /static
        #[arg(long, env = "ACTIVITIES_STATIC_DIR", default_value = "static")]
        static_dir: PathBuf,
    },

    /// Print the seeded activities
    List,
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Serve { .. } => tracing::Level::INFO,
        Commands::List => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let seed = cli.seed.as_deref();

    let result = match cli.command {
        Commands::Serve {
            host,
            port,
            static_dir,
        } => cmd::serve::run(seed, host, port, static_dir),
        Commands::List => cmd::list::run(seed, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
