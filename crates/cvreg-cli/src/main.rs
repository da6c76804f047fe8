//! # cvreg CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use clap::Parser;

/// Voter registration auxiliary-data hashing.
///
/// Computes the registration payload and auxiliary data digests of a
/// CIP-15 / CIP-36 registration and signs the payload digest.
#[derive(Parser, Debug)]
#[command(name = "cvreg", version, about)]
struct Cli {
    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Hash and sign a registration file.
    Hash(cvreg_cli::hash::HashArgs),
    /// Derive the public key of a staking key seed.
    Keygen(cvreg_cli::keygen::KeygenArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs on stderr, reports on stdout
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr);
    if cli.json_logs {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    let report = match cli.command {
        Commands::Hash(args) => serde_json::to_string_pretty(&cvreg_cli::hash::run(&args)?)?,
        Commands::Keygen(args) => serde_json::to_string_pretty(&cvreg_cli::keygen::run(&args)?)?,
    };
    println!("{report}");

    Ok(())
}
