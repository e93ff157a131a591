use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use ssh_scalar::cli;

#[derive(Parser)]
#[command(name = "ssh-scalar")]
#[command(author = "Oleg")]
#[command(version)]
#[command(about = "Extract and reconstruct raw Ed25519 scalars from OpenSSH private keys", long_about = None)]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the scalar and comment of a private key as a JSON array
    Extract {
        /// OpenSSH private key file ('-' for stdin)
        key_file: PathBuf,
    },

    /// Rebuild a private key from a JSON array [scalar_b64, optional_comment]
    Reconstruct {
        /// JSON input file ('-' for stdin)
        json_input: PathBuf,

        /// Write the private key here and the public key to <OUTPUT>.pub
        output: Option<PathBuf>,

        /// Print only the public key line to stdout
        #[arg(long)]
        pubkey_to_stdout: bool,
    },

    /// Print the authorized_keys line of a private key
    Pubkey {
        /// OpenSSH private key file ('-' for stdin)
        key_file: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr; stdout carries key material and JSON only
fn init_logging(verbose: bool) {
    let log_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("ssh_scalar={}", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr();

    match cli.command {
        Commands::Extract { key_file } => cli::extract::run(&key_file, &mut stdout),
        Commands::Reconstruct {
            json_input,
            output,
            pubkey_to_stdout,
        } => cli::reconstruct::run(
            &json_input,
            output.as_deref(),
            pubkey_to_stdout,
            &mut stdout,
            &mut stderr,
        ),
        Commands::Pubkey { key_file } => cli::pubkey::run(&key_file, &mut stdout, &mut stderr),
    }
}
