//! Lockbox command-line entry point.
//!
//! # Usage
//!
//! ```bash
//! # Seal a file until new year's eve (UTC)
//! lockbox seal secret.pdf --expiry "2026-12-31 23:59:59"
//!
//! # Open it once the time has passed
//! lockbox open secret.lb
//! ```

// User-facing CLI output goes to stdout/stderr directly
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod commands;
mod expiry;

use std::{path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Lockbox time-locked file encryption
#[derive(Parser, Debug)]
#[command(name = "lockbox")]
#[command(about = "Seal files that cannot be opened before a chosen time")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encrypt a file into a time-locked container
    Seal {
        /// File to seal
        file: PathBuf,

        /// Unlock time, RFC 3339 or "YYYY-MM-DD HH:MM:SS" (UTC)
        #[arg(short, long)]
        expiry: String,

        /// Output path (defaults to the input with extension "lb")
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Decrypt a container once its unlock time has passed
    Open {
        /// Container to open (".lb" is appended if missing)
        file: PathBuf,

        /// Output path (defaults to "<name>_decrypted.<ext>" beside the
        /// container)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Time authority to query (host:port)
        #[arg(long, default_value = lockbox_core::DEFAULT_NTP_SERVER)]
        ntp_server: String,

        /// Time query timeout in seconds
        #[arg(long, default_value = "5")]
        timeout: u64,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

    let result = match args.command {
        Command::Seal { file, expiry, output } => commands::run_seal(&file, &expiry, output),
        Command::Open { file, output, ntp_server, timeout } => {
            commands::run_open(&file, output, &ntp_server, timeout)
        },
    };

    match result {
        Ok(message) => {
            println!("{message}");
            ExitCode::SUCCESS
        },
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        },
    }
}
