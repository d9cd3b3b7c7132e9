//! Yana client state tool.
//!
//! Runs the client's boot sequence headlessly against a redb store file, and
//! reads or writes the persisted slices directly.
//!
//! # Usage
//!
//! ```bash
//! # Write a session, then boot against it
//! yana --db state.redb seed --version-name 2.4.0 --version-code 64 --token abc
//! yana --db state.redb restore
//!
//! # Show what is stored
//! yana --db state.redb inspect
//! ```

mod commands;
mod driver;
mod error;

use std::{io::Write, path::PathBuf, time::Duration};

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use yana_app::{AppConfig, BOOT_DELAY, MIN_SUPPORTED_VERSION_CODE, RestoreConfig};
use yana_core::SessionState;
use yana_store::RedbStore;

use crate::error::CliError;

/// Yana client state tool
#[derive(Parser, Debug)]
#[command(name = "yana")]
#[command(about = "Inspect and exercise persisted Yana client state")]
#[command(version)]
struct Args {
    /// Path to the redb store file
    #[arg(long, default_value = "yana.redb")]
    db: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the boot sequence and report the outcome
    Restore {
        /// Oldest restorable appVersionCode
        #[arg(long, default_value_t = MIN_SUPPORTED_VERSION_CODE)]
        min_version_code: u32,

        /// Delay before the boot-complete signal, in milliseconds
        #[arg(long, default_value_t = BOOT_DELAY.as_millis() as u64)]
        boot_delay_ms: u64,
    },

    /// Print the four stored blobs
    Inspect,

    /// Write a session blob
    Seed {
        /// appVersionName of the writing build
        #[arg(long)]
        version_name: String,

        /// appVersionCode of the writing build
        #[arg(long)]
        version_code: u32,

        /// Auth token (empty means signed out)
        #[arg(long, default_value = "")]
        token: String,

        /// Username
        #[arg(long, default_value = "")]
        username: String,

        /// Mark onboarding as done
        #[arg(long)]
        onboarded: bool,
    },

    /// Remove every stored blob
    Clear,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let store = RedbStore::open(&args.db).map_err(CliError::from)?;
    tracing::debug!(db = %args.db.display(), "store opened");

    let mut out = std::io::stdout().lock();
    match args.command {
        Command::Restore { min_version_code, boot_delay_ms } => {
            let config = AppConfig {
                restore: RestoreConfig {
                    min_supported_version_code: min_version_code,
                    boot_delay: Duration::from_millis(boot_delay_ms),
                },
                ..AppConfig::default()
            };
            let summary = commands::restore(store, config).await?;
            summary.write_to(&mut out)?;
        },
        Command::Inspect => commands::inspect(&store, &mut out)?,
        Command::Seed { version_name, version_code, token, username, onboarded } => {
            let session = SessionState {
                token,
                app_version_name: version_name,
                app_version_code: version_code,
                is_onboarding_done: onboarded,
                username,
            };
            commands::seed(&store, &session)?;
            writeln!(out, "seeded SESSION (appVersionCode {version_code})").map_err(CliError::from)?;
        },
        Command::Clear => commands::clear(&store)?,
    }

    Ok(())
}
