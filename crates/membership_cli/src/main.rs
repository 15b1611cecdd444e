//! CLI smoke entry point.
//!
//! # Responsibility
//! - Load configuration, start logging and open the store exactly as a
//!   server process would.
//! - Print a deterministic one-line-per-fact summary for local sanity checks.

use membership_core::{
    init_logging, open_pool, AppConfig, MemberStore, MembershipStore, SportStore, SqliteStore,
};
use std::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("membership_core ping={}", membership_core::ping());
    println!("membership_core version={}", membership_core::core_version());

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("event=cli_run module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load(".")?;
    init_logging(&config.log_level, config.log_dir.as_deref())?;

    let pool = open_pool(&config.db_path, &config.pool_config())?;
    let store = SqliteStore::from_pool(pool);

    println!("db_path={}", config.db_path.display());
    println!("members={}", store.get_all_members()?.len());
    println!("sports={}", store.get_all_sports()?.len());
    println!("memberships={}", store.get_all_memberships()?.len());
    Ok(())
}
