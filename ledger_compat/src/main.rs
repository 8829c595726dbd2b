//! `ledger-compat` — run the compatibility checks against the linked driver.
//!
//! Exit codes: 0 all checks passed, 1 a check failed, 2 hard error
//! (unreadable or invalid policy, malformed constant).

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing_subscriber::EnvFilter;

use ledger_compat::config::{load_policy, POLICY_PATH_ENV};
use ledger_compat::{verify, CompatPolicy, VersionFacade};

#[derive(Parser)]
#[command(name = "ledger-compat")]
#[command(about = "Check that the ledger driver is compatible with this module", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all compatibility checks
    Check {
        /// Policy file overriding the published floor and lines
        #[arg(short, long, env = POLICY_PATH_ENV)]
        policy: Option<PathBuf>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the module, driver and core library versions
    Versions {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Check { policy, json } => run_check(policy, json),
        Commands::Versions { json } => run_versions(json).map(|()| true),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn run_check(policy_path: Option<PathBuf>, as_json: bool) -> Result<bool> {
    let policy = match policy_path {
        Some(path) => load_policy(&path)?,
        None => CompatPolicy::published()
            .context("published policy constants are invalid")?
            .clone(),
    };
    let facade = VersionFacade::native()?;
    let report = verify(&policy, &facade);

    if as_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(report.passed());
    }

    println!("module:       {}", report.module_version);
    println!("driver:       {}", report.driver_version);
    println!("core library: {}", report.core_library_version);
    println!();
    for outcome in &report.checks {
        let tag = if outcome.passed { "PASS" } else { "FAIL" };
        println!("[{}] {}: {}", tag, outcome.check, outcome.message);
    }

    let failed = report.failures().count();
    println!("\n===========================================");
    println!("Results: {}/{} passed", report.checks.len() - failed, report.checks.len());
    println!("Fingerprint: {}", report.fingerprint());
    if failed == 0 {
        println!("[OK] Driver is compatible.");
    } else {
        println!("[FAIL] Driver is not compatible.");
    }
    Ok(failed == 0)
}

fn run_versions(as_json: bool) -> Result<()> {
    let facade = VersionFacade::native()?;
    let module = facade.module_version();
    let driver = facade.driver_version()?;
    let core = facade.core_library_version()?;

    if as_json {
        let doc = json!({
            "module_version": module,
            "driver_version": driver,
            "core_library_version": core,
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        println!("module:       {}", module);
        println!("driver:       {}", driver);
        println!("core library: {}", core);
    }
    Ok(())
}
