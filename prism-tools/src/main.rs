// Copyright 2025 Prism Authors
//
// Licensed under the Apache License, Version 2.0

//! Prism SIMD diagnostics
//!
//! Reports the backend compiled into this build and checks it against the
//! scalar reference.
//!
//! # Usage
//!
//! ```bash
//! # Which backend did build.rs select?
//! prism info
//!
//! # Compare the active backend with the scalar reference
//! prism verify --samples 100000 --seed 42
//!
//! # Settings from a file, report as JSON
//! prism verify --config verify.json --json
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use prism_simd::config::VerifyConfig;
use prism_simd::simd::dispatch;
use prism_simd::verify::{verify_active, VerifyReport};

/// Prism SIMD - backend report and cross-backend verification
#[derive(Parser, Debug)]
#[command(name = "prism")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the SIMD backend compiled into this build
    Info,
    /// Replay random inputs on the active backend and the scalar reference
    Verify {
        /// JSON file with verification settings
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Samples per operation (overrides the config file)
        #[arg(short, long)]
        samples: Option<usize>,

        /// RNG seed (overrides the config file)
        #[arg(long)]
        seed: Option<u64>,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(log_level: &str) -> anyhow::Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("setting default subscriber")?;
    Ok(())
}

fn cmd_info() {
    dispatch::log_backend();
    print!("{}", dispatch::backend_info());
}

fn cmd_verify(
    config_path: Option<PathBuf>,
    samples: Option<usize>,
    seed: Option<u64>,
    json: bool,
) -> anyhow::Result<bool> {
    let mut config = match &config_path {
        Some(path) => VerifyConfig::from_json_file(path)
            .with_context(|| format!("loading verify config from {}", path.display()))?,
        None => VerifyConfig::default(),
    };
    if let Some(samples) = samples {
        config.samples = samples;
    }
    if let Some(seed) = seed {
        config.seed = seed;
    }

    info!(?config_path, samples = config.samples, seed = config.seed, "starting verification");
    let report = verify_active(&config).context("verification failed to run")?;

    if json {
        println!("{}", report.to_json()?);
    } else {
        print_summary(&report);
    }
    Ok(report.passed())
}

fn print_summary(report: &VerifyReport) {
    println!(
        "{} vs {} reference  (samples: {}, seed: {})",
        report.backend, report.reference, report.samples, report.seed
    );
    for family in &report.families {
        let status = if family.mismatches == 0 { "ok" } else { "FAILED" };
        let truncated = if family.truncated { " (stopped early)" } else { "" };
        println!(
            "  {:<10} {:>8} checks  {:>4} mismatches  {}{}",
            format!("{:?}", family.family).to_lowercase(),
            family.checks,
            family.mismatches,
            status,
            truncated
        );
    }
    for m in report.mismatches.iter().take(10) {
        println!("  {}: inputs {} expected {} got {}", m.op, m.inputs, m.expected, m.got);
    }
    if report.mismatches.len() > 10 {
        println!("  ... {} more", report.mismatches.len() - 10);
    }
    println!("{}", if report.passed() { "PASSED" } else { "FAILED" });
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    init_tracing(&args.log_level)?;

    match args.command {
        Command::Info => {
            cmd_info();
            Ok(ExitCode::SUCCESS)
        }
        Command::Verify {
            config,
            samples,
            seed,
            json,
        } => {
            let passed = cmd_verify(config, samples, seed, json)?;
            Ok(if passed { ExitCode::SUCCESS } else { ExitCode::FAILURE })
        }
    }
}
