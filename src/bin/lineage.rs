//! Lineage CLI: build viewer data from a record file.
//!
//! Usage:
//!   lineage build <FILE> [--out DIR] [--config PATH]
//!   lineage relate <FILE> <A> <B> [--config PATH]
//!   lineage check <FILE> [--config PATH]

use clap::{Parser, Subcommand};
use lineage::{build_from_file, relate, BuildReport, LineageConfig, PersonId, Projections};
use std::env;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(
    name = "lineage",
    version,
    about = "Family-tree consolidation engine"
)]
struct Cli {
    /// Path to a YAML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build structure, details, birthdays and burials JSON
    Build {
        /// Record file to read
        file: PathBuf,
        /// Output directory (defaults to the configured output_dir)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print how one person is related to another
    Relate {
        /// Record file to read
        file: PathBuf,
        /// Person whose relation is described
        a: String,
        /// Person the relation is relative to
        b: String,
    },
    /// Report malformed records, surname findings and resolved unions
    Check {
        /// Record file to read
        file: PathBuf,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("LINEAGE_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "lineage=debug,info"
        } else {
            "lineage=info,warn"
        })
    });

    let format = env::var("LINEAGE_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn load(file: &Path, config: &LineageConfig) -> Result<BuildReport, String> {
    build_from_file(file, config).map_err(|e| format!("{}: {}", file.display(), e))
}

fn cmd_build(file: &Path, out: Option<PathBuf>, config: &LineageConfig) -> i32 {
    let report = match load(file, config) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    for diagnostic in &report.diagnostics {
        eprintln!("warning: {}", diagnostic);
    }

    let out = out.unwrap_or_else(|| config.output_dir.clone());
    match Projections::from_people(&report.people).write_to(&out) {
        Ok(()) => {
            info!(dir = %out.display(), "projections written");
            println!(
                "Wrote {} people ({} unions resolved) to {}",
                report.people.len(),
                report.resolutions.len(),
                out.display()
            );
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_relate(file: &Path, a: &str, b: &str, config: &LineageConfig) -> i32 {
    let report = match load(file, config) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    match relate(&report.people, &PersonId::from(a), &PersonId::from(b)) {
        Ok((person, relation)) => {
            println!("{} ({}): {}", person.name(), person.id, relation.label(person.sex));
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_check(file: &Path, config: &LineageConfig) -> i32 {
    let report = match load(file, config) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    for diagnostic in &report.diagnostics {
        println!("{}", diagnostic);
    }
    for finding in &report.findings {
        println!("{}", finding);
    }
    for resolution in &report.resolutions {
        println!(
            "resolved union {} + {} (shadow {})",
            resolution.person1, resolution.person2, resolution.shadow2
        );
    }
    println!(
        "{} people, {} diagnostics, {} surname findings, {} unions resolved",
        report.people.len(),
        report.diagnostics.len(),
        report.findings.len(),
        report.resolutions.len()
    );

    if report.has_data_loss() {
        1
    } else {
        0
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let config = match LineageConfig::resolve(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let code = match cli.command {
        Commands::Build { file, out } => cmd_build(&file, out, &config),
        Commands::Relate { file, a, b } => cmd_relate(&file, &a, &b, &config),
        Commands::Check { file } => cmd_check(&file, &config),
    };
    std::process::exit(code);
}
