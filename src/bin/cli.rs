use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use routeguard::catalog;
use routeguard::config::Config;
use routeguard::error::AuditError;
use routeguard::report::OutputFormat;
use routeguard::ScanOptions;

#[derive(Parser)]
#[command(
    name = "routeguard",
    about = "Static security auditor for HTTP route declarations",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Audit a directory of route-definition modules
    Scan {
        /// Root directory containing route files
        #[arg(default_value = "./routes")]
        path: PathBuf,

        /// Config file path
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Output format (console, json)
        #[arg(long, short = 'f', default_value = "console")]
        format: String,

        /// Show the LOW-severity recommendations block
        #[arg(long, short = 'v', env = "ROUTEGUARD_VERBOSE")]
        verbose: bool,

        /// Write output to file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// List the safeguard detectors and policy tables
    ListPatterns,

    /// Generate a starter .routeguard.toml config file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Scan {
            path,
            config,
            format,
            verbose,
            output,
        } => cmd_scan(path, config, format, verbose, output),
        Commands::ListPatterns => cmd_list_patterns(),
        Commands::Init { force } => cmd_init(force),
    };

    match result {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(e.exit_code());
        }
    }
}

fn cmd_scan(
    path: PathBuf,
    config: Option<PathBuf>,
    format_str: String,
    verbose: bool,
    output_path: Option<PathBuf>,
) -> Result<i32, AuditError> {
    let format = OutputFormat::from_str_lenient(&format_str).unwrap_or_else(|| {
        eprintln!("Warning: unknown format '{}', using console", format_str);
        OutputFormat::Console
    });

    let options = ScanOptions {
        config_path: config,
        verbose_override: verbose.then_some(true),
    };

    let report = routeguard::audit(&path, &options)?;
    let rendered = routeguard::render_report(&report, format)?;

    match output_path {
        Some(out) => std::fs::write(&out, &rendered)?,
        None => print!("{}", rendered),
    }

    // Exit code: 0 = pass, 1 = high-severity issues present
    Ok(report.result.verdict().exit_code())
}

fn cmd_list_patterns() -> Result<i32, AuditError> {
    println!("Safeguard detectors");
    for &safeguard in catalog::ALL_SAFEGUARDS {
        println!(
            "  {:<16} {}",
            safeguard.to_string(),
            catalog::safeguard_pattern(safeguard).as_str()
        );
    }

    println!("\nPublic allowlist (path segments)");
    for entry in catalog::PUBLIC_ALLOWLIST {
        println!("  {}", entry);
    }

    println!("\nAdmin route patterns");
    for pattern in catalog::admin_patterns() {
        println!(
            "  {:<8} {:<40} {}",
            pattern.method.unwrap_or("*"),
            pattern.path.as_str(),
            pattern.label
        );
    }

    Ok(0)
}

fn cmd_init(force: bool) -> Result<i32, AuditError> {
    let path = PathBuf::from(".routeguard.toml");

    if path.exists() && !force {
        eprintln!(".routeguard.toml already exists. Use --force to overwrite.");
        return Ok(1);
    }

    std::fs::write(&path, Config::starter_toml())?;
    println!("Created .routeguard.toml");

    Ok(0)
}
