use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use javascope::analyzer;

#[derive(Parser)]
#[command(name = "javascope")]
#[command(author = "Zachary Woods <143150513+zach-fau@users.noreply.github.com>")]
#[command(version = "0.1.0")]
#[command(about = "External library usage analyzer for Java projects", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a Java project and print its external-usage report
    Analyze {
        /// Project root to analyze (defaults to current directory)
        #[arg(short, long, default_value = ".")]
        path: PathBuf,

        /// Suppress the scan summary and per-file warnings on stderr
        #[arg(short, long)]
        quiet: bool,
    },
    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::Analyze { path, quiet }) => {
            let analysis = analyzer::analyze(path)
                .with_context(|| format!("failed to analyze {}", path.display()))?;

            if !*quiet {
                eprintln!("Scanned {} Java files", analysis.files_scanned);
                for warning in &analysis.warnings {
                    eprintln!("Warning: {warning}");
                }
            }

            print!("{}", analysis.to_report());
        }
        Some(Commands::Version) => {
            println!("javascope v{}", env!("CARGO_PKG_VERSION"));
        }
        None => {
            println!("javascope - external library usage analyzer for Java");
            println!("Run 'javascope analyze' to analyze the current directory");
            println!("Run 'javascope --help' for more information");
        }
    }

    Ok(())
}
