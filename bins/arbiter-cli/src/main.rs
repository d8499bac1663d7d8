mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "arbiter-cli")]
#[command(about = "Arbiter CLI - Inspect languages, render harnesses, and run solutions against the judge", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List enabled languages and their judge ids
    ListLangs,

    /// Print the program that would be sent to the judge for one test case
    Render {
        /// Target language (e.g., go, python, cpp)
        #[arg(short, long)]
        language: String,

        /// Function the harness calls
        #[arg(short, long)]
        function: String,

        /// File containing the solution source
        #[arg(short, long)]
        source: PathBuf,

        /// Test case as JSON, or @path to read it from a file
        #[arg(short, long)]
        test_case: String,
    },

    /// Run a solution against every test case of a problem file through the judge
    Run {
        /// Problem file: problem fields plus "testCases"
        #[arg(short, long)]
        problem: PathBuf,

        /// Target language (e.g., go, python, cpp)
        #[arg(short, long)]
        language: String,

        /// File containing the solution source
        #[arg(short, long)]
        source: PathBuf,

        /// Grade instead of run: stop at the first failing test case
        #[arg(long, default_value = "false")]
        grade: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::ListLangs => {
            commands::list_languages()?;
        }
        Commands::Render {
            language,
            function,
            source,
            test_case,
        } => {
            commands::render(&language, &function, &source, &test_case)?;
        }
        Commands::Run {
            problem,
            language,
            source,
            grade,
        } => {
            commands::run(&problem, &language, &source, grade).await?;
        }
    }

    Ok(())
}
