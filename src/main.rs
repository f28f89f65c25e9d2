use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

use sql_exercises::commands::config::read_config;
use sql_exercises::commands::{extract, generate, list, verify};

/// Extract numbered exercises from the "SQL for Python Developers" blog series
#[derive(Parser)]
#[command(name = "extract_from_blog", version, about)]
struct Cli {
    /// Path to the project configuration file (defaults to ./exercises.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Root of the Hugo blog
    #[arg(long, env = "BLOG_PATH", global = true)]
    blog_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    extract: ExtractArgs,
}

#[derive(Args)]
struct ExtractArgs {
    /// Which code block of each post to extract, counting from 0
    #[arg(default_value_t = 0)]
    block_index: usize,
}

#[derive(Subcommand)]
enum Command {
    /// Show the series posts in exercise order
    List {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Check extracted exercises against the sample DuckDB tables
    Verify,

    /// Generate the practice customers table and preview it
    Generate {
        /// Also write the generated rows to a CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!("{}", format!("Error: {:#}", err).red());
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = read_config(cli.config.as_deref())?;

    match cli.command {
        None => extract::extract_command(
            cli.blog_path.as_deref(),
            cli.extract.block_index,
            &config,
        ),
        Some(Command::List { format }) => {
            list::list_command(cli.blog_path.as_deref(), &config, &format)
        }
        Some(Command::Verify) => verify::verify_command(&config),
        Some(Command::Generate { csv }) => generate::generate_command(csv.as_deref()),
    }
}
