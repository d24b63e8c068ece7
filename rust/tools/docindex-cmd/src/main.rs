use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "docindex-cmd")]
#[command(about = "Command-line utility for sharded document indexing and search")]
#[command(version)]
struct Cli {
    /// Directory holding the object store
    #[arg(long, env = "DOCINDEX_STORE", default_value = "docindex-store")]
    store: PathBuf,

    /// JSON file with engine options (worker_limit, consolidation_threshold, ...)
    #[arg(long)]
    options: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit documents from a JSON file (an object or an array of objects)
    Add {
        /// Source file; reads stdin when omitted
        file: Option<PathBuf>,
    },

    /// Merge pending submissions into a single batch object
    Consolidate,

    /// Rebuild all configured indexes from the submitted documents
    Rebuild {
        /// Consolidate pending submissions first
        #[arg(long)]
        consolidate: bool,
    },

    /// Query an index
    Search {
        /// Index name
        #[arg(short, long)]
        index: String,

        /// Maximum number of hits (defaults to the engine option)
        #[arg(short = 'n', long)]
        count: Option<usize>,

        /// Query text
        query: String,
    },

    /// Show or replace the search configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Measure how long batches of generated documents take to become searchable
    ScaleTest {
        /// JSON file with an array of movies; a synthetic corpus is generated when omitted
        #[arg(long)]
        movies: Option<PathBuf>,

        /// Number of synthetic movies
        #[arg(long, default_value_t = 200)]
        count: usize,

        /// Documents per submitted batch
        #[arg(long, default_value_t = 20)]
        batch_size: usize,

        /// Query attempts per batch before the batch counts as lost
        #[arg(long, default_value_t = 50)]
        max_attempts: u32,

        /// Pause between query attempts, in milliseconds
        #[arg(long, default_value_t = 100)]
        delay_ms: u64,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the stored search configuration
    Get,

    /// Replace the search configuration with the contents of a JSON file
    Set {
        /// File with `{"key": ..., "configs": [...]}`
        file: PathBuf,

        /// Deployment secret that configuration updates are checked against
        #[arg(long, env = "DOCINDEX_CONFIG_SECRET", hide_env_values = true)]
        secret: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let env = commands::Env::open(&cli.store, cli.options.as_deref())?;

    match cli.command {
        Commands::Add { file } => commands::add::run(&env, file),
        Commands::Consolidate => commands::consolidate::run(&env),
        Commands::Rebuild { consolidate } => commands::rebuild::run(&env, consolidate),
        Commands::Search {
            index,
            count,
            query,
        } => commands::search::run(&env, &index, &query, count),
        Commands::Config { action } => match action {
            ConfigAction::Get => commands::config::get(&env),
            ConfigAction::Set { file, secret } => commands::config::set(&env, &file, secret),
        },
        Commands::ScaleTest {
            movies,
            count,
            batch_size,
            max_attempts,
            delay_ms,
        } => commands::scale_test::run(
            &env,
            commands::scale_test::ScaleTestArgs {
                movies,
                count,
                batch_size,
                max_attempts,
                delay_ms,
            },
        ),
    }
}
