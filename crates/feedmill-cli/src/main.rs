mod ingest;
mod search;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use feedmill_core::{PipelineOptions, TagStrategy};

#[derive(Debug, Parser)]
#[command(name = "feedmill-cli")]
#[command(about = "feedmill command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch registered feeds, enrich every entry, and store the results
    Ingest {
        /// Override the feed registry path from the environment
        #[arg(long)]
        feeds: Option<std::path::PathBuf>,

        /// Restrict the run to one feed category (case-insensitive)
        #[arg(long)]
        category: Option<String>,

        /// Enrich and report without writing to the database
        #[arg(long)]
        dry_run: bool,

        /// Mine tags from entities and noun lemmas instead of the fixed taxonomy
        #[arg(long)]
        dynamic_tags: bool,

        /// Skip action-verb extraction (the actions column stays NULL)
        #[arg(long)]
        no_actions: bool,

        /// Store the padded summary instead of the cleaned original
        #[arg(long)]
        store_padded: bool,

        /// Sort the joined tag/entity/action sets alphabetically
        #[arg(long)]
        sorted_sets: bool,
    },
    /// Search stored articles by title or summary
    Search {
        /// Search term (at least 2 characters)
        query: String,
    },
    /// Apply any pending database migrations
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = feedmill_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let pool_config = feedmill_db::PoolConfig::from_app_config(&config);
    let pool = feedmill_db::connect_pool(&config.database_url, pool_config).await?;

    match cli.command {
        Commands::Ingest {
            feeds,
            category,
            dry_run,
            dynamic_tags,
            no_actions,
            store_padded,
            sorted_sets,
        } => {
            let mut config = config;
            if let Some(path) = feeds {
                config.feeds_path = path;
            }

            let mut options = PipelineOptions::default();
            if dynamic_tags {
                options.tag_strategy = TagStrategy::DynamicNer;
            }
            if no_actions {
                options.include_actions = false;
            }
            if store_padded {
                options.store_original_summary = false;
            }
            if sorted_sets {
                options.sort_joined_sets = true;
            }

            let totals =
                ingest::run(&pool, &config, options, category.as_deref(), dry_run).await?;
            println!(
                "ingest complete: {} stored, {} skipped, {} failed",
                totals.stored, totals.skipped, totals.failed
            );
        }
        Commands::Search { query } => {
            search::run(&pool, &query).await?;
        }
        Commands::Migrate => {
            feedmill_db::run_migrations(&pool).await?;
            println!("database schema is up to date");
        }
    }

    Ok(())
}
