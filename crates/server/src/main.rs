use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use server::api::{AppState, run_api};
use server::category::mutations::{CreateCategoryInput, create_category};
use server::category::queries::get_all_categories;
use server::category::SqliteCategoryStore;
use server::config::{self, loader};
use server::db;
use server::metrics_exporter::init_metrics;
use server::supervisor::Supervisor;

#[derive(Parser)]
#[command(name = "services-admin-server")]
#[command(about = "Service category admin server", long_about = None)]
struct Cli {
    /// Config file (RON); discovered automatically when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the admin HTTP server (default)
    Serve,
    #[command(subcommand)]
    Category(CategoryCommands),
}

#[derive(Subcommand)]
enum CategoryCommands {
    /// Create a category; the slug is derived from the title
    Create {
        title: String,
        #[arg(short, long)]
        description: Option<String>,
    },
    /// List all categories
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let config = match cli.config {
        Some(ref path) => loader::load_from_file(path)?,
        None => loader::load_with_discovery()?,
    };

    let pool = db::init_pool(&config.database.resolve_path())
        .await
        .context("failed to open category database")?;
    let store = SqliteCategoryStore::new(pool.clone());

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(config, store).await,
        Commands::Category(CategoryCommands::Create { title, description }) => {
            let category = create_category(&pool, CreateCategoryInput { title, description })
                .await
                .map_err(|e| anyhow::anyhow!("failed to create category: {e}"))?;
            println!("✓ Category created successfully!");
            println!("  ID:    {}", category.id);
            println!("  Slug:  {}", category.slug);
            println!("  Title: {}", category.title);
            Ok(())
        }
        Commands::Category(CategoryCommands::List) => {
            for category in get_all_categories(&pool).await? {
                println!("{:<24} {}", category.slug, category.title);
            }
            Ok(())
        }
    }
}

async fn serve(config: config::Config, store: SqliteCategoryStore) -> Result<()> {
    init_metrics()?;

    let state = AppState::new(store, config.admin.clone());
    let mut supervisor = Supervisor::new();
    supervisor.spawn("http", move |shutdown| async move {
        run_api(&config, state, shutdown).await
    });
    supervisor.run().await
}
