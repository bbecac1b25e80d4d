mod http_store;

use anyhow::Result;
use clap::{Parser, Subcommand};
use edit_workflow::{CategoryStore, EditSession, EditState, Navigator};
use tracing_subscriber::EnvFilter;

use http_store::{HttpCategoryStore, ListingPrinter, print_listing};

const DEFAULT_API_URL: &str = "http://localhost:8000";

#[derive(Parser)]
#[command(name = "services-admin")]
#[command(about = "Service category admin CLI", long_about = None)]
struct Cli {
    /// Admin server base URL
    #[arg(long, default_value = DEFAULT_API_URL)]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(subcommand)]
    Category(CategoryCommands),
}

#[derive(Subcommand)]
enum CategoryCommands {
    /// List all categories
    List,
    /// Edit a category's title and description
    Edit {
        /// Current slug of the category
        slug: String,
        /// New title; the slug is re-derived from it
        #[arg(short, long)]
        title: Option<String>,
        /// New description
        #[arg(short, long)]
        description: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let store = HttpCategoryStore::new(&cli.api_url);

    match cli.command {
        Commands::Category(CategoryCommands::List) => {
            print_listing(&store.list_categories().await?);
            Ok(())
        }
        Commands::Category(CategoryCommands::Edit {
            slug,
            title,
            description,
        }) => edit_category(store, &slug, title, description).await,
    }
}

async fn edit_category(
    store: HttpCategoryStore,
    slug: &str,
    title: Option<String>,
    description: Option<String>,
) -> Result<()> {
    let session = EditSession::new(store.clone(), ListingPrinter::new(store));
    run_edit(session, slug, title, description).await
}

async fn run_edit<S, N>(
    mut session: EditSession<S, N>,
    slug: &str,
    title: Option<String>,
    description: Option<String>,
) -> Result<()>
where
    S: CategoryStore,
    N: Navigator,
{
    session.mount(slug).await?;

    if let Some(message) = session.state().load_error() {
        return Err(anyhow::anyhow!("{message}"));
    }

    if let Some(title) = title {
        session.change_title(title);
    }
    if let Some(description) = description {
        session.change_description(description);
    }

    if let Some(ready) = session.state().ready() {
        println!("  Title: {}", ready.draft().title());
        println!("  Slug:  {}", ready.draft().slug());
    }

    if let Err(err) = session.submit().await {
        // The update already landed; only showing the listing failed.
        if !matches!(session.state(), EditState::Saved) {
            return Err(err);
        }
        tracing::warn!("failed to show category listing: {err:#}");
    }

    match session.state() {
        EditState::Saved => {
            println!("✓ Category updated successfully!");
            Ok(())
        }
        EditState::Ready(ready) => Err(anyhow::anyhow!(
            "{}",
            ready.submit_error().unwrap_or(edit_workflow::DEFAULT_SUBMIT_ERROR)
        )),
        _ => Err(anyhow::anyhow!("category was not saved")),
    }
}
