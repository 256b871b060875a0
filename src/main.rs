//! API directory admin console

use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use apidir_admin::{
    cache::create_cache,
    config::Config,
    console::Console,
    db::{
        repositories::{InMemoryCategoryRepository, InMemorySubmissionRepository},
        SeedData,
    },
    services::{CategoryService, SubmissionService},
    views::{CategoryView, SubmissionView},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing; stdout belongs to the console
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "apidir_admin=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    let config_path = std::env::var("APIDIR_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.yml"));
    let config = Config::load_with_env(&config_path)?;
    tracing::info!(path = %config_path.display(), "Configuration loaded");

    // Seed both stores
    let seed = SeedData::load(config.seed.path.as_deref())?;
    tracing::info!(
        categories = seed.categories.len(),
        submissions = seed.submissions.len(),
        "Seed data loaded"
    );

    let cache = create_cache(&config.cache);

    let category_service = Arc::new(CategoryService::new(
        InMemoryCategoryRepository::boxed(seed.categories),
        cache.clone(),
    ));
    let submission_service = Arc::new(SubmissionService::new(
        InMemorySubmissionRepository::boxed(seed.submissions),
        cache,
    ));

    let mut console = Console::new(
        CategoryView::new(category_service),
        SubmissionView::new(submission_service, config.moderation.page_size),
    );

    let mut stdout = tokio::io::stdout();
    stdout.write_all(b"Type 'help' for commands.\n").await?;
    stdout.flush().await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let output = console.execute(&line).await;
        if !output.is_empty() {
            stdout.write_all(output.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
            stdout.flush().await?;
        }
        if console.is_finished() {
            break;
        }
    }

    tracing::info!("Admin console closed");
    Ok(())
}
