//! BioCode - Data Layer Entry Point
//!
//! Boots the data layer the way the platform shell does: probe the API,
//! fall back to local data when it is unreachable, and report what is
//! available.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use biocode::config::CONFIG;
use biocode::services::DataService;
use biocode::store::FileBackend;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| CONFIG.rust_log.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting BioCode data layer...");

    let backend = Arc::new(FileBackend::new(&CONFIG.storage.data_dir)?);
    let data = DataService::connect(&CONFIG, backend).await?;

    tracing::info!(mode = %data.mode(), "data layer ready");

    let problems = data.list_problems().await?;
    tracing::info!(count = problems.len(), "problems available");
    for problem in &problems {
        tracing::debug!(id = problem.id, slug = %problem.slug, "problem");
    }

    let submissions = data.list_submissions().await?;
    tracing::info!(count = submissions.len(), "submissions recorded");

    Ok(())
}
