use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use diary::services::init_storage;
use diary::{DiaryConfig, MockBackend, Storage};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "diary=debug".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = DiaryConfig::new_from_env()?;
    info!("using store backend {:?}", config.store);

    let storage = Storage::new(config.store.open().await?);
    if init_storage(&storage).await? {
        info!("storage seeded");
    } else {
        info!("storage already initialized");
    }

    let backend = MockBackend::new(storage, config.backend_options());
    let users = backend.get_users().await?;
    let subjects = backend.get_subjects().await?;
    let homeworks = backend.get_homeworks().await?;
    let messages = backend.get_messages().await?;
    info!(
        "diary ready - {} users, {} subjects, {} homeworks, {} messages",
        users.len(),
        subjects.len(),
        homeworks.len(),
        messages.len()
    );

    Ok(())
}
