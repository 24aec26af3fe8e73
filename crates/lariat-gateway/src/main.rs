use anyhow::Context;
use clap::Parser;
use lariat_core::Shortener;
use lariat_gateway::app::App;
use lariat_gateway::cli::{StorageBackendArg, CLI};
use lariat_gateway::state::AppState;
use lariat_generator::RandomGenerator;
use lariat_shortener::{ShortenerService, ShortenerSettings};
use lariat_storage::{InMemoryRepository, MySqlRepository};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = CLI::try_parse()?;
    let code_length = usize::from(config.code_length);

    info!(
        listen_addr = %config.listen_addr,
        storage_backend = %config.storage,
        code_length,
        max_attempts = config.max_attempts,
        "starting lariat gateway"
    );

    let settings = ShortenerSettings::builder()
        .max_attempts(config.max_attempts)
        .page_limit(config.page_limit)
        .build();
    let generator = RandomGenerator::new(code_length);

    let shortener: Arc<dyn Shortener> = match config.storage {
        StorageBackendArg::InMemory => Arc::new(ShortenerService::with_settings(
            InMemoryRepository::new(),
            generator,
            settings,
        )),
        StorageBackendArg::Mysql => {
            let mysql_dsn = config
                .mysql_dsn
                .context("mysql dsn is required when storage backend is mysql")?;
            let repository = MySqlRepository::connect(&mysql_dsn).await?;
            Arc::new(ShortenerService::with_settings(
                repository, generator, settings,
            ))
        }
    };

    let state = AppState::new(shortener, config.public_base_url);
    let app = App::router(state);

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}
