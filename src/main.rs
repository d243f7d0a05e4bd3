use mimalloc::MiMalloc;
use redirect_me::{
    config::Config,
    routes::{router, types::AppState},
    settings::{SettingsStore, types::RawSettings},
};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::fmt::format::FmtSpan;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_span_events(FmtSpan::CLOSE)
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .init();
    if let Err(e) = dotenvy::dotenv() {
        info!("No .env file loaded, using the process environment: {e}");
    }

    let config = Config::from_env()?;

    let store = match &config.database_url {
        Some(url) => SettingsStore::connect(url).await?,
        None => {
            warn!("DATABASE_URL is not set, redirect settings are kept in memory");
            SettingsStore::in_memory(RawSettings::default())
        }
    };
    if !store.get().await?.is_enabled() {
        warn!("No redirect destination configured; visitors will not be redirected");
    }

    let bind_address = config.bind_address.clone();
    let app = router(AppState::new(config, store));

    let listener = TcpListener::bind(&bind_address).await?;
    info!("Initialized redirect_me on {bind_address}");
    axum::serve(listener, app).await?;
    Ok(())
}
