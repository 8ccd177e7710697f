use kpii_homepage::config::Config;
use kpii_homepage::scrape::HttpListingSource;
use kpii_homepage::{ContentStore, bootstrap, db, router};
use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = Config::load()?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        database_url = %cfg.database_url,
        listen_addr = %cfg.listen_addr,
        csr_source = %cfg.csr_source_url.as_ref().map(|u| u.as_str()).unwrap_or("<none>"),
        proxy = %cfg.proxy.as_ref().map(|u| u.as_str()).unwrap_or("<none>"),
        loglevel = %cfg.loglevel,
    );

    let pool = db::connect(&cfg.database_url).await?;
    let store = ContentStore::new(pool);

    let listing = cfg
        .csr_source_url
        .clone()
        .map(|url| HttpListingSource::new(url, cfg.proxy.as_ref()))
        .transpose()?;

    // Any storage failure here is fatal: the site cannot serve without its tables.
    bootstrap::initialize(&store, listing.as_ref()).await?;

    let state = router::HomepageState::from_config(&cfg, store, listing);
    let app = router::homepage_router(state);

    let listener = TcpListener::bind(&cfg.listen_addr).await?;
    info!("HTTP server listening on {}", cfg.listen_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
