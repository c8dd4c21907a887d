use carsharing::config::AppConfig;
use carsharing::db::{init_pool, init_schema};
use carsharing::error::AppError;
use carsharing::routes::create_router;
use carsharing::state::AppState;
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_logging();

    let config = AppConfig::from_env()?;
    let db = init_pool(&config.database_url, config.max_connections).await?;

    if let Err(err) = init_schema(&db).await {
        error!("schema initialization failed: {err:?}");
        return Err(err);
    }

    let state = AppState::new(db);
    let app = create_router(state);

    let listener = TcpListener::bind(config.listen_addr).await?;
    info!("car sharing api listening on {}", listener.local_addr()?);
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);
    let filter_layer = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,carsharing=debug,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
