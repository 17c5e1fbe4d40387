mod api;
mod middleware;

use std::{net::SocketAddr, sync::Arc, time::Duration};

use anyhow::Context;
use brewer_core::{AppConfig, CallCounter, CoffeeMachine, InMemoryCallCounter, SystemClock};
use brewer_weather::WeatherService;
use sqlx::PgPool;
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = brewer_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    tracing::info!(env = %config.env, bind_addr = %config.bind_addr, "starting brewer");

    let (counter, pool) = build_counter(&config).await?;
    let weather = WeatherService::from_config(&config.weather);

    let machine = CoffeeMachine::new(Arc::new(SystemClock), counter, Arc::new(weather))
        .with_counter_timeout(Duration::from_millis(config.counter_timeout_ms));
    let app = build_app(AppState {
        machine: Arc::new(machine),
        pool,
    });

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;
    Ok(())
}

/// Picks the call counter backend. The pool is handed back so `/health` can
/// ping it.
async fn build_counter(
    config: &AppConfig,
) -> anyhow::Result<(Arc<dyn CallCounter>, Option<PgPool>)> {
    if !config.use_shared_counter {
        tracing::info!("using in-memory call counter");
        return Ok((Arc::new(InMemoryCallCounter::new()), None));
    }

    let database_url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL is required for the shared call counter")?;
    let pool_config = brewer_db::PoolConfig::from_app_config(config);
    let pool = brewer_db::open_counter_store(database_url, pool_config).await?;
    tracing::info!("using shared call counter");

    Ok((Arc::new(brewer_db::PgCallCounter::new(pool.clone())), Some(pool)))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
