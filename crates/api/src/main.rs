use std::net::SocketAddr;
use std::sync::Arc;

use pinboard_api::config::ServerConfig;
use pinboard_api::router::build_app_router;
use pinboard_api::state::AppState;
use pinboard_db::{MemoryTodoRepo, PgTodoRepo, TodoRepository};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pinboard_api=debug,pinboard_db=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("HOST/PORT do not form a socket address");

    let state = AppState {
        todos: open_todo_store(config.database_url.as_deref()).await,
        config: Arc::new(config.clone()),
    };
    let app = build_app_router(state, &config);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| panic!("Cannot listen on {addr}: {e}"));
    tracing::info!(%addr, "Todo API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown())
        .await
        .expect("HTTP server failed");

    tracing::info!("Server stopped");
}

/// Postgres when a URL is configured (pool, ping, migrations), memory otherwise.
async fn open_todo_store(database_url: Option<&str>) -> Arc<dyn TodoRepository> {
    let Some(url) = database_url else {
        tracing::warn!("DATABASE_URL not set, todos are kept in memory only");
        return Arc::new(MemoryTodoRepo::new());
    };

    let pool = pinboard_db::create_pool(url)
        .await
        .expect("Cannot connect to Postgres");
    pinboard_db::health_check(&pool)
        .await
        .expect("Postgres did not answer SELECT 1");
    pinboard_db::run_migrations(&pool)
        .await
        .expect("Todo migrations failed");
    tracing::info!("Postgres todo store ready");

    Arc::new(PgTodoRepo::new(pool))
}

/// Resolve on Ctrl-C, or on SIGTERM where the platform has it.
async fn wait_for_shutdown() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigterm = signal(SignalKind::terminate()).expect("Cannot install SIGTERM handler");
        tokio::select! {
            _ = tokio::signal::ctrl_c() => tracing::info!("SIGINT received, draining connections"),
            _ = sigterm.recv() => tracing::info!("SIGTERM received, draining connections"),
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
        tracing::info!("Ctrl-C received, draining connections");
    }
}
