use entrega_core::application::{
    ports::{identity::TokenAuthenticator, time::Clock},
    services::ApplicationServices,
};
use entrega_core::config::AppConfig;
use entrega_core::domain::{
    audit::AuditLogRepository,
    cargo::CargoRepository,
    directory::{UnidadDirectory, UserDirectory},
    historial::HistorialRepository,
};
use entrega_core::infrastructure::{
    database,
    repositories::{
        PostgresAuditLogRepository, PostgresCargoRepository, PostgresHistorialRepository,
        PostgresUnidadDirectory, PostgresUserDirectory,
    },
    security::HmacTokenAuthenticator,
    time::SystemClock,
};
use entrega_core::presentation::http::{routes::build_router, state::HttpState};
use anyhow::Result;
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;

    let pool = database::init_pool(config.database_url()).await?;
    database::run_migrations(&pool).await?;

    let cargo_repo: Arc<dyn CargoRepository> =
        Arc::new(PostgresCargoRepository::new(pool.clone()));
    let historial_repo: Arc<dyn HistorialRepository> =
        Arc::new(PostgresHistorialRepository::new(pool.clone()));
    let audit_repo: Arc<dyn AuditLogRepository> =
        Arc::new(PostgresAuditLogRepository::new(pool.clone()));
    let users: Arc<dyn UserDirectory> = Arc::new(PostgresUserDirectory::new(pool.clone()));
    let unidades: Arc<dyn UnidadDirectory> = Arc::new(PostgresUnidadDirectory::new(pool.clone()));

    let token_authenticator: Arc<dyn TokenAuthenticator> = Arc::new(
        HmacTokenAuthenticator::new(config.token_secret().as_bytes().to_vec()),
    );
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let services = Arc::new(ApplicationServices::new(
        cargo_repo,
        historial_repo,
        audit_repo,
        users,
        unidades,
        token_authenticator,
        clock,
    ));

    let state = HttpState { services };

    let app = build_router(state, config.allowed_origins());

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    let address: SocketAddr = listener.local_addr()?;
    tracing::info!("listening on {address}");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,tower_http=info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install CTRL+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install terminate handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
