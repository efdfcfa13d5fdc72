use league_portal_authz::StaffWritePolicy;
use league_portal_platform_access::SessionStore;
use league_portal_server::{
    app,
    config::ServerConfig,
    db::SessionRepository,
    state::{AppState, RosterStores},
};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from environment
    let config = ServerConfig::from_env().expect("failed to load configuration");
    tracing::info!(league = %config.league.name, "Loaded configuration");
    if config.league.staff_writes == StaffWritePolicy::Open {
        tracing::warn!("Staff writes are open to callers without an admin session");
    }
    if config.admin.password.is_none() {
        tracing::info!("No legacy admin password configured; legacy login is disabled");
    }

    // Create database connection pools
    let restricted_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.restricted_url)
        .await
        .expect("failed to connect to database (restricted)");
    let elevated_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.elevated_url)
        .await
        .expect("failed to connect to database (elevated)");

    // Run migrations
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&elevated_pool)
        .await
        .expect("failed to run migrations");

    // Cleanup expired sessions on startup
    let session_repo = SessionRepository::new(elevated_pool.clone());
    match session_repo.delete_expired().await {
        Ok(count) if count > 0 => {
            tracing::info!(
                deleted_sessions = count,
                "Cleaned up expired sessions on startup"
            );
        }
        Ok(_) => {}
        Err(e) => {
            tracing::warn!(error = %e, "Failed to cleanup expired sessions on startup");
        }
    }

    // Spawn periodic session cleanup task
    let cleanup_pool = elevated_pool.clone();
    let cleanup_interval_secs = config.session.cleanup_interval_seconds;
    tokio::spawn(async move {
        let mut interval =
            tokio::time::interval(std::time::Duration::from_secs(cleanup_interval_secs));
        loop {
            interval.tick().await;
            let repo = SessionRepository::new(cleanup_pool.clone());
            match repo.delete_expired().await {
                Ok(count) if count > 0 => {
                    tracing::debug!(deleted_sessions = count, "Periodic session cleanup");
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to cleanup expired sessions");
                }
            }
        }
    });

    // Create application state
    let app_state = Arc::new(AppState::new(
        RosterStores::postgres(restricted_pool),
        RosterStores::postgres(elevated_pool.clone()),
        Arc::new(session_repo),
        config.league,
        config.admin.password,
    ));

    let app = app::router(app_state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .expect("failed to bind to address");

    tracing::info!("listening on http://{}", config.listen_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");

    tracing::info!("Server stopped");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
