use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use shifa_core::content_store::ContentStore;
use shifa_core::rate_limit::RateLimiter;
use shifa_events::{BookingNotifier, EmailConfig, SmtpMailer};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shifa_api::auth::bootstrap;
use shifa_api::background;
use shifa_api::config::ServerConfig;
use shifa_api::router::build_app_router;
use shifa_api::state::AppState;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "Server terminated with an error");
        std::process::exit(1);
    }
}

/// Install the global subscriber. `LOG_FORMAT=json` switches to JSON lines.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shifa_api=debug,tower_http=debug".into());

    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn run() -> Result<(), BoxError> {
    // --- Configuration ---
    let config = ServerConfig::from_env()?;
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url =
        std::env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set".to_string())?;

    let pool = shifa_db::create_pool(&database_url).await?;
    tracing::info!("Database connection pool created");

    shifa_db::health_check(&pool).await?;
    tracing::info!("Database health check passed");

    shifa_db::run_migrations(&pool).await?;
    tracing::info!("Database migrations applied");

    if bootstrap::ensure_admin(&pool, config.admin_bootstrap.as_ref()).await? {
        tracing::info!("Bootstrap admin account created");
    }

    // --- Email ---
    let notifier = match EmailConfig::from_env() {
        Some(email_config) => {
            let mailer = SmtpMailer::new(&email_config)?;
            tracing::info!(host = %email_config.smtp_host, "SMTP delivery enabled");
            BookingNotifier::new(Arc::new(mailer), config.admin_notification_email.clone())
        }
        None => {
            tracing::warn!("SMTP_HOST not set, booking emails are disabled");
            BookingNotifier::disabled()
        }
    };

    // --- Rate limiting ---
    let rate_limiter = Arc::new(RateLimiter::new());
    let sweep_cancel = CancellationToken::new();
    let sweep_handle = tokio::spawn(background::rate_limit_sweep::run(
        Arc::clone(&rate_limiter),
        sweep_cancel.clone(),
    ));

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        rate_limiter,
        content_store: Arc::new(ContentStore::new(
            config.content_data_dir.clone(),
            config.site_url.clone(),
        )),
        notifier,
        http_client: reqwest::Client::builder()
            .user_agent(concat!("shifa-api/", env!("CARGO_PKG_VERSION")))
            .build()?,
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(config.host.parse()?, config.port);
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    sweep_cancel.cancel();
    let timeout = Duration::from_secs(config.shutdown_timeout_secs);
    if tokio::time::timeout(timeout, sweep_handle).await.is_err() {
        tracing::warn!("Rate-limit sweep did not stop in time");
    }

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
