use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use imgbatch_api::config::ServerConfig;
use imgbatch_api::router::build_app_router;
use imgbatch_api::state::AppState;
use imgbatch_db::store::PgJobStore;
use imgbatch_events::CompletionNotifier;
use imgbatch_pipeline::fetch::HttpFetcher;
use imgbatch_pipeline::sink::FsArtifactSink;
use imgbatch_pipeline::{queue, ImageTransformer, JobExecutor};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "imgbatch=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, workers = config.workers, "Configuration loaded");

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = imgbatch_db::create_pool(&database_url)
        .await
        .expect("Database connection failed");
    imgbatch_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    imgbatch_db::run_migrations(&pool)
        .await
        .expect("Migration run failed");
    tracing::info!("Database ready, migrations applied");

    let sink = FsArtifactSink::create(&config.output_dir)
        .await
        .expect("Output directory is not creatable");
    tracing::info!(output_dir = %config.output_dir, "Artifact sink ready");

    let transformer = ImageTransformer::new(Arc::new(HttpFetcher::new()), Arc::new(sink));
    let executor = Arc::new(JobExecutor::new(
        Arc::new(PgJobStore::new(pool.clone())),
        transformer,
        CompletionNotifier::new(),
    ));
    let (job_queue, worker_handles) = queue::start(executor, config.workers);

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        queue: job_queue.clone(),
    };
    let app = build_app_router(state, &config);

    let addr = SocketAddr::new(
        config.host.parse().expect("HOST is not a valid IP address"),
        config.port,
    );
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Bind failed");
    tracing::info!(%addr, "Serving");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Listener closed, draining job workers");

    // Dropping the last queue handle closes the channel; each worker
    // finishes its in-flight job and exits.
    drop(job_queue);
    let drain = Duration::from_secs(config.shutdown_timeout_secs);
    for handle in worker_handles {
        if tokio::time::timeout(drain, handle).await.is_err() {
            tracing::warn!("Job worker did not drain within the shutdown timeout");
        }
    }

    tracing::info!("Graceful shutdown complete");
}

/// Resolve on SIGINT or, on Unix, SIGTERM. SIGTERM is what process
/// managers send, so it must trigger the same drain as Ctrl-C.
async fn shutdown_signal() {
    let interrupt = async {
        tokio::signal::ctrl_c()
            .await
            .expect("SIGINT handler installation failed");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("SIGTERM handler installation failed")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = interrupt => {},
        _ = terminate => {},
    }
}
