use hash_service::api;
use hash_service::config::ServiceConfig;
use hash_service::jobs::scheduler::JobScheduler;
use hash_service::lifecycle::{Lifecycle, load_state};
use hash_service::storage::{RecordStore, TimeLedger};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        // .with_max_level(tracing::Level::DEBUG)
        .with_max_level(tracing::Level::INFO)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        eprintln!(
            "Usage: {} [--bind <addr:port>] [--store <path>] [--ledger <path>] [--delay-ms <n>] [--grace-ms <n>]",
            args[0]
        );
        eprintln!("Example: {} --bind 127.0.0.1:8080 --store hashStore.db", args[0]);
        std::process::exit(1);
    }

    let config = ServiceConfig::from_args(&args)?;
    tracing::info!("Server starting");

    // 1. Persisted history:
    let store = RecordStore::new(&config.store_path);
    let ledger = TimeLedger::new(&config.ledger_path);
    let history = load_state(&store, &ledger).await;

    // 2. Job scheduler and lifecycle:
    let scheduler = JobScheduler::new(store.clone(), history, config.job_delay);
    let lifecycle = Lifecycle::new(scheduler.clone(), store, ledger, config.grace_period);

    // 3. HTTP Router:
    let app = api::router(scheduler, lifecycle.clone());

    // 4. Start HTTP server, stopping once a shutdown request has persisted state:
    tracing::info!("HTTP server listening on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async move { lifecycle.stopped().await })
        .await?;

    tracing::info!("bye");
    Ok(())
}
