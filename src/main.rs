use clap::Parser;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hirebase::config::Config;
use hirebase::db::{create_pool, init_db, queries, AppState};
use hirebase::gateway::GatewayClient;
use hirebase::handlers;
use hirebase::models::{BillingInterval, CreatePlan};

#[derive(Parser, Debug)]
#[command(name = "hirebase")]
#[command(about = "Payment and subscription service for the Hirebase recruitment platform")]
struct Cli {
    /// Seed the database with a dev plan catalog (dev mode only)
    #[arg(long)]
    seed: bool,

    /// Delete the database on exit (dev mode only, useful for fresh starts)
    #[arg(long)]
    ephemeral: bool,
}

/// Seeds the plan catalog with dev data. Only runs in dev mode and when the
/// catalog is empty.
fn seed_dev_plans(state: &AppState) {
    let conn = state.db.get().expect("Failed to get db connection for seeding");

    let existing = queries::list_active_plans(&conn).expect("Failed to list plans");
    if !existing.is_empty() {
        tracing::info!("Plan catalog already has data, skipping seed");
        return;
    }

    let plans = [
        ("starter", "Starter", 149_000, BillingInterval::Month),
        ("growth", "Growth", 399_000, BillingInterval::Month),
        ("enterprise", "Enterprise", 3_990_000, BillingInterval::Year),
    ];

    tracing::info!("Seeding dev plan catalog");
    for (slug, name, amount, interval) in plans {
        let plan = queries::create_plan(
            &conn,
            &CreatePlan {
                slug: slug.to_string(),
                name: name.to_string(),
                amount,
                currency: "IDR".to_string(),
                interval,
            },
        )
        .expect("Failed to seed plan");
        tracing::info!(
            "Plan: {} ({}) - {} IDR / {}",
            plan.name,
            plan.id,
            plan.amount,
            plan.interval
        );
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hirebase=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();

    if config.dev_mode {
        tracing::info!("Running in DEVELOPMENT mode");
    }
    if let Err(e) = config.validate() {
        eprintln!("ERROR: {}", e);
        std::process::exit(1);
    }
    if config.gateway.server_key.is_empty() {
        tracing::warn!("GATEWAY_SERVER_KEY is not set; checkout and notifications will fail");
    }

    let db_pool = create_pool(&config.database_path).expect("Failed to create database pool");
    {
        let conn = db_pool.get().expect("Failed to get connection");
        init_db(&conn).expect("Failed to initialize database");
    }

    let state = AppState {
        db: db_pool,
        gateway: GatewayClient::new(config.gateway.clone()),
        base_url: config.base_url.clone(),
    };

    if cli.seed {
        if !config.dev_mode {
            tracing::warn!("--seed flag ignored: not in dev mode (set HIREBASE_ENV=dev)");
        } else {
            seed_dev_plans(&state);
        }
    }

    let app = handlers::router()
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    let cleanup_on_exit = cli.ephemeral && config.dev_mode;
    let db_path = config.database_path.clone();
    if cleanup_on_exit {
        tracing::info!("EPHEMERAL MODE: database will be deleted on exit");
    }

    tracing::info!("Hirebase payments listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Failed to start server");

    if cleanup_on_exit {
        tracing::info!("Cleaning up ephemeral database...");
        if let Err(e) = std::fs::remove_file(&db_path) {
            tracing::warn!("Failed to remove {}: {}", db_path, e);
        }
        let _ = std::fs::remove_file(format!("{}-wal", db_path));
        let _ = std::fs::remove_file(format!("{}-shm", db_path));
    }
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received, stopping server...");
}
