use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use blog_server::{db, routes, AppState, Config};

#[derive(Parser)]
#[command(name = "blog-server")]
#[command(about = "A small multi-user blog", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve,

    /// Clear the existing data and create new tables
    InitDb,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "blog_server=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::InitDb => init_db(config).await,
    }
}

async fn init_db(config: Config) -> anyhow::Result<()> {
    let pool = db::create_pool(&config).await?;
    db::reset_schema(&pool).await?;
    pool.close().await;

    println!("Initialized the database.");
    Ok(())
}

async fn serve(config: Config) -> anyhow::Result<()> {
    tracing::info!("Starting Blog Server...");
    tracing::info!(
        "Environment: {}, Server: {}",
        config.environment,
        config.server_address()
    );

    let pool = db::create_pool(&config).await?;
    db::ensure_schema(&pool).await?;

    let addr: SocketAddr = config.server_address().parse()?;
    let state = AppState::new(pool, config).map_err(|e| anyhow::anyhow!("{e}"))?;
    let app = routes::router(state);

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
