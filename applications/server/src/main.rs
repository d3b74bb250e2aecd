/// OpenMusic Server - music catalog API
use clap::{Parser, Subcommand};
use openmusic_core::{types::CreateUser, CatalogStore, UserId};
use openmusic_server::{config::ServerConfig, create_router, services::AuthService, AppState};
use openmusic_storage::SqliteCatalog;
use std::{net::SocketAddr, path::PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "openmusic-server")]
#[command(about = "OpenMusic catalog API server", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Create a new user
    AddUser {
        /// Username
        #[arg(short, long)]
        username: String,
        /// Full name
        #[arg(short, long)]
        fullname: String,
    },
    /// List all users
    ListUsers,
    /// Print a bearer token for a user, for local testing
    IssueToken {
        /// User ID
        #[arg(short = 'i', long)]
        user_id: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "openmusic_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = ServerConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve => serve(config).await?,
        Commands::AddUser { username, fullname } => add_user(&config, username, fullname).await?,
        Commands::ListUsers => list_users(&config).await?,
        Commands::IssueToken { user_id } => issue_token(&config, &user_id)?,
    }

    Ok(())
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    config.validate()?;

    tracing::info!("Starting OpenMusic Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    // One pool for the whole process, handed to every component
    let pool = openmusic_storage::create_pool(&config.storage.database_url).await?;
    openmusic_storage::run_migrations(&pool).await?;
    tracing::info!("Database connected");

    let app_state = AppState::with_sqlite(pool, &config);
    let app = create_router(app_state);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {}", e);
            }
        })
        .await?;

    Ok(())
}

async fn open_catalog(config: &ServerConfig) -> anyhow::Result<SqliteCatalog> {
    let pool = openmusic_storage::create_pool(&config.storage.database_url).await?;
    openmusic_storage::run_migrations(&pool).await?;
    Ok(SqliteCatalog::new(pool))
}

async fn add_user(config: &ServerConfig, username: String, fullname: String) -> anyhow::Result<()> {
    let catalog = open_catalog(config).await?;
    let user = catalog.create_user(CreateUser { username, fullname }).await?;

    println!("Created user {} ({})", user.username, user.id);
    Ok(())
}

async fn list_users(config: &ServerConfig) -> anyhow::Result<()> {
    let catalog = open_catalog(config).await?;
    let users = catalog.list_users().await?;

    println!("Users:");
    for user in users {
        println!("  {} - {} ({})", user.id, user.username, user.fullname);
    }

    Ok(())
}

fn issue_token(config: &ServerConfig, user_id: &str) -> anyhow::Result<()> {
    config.validate()?;

    let auth_service = AuthService::new(
        config.auth.jwt_secret.clone(),
        config.auth.access_token_age_secs,
    );
    println!("{}", auth_service.create_access_token(&UserId::new(user_id))?);
    Ok(())
}
