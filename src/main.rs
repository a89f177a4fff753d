use anyhow::Context;
use clap::{Parser, Subcommand};
use photo_gallery::domain::auth::{AuthService, AuthServiceApi, IdentityProvider};
use photo_gallery::domain::gallery::{
    DisplayDefaults, FetchOutcome, GalleryController, GalleryControllerApi, Item, ToggleOutcome,
};
use photo_gallery::infrastructure::catalog::UnsplashCatalog;
use photo_gallery::infrastructure::config::{Config, LogFormat};
use photo_gallery::infrastructure::db::{check_connection, create_pool, init_schema};
use photo_gallery::infrastructure::repositories::{
    HardcodedCredentialsRepository, LikeRepository, SessionRepository,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "photo-gallery", about = "Browse and like photos from the catalog")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Sign in and remember the session
    Login { username: String, password: String },
    /// Forget the current session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// List catalog pages
    Browse {
        #[arg(long, default_value_t = 1)]
        pages: u32,
    },
    /// Toggle the like on a photo
    Like { item_id: String },
    /// List liked photos among the first page
    Likes,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env().map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?;

    // Initialize logging
    init_logging(&config);

    // Create database connection pool
    let pool = create_pool(&config.database_url)
        .await
        .with_context(|| format!("Failed to open {}", config.database_url))?;
    check_connection(&pool).await?;
    init_schema(&pool).await?;
    tracing::debug!("Database ready");

    let pool = Arc::new(pool);

    // === DEPENDENCY INJECTION SETUP ===
    let like_repo = Arc::new(LikeRepository::new(pool.clone()));
    let session_repo = Arc::new(SessionRepository::new(pool.clone()));
    let credentials_repo = Arc::new(HardcodedCredentialsRepository::new());

    let auth_service = Arc::new(AuthService::new(credentials_repo, session_repo));
    auth_service.check_auth().await;

    let catalog = Arc::new(UnsplashCatalog::new(
        config.unsplash_api_url.clone(),
        config.unsplash_access_key.clone(),
        config.order_by.clone(),
    ));

    let gallery = Arc::new(
        GalleryController::new(catalog, auth_service.clone(), like_repo)
            .with_page_size(config.page_size)
            .with_decorator(Arc::new(DisplayDefaults)),
    );
    let _identity_watch = gallery.reset_on_identity_change(auth_service.subscribe());

    match cli.command {
        Command::Login { username, password } => {
            let user = auth_service.login(&username, &password).await?;
            println!("Signed in as {}", user.username);
        }
        Command::Logout => {
            auth_service.logout().await?;
            println!("Signed out");
        }
        Command::Whoami => match auth_service.current_identity() {
            Some(identity) => println!("{}", identity),
            None => println!("Not signed in"),
        },
        Command::Browse { pages } => {
            if !auth_service.is_authenticated() {
                tracing::warn!("Browsing anonymously, likes are not shown");
            }
            for _ in 0..pages {
                match gallery.fetch_next_page().await {
                    FetchOutcome::Loaded { .. } => {}
                    FetchOutcome::Exhausted | FetchOutcome::Skipped => break,
                    FetchOutcome::Failed(reason) => anyhow::bail!("{}", reason),
                    FetchOutcome::Discarded => break,
                }
            }
            print_items(&gallery.items());
        }
        Command::Like { item_id } => match gallery.toggle_like(&item_id).await? {
            ToggleOutcome::Liked => println!("Liked {}", item_id),
            ToggleOutcome::Unliked => println!("Unliked {}", item_id),
            ToggleOutcome::Skipped => println!("Sign in to like photos"),
        },
        Command::Likes => {
            gallery.fetch_next_page().await;
            let liked: Vec<Item> = gallery.items().into_iter().filter(|item| item.liked).collect();
            print_items(&liked);
        }
    }

    Ok(())
}

fn print_items(items: &[Item]) {
    for item in items {
        println!(
            "{} {:<14} {:<40} {:<24} {:>5} likes {:>4} views  {}",
            if item.liked { "♥" } else { " " },
            item.id,
            item.title.chars().take(40).collect::<String>(),
            item.author.chars().take(24).collect::<String>(),
            item.like_count,
            item.view_count,
            item.category.map(|c| c.label()).unwrap_or("-"),
        );
    }
}

fn init_logging(config: &Config) {
    let default_filter = if config.is_development() {
        "photo_gallery=debug"
    } else {
        "photo_gallery=info"
    };

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| default_filter.into()),
            )
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| default_filter.into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
            .init();
    }
}
