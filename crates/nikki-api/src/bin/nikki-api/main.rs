use clap::Parser;
use nikki::{Backend, LessonService, ModelSettings};
use nikki_api::{ApiConfig, AppState, build_app_with_config};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Nikki API Server
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Host address to bind to
    #[arg(short = 'H', long, env = "NIKKI_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(short, long, env = "NIKKI_PORT", default_value_t = 5000)]
    port: u16,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, env = "NIKKI_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Config file path
    #[arg(short, long, env = "NIKKI_CONFIG")]
    config_file: Option<PathBuf>,

    /// Disable Swagger UI
    #[arg(long, env = "NIKKI_DISABLE_SWAGGER", default_value_t = false)]
    disable_swagger: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Variables from .env must be visible to clap's env lookups
    let dotenv_path = nikki::config::load_dotenv();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let filter = format!(
        "nikki_api={level},nikki={level},tower_http=debug",
        level = cli.log_level
    );
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Some(path) = dotenv_path {
        info!("Environment loaded from: {}", path.display());
    }

    // Load configuration
    let mut config = if let Some(config_path) = &cli.config_file {
        match ApiConfig::load_from_file(config_path) {
            Ok(cfg) => {
                info!("Configuration loaded from: {}", config_path.display());
                cfg
            }
            Err(e) => {
                warn!(
                    "Failed to load config file: {}. Using default configuration.",
                    e
                );
                ApiConfig::default()
            }
        }
    } else {
        ApiConfig::default()
    };

    // Override with CLI options
    config.host = cli.host;
    config.port = cli.port;
    config.log_level = cli.log_level;
    config.enable_swagger = !cli.disable_swagger;

    let addr = config.socket_addr()?;

    // The service re-reads the environment per call; this is only a startup hint
    let settings = ModelSettings::from_env();
    match settings.backend() {
        Backend::Stub => info!("Model mode: STUB (set USE_MODEL_STUBS=false for live calls)"),
        Backend::Live => {
            info!(
                "Model mode: LIVE (text: {}, image: {})",
                settings.text_model, settings.image_model
            );
            if settings.reflect_key().is_none() {
                warn!("GEMINI_API_KEY is not set; lesson requests will return 503");
            }
        }
    }

    let state = AppState::new(LessonService::from_env());
    let app = build_app_with_config(state, &config);

    // Start server
    info!("Starting server on: {}", addr);
    if config.enable_swagger {
        info!("Swagger UI: http://{}/swagger-ui", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))
}
