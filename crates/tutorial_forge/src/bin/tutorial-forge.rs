use std::{path::PathBuf, time::Duration};

use clap::Parser;
use tutorial_datastore::SqliteDataStore;
use tutorial_forge::{
    gemini::GeminiClient,
    server::{run_server, ServerConfig},
    tracing::init_tracing_subscriber,
    PollConfig, TutorialGeneratorBuilder,
};

#[derive(Parser)]
#[command(name = "tutorial-forge", about = "Tutorial generation backend")]
struct Cli {
    /// Database connection URL
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://tutorials.db?mode=rwc")]
    database_url: String,

    /// Gemini API key
    #[arg(long, env = "GENAI_API_KEY")]
    genai_key: String,

    /// GitHub OAuth client id
    #[arg(long, env = "CLIENT_ID")]
    github_client_id: String,

    /// GitHub OAuth client secret
    #[arg(long, env = "CLIENT_SECRET")]
    github_client_secret: String,

    /// Host to bind the API server to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to bind the API server to
    #[arg(long, env = "PORT", default_value = "8000")]
    port: u16,

    /// Directory for uploaded video assets
    #[arg(long, env = "VIDEOS_DIR", default_value = "videos")]
    videos_dir: PathBuf,

    /// Frontend origin allowed by CORS
    #[arg(long, env = "ALLOWED_ORIGIN", default_value = "http://localhost:5173")]
    allowed_origin: String,

    /// Seconds between the first remote processing polls
    #[arg(long, default_value = "5")]
    poll_interval: u64,

    /// Seconds to wait for remote video processing before giving up
    #[arg(long, default_value = "600")]
    poll_timeout: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing_subscriber()?;

    let store = SqliteDataStore::init(&cli.database_url).await?;
    let gemini = GeminiClient::new(&cli.genai_key);

    let generator = TutorialGeneratorBuilder::new(&cli.videos_dir)
        .store(store.clone())
        .model(gemini)
        .poll_config(PollConfig {
            initial_interval: Duration::from_secs(cli.poll_interval),
            timeout: Duration::from_secs(cli.poll_timeout),
            ..Default::default()
        })
        .build();

    let config = ServerConfig {
        host: cli.host,
        port: cli.port,
        github_client_id: cli.github_client_id,
        github_client_secret: cli.github_client_secret,
        videos_dir: cli.videos_dir,
        allowed_origin: cli.allowed_origin,
    };

    run_server(config, store, generator).await
}
