use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};

use gridhook::config::{Config, parse_lean};
use gridhook::consts::DEFAULT_BIND;
use gridhook::generator::openai::OpenAiGenerator;
use gridhook::handlers::AppState;
use gridhook::server;
use gridhook::store::notion::NotionStore;

#[derive(Parser)]
#[command(name = "gridhook", version, about = "Notion pages in, Grid replies out.")]
struct Cli {
    /// OpenAI API key
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    openai_api_key: Option<String>,

    /// Notion integration secret
    #[arg(long, env = "NOTION_SECRET", hide_env_values = true)]
    notion_secret: Option<String>,

    /// Default model, overridable per request
    #[arg(long, env = "OPENAI_MODEL")]
    model: Option<String>,

    /// Lower temperature and token budgets on every endpoint ("true" to enable)
    #[arg(long, env = "LEAN_MODE", default_value = "false")]
    lean_mode: String,

    /// Address to listen on
    #[arg(short, long, env = "GRIDHOOK_BIND", default_value = DEFAULT_BIND)]
    bind: SocketAddr,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; the real environment still applies.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gridhook=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    let config = match Config::new(
        cli.openai_api_key,
        cli.notion_secret,
        cli.model,
        parse_lean(&cli.lean_mode),
    ) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "refusing to start");
            return Err(e.into());
        }
    };

    info!(model = %config.default_model, lean = config.lean, "starting gridhook");

    let store = Arc::new(NotionStore::new(config.notion_secret()));
    let generator = Arc::new(OpenAiGenerator::new(config.openai_api_key()));
    let state = Arc::new(AppState::new(config, store, generator));

    server::serve(cli.bind, state).await
}
