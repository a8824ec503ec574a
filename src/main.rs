use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mealgenie::{api, db, mcp};

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;

#[derive(Parser)]
#[command(name = "mealgenie")]
#[command(about = "Meal catalogue, random meal plans and shopping lists")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Address to bind
        #[arg(long, default_value = DEFAULT_HOST)]
        host: String,

        /// Port for HTTP API
        #[arg(short, long, default_value_t = DEFAULT_PORT)]
        port: u16,
    },
    /// Start MCP server via stdio
    Mcp,
}

/// Initialize tracing with output to stderr (for MCP mode) or stdout
fn init_tracing(use_stderr: bool) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "mealgenie=debug,tower_http=debug".into()),
    );

    if use_stderr {
        // stdout is the protocol channel in MCP mode
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn serve(host: &str, port: u16) -> anyhow::Result<()> {
    tracing::info!("Starting MealGenie server on {}:{}", host, port);

    let db = db::Database::open_default()?;
    db.migrate()?;

    let app = api::create_router_with_config(db, api::SecurityConfig::from_env());

    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    tracing::info!("MealGenie server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let use_stderr = matches!(cli.command, Some(Commands::Mcp));
    init_tracing(use_stderr);

    match cli.command {
        Some(Commands::Serve { host, port }) => serve(&host, port).await?,
        Some(Commands::Mcp) => {
            let db = db::Database::open_default()?;
            db.migrate()?;

            mcp::run_stdio_server(db).await?;
        }
        None => serve(DEFAULT_HOST, DEFAULT_PORT).await?,
    }

    Ok(())
}
