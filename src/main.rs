use std::net::SocketAddr;

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use domus::config::{ServerConfig, Tenant};
use domus::consts::{DEFAULT_BIND, DEFAULT_CONDOMINIO_ID, DEFAULT_USUARIO_ID, default_db_path};
use domus::db::Database;
use domus::server;

#[derive(Parser)]
#[command(name = "domus", version, about = "Condominium management backend.")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// SQLite database path (use :memory: for ephemeral)
    #[arg(short, long, global = true, env = "DOMUS_DB")]
    db: Option<String>,

    /// Address to listen on
    #[arg(short, long, global = true, env = "DOMUS_BIND", default_value_t = DEFAULT_BIND)]
    bind: SocketAddr,

    /// Condominium new records belong to
    #[arg(long, global = true, env = "DOMUS_CONDOMINIO_ID", default_value_t = DEFAULT_CONDOMINIO_ID)]
    condominio_id: i64,

    /// User that acts as creator of tickets and reservations
    #[arg(long, global = true, env = "DOMUS_USUARIO_ID", default_value_t = DEFAULT_USUARIO_ID)]
    usuario_id: i64,

    /// Open the dashboard stats in a browser once listening
    #[arg(long, global = true, default_value_t = false)]
    open: bool,
}

#[derive(Debug, PartialEq, Subcommand)]
enum Command {
    /// Run the HTTP API (default)
    Serve,
    /// Load the demo data set into an empty database
    Seed,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let db_path = cli
        .db
        .unwrap_or_else(|| default_db_path().to_string_lossy().into_owned());
    let db = Database::open(&db_path)
        .with_context(|| format!("failed to open database {db_path}"))?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Seed => {
            let summary = db.seed(Utc::now())?;
            println!("{summary}");
            Ok(())
        }
        Command::Serve => {
            let config = ServerConfig {
                bind: cli.bind,
                db_path,
                tenant: Tenant {
                    condominio_id: cli.condominio_id,
                    usuario_id: cli.usuario_id,
                },
                open_browser: cli.open,
            };
            server::serve(config, db).await
        }
    }
}
