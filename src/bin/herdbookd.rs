use std::sync::Arc;

use arrrg::CommandLine;
use arrrg_derive::CommandLine;
use tokio::net::TcpListener;
use tokio::signal;

use herdbook::{DatabaseConfig, PgLivestockStore, create_livestock_router};

#[derive(CommandLine, Default, PartialEq, Eq)]
struct Args {
    #[arrrg(optional, "Host to bind the HTTP server")]
    host: Option<String>,
    #[arrrg(optional, "Port to bind the HTTP server")]
    port: Option<u16>,
    #[arrrg(flag, "Enable verbose logging")]
    verbose: bool,
}

const HELP_TEXT: &str = r#"herdbookd - Herdbook daemon

USAGE:
    herdbookd [OPTIONS]

OPTIONS:
    --host <HOST>        Host to bind the HTTP server [default: 127.0.0.1]
    --port <PORT>        Port to bind the HTTP server [default: 3000]
    --verbose            Enable verbose logging

DESCRIPTION:
    Serves the livestock record-keeping API backed by PostgreSQL.

    The server supports graceful shutdown via SIGTERM or Ctrl+C.

ENVIRONMENT:
    DB_HOST       PostgreSQL server hostname
    DB_USERNAME   Role to connect as
    DB_PASSWORD   Password for the role
    DB_DATABASE   Database name

    The PostgreSQL port is fixed at 5432. All four variables are
    required; there are no defaults.

API ENDPOINTS:
    GET    /livestock         List all livestock records
    POST   /livestock         Create a livestock record
    PUT    /livestock/{id}    Merge a partial body onto a record
    DELETE /livestock/{id}    Delete a livestock record"#;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (args, free) = Args::from_command_line("USAGE: herdbookd [OPTIONS]");

    if !free.is_empty() && free[0] == "help" {
        println!("{}", HELP_TEXT);
        return Ok(());
    }

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    let database = DatabaseConfig::from_env()?;
    let pool = sqlx::PgPool::connect(&database.connection_url())
        .await
        .map_err(|e| format!("Failed to connect to database: {}", e))?;
    let store = Arc::new(PgLivestockStore::new(pool));
    let app = create_livestock_router(store);

    let host = args.host.unwrap_or_else(|| "127.0.0.1".to_string());
    let port = args.port.unwrap_or(3000);
    let addr = format!("{}:{}", host, port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| format!("Failed to bind to {}: {}", addr, e))?;

    tracing::info!("herdbook daemon listening on http://{}", addr);

    let shutdown_signal = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("server error: {}", e);
                std::process::exit(1);
            }
        }
        () = shutdown_signal => {
            tracing::info!("shutdown signal received, stopping server");
        }
    }

    Ok(())
}
