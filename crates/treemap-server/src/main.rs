use std::{net::SocketAddr, path::PathBuf, process::exit};

use clap::Parser;
use tracing::{metadata::LevelFilter, subscriber::set_global_default};
use tracing_subscriber::{layer::SubscriberExt, Layer};

use treemap_server::{accounts, AppState};

/// Serves account trees grouped by country or currency.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Address to listen on.
    #[arg(long, env = "TREEMAP_LISTEN", default_value = "0.0.0.0:8080")]
    listen: SocketAddr,
    /// JSON file with `account_no`, `account_country` and `account_ccy` records.
    /// Bundled sample accounts are served when omitted.
    #[arg(long, env = "TREEMAP_ACCOUNTS")]
    accounts: Option<PathBuf>,
    /// Seed for leaf weights, makes responses reproducible.
    #[arg(long, env = "TREEMAP_SEED")]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() {
    init_logs();

    let args = Args::parse();
    tracing::info!(?args, "starting server");

    let accounts = match &args.accounts {
        Some(path) => match accounts::load(path) {
            Ok(accounts) => accounts,
            Err(error) => {
                tracing::error!(%error, path = %path.display(), "failed to load accounts");
                exit(2)
            }
        },
        None => accounts::sample(),
    };

    let listener = match tokio::net::TcpListener::bind(args.listen).await {
        Ok(listener) => listener,
        Err(error) => {
            tracing::error!(%error, addr = %args.listen, "failed to bind");
            exit(2)
        }
    };

    if let Err(error) = treemap_server::serve(listener, AppState::new(accounts, args.seed)).await {
        tracing::error!(%error, "server stopped");
        exit(2)
    }
}

fn init_logs() {
    let log_format = tracing_subscriber::fmt::format()
        .with_file(true)
        .with_line_number(true)
        .with_target(false)
        .compact();

    let log_level = if cfg!(debug_assertions) {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    set_global_default(
        tracing_subscriber::registry().with(
            tracing_subscriber::fmt::layer()
                .event_format(log_format)
                .with_filter(log_level),
        ),
    )
    .expect("failed to set global logs subscriber");
}
