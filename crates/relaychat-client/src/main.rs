//! relaychat terminal client
//!
//! - One WebSocket session per configured user, registered on connect
//! - stdin lines drive sends (`<session_id> <text>`), `/connect`, `/quit`
//! - stdout shows status and chat lines; tracing logs go to stderr

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::{fmt, EnvFilter};

use relaychat_client::{
    app, config,
    session::SessionManager,
    transport::WsConnector,
    ui::{ConsoleSink, UiCommand},
};

#[derive(Debug, Parser)]
#[command(name = "relaychat", about = "Terminal client for a relay chat endpoint")]
struct Args {
    /// Path to the YAML config.
    #[arg(long, default_value = "relaychat.yaml")]
    config: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let cfg = match config::load_from_file(&args.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!(code = e.code().as_str(), error = %e, "config load failed");
            std::process::exit(1);
        }
    };

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let connector = WsConnector::new(event_tx, &cfg.client);
    let manager = match SessionManager::from_config(&cfg, Box::new(connector), Arc::new(ConsoleSink)) {
        Ok(m) => m,
        Err(e) => {
            tracing::error!(code = e.code().as_str(), error = %e, "session setup failed");
            std::process::exit(1);
        }
    };

    let (cmd_tx, cmd_rx) = mpsc::channel::<UiCommand>(64);
    tokio::spawn(read_commands(cmd_tx.clone()));
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = cmd_tx.send(UiCommand::Quit).await;
        }
    });

    tracing::info!(sessions = cfg.sessions.len(), "relaychat starting");
    app::run(manager, event_rx, cmd_rx).await;

    tracing::info!("relaychat stopped");
    // the stdin reader sits on a blocking thread the runtime would wait on
    std::process::exit(0);
}

async fn read_commands(tx: mpsc::Sender<UiCommand>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        match UiCommand::parse(&line) {
            Ok(Some(cmd)) => {
                let quit = cmd == UiCommand::Quit;
                if tx.send(cmd).await.is_err() || quit {
                    break;
                }
            }
            Ok(None) => {}
            Err(e) => eprintln!("{e}"),
        }
    }
    // stdin closed
    let _ = tx.send(UiCommand::Quit).await;
}
