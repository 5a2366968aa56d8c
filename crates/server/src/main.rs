use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;

use blog_core::{config::BlogConfig, store::PostStore};
use clap::Parser;
use tokio::{net::TcpListener, signal::ctrl_c};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(author, version, about, long_about=None)]
struct Cli {
    #[arg(short, long, value_name = "FILE")]
    /// Path to config file; defaults to ~/.blog/blog.toml
    config: Option<PathBuf>,

    #[arg(short, long)]
    /// The socket address to serve on. For ex, 0.0.0.0:3000
    socket: Option<SocketAddr>,
}

fn setup_logging(level: &str) -> anyhow::Result<()> {
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true);
    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::builder().parse(level))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
    Ok(())
}

/// Resolve once `signal` fires. A signal that cannot be listened for never
/// resolves, so the server keeps running.
async fn wait_for_shutdown<F>(signal: F)
where
    F: Future<Output = io::Result<()>>,
{
    match signal.await {
        Ok(()) => info!("Ctrl-C received, shutting down"),
        Err(e) => {
            error!("Unable to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await
        }
    }
}

async fn shutdown_signal() {
    wait_for_shutdown(ctrl_c()).await
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = BlogConfig::load(cli.config.as_deref())?;
    if let Some(socket) = cli.socket {
        config.socket = socket;
    }
    setup_logging(&config.log_level)?;

    let (store, store_task) = server::spawn_store(PostStore::default(), config.channel_capacity);
    let router = server::router(store);

    let listener = TcpListener::bind(config.socket).await?;
    info!("Press Ctrl-C to stop the server; posts are not kept");
    server::serve(listener, router, shutdown_signal()).await?;

    // The router, and with it the last store handle, is gone by now.
    store_task.await?;
    Ok(())
}
