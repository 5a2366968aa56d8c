use std::io::Write;
use std::path::PathBuf;

use blog_core::config::BlogConfig;
use clap::Parser;
use client::{
    api::HttpTransport,
    input::{parse_line, Input, HELP},
    render::render,
    view::Session,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(author, version, about, long_about=None)]
struct Cli {
    #[arg(short, long, value_name = "FILE")]
    /// Path to config file; defaults to ~/.blog/blog.toml
    config: Option<PathBuf>,

    #[arg(short, long)]
    /// The blog server to talk to. For ex, http://localhost:3000
    base_url: Option<String>,
}

/// Logs go to stderr so they do not tear up the screen on stdout.
fn setup_logging(level: &str) -> anyhow::Result<()> {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);
    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::builder().parse(level))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
    Ok(())
}

fn prompt() -> anyhow::Result<()> {
    print!("> ");
    std::io::stdout().flush()?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = BlogConfig::load(cli.config.as_deref())?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    setup_logging(&config.log_level)?;

    let mut session = Session::new(HttpTransport::new(config.base_url));
    // A failed mount is logged and leaves the list empty.
    let _ = session.mount().await;
    println!("{}", render(&session.view));
    println!("Type 'help' for the list of commands.");
    prompt()?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let input = match parse_line(&line) {
            Ok(input) => input,
            Err(msg) => {
                eprintln!("{msg}");
                println!("{HELP}");
                prompt()?;
                continue;
            }
        };

        // Failures are logged by the session; the view is left as it was.
        match input {
            Input::Title(title) => session.view.set_title(title),
            Input::Content(content) => session.view.set_content(content),
            Input::Submit => {
                let _ = session.submit().await;
            }
            Input::Edit(id) => {
                if !session.view.begin_edit(id) {
                    eprintln!("No post with id {id}");
                }
            }
            Input::Delete(id) => {
                let _ = session.delete(id).await;
            }
            Input::Cancel => session.view.cancel_edit(),
            Input::Refresh => {}
            Input::Help => {
                println!("{HELP}");
                prompt()?;
                continue;
            }
            Input::Quit => break,
        }

        println!("{}", render(&session.view));
        prompt()?;
    }

    Ok(())
}
