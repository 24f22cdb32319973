use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use stockdash_client::prelude::*;
use std::env;
use std::time::Duration;
use tokio::task::JoinHandle;

mod app;
mod cli;
mod ui;

/// Symbols fetched when no `--symbols` override is given.
const WATCHLIST: [&str; 4] = ["AAPL", "MSFT", "GOOGL", "AMZN"];

const USER_AGENT: &str = concat!("stockdash/", env!("CARGO_PKG_VERSION"));

fn preprocess() {
    // grant access to .env
    dotenv::dotenv().ok();

    // initialise logger; stderr only, so the dashboard stays intact
    env_logger::init();
}

#[tokio::main]
async fn main() -> Result<()> {
    preprocess();

    let cli = cli::Cli::parse();
    log::info!("Command line input recorded: {cli:#?}");

    let symbols = cli.watchlist();
    // absence is deliberately unchecked; an empty token makes every request
    // fail upstream, which lands in the single error state
    let token = env::var("FINNHUB_API_KEY").unwrap_or_default();

    let client = build_client(USER_AGENT)?;

    // the one fetch of this process: spawned here, joined in the event loop
    let fetch = tokio::spawn(async move { client.fetch_quotes(&symbols, &token).await });

    let mut terminal = ui::init()?;
    let result = run(&mut terminal, app::App::new(), fetch).await;
    ui::restore()?;

    if let Err(e) = result {
        eprintln!("{} {e:#}", "error:".red().bold());
        std::process::exit(1);
    }
    Ok(())
}

async fn run(
    terminal: &mut ui::Tui,
    mut app: app::App,
    mut fetch: JoinHandle<Result<Vec<Quote>, FetchError>>,
) -> Result<()> {
    let mut events = EventStream::new();
    let mut ticker = tokio::time::interval(Duration::from_millis(200));

    loop {
        terminal.draw(|frame| ui::draw(frame, &app))?;

        tokio::select! {
            joined = &mut fetch, if app.is_loading() => {
                let result = joined
                    .map_err(anyhow::Error::new)
                    .and_then(|inner| inner.map_err(anyhow::Error::new));
                app.on_fetch_complete(result);
            }
            Some(event) = events.next() => {
                if let Event::Key(key) = event? {
                    app.on_key(key);
                }
            }
            _ = ticker.tick() => app.on_tick(),
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
