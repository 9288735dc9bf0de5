//! Binary entry point: parse the command line, start logging, load the song
//! list from the backend and drive the Ratatui event loop until the user
//! exits.
use anyhow::Context;
use clap::Parser;
use song_shelf::{logging, run_app, App, Cli, Config, HttpRecordStore, SyncOrchestrator};
use tracing::info;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _log_guard = logging::init(&cli);
    let config = Config::from(&cli);

    info!(base_url = %config.base_url, images = ?config.images, "starting song shelf");

    let store = HttpRecordStore::new(&config.base_url, config.timeout)
        .context("failed to build HTTP client")?;
    let mut app = App::new(SyncOrchestrator::new(store, config.images));
    run_app(&mut app)
}
