mod app;
mod cli;
mod config;
mod launch;
mod library;
mod log;
mod presets;
mod session;
mod ui;

use anyhow::Result;

fn main() -> Result<()> {
    cli::run()
}
