mod bootstrap;
mod common;
mod config;
mod ui;

use clap::Parser;

use crate::ui::prelude::*;

/// Bootstrapper for the media automation stack
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Activate debug output
    #[arg(short, long)]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();
    ui::set_debug_mode(cli.debug);

    if let Err(e) = bootstrap::run() {
        emit(Level::Error, "bootstrap.failed", &format!("Bootstrap failed: {e:#}"));
        std::process::exit(1);
    }
}
