use std::io;

use anyhow::{Context, Result};
use clap::Parser;

use wellnus::app::App;
use wellnus::cli::Cli;
use wellnus::config::WellnusConfig;
use wellnus::logging;
use wellnus::ui::ConsoleSink;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.log_file.clone());

    let config = WellnusConfig::load_or_default(cli.config.as_deref())
        .context("Failed to load wellnus configuration")?;
    let data_dir = config.data_dir(cli.data_dir.as_deref());
    tracing::debug!(data_dir = %data_dir.display(), "Starting wellnus");

    let app = App::new(config.focus, data_dir, ConsoleSink::shared());
    let stdin = io::stdin();
    app.run(&mut stdin.lock()).context("wellnus stopped unexpectedly")?;
    Ok(())
}
