use anyhow::{Context, Result};
use std::{fs::File, sync::Mutex};
use tracing::Level;

use crate::cli::Args;

/// Logs go to `--log-file` when given. Otherwise headless runs log to
/// stderr and the interactive view stays silent, since it owns the screen.
pub(crate) fn init(args: &Args) -> Result<()> {
    let level = match args.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    if let Some(path) = &args.log_file {
        let file = File::create(path)
            .with_context(|| format!("could not create log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else if args.headless {
        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}
