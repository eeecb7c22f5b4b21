mod app;
mod cli;
mod headless;
mod input;
mod logging;
mod term;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use wavegradient::config::load_settings;

use crate::cli::Args;

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(&args)?;

    let mut settings = load_settings(args.config.as_deref())?;
    args.apply(&mut settings);
    let ramp = settings.color_ramp()?;
    info!(ramp = %settings.ramp_preset, custom_stops = settings.ramp.len(), "settings ready");

    if args.headless {
        let summary = headless::run(
            &settings,
            &ramp,
            args.width,
            args.height,
            args.frames,
            args.time,
        );
        println!("{summary}");
        return Ok(());
    }

    app::run(settings, ramp, args.time, args.paused)
}
