use clap::{ArgAction, Parser};
use std::path::PathBuf;
use wavegradient::config::Settings;

#[derive(Parser, Debug, Clone)]
#[command(name = "wavegradient")]
#[command(about = "Animated noise-driven wave gradient, full-screen in the terminal", long_about = None)]
pub(crate) struct Args {
    /// Settings file (JSON). Defaults to settings.json in the platform config dir.
    #[arg(long)]
    pub(crate) config: Option<PathBuf>,

    /// Built-in color ramp: scenario, sunset, ocean, aurora, mono
    #[arg(long)]
    pub(crate) ramp: Option<String>,

    /// FPS cap
    #[arg(long)]
    pub(crate) fps: Option<u32>,

    /// Start time in seconds
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub(crate) time: f32,

    /// Animation speed multiplier
    #[arg(long)]
    pub(crate) speed: Option<f32>,

    /// Device pixels per terminal column
    #[arg(long)]
    pub(crate) cell_width: Option<f32>,

    /// Device pixels per terminal row
    #[arg(long)]
    pub(crate) cell_height: Option<f32>,

    /// Hide HUD on start
    #[arg(long, default_value_t = false)]
    pub(crate) no_hud: bool,

    /// Start in paused state
    #[arg(long, default_value_t = false)]
    pub(crate) paused: bool,

    /// Render off-screen and print timings instead of taking over the terminal
    #[arg(long, default_value_t = false)]
    pub(crate) headless: bool,

    /// Frames to render in headless mode
    #[arg(long, default_value_t = 60)]
    pub(crate) frames: u32,

    /// Headless grid width in columns
    #[arg(long, default_value_t = 160)]
    pub(crate) width: usize,

    /// Headless grid height in rows
    #[arg(long, default_value_t = 48)]
    pub(crate) height: usize,

    /// Write logs to this file (the interactive view owns the terminal)
    #[arg(long)]
    pub(crate) log_file: Option<PathBuf>,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub(crate) verbose: u8,
}

impl Args {
    /// Command-line values override the settings file.
    pub(crate) fn apply(&self, settings: &mut Settings) {
        if let Some(name) = &self.ramp {
            settings.ramp_preset = name.clone();
            settings.ramp.clear();
        }
        if let Some(fps) = self.fps {
            settings.fps_cap = fps;
        }
        if let Some(speed) = self.speed {
            settings.params.speed = speed;
        }
        if let Some(w) = self.cell_width {
            settings.cell_width = w;
        }
        if let Some(h) = self.cell_height {
            settings.cell_height = h;
        }
        if self.no_hud {
            settings.show_hud = false;
        }
    }
}
