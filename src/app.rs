use std::time::{Duration, Instant};

use tracing::{debug, info, trace};
use wavegradient::{config::Settings, render_frame, ColorRamp, Grid, ParameterSet, Rgb};

use crate::input::{collect_actions, Action};
use crate::term::{Cell, Terminal};

const HUD_FG: Rgb = Rgb::new(235, 235, 240);
const HUD_FG_DIM: Rgb = Rgb::new(160, 160, 175);
const HUD_BG: Rgb = Rgb::new(12, 12, 18);

const SPEED_RANGE: (f32, f32) = (0.0, 5.0);
const BLUR_RANGE: (f32, f32) = (0.05, 4.0);

/// Everything the keyboard can change, kept apart from the terminal.
#[derive(Clone, Debug)]
pub(crate) struct View {
    pub(crate) params: ParameterSet,
    pub(crate) start_time: f32,
    pub(crate) time: f32,
    pub(crate) paused: bool,
    pub(crate) show_hud: bool,
}

impl View {
    /// Settings-file values get the same clamps as key presses.
    pub(crate) fn new(settings: &Settings, start_time: f32, paused: bool) -> Self {
        let mut params = settings.params;
        params.speed = params.speed.clamp(SPEED_RANGE.0, SPEED_RANGE.1);
        params.blur_amount = params.blur_amount.clamp(BLUR_RANGE.0, BLUR_RANGE.1);
        Self {
            params,
            start_time,
            time: start_time,
            paused,
            show_hud: settings.show_hud,
        }
    }

    /// Returns false once the view should close.
    pub(crate) fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => return false,
            Action::TogglePause => self.paused = !self.paused,
            Action::ToggleHud => self.show_hud = !self.show_hud,
            Action::Speed(d) => {
                self.params.speed = (self.params.speed + d).clamp(SPEED_RANGE.0, SPEED_RANGE.1)
            }
            Action::Blur(d) => {
                self.params.blur_amount =
                    (self.params.blur_amount + d).clamp(BLUR_RANGE.0, BLUR_RANGE.1)
            }
            Action::Restart => self.time = self.start_time,
        }
        debug!(?action, speed = self.params.speed, blur = self.params.blur_amount, "input");
        true
    }

    pub(crate) fn advance(&mut self, dt: Duration) {
        if !self.paused {
            self.time += dt.as_secs_f32();
        }
    }
}

pub(crate) struct App {
    settings: Settings,
    ramp: ColorRamp,
    view: View,
    term: Terminal,
    pixels: Vec<Rgb>,
    fps_smoothed: f32,
}

impl App {
    fn init(
        settings: Settings,
        ramp: ColorRamp,
        start_time: f32,
        paused: bool,
    ) -> anyhow::Result<Self> {
        let view = View::new(&settings, start_time, paused);
        let term = Terminal::begin()?;
        info!(
            cols = term.diff.w,
            rows = term.diff.h,
            fps_cap = settings.fps_cap,
            "interactive view started"
        );
        Ok(Self {
            settings,
            ramp,
            view,
            term,
            pixels: Vec::new(),
            fps_smoothed: 0.0,
        })
    }

    fn grid(&self) -> Grid {
        Grid::new(
            self.term.diff.w as usize,
            self.term.diff.h as usize * 2,
            self.settings.cell_width,
            self.settings.cell_height * 0.5,
        )
    }

    fn run(&mut self) -> anyhow::Result<()> {
        let fps = self.settings.fps_cap.clamp(1, 240);
        let frame_dt = Duration::from_secs_f32(1.0 / fps as f32);
        let mut last_frame = Instant::now();

        loop {
            let frame_start = Instant::now();

            if self.term.resize_if_needed()? {
                debug!(cols = self.term.diff.w, rows = self.term.diff.h, "resized");
            }

            let mut running = true;
            for action in collect_actions()? {
                running &= self.view.apply(action);
            }
            if !running {
                break;
            }

            let real_dt = frame_start.saturating_duration_since(last_frame);
            last_frame = frame_start;
            self.view.advance(real_dt);
            if real_dt > Duration::ZERO {
                let inst = 1.0 / real_dt.as_secs_f32();
                self.fps_smoothed = if self.fps_smoothed == 0.0 {
                    inst
                } else {
                    self.fps_smoothed * 0.9 + inst * 0.1
                };
            }

            self.draw();
            let written = self.term.present()?;
            trace!(written, time = self.view.time, "frame");

            let spent = frame_start.elapsed();
            if spent < frame_dt {
                std::thread::sleep(frame_dt - spent);
            }
        }

        info!(time = self.view.time, "interactive view closed");
        Ok(())
    }

    fn draw(&mut self) {
        let grid = self.grid();
        self.pixels.resize(grid.len(), Rgb::default());
        render_frame(grid, self.view.time, &self.view.params, &self.ramp, &mut self.pixels);

        let cols = grid.cols;
        let diff = &mut self.term.diff;
        for y in 0..diff.h {
            let upper = y as usize * 2 * cols;
            let lower = upper + cols;
            for x in 0..diff.w {
                let xi = x as usize;
                diff.set_next(x, y, Cell::pixels(self.pixels[upper + xi], self.pixels[lower + xi]));
            }
        }

        if self.view.show_hud && diff.h >= 2 {
            let line1 = format!(
                " Wave Gradient  t:{:>7.2}s  speed:{:.2}  blur:{:.2}  {:>4.0} fps{} ",
                self.view.time,
                self.view.params.speed,
                self.view.params.blur_amount,
                self.fps_smoothed,
                if self.view.paused { "  [PAUSED]" } else { "" }
            );
            let line2 = " Keys: ↑/↓ speed  ←/→ blur  Space pause  R restart  H hud  Q quit ";
            diff.put_text(0, 0, &line1, HUD_FG, HUD_BG);
            diff.put_text(0, 1, line2, HUD_FG_DIM, HUD_BG);
        }
    }
}

pub(crate) fn run(
    settings: Settings,
    ramp: ColorRamp,
    start_time: f32,
    paused: bool,
) -> anyhow::Result<()> {
    let mut app = App::init(settings, ramp, start_time, paused)?;
    let result = app.run();
    // Restore the terminal even when the loop failed; the loop's error wins.
    let restored = app.term.end();
    result.and(restored)
}
