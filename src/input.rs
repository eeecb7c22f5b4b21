use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Action {
    Quit,
    TogglePause,
    ToggleHud,
    Speed(f32),
    Blur(f32),
    Restart,
}

pub(crate) fn map_key(key: KeyCode, mods: KeyModifiers) -> Option<Action> {
    if key == KeyCode::Char('c') && mods.contains(KeyModifiers::CONTROL) {
        return Some(Action::Quit);
    }
    match key {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char(' ') => Some(Action::TogglePause),
        KeyCode::Char('h') | KeyCode::Char('H') => Some(Action::ToggleHud),
        KeyCode::Up => Some(Action::Speed(0.1)),
        KeyCode::Down => Some(Action::Speed(-0.1)),
        KeyCode::Right => Some(Action::Blur(0.05)),
        KeyCode::Left => Some(Action::Blur(-0.05)),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Action::Restart),
        _ => None,
    }
}

/// Drains pending key presses without blocking the frame.
pub(crate) fn collect_actions() -> anyhow::Result<Vec<Action>> {
    let mut out = Vec::new();
    while event::poll(Duration::from_millis(0))? {
        if let Event::Key(k) = event::read()? {
            if k.kind == KeyEventKind::Press || k.kind == KeyEventKind::Repeat {
                out.extend(map_key(k.code, k.modifiers));
                if out.len() >= 32 {
                    break;
                }
            }
        }
    }
    Ok(out)
}
