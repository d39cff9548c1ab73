pub mod thread;

use crate::render::{AppState, DisplayMode};
use crossterm::event::{Event, KeyCode, KeyEventKind};
use std::sync::mpsc::TryRecvError;
use std::time::Instant;

pub type AppResult<T> = Result<T, Box<dyn std::error::Error>>;

pub fn drain_input_events(
    app_state: &mut AppState,
    input_rx: &thread::InputReceiver,
) -> AppResult<bool> {
    loop {
        match input_rx.try_recv() {
            Ok(thread::InputMessage::Event(event)) => {
                handle_input_event(app_state, event);
                if app_state.quit_requested {
                    return Ok(true);
                }
            }
            Ok(thread::InputMessage::ReadError(err)) => {
                return Err(format!("Input thread read failed: {err}").into());
            }
            Err(TryRecvError::Empty) => break,
            Err(TryRecvError::Disconnected) => {
                return Err("Input channel disconnected".into());
            }
        }
    }

    Ok(app_state.quit_requested)
}

fn toggle_freeze(app_state: &mut AppState) {
    app_state.frozen = !app_state.frozen;
    if !app_state.frozen {
        // The stale window would otherwise dilute the next reading.
        app_state.fps_counter.reset(Instant::now());
    }
}

pub fn handle_input_event(app_state: &mut AppState, event: Event) {
    let Event::Key(key_event) = event else {
        return;
    };

    // Discrete settings keys: act on press/repeat only.
    if !matches!(key_event.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
        return;
    }

    match key_event.code {
        KeyCode::Esc => app_state.quit_requested = true,
        KeyCode::Tab => app_state.show_hud = !app_state.show_hud,
        KeyCode::Char(' ') => toggle_freeze(app_state),
        KeyCode::Char('+') | KeyCode::Char('=') => {
            app_state.settings.grid = app_state.settings.grid.grow();
        }
        KeyCode::Char('-') | KeyCode::Char('_') => {
            app_state.settings.grid = app_state.settings.grid.shrink();
        }
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'q' => app_state.quit_requested = true,
            'f' => toggle_freeze(app_state),
            'g' => app_state.settings.cycle_grid_preset(),
            'v' => app_state.settings.cycle_scale_preset(),
            's' => app_state.settings.shape = app_state.settings.shape.toggle(),
            'i' => app_state.settings.invert = !app_state.settings.invert,
            'm' => app_state.display_mode = app_state.display_mode.next(),
            'r' => {
                app_state.settings = app_state.defaults;
                app_state.display_mode = DisplayMode::Digits;
                app_state.frozen = false;
            }
            _ => {}
        },
        _ => {}
    }
}
