use crossterm::{
    cursor, queue,
    style::{Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use std::io::{self, BufWriter, Write};
use std::time::Instant;

use super::{make_color, AppResult, AppState, DisplayMode, FRAME_TARGET};
use crate::sampler;

pub fn render_frame(
    app_state: &mut AppState,
    terminal_size: (u16, u16),
    stdout: &mut impl Write,
) -> io::Result<()> {
    let cols = terminal_size.0.max(1);
    let rows = terminal_size.1.max(1);
    let term_cols = cols as usize;
    let term_rows = rows as usize;

    match &app_state.value_map {
        Some(map) => {
            let scale = app_state.settings.scale;
            match app_state.display_mode {
                DisplayMode::Digits => super::modes::digits::render_digits(
                    map,
                    scale,
                    term_cols,
                    term_rows,
                    stdout,
                    app_state.show_hud,
                    app_state.use_truecolor,
                )?,
                DisplayMode::Blocks => super::modes::blocks::render_blocks(
                    map,
                    scale,
                    term_cols,
                    term_rows,
                    stdout,
                    app_state.show_hud,
                    app_state.use_truecolor,
                )?,
                DisplayMode::Shade => super::modes::shade::render_shade(
                    map,
                    scale,
                    term_cols,
                    term_rows,
                    stdout,
                    app_state.show_hud,
                    app_state.use_truecolor,
                )?,
            }
        }
        None => {
            let msg = "Sampling first frame...";
            let x = term_cols.saturating_sub(msg.len()) / 2;
            let y = term_rows / 2;
            queue!(
                stdout,
                terminal::Clear(ClearType::All),
                cursor::MoveTo(x as u16, y as u16),
                SetForegroundColor(make_color(200, 200, 200, app_state.use_truecolor)),
                Print(msg)
            )?;
        }
    }

    if app_state.show_hud {
        super::hud::draw_hud(app_state, cols, rows, stdout)?;
    }

    queue!(stdout, ResetColor)?;
    stdout.flush()
}

pub fn run_app_loop(
    app_state: &mut AppState,
    input_rx: &crate::input::thread::InputReceiver,
    stdout: &mut BufWriter<io::Stdout>,
) -> AppResult<()> {
    loop {
        let frame_start = Instant::now();

        // Drain all pending input events -- never skip
        if crate::input::drain_input_events(app_state, input_rx)? {
            break;
        }

        if !app_state.frozen {
            let frame = app_state.source.grab()?;
            app_state.frame_size = (frame.width, frame.height);

            // A zero-dimension frame is "not ready": keep the previous map
            // and try again next tick.
            if let Some(map) = sampler::compute_value_map(frame, &app_state.settings) {
                app_state.value_map = Some(map);
                app_state.frame_count += 1;
                app_state.fps_counter.tick(Instant::now());
            }
        }

        let terminal_size = terminal::size()?;
        render_frame(app_state, terminal_size, stdout)?;

        let spent = frame_start.elapsed();
        if spent < FRAME_TARGET {
            std::thread::sleep(FRAME_TARGET - spent);
        }
    }

    Ok(())
}
