use crossterm::{
    cursor, queue,
    style::{Print, SetBackgroundColor, SetForegroundColor},
};
use std::fmt::Write as _;
use std::io::{self, Write};

use super::{make_color, AppState};

fn truncate_and_pad_in_place(text: &mut String, width: usize) {
    if width == 0 {
        text.clear();
        return;
    }

    let mut seen_chars = 0usize;
    let mut truncate_byte = None;
    for (idx, _) in text.char_indices() {
        if seen_chars == width {
            truncate_byte = Some(idx);
            break;
        }
        seen_chars += 1;
    }

    if let Some(idx) = truncate_byte {
        text.truncate(idx);
    } else {
        for _ in seen_chars..width {
            text.push(' ');
        }
    }
}

pub fn draw_hud(
    app_state: &mut AppState,
    cols: u16,
    rows: u16,
    stdout: &mut impl Write,
) -> io::Result<()> {
    let width = cols as usize;
    let hud = &mut app_state.hud_string_buf;
    hud.clear();
    write!(
        hud,
        "FPS:{:>5.1}  Source:{} {}x{}  Grid:{}x{}  Scale:[{},{}]  Shape:{}  Invert:{}  Mode:{}  Frames:{}",
        app_state.fps_counter.fps(),
        app_state.source.name(),
        app_state.frame_size.0,
        app_state.frame_size.1,
        app_state.settings.grid.columns(),
        app_state.settings.grid.rows(),
        app_state.settings.scale.min(),
        app_state.settings.scale.max(),
        app_state.settings.shape.name(),
        if app_state.settings.invert { "On" } else { "Off" },
        app_state.display_mode.name(),
        app_state.frame_count,
    )
    .map_err(|_| io::Error::other("failed to format HUD"))?;

    if app_state.frozen {
        hud.push_str("  [FROZEN]");
    }
    truncate_and_pad_in_place(hud, width);

    let tc = app_state.use_truecolor;
    queue!(
        stdout,
        cursor::MoveTo(0, 0),
        SetBackgroundColor(make_color(0, 0, 0, tc)),
        SetForegroundColor(make_color(245, 245, 245, tc)),
        Print(hud.as_str())
    )?;

    let controls = "Space/F:Freeze  +/-:Grid  G:Grid preset  V:Scale preset  S:Shape  I:Invert  M:Mode  R:Reset  Tab:HUD  Q/Esc:Quit";
    hud.clear();
    hud.push_str(controls);
    truncate_and_pad_in_place(hud, width);

    queue!(
        stdout,
        cursor::MoveTo(0, rows - 1),
        SetBackgroundColor(make_color(0, 0, 0, tc)),
        SetForegroundColor(make_color(220, 220, 220, tc)),
        Print(hud.as_str())
    )?;

    Ok(())
}
