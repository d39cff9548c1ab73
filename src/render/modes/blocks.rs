use super::{is_hud_overlay_row, CellLayout, BLOCK_DENSITY_CHARS};
use crate::render::make_color;
use crate::sampler::ValueMap;
use crate::settings::ValueScale;
use crossterm::{
    cursor, queue,
    style::{Print, SetBackgroundColor, SetForegroundColor},
};
use std::io::{self, Write};

// --- Blocks ---

pub(crate) fn ramp_char(value: i32, scale: ValueScale) -> char {
    if scale.max() == 0 {
        return BLOCK_DENSITY_CHARS[0];
    }
    let ratio = (value as f64 / scale.max() as f64).clamp(0.0, 1.0);
    let max_idx = (BLOCK_DENSITY_CHARS.len() - 1) as f64;
    BLOCK_DENSITY_CHARS[(ratio * max_idx).round() as usize]
}

/// One density glyph per grid cell, centered in the terminal. Suits fine
/// grids where per-cell digits would not fit anyway.
pub fn render_blocks(
    map: &ValueMap,
    scale: ValueScale,
    term_cols: usize,
    term_rows: usize,
    stdout: &mut impl Write,
    show_hud: bool,
    use_truecolor: bool,
) -> io::Result<()> {
    let layout = CellLayout {
        cell_w: 1,
        cell_h: 1,
        x0: term_cols.saturating_sub(map.columns()) / 2,
        y0: term_rows.saturating_sub(map.rows()) / 2,
    };

    queue!(
        stdout,
        SetBackgroundColor(make_color(0, 0, 0, use_truecolor)),
        SetForegroundColor(make_color(225, 225, 225, use_truecolor))
    )?;

    for term_row in 0..term_rows {
        if is_hud_overlay_row(show_hud, term_row, term_rows) {
            continue;
        }

        queue!(stdout, cursor::MoveTo(0, term_row as u16))?;
        for term_col in 0..term_cols {
            let ch = match layout.cell_at(term_col, term_row, map.columns(), map.rows()) {
                Some((row, col)) => ramp_char(map.get(row, col), scale),
                None => ' ',
            };
            queue!(stdout, Print(ch))?;
        }
    }

    Ok(())
}
