use super::{is_hud_overlay_row, layout_cells, value_to_gray};
use crate::render::make_color;
use crate::sampler::ValueMap;
use crate::settings::ValueScale;
use crossterm::{
    cursor, queue,
    style::{Print, SetBackgroundColor},
};
use std::io::{self, Write};

// --- Shade ---

/// Pure grayscale mosaic: every cell painted as a block of background
/// color, stretched to fill the terminal. No glyphs, no aspect clamp.
pub fn render_shade(
    map: &ValueMap,
    scale: ValueScale,
    term_cols: usize,
    term_rows: usize,
    stdout: &mut impl Write,
    show_hud: bool,
    use_truecolor: bool,
) -> io::Result<()> {
    let layout = layout_cells(map.columns(), map.rows(), term_cols, term_rows, false);

    let mut last_bg: Option<u8> = None;

    for term_row in 0..term_rows {
        if is_hud_overlay_row(show_hud, term_row, term_rows) {
            last_bg = None;
            continue;
        }

        queue!(stdout, cursor::MoveTo(0, term_row as u16))?;
        for term_col in 0..term_cols {
            let bg = match layout.cell_at(term_col, term_row, map.columns(), map.rows()) {
                Some((row, col)) => value_to_gray(map.get(row, col), scale),
                None => 0,
            };

            if last_bg != Some(bg) {
                queue!(stdout, SetBackgroundColor(make_color(bg, bg, bg, use_truecolor)))?;
                last_bg = Some(bg);
            }
            queue!(stdout, Print(' '))?;
        }
    }

    Ok(())
}
