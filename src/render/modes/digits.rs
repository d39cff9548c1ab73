use super::{is_hud_overlay_row, layout_cells, value_to_gray, CellLayout};
use crate::render::make_color;
use crate::sampler::ValueMap;
use crate::settings::ValueScale;
use crossterm::{
    cursor, queue,
    style::{Print, SetBackgroundColor, SetForegroundColor},
};
use std::io::{self, Write};

// --- Digits ---

/// Character of the cell's printed value under this terminal position.
/// The label sits centered on the cell's middle row, and only when the
/// cell is wide enough to hold it.
fn label_char_at(
    label: &str,
    layout: &CellLayout,
    term_col: usize,
    term_row: usize,
    row: usize,
    col: usize,
) -> char {
    if layout.cell_w < label.len() {
        return ' ';
    }
    let mid_row = layout.y0 + row * layout.cell_h + layout.cell_h / 2;
    if term_row != mid_row {
        return ' ';
    }
    let start = layout.x0 + col * layout.cell_w + (layout.cell_w - label.len()) / 2;
    if term_col >= start && term_col < start + label.len() {
        label.as_bytes()[term_col - start] as char
    } else {
        ' '
    }
}

pub fn render_digits(
    map: &ValueMap,
    scale: ValueScale,
    term_cols: usize,
    term_rows: usize,
    stdout: &mut impl Write,
    show_hud: bool,
    use_truecolor: bool,
) -> io::Result<()> {
    let layout = layout_cells(map.columns(), map.rows(), term_cols, term_rows, true);
    let labels: Vec<String> = map.values().iter().map(|v| v.to_string()).collect();

    let mut last_bg: Option<u8> = None;
    let mut last_fg: Option<u8> = None;

    for term_row in 0..term_rows {
        if is_hud_overlay_row(show_hud, term_row, term_rows) {
            last_bg = None;
            last_fg = None;
            continue;
        }

        queue!(stdout, cursor::MoveTo(0, term_row as u16))?;
        for term_col in 0..term_cols {
            let (ch, bg, fg) =
                match layout.cell_at(term_col, term_row, map.columns(), map.rows()) {
                    Some((row, col)) => {
                        let gray = value_to_gray(map.get(row, col), scale);
                        let label = &labels[row * map.columns() + col];
                        let ch = label_char_at(label, &layout, term_col, term_row, row, col);
                        // Contrast against the shaded background.
                        let fg = if gray < 128 { 255 } else { 0 };
                        (ch, gray, fg)
                    }
                    None => (' ', 0, 0),
                };

            if last_bg != Some(bg) {
                queue!(stdout, SetBackgroundColor(make_color(bg, bg, bg, use_truecolor)))?;
                last_bg = Some(bg);
            }
            if last_fg != Some(fg) {
                queue!(stdout, SetForegroundColor(make_color(fg, fg, fg, use_truecolor)))?;
                last_fg = Some(fg);
            }
            queue!(stdout, Print(ch))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_lands_centered_on_middle_row() {
        let layout = CellLayout {
            cell_w: 4,
            cell_h: 2,
            x0: 0,
            y0: 0,
        };
        assert_eq!(label_char_at("10", &layout, 1, 1, 0, 0), '1');
        assert_eq!(label_char_at("10", &layout, 2, 1, 0, 0), '0');
        assert_eq!(label_char_at("10", &layout, 0, 1, 0, 0), ' ');
        assert_eq!(label_char_at("10", &layout, 1, 0, 0, 0), ' ');
    }

    #[test]
    fn label_is_suppressed_in_narrow_cells() {
        let layout = CellLayout {
            cell_w: 1,
            cell_h: 1,
            x0: 0,
            y0: 0,
        };
        assert_eq!(label_char_at("12", &layout, 0, 0, 0, 0), ' ');
        assert_eq!(label_char_at("7", &layout, 0, 0, 0, 0), '7');
    }
}
