use crate::settings::{CellShape, SampleSettings};
use crate::source::FrameBuffer;

/// Bounding boxes with more candidate pixels than this are walked with a
/// stride of 2 in both axes, visiting roughly a quarter of the pixels.
/// Large cells are oversampled anyway; skipping keeps frame-rate headroom.
pub const STRIDE_THRESHOLD: usize = 2000;

/// Mean luminance reported for a region that covers no pixels at all.
pub const NEUTRAL_LUMINANCE: f64 = 0.5;

/// Perceptual luminance (ITU-R BT.709 weights), normalized to [0, 1].
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> f64 {
    (0.2126 * r as f64 + 0.7152 * g as f64 + 0.0722 * b as f64) / 255.0
}

#[inline]
fn luminance_at(frame: &FrameBuffer, px: usize, py: usize) -> f64 {
    let idx = (py * frame.width + px) * 4;
    luminance(
        frame.pixels[idx],
        frame.pixels[idx + 1],
        frame.pixels[idx + 2],
    )
}

/// Mean luminance over the axis-aligned box `[x, x+w) x [y, y+h)`,
/// clamped to the frame bounds. Falls back to [`NEUTRAL_LUMINANCE`] when
/// the clamped region covers no pixels.
pub(crate) fn sample_rect(frame: &FrameBuffer, x: f64, y: f64, w: f64, h: f64) -> f64 {
    let start_x = x.floor().max(0.0) as usize;
    let start_y = y.floor().max(0.0) as usize;
    let end_x = (x + w).floor().min(frame.width as f64).max(0.0) as usize;
    let end_y = (y + h).floor().min(frame.height as f64).max(0.0) as usize;

    if end_x <= start_x || end_y <= start_y {
        return NEUTRAL_LUMINANCE;
    }

    let candidates = (end_x - start_x) * (end_y - start_y);
    let step = if candidates > STRIDE_THRESHOLD { 2 } else { 1 };

    let mut sum = 0.0;
    let mut count = 0u32;
    for py in (start_y..end_y).step_by(step) {
        for px in (start_x..end_x).step_by(step) {
            sum += luminance_at(frame, px, py);
            count += 1;
        }
    }

    if count > 0 {
        sum / count as f64
    } else {
        NEUTRAL_LUMINANCE
    }
}

/// Mean luminance over the circle at (`cx`, `cy`) with `radius`, clamped
/// to the frame bounds. The membership test runs on the unstrided pixel
/// grid, so striding only thins which members get visited.
pub(crate) fn sample_circle(frame: &FrameBuffer, cx: f64, cy: f64, radius: f64) -> f64 {
    let start_x = (cx - radius).floor().max(0.0) as usize;
    let start_y = (cy - radius).floor().max(0.0) as usize;
    let end_x = (cx + radius).floor().min(frame.width as f64).max(0.0) as usize;
    let end_y = (cy + radius).floor().min(frame.height as f64).max(0.0) as usize;
    let r2 = radius * radius;

    if end_x <= start_x || end_y <= start_y {
        return NEUTRAL_LUMINANCE;
    }

    let candidates = (end_x - start_x) * (end_y - start_y);
    let step = if candidates > STRIDE_THRESHOLD { 2 } else { 1 };

    let mut sum = 0.0;
    let mut count = 0u32;
    for py in (start_y..end_y).step_by(step) {
        for px in (start_x..end_x).step_by(step) {
            let dx = px as f64 - cx;
            let dy = py as f64 - cy;
            if dx * dx + dy * dy <= r2 {
                sum += luminance_at(frame, px, py);
                count += 1;
            }
        }
    }

    if count > 0 {
        sum / count as f64
    } else {
        NEUTRAL_LUMINANCE
    }
}

/// The sampled output grid: one integer per cell, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueMap {
    values: Vec<i32>,
    rows: usize,
    columns: usize,
}

impl ValueMap {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn get(&self, row: usize, col: usize) -> i32 {
        self.values[row * self.columns + col]
    }

    pub fn row(&self, row: usize) -> &[i32] {
        &self.values[row * self.columns..(row + 1) * self.columns]
    }

    pub fn values(&self) -> &[i32] {
        &self.values
    }
}

/// Convert one frame into a `rows x columns` grid of integers.
///
/// Each cell averages luminance over its footprint (the full cell bounding
/// box for [`CellShape::Rectangle`], the inscribed circle for
/// [`CellShape::Circle`]), turns that into darkness (`1 - luminance`,
/// complemented again when `invert` is set), scales by `scale.max` and
/// rounds, then clamps into `[scale.min, scale.max]`.
///
/// `scale.min` participates only through the final clamp: the linear
/// mapping always targets `[0, scale.max]`. A non-zero `min` therefore
/// tightens the floor without shifting the mapping. Callers have come to
/// depend on that, so it stays.
///
/// Returns `None` when the frame reports zero width or height — nothing to
/// sample yet, try again next tick. Every other input, however degenerate
/// the grid, yields a fully populated in-range map.
pub fn compute_value_map(frame: &FrameBuffer, settings: &SampleSettings) -> Option<ValueMap> {
    if frame.width == 0 || frame.height == 0 {
        return None;
    }

    let columns = settings.grid.columns();
    let rows = settings.grid.rows();
    let cell_width = frame.width as f64 / columns as f64;
    let cell_height = frame.height as f64 / rows as f64;

    let mut values = Vec::with_capacity(rows * columns);
    for row in 0..rows {
        for col in 0..columns {
            let avg_luminance = match settings.shape {
                CellShape::Circle => {
                    let cx = col as f64 * cell_width + cell_width / 2.0;
                    let cy = row as f64 * cell_height + cell_height / 2.0;
                    let radius = cell_width.min(cell_height) / 2.0;
                    sample_circle(frame, cx, cy, radius)
                }
                CellShape::Rectangle => {
                    let x = col as f64 * cell_width;
                    let y = row as f64 * cell_height;
                    sample_rect(frame, x, y, cell_width, cell_height)
                }
            };

            let mut darkness = 1.0 - avg_luminance;
            if settings.invert {
                darkness = 1.0 - darkness;
            }

            let value = (darkness * settings.scale.max() as f64).round() as i32;
            values.push(value.clamp(settings.scale.min(), settings.scale.max()));
        }
    }

    Some(ValueMap {
        values,
        rows,
        columns,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{GridSize, ValueScale};

    fn uniform_frame(width: usize, height: usize, byte: u8) -> FrameBuffer {
        let mut pixels = vec![byte; width * height * 4];
        for alpha in pixels.iter_mut().skip(3).step_by(4) {
            *alpha = 255;
        }
        FrameBuffer {
            pixels,
            width,
            height,
        }
    }

    fn gradient_frame(width: usize, height: usize) -> FrameBuffer {
        let mut frame = FrameBuffer::new(width, height);
        for y in 0..height {
            for x in 0..width {
                let idx = (y * width + x) * 4;
                let v = ((x * 7 + y * 13) % 256) as u8;
                frame.pixels[idx] = v;
                frame.pixels[idx + 1] = v.wrapping_mul(3);
                frame.pixels[idx + 2] = 255 - v;
                frame.pixels[idx + 3] = 255;
            }
        }
        frame
    }

    fn make_settings(grid: usize, scale_max: i32, shape: CellShape, invert: bool) -> SampleSettings {
        SampleSettings {
            grid: GridSize::square(grid).expect("valid grid"),
            scale: ValueScale::new(0, scale_max).expect("valid scale"),
            shape,
            invert,
        }
    }

    #[test]
    fn luminance_weights_follow_bt709() {
        assert!((luminance(255, 255, 255) - 1.0).abs() < 1e-9);
        assert_eq!(luminance(0, 0, 0), 0.0);
        // Green dominates red dominates blue.
        assert!(luminance(0, 255, 0) > luminance(255, 0, 0));
        assert!(luminance(255, 0, 0) > luminance(0, 0, 255));
    }

    #[test]
    fn white_frame_maps_to_zero() {
        let frame = uniform_frame(2, 2, 255);
        let settings = make_settings(1, 10, CellShape::Rectangle, false);
        let map = compute_value_map(&frame, &settings).expect("frame is ready");
        assert_eq!(map.values(), &[0]);
    }

    #[test]
    fn black_frame_maps_to_scale_max() {
        let frame = uniform_frame(2, 2, 0);
        let settings = make_settings(1, 10, CellShape::Rectangle, false);
        let map = compute_value_map(&frame, &settings).expect("frame is ready");
        assert_eq!(map.values(), &[10]);
    }

    #[test]
    fn inverted_black_frame_maps_to_zero() {
        let frame = uniform_frame(2, 2, 0);
        let settings = make_settings(1, 10, CellShape::Rectangle, true);
        let map = compute_value_map(&frame, &settings).expect("frame is ready");
        assert_eq!(map.values(), &[0]);
    }

    #[test]
    fn uniform_gray_maps_to_mid_scale() {
        let frame = uniform_frame(100, 100, 128);
        let settings = make_settings(10, 20, CellShape::Rectangle, false);
        let map = compute_value_map(&frame, &settings).expect("frame is ready");
        assert_eq!(map.rows(), 10);
        assert_eq!(map.columns(), 10);
        assert!(map.values().iter().all(|&v| v == 10));
    }

    #[test]
    fn zero_dimension_frame_is_not_ready() {
        let settings = make_settings(4, 10, CellShape::Rectangle, false);
        let no_width = FrameBuffer {
            pixels: Vec::new(),
            width: 0,
            height: 480,
        };
        assert!(compute_value_map(&no_width, &settings).is_none());

        let no_height = FrameBuffer {
            pixels: Vec::new(),
            width: 640,
            height: 0,
        };
        assert!(compute_value_map(&no_height, &settings).is_none());
    }

    #[test]
    fn map_shape_matches_grid() {
        let frame = gradient_frame(64, 48);
        let settings = SampleSettings {
            grid: GridSize::new(7, 3).expect("valid grid"),
            scale: ValueScale::new(0, 10).expect("valid scale"),
            shape: CellShape::Rectangle,
            invert: false,
        };
        let map = compute_value_map(&frame, &settings).expect("frame is ready");
        assert_eq!(map.rows(), 3);
        assert_eq!(map.columns(), 7);
        assert_eq!(map.values().len(), 21);
        for row in 0..map.rows() {
            assert_eq!(map.row(row).len(), 7);
        }
    }

    #[test]
    fn values_stay_within_scale_for_all_configurations() {
        let frame = gradient_frame(33, 21);
        for &shape in &[CellShape::Rectangle, CellShape::Circle] {
            for &invert in &[false, true] {
                for &(min, max) in &[(0, 10), (-5, 5), (3, 10), (-20, -10)] {
                    let settings = SampleSettings {
                        grid: GridSize::new(9, 6).expect("valid grid"),
                        scale: ValueScale::new(min, max).expect("valid scale"),
                        shape,
                        invert,
                    };
                    let map = compute_value_map(&frame, &settings).expect("frame is ready");
                    assert!(
                        map.values().iter().all(|&v| v >= min && v <= max),
                        "value escaped [{min}, {max}] for {shape:?} invert={invert}"
                    );
                }
            }
        }
    }

    #[test]
    fn repeated_calls_are_bit_identical() {
        let frame = gradient_frame(50, 50);
        for &shape in &[CellShape::Rectangle, CellShape::Circle] {
            let settings = make_settings(8, 50, shape, false);
            let first = compute_value_map(&frame, &settings).expect("frame is ready");
            let second = compute_value_map(&frame, &settings).expect("frame is ready");
            assert_eq!(first, second);
        }
    }

    #[test]
    fn out_of_bounds_region_falls_back_to_neutral() {
        let frame = uniform_frame(10, 10, 255);
        assert_eq!(sample_rect(&frame, 100.0, 100.0, 5.0, 5.0), NEUTRAL_LUMINANCE);
        assert_eq!(sample_circle(&frame, -50.0, -50.0, 3.0), NEUTRAL_LUMINANCE);
    }

    #[test]
    fn subpixel_cells_use_neutral_fallback() {
        // 5x5 grid over a 2x2 frame: cells are 0.4 px wide, so some floor
        // to empty regions and must report the neutral mid value.
        let frame = uniform_frame(2, 2, 255);
        let settings = make_settings(5, 10, CellShape::Rectangle, false);
        let map = compute_value_map(&frame, &settings).expect("frame is ready");
        assert_eq!(map.values().len(), 25);
        assert!(map.values().iter().all(|&v| v == 0 || v == 5));
        assert!(map.values().contains(&5));
    }

    #[test]
    fn circle_footprint_excludes_dark_corners() {
        // White inscribed disc on black corners: the circular footprint
        // sees only white, the rectangular one also sees the corners.
        let size = 40;
        let mut frame = FrameBuffer::new(size, size);
        let c = size as f64 / 2.0;
        for y in 0..size {
            for x in 0..size {
                let dx = x as f64 - c;
                let dy = y as f64 - c;
                let inside = dx * dx + dy * dy <= c * c;
                let idx = (y * size + x) * 4;
                let byte = if inside { 255 } else { 0 };
                frame.pixels[idx] = byte;
                frame.pixels[idx + 1] = byte;
                frame.pixels[idx + 2] = byte;
                frame.pixels[idx + 3] = 255;
            }
        }

        let circle = compute_value_map(&frame, &make_settings(1, 10, CellShape::Circle, false))
            .expect("frame is ready");
        let rect = compute_value_map(&frame, &make_settings(1, 10, CellShape::Rectangle, false))
            .expect("frame is ready");
        assert_eq!(circle.get(0, 0), 0);
        assert!(rect.get(0, 0) > circle.get(0, 0));
    }

    #[test]
    fn circle_matches_rectangle_on_uniform_square_frame() {
        let frame = uniform_frame(32, 32, 90);
        let circle = compute_value_map(&frame, &make_settings(1, 10, CellShape::Circle, false))
            .expect("frame is ready");
        let rect = compute_value_map(&frame, &make_settings(1, 10, CellShape::Rectangle, false))
            .expect("frame is ready");
        assert_eq!(circle, rect);
    }

    #[test]
    fn invert_symmetry_sums_to_scale_max() {
        for &byte in &[77u8, 128, 200] {
            let frame = uniform_frame(20, 20, byte);
            let plain = compute_value_map(&frame, &make_settings(2, 10, CellShape::Rectangle, false))
                .expect("frame is ready");
            let flipped =
                compute_value_map(&frame, &make_settings(2, 10, CellShape::Rectangle, true))
                    .expect("frame is ready");
            assert_eq!(plain.get(0, 0) + flipped.get(0, 0), 10, "byte {byte}");
        }
    }

    #[test]
    fn stride_subsampling_keeps_uniform_result_exact() {
        // 100x100 single cell: 10_000 candidates, well past the stride
        // threshold. A uniform frame must average to the same value as a
        // full-density walk would.
        let frame = uniform_frame(100, 100, 60);
        let settings = make_settings(1, 50, CellShape::Rectangle, false);
        let map = compute_value_map(&frame, &settings).expect("frame is ready");
        assert_eq!(map.values(), &[38]);
    }

    #[test]
    fn scale_min_tightens_floor_without_shifting_mapping() {
        // White frame: darkness 0 maps to 0, then the clamp raises it to
        // the floor. The linear term never sees `min`.
        let frame = uniform_frame(4, 4, 255);
        let settings = SampleSettings {
            grid: GridSize::square(1).expect("valid grid"),
            scale: ValueScale::new(3, 10).expect("valid scale"),
            shape: CellShape::Rectangle,
            invert: false,
        };
        let map = compute_value_map(&frame, &settings).expect("frame is ready");
        assert_eq!(map.values(), &[3]);
    }
}
