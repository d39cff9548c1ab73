use rand::Rng;
use rayon::prelude::*;
use std::f32::consts::TAU;
use std::time::Instant;

use super::{AppResult, FrameBuffer, FrameSource};

const DEMO_WIDTH: usize = 640;
const DEMO_HEIGHT: usize = 480;
const BLOB_COUNT: usize = 6;

/// One soft luminance spot drifting across the frame. Positions and
/// velocities are in normalized [0, 1] coordinates.
#[derive(Debug, Clone, Copy)]
struct Blob {
    x: f32,
    y: f32,
    vx: f32,
    vy: f32,
    sigma: f32,
    brightness: f32,
}

/// Procedural animated test pattern: drifting bright blobs over a slowly
/// sweeping gradient. Stands in for a camera when none is wired up.
pub struct DemoSource {
    blobs: Vec<Blob>,
    started: Instant,
    frame: FrameBuffer,
}

impl DemoSource {
    pub fn new() -> Self {
        let mut rng = rand::rng();
        let blobs = (0..BLOB_COUNT)
            .map(|_| Blob {
                x: rng.random_range(0.15_f32..0.85),
                y: rng.random_range(0.15_f32..0.85),
                vx: rng.random_range(-0.08_f32..0.08),
                vy: rng.random_range(-0.08_f32..0.08),
                sigma: rng.random_range(0.06_f32..0.14),
                brightness: rng.random_range(0.45_f32..0.85),
            })
            .collect();

        Self {
            blobs,
            started: Instant::now(),
            frame: FrameBuffer::new(DEMO_WIDTH, DEMO_HEIGHT),
        }
    }

    fn paint(&mut self, t: f32) {
        // Wrap blob centers into [0, 1] so they re-enter on the far side.
        let centers: Vec<(f32, f32, f32, f32)> = self
            .blobs
            .iter()
            .map(|b| {
                (
                    (b.x + b.vx * t).rem_euclid(1.0),
                    (b.y + b.vy * t).rem_euclid(1.0),
                    2.0 * b.sigma * b.sigma,
                    b.brightness,
                )
            })
            .collect();

        let width = self.frame.width;
        let height = self.frame.height;
        let row_stride = width * 4;

        self.frame
            .pixels
            .par_chunks_mut(row_stride)
            .enumerate()
            .for_each(|(y, row)| {
                let yn = y as f32 / height as f32;
                for (x, px) in row.chunks_exact_mut(4).enumerate() {
                    let xn = x as f32 / width as f32;

                    let mut level =
                        0.18 + 0.10 * ((xn * TAU + t * 0.35).sin() * 0.5 + 0.5);
                    for &(bx, by, two_sigma2, brightness) in &centers {
                        let dx = xn - bx;
                        let dy = yn - by;
                        level += brightness * (-(dx * dx + dy * dy) / two_sigma2).exp();
                    }

                    let byte = (level.clamp(0.0, 1.0) * 255.0) as u8;
                    px[0] = byte;
                    px[1] = byte;
                    px[2] = byte;
                    px[3] = 255;
                }
            });
    }
}

impl Default for DemoSource {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameSource for DemoSource {
    fn grab(&mut self) -> AppResult<&FrameBuffer> {
        let t = self.started.elapsed().as_secs_f32();
        self.paint(t);
        Ok(&self.frame)
    }

    fn name(&self) -> &'static str {
        "Demo"
    }
}
