pub mod demo;
pub mod image_file;

pub type AppResult<T> = Result<T, Box<dyn std::error::Error>>;

/// One frame of RGBA pixels, row-major, 4 bytes per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    pub pixels: Vec<u8>,
    pub width: usize,
    pub height: usize,
}

impl FrameBuffer {
    /// Allocate an opaque black frame.
    pub fn new(width: usize, height: usize) -> Self {
        let mut pixels = vec![0u8; width * height * 4];
        for alpha in pixels.iter_mut().skip(3).step_by(4) {
            *alpha = 255;
        }
        Self {
            pixels,
            width,
            height,
        }
    }

    pub fn from_rgba(pixels: Vec<u8>, width: usize, height: usize) -> Result<Self, String> {
        let expected = width * height * 4;
        if pixels.len() != expected {
            return Err(format!(
                "RGBA buffer is {} bytes, expected {expected} for {width}x{height}",
                pixels.len()
            ));
        }
        Ok(Self {
            pixels,
            width,
            height,
        })
    }
}

/// A producer of frames for the sampling loop.
///
/// Implementations keep one internal buffer and overwrite it per call, so
/// the borrow returned by `grab` is only valid until the next grab. The
/// sampler never holds onto it across calls.
pub trait FrameSource {
    fn grab(&mut self) -> AppResult<&FrameBuffer>;

    /// Short label for the HUD.
    fn name(&self) -> &'static str;
}
