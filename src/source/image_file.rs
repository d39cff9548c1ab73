use std::path::Path;

use super::{AppResult, FrameBuffer, FrameSource};

/// A still image served as an endless stream of identical frames.
pub struct ImageSource {
    frame: FrameBuffer,
}

impl ImageSource {
    /// Decode `path` once up front; `grab` is free afterwards.
    pub fn open(path: &Path) -> AppResult<Self> {
        let rgba = image::open(path)?.to_rgba8();
        let (width, height) = rgba.dimensions();
        let frame = FrameBuffer::from_rgba(rgba.into_raw(), width as usize, height as usize)?;
        Ok(Self { frame })
    }
}

impl FrameSource for ImageSource {
    fn grab(&mut self) -> AppResult<&FrameBuffer> {
        Ok(&self.frame)
    }

    fn name(&self) -> &'static str {
        "Image"
    }
}
