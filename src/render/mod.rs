pub mod frame;
pub mod hud;
pub mod modes;

use std::time::Instant;

use crate::sampler::ValueMap;
use crate::settings::SampleSettings;
use crate::source::FrameSource;
use crate::stats::FpsCounter;
use crossterm::style::Color;

pub fn rgb_to_ansi256(r: u8, g: u8, b: u8) -> u8 {
    if r == g && g == b {
        if r < 8 {
            return 16;
        }
        if r > 248 {
            return 231;
        }
        return 232 + ((r as f32 - 8.0) / 247.0 * 24.0) as u8;
    }
    let ri = (r as f32 / 255.0 * 5.0 + 0.5) as u8;
    let gi = (g as f32 / 255.0 * 5.0 + 0.5) as u8;
    let bi = (b as f32 / 255.0 * 5.0 + 0.5) as u8;
    16 + 36 * ri + 6 * gi + bi
}

pub fn make_color(r: u8, g: u8, b: u8, use_truecolor: bool) -> Color {
    if use_truecolor {
        Color::Rgb { r, g, b }
    } else {
        Color::AnsiValue(rgb_to_ansi256(r, g, b))
    }
}

pub type AppResult<T> = Result<T, Box<dyn std::error::Error>>;

pub const FRAME_TARGET: std::time::Duration = std::time::Duration::from_millis(16);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// Shaded cells with the integer value printed when there is room.
    Digits,
    /// One density glyph per cell.
    Blocks,
    /// Shaded cells only, stretched to fill the terminal.
    Shade,
}

impl DisplayMode {
    pub fn next(self) -> Self {
        match self {
            Self::Digits => Self::Blocks,
            Self::Blocks => Self::Shade,
            Self::Shade => Self::Digits,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Digits => "Digits",
            Self::Blocks => "Blocks",
            Self::Shade => "Shade",
        }
    }
}

pub struct AppState {
    pub source: Box<dyn FrameSource>,
    pub settings: SampleSettings,
    /// Startup settings, restored by the reset key.
    pub defaults: SampleSettings,
    pub value_map: Option<ValueMap>,
    pub frame_size: (usize, usize),
    pub display_mode: DisplayMode,
    pub show_hud: bool,
    pub frozen: bool,
    pub quit_requested: bool,
    pub use_truecolor: bool,
    pub frame_count: u64,
    pub fps_counter: FpsCounter,
    pub hud_string_buf: String,
}

impl AppState {
    pub fn new(source: Box<dyn FrameSource>, settings: SampleSettings, use_truecolor: bool) -> Self {
        Self {
            source,
            settings,
            defaults: settings,
            value_map: None,
            frame_size: (0, 0),
            display_mode: DisplayMode::Digits,
            show_hud: true,
            frozen: false,
            quit_requested: false,
            use_truecolor,
            frame_count: 0,
            fps_counter: FpsCounter::new(Instant::now()),
            hud_string_buf: String::with_capacity(512),
        }
    }
}
