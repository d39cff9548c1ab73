use clap::Parser;
use crossterm::{
    cursor, execute,
    terminal::{self, ClearType, EnterAlternateScreen},
};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

mod input;
mod render;
mod sampler;
mod settings;
mod source;
mod stats;
mod terminal_setup;

use render::frame::run_app_loop;
use render::AppState;
use settings::{CellShape, GridSize, SampleSettings, ValueScale};
use source::demo::DemoSource;
use source::image_file::ImageSource;
use source::FrameSource;
use terminal_setup::{cleanup_terminal, detect_truecolor, install_panic_hook};

type AppResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Debug, Parser)]
#[command(
    name = "lumagrid",
    version,
    about = "Terminal-native live value-map viewer"
)]
struct Cli {
    /// Path to a PNG/JPEG to sample (runs the demo pattern if omitted)
    input: Option<PathBuf>,
    #[arg(
        long,
        help = "Run the built-in animated demo pattern",
        conflicts_with = "input"
    )]
    demo: bool,
    #[arg(long, value_name = "N", default_value_t = 20, help = "Grid columns")]
    columns: usize,
    #[arg(long, value_name = "N", default_value_t = 20, help = "Grid rows")]
    rows: usize,
    #[arg(long, value_name = "N", default_value_t = 0, help = "Scale floor")]
    scale_min: i32,
    #[arg(long, value_name = "N", default_value_t = 10, help = "Scale ceiling")]
    scale_max: i32,
    #[arg(
        long,
        value_enum,
        default_value = "rectangle",
        help = "Cell sampling footprint"
    )]
    shape: CellShape,
    #[arg(long, help = "Map bright regions to the high end of the scale")]
    invert: bool,
}

fn settings_from_cli(cli: &Cli) -> AppResult<SampleSettings> {
    Ok(SampleSettings {
        grid: GridSize::new(cli.columns, cli.rows)?,
        scale: ValueScale::new(cli.scale_min, cli.scale_max)?,
        shape: cli.shape,
        invert: cli.invert,
    })
}

fn source_from_cli(cli: &Cli) -> AppResult<Box<dyn FrameSource>> {
    if cli.demo {
        return Ok(Box::new(DemoSource::new()));
    }
    match cli.input.as_ref() {
        Some(path) => Ok(Box::new(ImageSource::open(path)?)),
        None => Ok(Box::new(DemoSource::new())),
    }
}

fn main() -> AppResult<()> {
    install_panic_hook();
    let cli = Cli::parse();

    let settings = settings_from_cli(&cli)?;
    let source = source_from_cli(&cli)?;
    let mut app_state = AppState::new(source, settings, detect_truecolor());

    crossterm::terminal::enable_raw_mode()?;
    let input_rx = input::thread::spawn_input_thread();
    let mut stdout = BufWriter::with_capacity(1024 * 1024, io::stdout());

    execute!(
        stdout,
        EnterAlternateScreen,
        cursor::Hide,
        terminal::Clear(ClearType::All)
    )?;
    stdout.flush()?;

    let run_result = run_app_loop(&mut app_state, &input_rx, &mut stdout);
    let cleanup_result = cleanup_terminal(&mut stdout);

    run_result?;
    cleanup_result
}
