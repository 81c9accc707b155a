use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, ensure, Result};
use clap::Parser;
use crossterm::style::Color;

use crate::{GridInt, PixelInt};

pub const CANVAS_WIDTH: PixelInt = 300;
pub const CANVAS_HEIGHT: PixelInt = 200;
pub const CELL_WIDTH: PixelInt = 10;
pub const SNAKE_LENGTH: usize = 5;
pub const TICK_INTERVAL_MS: u64 = 60;
pub const FILL_COLOR: &str = "blue";
pub const STROKE_COLOR: &str = "white";

/// Command-line options, validated into a [`Config`].
#[derive(Debug, Clone, Parser)]
#[command(name = "snake_canvas", version, about = "Snake on a fixed-timestep grid, drawn in the terminal")]
pub struct Options {
    /// Canvas width in pixels
    #[arg(long, default_value_t = CANVAS_WIDTH)]
    pub width: PixelInt,

    /// Canvas height in pixels
    #[arg(long, default_value_t = CANVAS_HEIGHT)]
    pub height: PixelInt,

    /// Size of one grid cell in pixels
    #[arg(long, default_value_t = CELL_WIDTH)]
    pub cell_width: PixelInt,

    /// Initial snake length
    #[arg(long, default_value_t = SNAKE_LENGTH)]
    pub snake_length: usize,

    /// Tick interval in milliseconds
    #[arg(long, default_value_t = TICK_INTERVAL_MS)]
    pub interval: u64,

    /// Cell fill colour
    #[arg(long, default_value = FILL_COLOR)]
    pub fill: String,

    /// Cell stroke colour
    #[arg(long, default_value = STROKE_COLOR)]
    pub stroke: String,

    /// Seed for food placement
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub width: PixelInt,
    pub height: PixelInt,
    pub cell_width: PixelInt,
    pub snake_length: usize,
    pub interval: Duration,
    pub fill: Color,
    pub stroke: Color,
    pub seed: Option<u64>,
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn from_options(opts: Options) -> Result<Self> {
        ensure!(opts.cell_width > 0, "--cell-width must be positive, got {}", opts.cell_width);
        ensure!(
            opts.width > 0 && opts.width % opts.cell_width == 0,
            "--width {} must be a positive multiple of the cell width {}",
            opts.width, opts.cell_width
        );
        ensure!(
            opts.height > 0 && opts.height % opts.cell_width == 0,
            "--height {} must be a positive multiple of the cell width {}",
            opts.height, opts.cell_width
        );

        let grid_width = (opts.width / opts.cell_width) as usize;
        ensure!(
            opts.snake_length >= 1 && opts.snake_length <= grid_width,
            "--snake-length must be between 1 and the grid width {}, got {}",
            grid_width, opts.snake_length
        );
        ensure!(opts.interval > 0, "--interval must be at least 1ms");

        Ok(Config {
            width: opts.width,
            height: opts.height,
            cell_width: opts.cell_width,
            snake_length: opts.snake_length,
            interval: Duration::from_millis(opts.interval),
            fill: parse_color(&opts.fill)?,
            stroke: parse_color(&opts.stroke)?,
            seed: opts.seed,
            log_file: opts.log_file,
        })
    }

    pub fn grid_size(&self) -> (GridInt, GridInt) {
        (self.width / self.cell_width, self.height / self.cell_width)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
            cell_width: CELL_WIDTH,
            snake_length: SNAKE_LENGTH,
            interval: Duration::from_millis(TICK_INTERVAL_MS),
            fill: Color::Blue,
            stroke: Color::White,
            seed: None,
            log_file: None,
        }
    }
}

/// Named terminal colours, case-insensitive.
pub fn parse_color(name: &str) -> Result<Color> {
    let color = match name.to_ascii_lowercase().as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "dark_red" => Color::DarkRed,
        "green" => Color::Green,
        "dark_green" => Color::DarkGreen,
        "yellow" => Color::Yellow,
        "dark_yellow" => Color::DarkYellow,
        "blue" => Color::Blue,
        "dark_blue" => Color::DarkBlue,
        "magenta" => Color::Magenta,
        "dark_magenta" => Color::DarkMagenta,
        "cyan" => Color::Cyan,
        "dark_cyan" => Color::DarkCyan,
        "white" => Color::White,
        "grey" | "gray" => Color::Grey,
        "dark_grey" | "dark_gray" => Color::DarkGrey,
        other => bail!("unknown colour '{}'", other),
    };

    Ok(color)
}
