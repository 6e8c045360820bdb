// this_file: crates/uitext-cli/src/cli.rs

//! Argument definitions

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use uitext::{Color, FaceStyle};

/// uitext - render UI text lines and inspect font resolution
#[derive(Parser, Debug)]
#[command(name = "uitext")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Extra font directory to index (repeatable)
    #[arg(long = "font-dir", global = true, action = ArgAction::Append)]
    pub font_dirs: Vec<PathBuf>,

    /// Only index fonts from --font-dir
    #[arg(long, global = true)]
    pub no_system_fonts: bool,

    /// Log resolution and loading decisions
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render one line of text to a PNG file
    #[command(alias = "r")]
    Render(RenderArgs),

    /// Resolve a family name to a font file
    Family(FamilyArgs),

    /// Find a font that covers a character
    Fallback(FallbackArgs),

    /// Print metadata of a font file
    Face(FaceArgs),

    /// List installed font families
    #[command(alias = "ls")]
    List,
}

/// Bold and italic switches shared by lookups
#[derive(Args, Debug, Clone, Copy)]
pub struct StyleArgs {
    #[arg(long)]
    pub bold: bool,

    #[arg(long)]
    pub italic: bool,
}

impl StyleArgs {
    pub fn face_style(self) -> FaceStyle {
        FaceStyle::new(self.bold, self.italic)
    }
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Text to render, a single line
    pub text: String,

    /// Output PNG path
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,

    /// Font size in pixels
    #[arg(short = 's', long = "size", default_value = "16")]
    pub size: u32,

    /// Canvas width in pixels
    #[arg(short = 'W', long = "width", default_value = "400")]
    pub width: usize,

    /// Canvas height in pixels
    #[arg(short = 'H', long = "height", default_value = "32")]
    pub height: usize,

    /// Text color (#RRGGBB or #AARRGGBB)
    #[arg(long = "fg", default_value = "#ffffff")]
    pub fg: Color,

    /// Background color (#RRGGBB or #AARRGGBB)
    #[arg(long = "bg", default_value = "#000000")]
    pub bg: Color,

    /// Pen start in pixels from the left edge
    #[arg(long = "x-offset", default_value = "0", allow_negative_numbers = true)]
    pub x_offset: f32,

    /// Baseline shift in pixels, positive moves down
    #[arg(long = "y-offset", default_value = "0", allow_negative_numbers = true)]
    pub y_offset: f32,

    /// Main face family (default: monospace)
    #[arg(short = 'f', long = "family")]
    pub family: Option<String>,

    #[command(flatten)]
    pub style: StyleArgs,
}

#[derive(Args, Debug)]
pub struct FamilyArgs {
    /// Family name or generic (monospace, sans-serif, serif, ...)
    pub name: String,

    #[command(flatten)]
    pub style: StyleArgs,

    /// Print the descriptor as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct FallbackArgs {
    /// The character itself or a code point such as U+1F600
    pub character: String,

    /// Family to prefer among the candidates
    #[arg(short = 'f', long = "family")]
    pub family: Option<String>,

    #[command(flatten)]
    pub style: StyleArgs,

    /// Prefer color (emoji) faces
    #[arg(long)]
    pub color: bool,

    /// Print the descriptor as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct FaceArgs {
    /// Font file (.ttf, .otf, .ttc, .otc)
    pub path: PathBuf,

    /// Face index inside a collection
    #[arg(short = 'y', long = "index", default_value = "0")]
    pub index: u32,

    /// Print the metadata as JSON
    #[arg(long)]
    pub json: bool,
}
