use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

mod canvas;
mod glyph;
mod icon_gen;
mod raster;
mod vector;

use raster::Style;

#[derive(Debug, Parser)]
#[clap(
    name = "mic-icon-gen",
    about = "Draw the microphone app icon and export it as PNG and ICO files"
)]
struct Args {
    /// Rendering style, which also selects the set of files written.
    #[clap(short, long, value_enum, default_value = "vector")]
    style: Style,

    /// Output directory.
    #[clap(short, long, value_name = "DIR", default_value = "./Resources")]
    output: PathBuf,

    /// Custom PNG icon sizes to generate instead of the style's default list.
    #[clap(short, long, value_delimiter = ',', value_name = "SIZES")]
    png: Option<Vec<u32>>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    icon_gen::generate_icons(icon_gen::Args {
        output: args.output,
        style: args.style,
        png: args.png,
    })
}
