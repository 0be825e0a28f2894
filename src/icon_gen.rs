use crate::raster::{self, Style};
use anyhow::{bail, Context, Result};
use image::{
    codecs::{
        ico::{IcoEncoder, IcoFrame},
        png::{CompressionType, FilterType as PngFilterType, PngEncoder},
    },
    ColorType, DynamicImage, ImageEncoder, RgbaImage,
};
use serde::Deserialize;
use std::{
    collections::HashMap,
    fs::{create_dir_all, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

#[derive(Debug)]
pub struct Args {
    pub output: PathBuf,
    pub style: Style,
    pub png: Option<Vec<u32>>,
}

/// Which files a style writes
#[derive(Debug, Deserialize)]
struct OutputPlan {
    png_sizes: Vec<u32>,
    png_prefix: String,
    main_png: String,
    main_size: u32,
    #[serde(default)]
    ico_sizes: Vec<u32>,
}

const OUTPUT_PLANS: &str = r#"
{
  "vector": {
    "png_sizes": [16, 32, 48, 64, 128, 256],
    "png_prefix": "icon",
    "main_png": "icon.png",
    "main_size": 256,
    "ico_sizes": [16, 32, 48, 64, 128, 256]
  },
  "simple": {
    "png_sizes": [16, 32, 48, 64, 128, 256],
    "png_prefix": "icon",
    "main_png": "icon.png",
    "main_size": 256,
    "ico_sizes": [16, 32, 48, 256]
  },
  "rounded": {
    "png_sizes": [64, 128, 256],
    "png_prefix": "icon_rounded",
    "main_png": "icon_ui.png",
    "main_size": 256
  }
}
"#;

pub fn generate_icons(args: Args) -> Result<()> {
    let mut plan = load_plan(args.style)?;

    if let Some(sizes) = args.png {
        if sizes.contains(&0) {
            bail!("PNG sizes must be positive");
        }
        plan.png_sizes = sizes;
    }

    // Ensure the output directory exists
    create_dir_all(&args.output).context("Can't create output directory")?;

    log::info!(
        "Rendering {} icons into {}",
        args.style.name(),
        args.output.display()
    );

    generate_pngs(args.style, &plan, &args.output)?;

    if !plan.ico_sizes.is_empty() {
        generate_ico(args.style, &plan.ico_sizes, &args.output)?;
    }

    println!("\nAll icons generated in: {}", args.output.display());
    Ok(())
}

fn load_plan(style: Style) -> Result<OutputPlan> {
    let mut plans: HashMap<String, OutputPlan> =
        serde_json::from_str(OUTPUT_PLANS).context("Invalid output plan table")?;

    plans
        .remove(style.name())
        .with_context(|| format!("No output plan for style {}", style.name()))
}

fn generate_pngs(style: Style, plan: &OutputPlan, out_dir: &Path) -> Result<()> {
    println!("Generating {} PNG icons...", style.name());
    for &size in &plan.png_sizes {
        let filename = format!("{}_{size}.png", plan.png_prefix);
        let image = raster::render(style, size)?;
        save_png(image, &out_dir.join(&filename))?;
        println!("  ✓ Generated {filename}");
    }

    let image = raster::render(style, plan.main_size)?;
    save_png(image, &out_dir.join(&plan.main_png))?;
    println!(
        "  ✓ Generated {} ({size}x{size})",
        plan.main_png,
        size = plan.main_size
    );
    Ok(())
}

fn generate_ico(style: Style, sizes: &[u32], out_dir: &Path) -> Result<()> {
    println!("Generating app.ico...");

    let mut sizes = sizes.to_vec();
    sizes.sort_unstable();
    sizes.dedup();

    let mut frames = Vec::new();
    for size in sizes {
        if size > 256 {
            bail!("ICO frames cannot exceed 256x256, got {size}");
        }
        let rgba_image = raster::render(style, size)?;
        log::debug!("Encoding {size}x{size} ICO frame");

        // Only the 256px layer can be compressed according to the ico specs
        if size == 256 {
            let mut buf = Vec::new();
            write_png(&rgba_image, &mut buf)?;
            frames.push(IcoFrame::with_encoded(buf, size, size, ColorType::Rgba8)?);
        } else {
            frames.push(IcoFrame::as_png(
                rgba_image.as_raw(),
                size,
                size,
                ColorType::Rgba8,
            )?);
        }
    }

    let mut out_file = BufWriter::new(
        File::create(out_dir.join("app.ico")).context("Failed to create app.ico")?,
    );
    let encoder = IcoEncoder::new(&mut out_file);
    encoder.encode_images(&frames)?;
    out_file.flush()?;

    println!("✓ Generated app.ico");
    Ok(())
}

fn save_png(image: RgbaImage, path: &Path) -> Result<()> {
    let mut file = File::create(path)
        .with_context(|| format!("Failed to create PNG file {}", path.display()))?;
    DynamicImage::ImageRgba8(image)
        .write_to(&mut file, image::ImageOutputFormat::Png)
        .context("Failed to write PNG")?;
    Ok(())
}

// Encode image data as PNG with compression
fn write_png<W: Write>(image: &RgbaImage, w: W) -> Result<()> {
    let encoder = PngEncoder::new_with_quality(w, CompressionType::Best, PngFilterType::Adaptive);
    encoder.write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        ColorType::Rgba8,
    )?;
    Ok(())
}
