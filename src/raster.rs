use crate::canvas::Canvas;
use crate::glyph::{parse_color, Glyph, BACKGROUND, FOREGROUND};
use crate::vector;
use anyhow::{bail, Result};
use clap::ValueEnum;
use image::{imageops::FilterType, ImageBuffer, Rgba, Rgba32FImage, RgbaImage};

/// Largest RGBA buffer a working canvas may occupy, in bytes
const MAX_CANVAS_BYTES: u64 = i32::MAX as u64;

/// How the microphone icon is rasterized
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Style {
    /// SVG document rendered by resvg
    Vector,
    /// Hard-edged primitives drawn at the target size
    Simple,
    /// Primitives drawn at 4x and downscaled with Lanczos3
    Rounded,
}

impl Style {
    pub fn name(self) -> &'static str {
        match self {
            Style::Vector => "vector",
            Style::Simple => "simple",
            Style::Rounded => "rounded",
        }
    }
}

/// Render the microphone icon as a `size` x `size` RGBA image
pub fn render(style: Style, size: u32) -> Result<RgbaImage> {
    if size == 0 {
        bail!("Icon size must be positive");
    }

    let glyph = match style {
        Style::Vector => None,
        Style::Simple => Some(&Glyph::SIMPLE),
        Style::Rounded => Some(&Glyph::ROUNDED),
    };
    let work_size = working_canvas(size, glyph.map_or(1, |glyph| glyph.supersample))?;

    match glyph {
        None => vector::render(size),
        Some(glyph) => render_glyph(glyph, size, work_size),
    }
}

/// Side of the canvas actually drawn on, rejecting buffers too large to allocate
fn working_canvas(size: u32, supersample: u32) -> Result<u32> {
    let side = size as u64 * supersample as u64;
    let bytes = side.checked_mul(side).and_then(|pixels| pixels.checked_mul(4));

    match bytes {
        Some(bytes) if bytes <= MAX_CANVAS_BYTES => Ok(side as u32),
        _ => bail!("Icon size {size} is too large ({side}x{side} working canvas)"),
    }
}

fn render_glyph(glyph: &Glyph, size: u32, work_size: u32) -> Result<RgbaImage> {
    let image = draw_glyph(glyph, work_size)?;
    if work_size == size {
        return Ok(image);
    }

    log::debug!("Downscaling {work_size}px canvas to {size}px");
    Ok(downscale(&image, size))
}

/// Lanczos3 downscale on premultiplied alpha
///
/// Filtering straight RGBA would pull the black of transparent pixels into
/// the colour of the anti-aliased edge.
fn downscale(image: &RgbaImage, size: u32) -> RgbaImage {
    let premultiplied: Rgba32FImage =
        ImageBuffer::from_fn(image.width(), image.height(), |x, y| {
            let [r, g, b, a] = image.get_pixel(x, y).0;
            let alpha = a as f32 / 255.0;
            let channel = |c: u8| c as f32 / 255.0 * alpha;
            Rgba([channel(r), channel(g), channel(b), alpha])
        });

    let resized = image::imageops::resize(&premultiplied, size, size, FilterType::Lanczos3);

    ImageBuffer::from_fn(size, size, |x, y| {
        let [r, g, b, a] = resized.get_pixel(x, y).0;
        let alpha = a.clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return Rgba([0, 0, 0, 0]);
        }
        let channel = |c: f32| ((c / alpha).clamp(0.0, 1.0) * 255.0).round() as u8;
        Rgba([
            channel(r),
            channel(g),
            channel(b),
            (alpha * 255.0).round() as u8,
        ])
    })
}

fn draw_glyph(glyph: &Glyph, canvas_size: u32) -> Result<RgbaImage> {
    let background = parse_color(BACKGROUND)?;
    let foreground = parse_color(FOREGROUND)?;
    let layout = glyph.layout(canvas_size);
    log::debug!("Glyph layout for {canvas_size}px canvas: {layout:?}");

    let mut canvas = Canvas::new(canvas_size);
    canvas.fill_rounded_rect(layout.background, layout.corner_radius, background);
    canvas.stroke_rounded_rect(layout.body, layout.body_radius, layout.stroke, foreground);
    for bar in &layout.grille {
        canvas.line(bar.from, bar.to, bar.width, foreground);
    }
    canvas.stroke_arc(
        layout.stand,
        layout.stand_start,
        layout.stand_end,
        layout.stroke,
        foreground,
    );
    canvas.line(layout.stem.from, layout.stem.to, layout.stem.width, foreground);
    if let Some(base) = layout.base {
        canvas.line(base.from, base.to, base.width, foreground);
    }

    Ok(canvas.into_image())
}
