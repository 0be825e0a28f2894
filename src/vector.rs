//! Microphone icon as an SVG document, rasterized with resvg

use crate::glyph::{BACKGROUND, FOREGROUND};
use anyhow::{anyhow, Result};
use image::{Rgba, RgbaImage};
use resvg::{tiny_skia, usvg};

/// Build the icon SVG with its intrinsic size set to `size` pixels
pub fn svg_document(size: u32) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 24 24" fill="none" stroke="{FOREGROUND}" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">
  <rect x="0" y="0" width="24" height="24" fill="{BACKGROUND}" rx="4"/>
  <g transform="translate(0, 0)">
    <path d="M12 2a3 3 0 0 0-3 3v7a3 3 0 0 0 6 0V5a3 3 0 0 0-3-3Z"/>
    <path d="M19 10v2a7 7 0 0 1-14 0v-2"/>
    <line x1="12" x2="12" y1="19" y2="22"/>
  </g>
</svg>"#
    )
}

/// Rasterize the SVG icon into a `size` x `size` straight-alpha image
pub fn render(size: u32) -> Result<RgbaImage> {
    let document = svg_document(size);
    let tree = usvg::Tree::from_data(document.as_bytes(), &usvg::Options::default())
        .map_err(|e| anyhow!("Failed to parse icon SVG: {e}"))?;

    let intrinsic = tree.size();
    let transform = tiny_skia::Transform::from_scale(
        size as f32 / intrinsic.width(),
        size as f32 / intrinsic.height(),
    );

    let mut pixmap = tiny_skia::Pixmap::new(size, size)
        .ok_or_else(|| anyhow!("Failed to allocate {size}x{size} pixmap"))?;
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    // tiny-skia stores premultiplied alpha
    let mut image = RgbaImage::new(size, size);
    for (pixel, color) in image.pixels_mut().zip(pixmap.pixels()) {
        let color = color.demultiply();
        *pixel = Rgba([color.red(), color.green(), color.blue(), color.alpha()]);
    }

    Ok(image)
}
