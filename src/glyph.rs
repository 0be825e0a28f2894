//! Microphone glyph description on the 24-unit design grid
//!
//! A [`Glyph`] holds the geometry of the microphone in design units. Calling
//! [`Glyph::layout`] snaps that geometry onto a concrete pixel canvas, which is
//! what the primitive painter consumes. Every coordinate is truncated toward
//! zero after scaling so that the same canvas size always yields the same
//! pixel boxes.

use crate::canvas::{PixelRect, Point};
use anyhow::{anyhow, Result};
use image::Rgba;
use std::str::FromStr;

/// Side length of the design grid, in units
pub const DESIGN_GRID: f64 = 24.0;

/// Background fill of the rounded square (CSS color)
pub const BACKGROUND: &str = "#1a1a1a";

/// Stroke color of the microphone (CSS color)
pub const FOREGROUND: &str = "#ffffff";

/// Parse a CSS color string into an opaque RGBA pixel
pub fn parse_color(css: &str) -> Result<Rgba<u8>> {
    let color = css_color::Srgb::from_str(css).map_err(|_| anyhow!("Invalid CSS color: {css}"))?;

    Ok(Rgba([
        (color.red * 255.).round() as u8,
        (color.green * 255.).round() as u8,
        (color.blue * 255.).round() as u8,
        255,
    ]))
}

/// The microphone body: a vertical capsule centred on `center_x`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Capsule {
    pub center_x: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// The U-shaped stand under the capsule
///
/// Angles are in degrees, measured clockwise from 3 o'clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StandArc {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub start: f64,
    pub end: f64,
}

/// Vertical stem joining the stand to the floor, on the capsule axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stem {
    pub top: f64,
    pub bottom: f64,
}

/// Horizontal grille bars drawn inside the capsule
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grille {
    pub count: u32,
    pub spacing: f64,
    pub width: f64,
}

/// Complete microphone description in design units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glyph {
    /// Radius of the background corners
    pub corner_radius: f64,
    pub body: Capsule,
    pub stand: StandArc,
    pub stem: Stem,
    /// Width of the foot drawn at the bottom of the stem, if any
    pub base_width: Option<f64>,
    pub grille: Option<Grille>,
    /// Stroke width in design units
    pub stroke: f64,
    /// Lower bound for the stroke once converted to pixels
    pub min_stroke: i32,
    /// Factor the canvas is enlarged by before being downscaled to the target
    pub supersample: u32,
}

impl Glyph {
    /// Hard-edged microphone drawn straight at the target size
    pub const SIMPLE: Glyph = Glyph {
        corner_radius: 4.0,
        body: Capsule {
            center_x: 12.0,
            top: 2.0,
            width: 6.0,
            height: 10.0,
        },
        stand: StandArc {
            left: 5.0,
            top: 10.0,
            right: 19.0,
            bottom: 17.0,
            start: 0.0,
            end: 180.0,
        },
        stem: Stem {
            top: 19.0,
            bottom: 22.0,
        },
        base_width: None,
        grille: None,
        stroke: 2.0,
        min_stroke: 1,
        supersample: 1,
    };

    /// Smoother microphone with grille and foot, drawn at 4x and downscaled
    pub const ROUNDED: Glyph = Glyph {
        corner_radius: 4.0,
        body: Capsule {
            center_x: 12.0,
            top: 3.0,
            width: 5.0,
            height: 9.0,
        },
        stand: StandArc {
            left: 6.0,
            top: 10.0,
            right: 18.0,
            bottom: 16.0,
            start: 20.0,
            end: 160.0,
        },
        stem: Stem {
            top: 16.0,
            bottom: 21.0,
        },
        base_width: Some(4.0),
        grille: Some(Grille {
            count: 3,
            spacing: 1.5,
            width: 0.5,
        }),
        stroke: 2.5,
        min_stroke: 2,
        supersample: 4,
    };

    /// Background corner radius in pixels for a canvas of `canvas` pixels
    pub fn corner_radius_px(&self, canvas: u32) -> i32 {
        px(self.corner_radius, scale_for(canvas))
    }

    /// Resolve the glyph into pixel geometry for a square canvas
    ///
    /// # Arguments
    /// * `canvas` - Side length of the canvas the glyph is painted on
    ///
    /// # Returns
    /// The pixel boxes, points and widths for every primitive
    pub fn layout(&self, canvas: u32) -> Layout {
        let scale = scale_for(canvas);
        let last = canvas as i32 - 1;
        let stroke = px(self.stroke, scale).max(self.min_stroke);

        let center_x = px(self.body.center_x, scale);
        let body_top = px(self.body.top, scale);
        let body_width = px(self.body.width, scale);
        let body_height = px(self.body.height, scale);
        let body = PixelRect::new(
            center_x - body_width / 2,
            body_top,
            center_x + body_width / 2,
            body_top + body_height,
        );
        let body_radius = body_width / 2;

        let mut grille = Vec::new();
        if let Some(bars) = self.grille {
            let first = body.top + body_height / 3;
            let step = px(bars.spacing, scale);
            let width = px(bars.width, scale).max(1);
            for i in 0..bars.count as i32 {
                let y = first + i * step;
                // Bars stop short of the rounded lower end
                if y < body.bottom - body_radius {
                    grille.push(Bar {
                        from: Point::new(body.left + stroke, y),
                        to: Point::new(body.right - stroke, y),
                        width,
                    });
                }
            }
        }

        let stand = PixelRect::new(
            px(self.stand.left, scale),
            px(self.stand.top, scale),
            px(self.stand.right, scale),
            px(self.stand.bottom, scale),
        );

        let stem = Bar {
            from: Point::new(center_x, px(self.stem.top, scale)),
            to: Point::new(center_x, px(self.stem.bottom, scale)),
            width: stroke,
        };

        let base = self.base_width.map(|width| {
            let half = px(width, scale) / 2;
            let y = px(self.stem.bottom, scale);
            Bar {
                from: Point::new(center_x - half, y),
                to: Point::new(center_x + half, y),
                width: stroke,
            }
        });

        Layout {
            background: PixelRect::new(0, 0, last, last),
            corner_radius: self.corner_radius_px(canvas),
            stroke,
            body,
            body_radius,
            grille,
            stand,
            stand_start: self.stand.start,
            stand_end: self.stand.end,
            stem,
            base,
        }
    }
}

/// A straight stroked segment in pixel space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bar {
    pub from: Point,
    pub to: Point,
    pub width: i32,
}

/// Pixel geometry of a [`Glyph`] on a given canvas
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub background: PixelRect,
    pub corner_radius: i32,
    pub stroke: i32,
    pub body: PixelRect,
    pub body_radius: i32,
    pub grille: Vec<Bar>,
    pub stand: PixelRect,
    pub stand_start: f64,
    pub stand_end: f64,
    pub stem: Bar,
    pub base: Option<Bar>,
}

fn scale_for(canvas: u32) -> f64 {
    canvas as f64 / DESIGN_GRID
}

/// Convert design units to whole pixels, truncating toward zero
fn px(units: f64, scale: f64) -> i32 {
    (units * scale) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_parses() {
        assert_eq!(parse_color(BACKGROUND).unwrap(), Rgba([26, 26, 26, 255]));
        assert_eq!(parse_color(FOREGROUND).unwrap(), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_invalid_color_is_rejected() {
        assert!(parse_color("not-a-color").is_err());
    }

    #[test]
    fn test_corner_radius_scales_linearly() {
        let glyph = Glyph::SIMPLE;
        assert_eq!(glyph.corner_radius_px(24), 4);
        assert_eq!(glyph.corner_radius_px(48), 8);
        assert_eq!(glyph.corner_radius_px(96), 16);
        assert_eq!(glyph.corner_radius_px(240), 40);
    }

    #[test]
    fn test_simple_layout_at_48() {
        let layout = Glyph::SIMPLE.layout(48);

        assert_eq!(layout.background, PixelRect::new(0, 0, 47, 47));
        assert_eq!(layout.corner_radius, 8);
        assert_eq!(layout.stroke, 4);
        assert_eq!(layout.body, PixelRect::new(18, 4, 30, 24));
        assert_eq!(layout.body_radius, 6);
        assert_eq!(layout.stand, PixelRect::new(10, 20, 38, 34));
        assert_eq!(layout.stem.from, Point::new(24, 38));
        assert_eq!(layout.stem.to, Point::new(24, 44));
        assert!(layout.grille.is_empty());
        assert!(layout.base.is_none());
    }

    #[test]
    fn test_simple_stroke_never_below_one_pixel() {
        let layout = Glyph::SIMPLE.layout(8);
        assert_eq!(layout.stroke, 1);
    }

    #[test]
    fn test_rounded_layout_has_grille_and_base() {
        // 60px target, drawn on the 4x canvas
        let layout = Glyph::ROUNDED.layout(240);

        assert_eq!(layout.stroke, 25);
        assert_eq!(layout.body, PixelRect::new(95, 30, 145, 120));
        assert_eq!(layout.body_radius, 25);
        assert_eq!(layout.stand, PixelRect::new(60, 100, 180, 160));

        let rows: Vec<i32> = layout.grille.iter().map(|bar| bar.from.y).collect();
        assert_eq!(rows, vec![60, 75, 90]);
        for bar in &layout.grille {
            assert_eq!(bar.from.x, layout.body.left + layout.stroke);
            assert_eq!(bar.to.x, layout.body.right - layout.stroke);
            assert_eq!(bar.width, 5);
        }

        let base = layout.base.expect("rounded glyph has a base");
        assert_eq!(base.from, Point::new(100, 210));
        assert_eq!(base.to, Point::new(140, 210));
        assert_eq!(base.from.y, layout.stem.to.y);
    }
}
