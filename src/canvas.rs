//! Hard-edged 2D primitives painted onto an RGBA buffer
//!
//! A pixel belongs to a shape when its centre lies inside it. Painting
//! replaces the pixel outright; there is no blending and no anti-aliasing.
//! Smooth edges come from rendering on a larger canvas and downscaling.

use image::{Rgba, RgbaImage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Inclusive pixel box: both `right` and `bottom` are covered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl PixelRect {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Continuous extent of the box as `(left, top, right, bottom)`
    fn extent(&self) -> (f64, f64, f64, f64) {
        (
            self.left as f64,
            self.top as f64,
            self.right as f64 + 1.0,
            self.bottom as f64 + 1.0,
        )
    }
}

pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    /// Fully transparent square canvas
    pub fn new(size: u32) -> Self {
        Self {
            image: RgbaImage::from_pixel(size, size, Rgba([0, 0, 0, 0])),
        }
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    pub fn fill_rounded_rect(&mut self, rect: PixelRect, radius: i32, color: Rgba<u8>) {
        let (l, t, r, b) = rect.extent();
        let radius = radius as f64;
        self.paint(rect, color, |x, y| in_rounded_rect(x, y, (l, t, r, b), radius));
    }

    /// Outline of a rounded rectangle, `width` pixels thick, drawn inward
    pub fn stroke_rounded_rect(
        &mut self,
        rect: PixelRect,
        radius: i32,
        width: i32,
        color: Rgba<u8>,
    ) {
        let (l, t, r, b) = rect.extent();
        let w = width as f64;
        let outer_radius = radius as f64;
        let inner = (l + w, t + w, r - w, b - w);
        let inner_radius = (outer_radius - w).max(0.0);
        let hollow = inner.0 < inner.2 && inner.1 < inner.3;

        self.paint(rect, color, |x, y| {
            in_rounded_rect(x, y, (l, t, r, b), outer_radius)
                && !(hollow && in_rounded_rect(x, y, inner, inner_radius))
        });
    }

    /// Elliptical arc inscribed in `rect`, `width` pixels thick, drawn inward
    ///
    /// Angles are degrees clockwise from 3 o'clock; the range is inclusive and
    /// wraps past 360 when `end < start`.
    pub fn stroke_arc(
        &mut self,
        rect: PixelRect,
        start: f64,
        end: f64,
        width: i32,
        color: Rgba<u8>,
    ) {
        let (l, t, r, b) = rect.extent();
        let (cx, cy) = ((l + r) / 2.0, (t + b) / 2.0);
        let (rx, ry) = ((r - l) / 2.0, (b - t) / 2.0);
        if rx <= 0.0 || ry <= 0.0 {
            return;
        }
        let w = width as f64;
        let (inner_rx, inner_ry) = (rx - w, ry - w);
        let full_turn = end - start >= 360.0;
        let span = (end - start).rem_euclid(360.0);

        self.paint(rect, color, |x, y| {
            let (dx, dy) = (x - cx, y - cy);
            if (dx / rx).powi(2) + (dy / ry).powi(2) > 1.0 {
                return false;
            }
            if inner_rx > 0.0
                && inner_ry > 0.0
                && (dx / inner_rx).powi(2) + (dy / inner_ry).powi(2) < 1.0
            {
                return false;
            }
            if full_turn {
                return true;
            }
            let angle = dy.atan2(dx).to_degrees();
            (angle - start).rem_euclid(360.0) <= span
        });
    }

    /// Straight segment with butt caps covering both endpoint pixels
    pub fn line(&mut self, from: Point, to: Point, width: i32, color: Rgba<u8>) {
        let w = width.max(1) as f64;
        let (ax, ay) = (from.x as f64 + 0.5, from.y as f64 + 0.5);
        let (dx, dy) = ((to.x - from.x) as f64, (to.y - from.y) as f64);
        let length = (dx * dx + dy * dy).sqrt();
        // Unit direction; a zero-length segment paints a square dot
        let (ux, uy) = if length > 0.0 {
            (dx / length, dy / length)
        } else {
            (1.0, 0.0)
        };

        let pad = width.max(1);
        let bounds = PixelRect::new(
            from.x.min(to.x) - pad,
            from.y.min(to.y) - pad,
            from.x.max(to.x) + pad,
            from.y.max(to.y) + pad,
        );
        self.paint(bounds, color, |x, y| {
            let (px, py) = (x - ax, y - ay);
            let along = px * ux + py * uy;
            let across = px * uy - py * ux;
            (-0.5..length + 0.5).contains(&along) && (-w / 2.0..w / 2.0).contains(&across)
        });
    }

    /// Paint every pixel of the inclusive box whose centre satisfies `inside`
    fn paint<F>(&mut self, bounds: PixelRect, color: Rgba<u8>, inside: F)
    where
        F: Fn(f64, f64) -> bool,
    {
        let max_x = self.image.width() as i32 - 1;
        let max_y = self.image.height() as i32 - 1;

        for y in bounds.top.max(0)..=bounds.bottom.min(max_y) {
            for x in bounds.left.max(0)..=bounds.right.min(max_x) {
                if inside(x as f64 + 0.5, y as f64 + 0.5) {
                    self.image.put_pixel(x as u32, y as u32, color);
                }
            }
        }
    }
}

/// Whether `(x, y)` lies in the rectangle `(l, t, r, b)` with corner `radius`
fn in_rounded_rect(x: f64, y: f64, (l, t, r, b): (f64, f64, f64, f64), radius: f64) -> bool {
    if x < l || x > r || y < t || y > b {
        return false;
    }
    let radius = radius.min((r - l) / 2.0).min((b - t) / 2.0).max(0.0);
    let nearest_x = x.clamp(l + radius, r - radius);
    let nearest_y = y.clamp(t + radius, b - radius);
    let (dx, dy) = (x - nearest_x, y - nearest_y);

    dx * dx + dy * dy <= radius * radius
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

    fn painted(canvas: &Canvas) -> usize {
        canvas.image.pixels().filter(|p| p[3] != 0).count()
    }

    #[test]
    fn test_new_canvas_is_transparent() {
        let canvas = Canvas::new(8);
        assert_eq!(painted(&canvas), 0);
    }

    #[test]
    fn test_square_corners_fill_everything() {
        let mut canvas = Canvas::new(10);
        canvas.fill_rounded_rect(PixelRect::new(0, 0, 9, 9), 0, WHITE);
        assert_eq!(painted(&canvas), 100);
    }

    #[test]
    fn test_rounded_corners_stay_clear() {
        let mut canvas = Canvas::new(20);
        canvas.fill_rounded_rect(PixelRect::new(0, 0, 19, 19), 5, WHITE);
        let image = canvas.into_image();

        for (x, y) in [(0, 0), (19, 0), (0, 19), (19, 19)] {
            assert_eq!(*image.get_pixel(x, y), CLEAR, "corner ({x}, {y})");
        }
        assert_eq!(*image.get_pixel(10, 0), WHITE);
        assert_eq!(*image.get_pixel(0, 10), WHITE);
        assert_eq!(*image.get_pixel(10, 10), WHITE);
    }

    #[test]
    fn test_stroked_rect_is_hollow() {
        let mut canvas = Canvas::new(20);
        canvas.stroke_rounded_rect(PixelRect::new(2, 2, 17, 17), 0, 2, WHITE);
        let image = canvas.into_image();

        assert_eq!(*image.get_pixel(2, 10), WHITE);
        assert_eq!(*image.get_pixel(3, 10), WHITE);
        assert_eq!(*image.get_pixel(4, 10), CLEAR);
        assert_eq!(*image.get_pixel(10, 10), CLEAR);
        assert_eq!(*image.get_pixel(1, 10), CLEAR);
    }

    #[test]
    fn test_thick_stroke_fills_narrow_rect() {
        let mut canvas = Canvas::new(10);
        canvas.stroke_rounded_rect(PixelRect::new(4, 0, 5, 9), 1, 3, WHITE);
        let image = canvas.into_image();
        assert_eq!(*image.get_pixel(4, 5), WHITE);
        assert_eq!(*image.get_pixel(5, 5), WHITE);
    }

    #[test]
    fn test_lower_half_arc() {
        let mut canvas = Canvas::new(20);
        canvas.stroke_arc(PixelRect::new(0, 0, 19, 19), 0.0, 180.0, 2, WHITE);
        let image = canvas.into_image();

        // Bottom of the ring is painted, top is not
        assert_eq!(*image.get_pixel(10, 19), WHITE);
        assert_eq!(*image.get_pixel(10, 0), CLEAR);
        // Interior stays clear
        assert_eq!(*image.get_pixel(10, 15), CLEAR);
    }

    #[test]
    fn test_arc_range_wraps() {
        let mut canvas = Canvas::new(20);
        canvas.stroke_arc(PixelRect::new(0, 0, 19, 19), 180.0, 0.0, 2, WHITE);
        let image = canvas.into_image();

        assert_eq!(*image.get_pixel(10, 0), WHITE);
        assert_eq!(*image.get_pixel(10, 19), CLEAR);
    }

    #[test]
    fn test_vertical_line_has_exact_width() {
        let mut canvas = Canvas::new(20);
        canvas.line(Point::new(10, 5), Point::new(10, 14), 2, WHITE);
        let image = canvas.into_image();

        assert_eq!(*image.get_pixel(9, 5), WHITE);
        assert_eq!(*image.get_pixel(10, 14), WHITE);
        assert_eq!(*image.get_pixel(11, 10), CLEAR);
        assert_eq!(*image.get_pixel(8, 10), CLEAR);
        assert_eq!(*image.get_pixel(10, 4), CLEAR);
        assert_eq!(*image.get_pixel(10, 15), CLEAR);

        let count = image.pixels().filter(|p| p[3] != 0).count();
        assert_eq!(count, 20);
    }

    #[test]
    fn test_zero_length_line_paints_dot() {
        let mut canvas = Canvas::new(10);
        canvas.line(Point::new(4, 4), Point::new(4, 4), 1, WHITE);
        assert_eq!(painted(&canvas), 1);
    }

    #[test]
    fn test_painting_is_clipped_to_canvas() {
        let mut canvas = Canvas::new(10);
        canvas.line(Point::new(-5, 5), Point::new(20, 5), 1, WHITE);
        assert_eq!(painted(&canvas), 10);
    }
}
