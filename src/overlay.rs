//! Annotated radiograph rendering.
//!
//! Every midline is drawn thin; the two vertebrae bounding each angle are
//! redrawn thick in the colour of that angle.
use crate::io::ensure_parent_dir;
use crate::midline::Midline;
use crate::result::{AngleKind, CobbResult};
use image::{DynamicImage, Rgb, RgbImage};
use std::path::Path;

const MIDLINE_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
const MIDLINE_THICKNESS: u32 = 2;
const BOUND_THICKNESS: u32 = 5;

pub fn angle_color(kind: AngleKind) -> Rgb<u8> {
    match kind {
        AngleKind::Primary => Rgb([0, 255, 255]),
        AngleKind::Thoracolumbar => Rgb([255, 0, 255]),
        AngleKind::MainThoracic => Rgb([0, 0, 255]),
    }
}

pub fn render_overlay(image: &DynamicImage, result: &CobbResult) -> RgbImage {
    let mut canvas = image.to_rgb8();
    for line in &result.midlines {
        draw_midline(&mut canvas, line, MIDLINE_COLOR, MIDLINE_THICKNESS);
    }
    // later kinds paint over earlier ones where bounds coincide
    for kind in [
        AngleKind::Primary,
        AngleKind::Thoracolumbar,
        AngleKind::MainThoracic,
    ] {
        let record = result.record(kind);
        for idx in [record.top_index, record.bottom_index] {
            if let Some(line) = result.midlines.get(idx) {
                draw_midline(&mut canvas, line, angle_color(kind), BOUND_THICKNESS);
            }
        }
    }
    canvas
}

pub fn save_overlay(
    image: &DynamicImage,
    result: &CobbResult,
    path: &Path,
) -> Result<(), String> {
    ensure_parent_dir(path)?;
    render_overlay(image, result)
        .save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

fn draw_midline(canvas: &mut RgbImage, line: &Midline, color: Rgb<u8>, thickness: u32) {
    let [a, b] = line.pixel_endpoints();
    draw_thick_line(canvas, a, b, color, thickness);
}

/// Stamps a square brush of side `thickness` along the segment `a`–`b`,
/// clipping to the canvas.
pub fn draw_thick_line(
    canvas: &mut RgbImage,
    a: [i64; 2],
    b: [i64; 2],
    color: Rgb<u8>,
    thickness: u32,
) {
    let (w, h) = (canvas.width() as i64, canvas.height() as i64);
    let dx = b[0] - a[0];
    let dy = b[1] - a[1];
    let steps = dx.abs().max(dy.abs()).max(1);
    let half = thickness as i64 / 2;
    let span = thickness.max(1) as i64;
    for s in 0..=steps {
        let cx = a[0] + (dx * s) / steps;
        let cy = a[1] + (dy * s) / steps;
        for oy in 0..span {
            for ox in 0..span {
                let x = cx - half + ox;
                let y = cy - half + oy;
                if (0..w).contains(&x) && (0..h).contains(&y) {
                    canvas.put_pixel(x as u32, y as u32, color);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_is_clipped_to_canvas() {
        let mut canvas = RgbImage::new(10, 10);
        draw_thick_line(&mut canvas, [-5, 5], [20, 5], Rgb([1, 2, 3]), 1);
        for x in 0..10 {
            assert_eq!(*canvas.get_pixel(x, 5), Rgb([1, 2, 3]));
        }
        assert_eq!(*canvas.get_pixel(0, 4), Rgb([0, 0, 0]));
    }

    #[test]
    fn thickness_widens_the_stroke() {
        let mut canvas = RgbImage::new(20, 20);
        draw_thick_line(&mut canvas, [2, 10], [17, 10], Rgb([9, 9, 9]), 5);
        for y in 8..=12 {
            assert_eq!(*canvas.get_pixel(10, y), Rgb([9, 9, 9]));
        }
        assert_eq!(*canvas.get_pixel(10, 13), Rgb([0, 0, 0]));
    }
}
