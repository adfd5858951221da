//! Region overlay rendering for configuration-time visualization.
//!
//! Draws, for every enabled region, its boundary rectangle, a translucent
//! fill, and optionally a label with the region name and pixel dimensions.
//! Used interactively only; not on the batch hot path.

use image::{DynamicImage, Rgba, RgbaImage};

use crate::domain::RegionConfiguration;

/// Fill opacity out of 255.
const FILL_ALPHA: f32 = 40.0 / 255.0;
/// Boundary stroke width in pixels.
const STROKE: u32 = 2;

/// Renders region overlays onto a copy of the raster.
#[must_use]
pub fn render_preview(
    image: &DynamicImage,
    configuration: &RegionConfiguration,
    show_labels: bool,
) -> DynamicImage {
    let mut canvas = image.to_rgba8();

    for region in configuration.enabled_regions() {
        let Some((x0, y0, x1, y1)) = clamp_rect(
            region.x,
            region.y,
            region.width,
            region.height,
            canvas.width(),
            canvas.height(),
        ) else {
            continue;
        };
        let color = parse_hex_color(&region.preview_color).unwrap_or([255, 87, 34]);

        fill_translucent(&mut canvas, x0, y0, x1, y1, color);
        stroke_rect(&mut canvas, x0, y0, x1, y1, color);

        if show_labels {
            let label = format!("{} ({}x{})", region.name, region.width, region.height);
            draw_text(&mut canvas, x0 + STROKE + 2, y0 + STROKE + 2, &label, color);
        }
    }

    DynamicImage::ImageRgba8(canvas)
}

/// Parses `#RRGGBB` into an RGB triple.
fn parse_hex_color(s: &str) -> Option<[u8; 3]> {
    let hex = s.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some([r, g, b])
}

/// Intersects a region rectangle with the canvas, returning half-open pixel
/// bounds, or `None` when there is no overlap.
#[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
fn clamp_rect(
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    canvas_width: u32,
    canvas_height: u32,
) -> Option<(u32, u32, u32, u32)> {
    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + width).min(canvas_width as i32);
    let y1 = (y + height).min(canvas_height as i32);
    if x1 <= x0 || y1 <= y0 {
        return None;
    }
    Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn fill_translucent(canvas: &mut RgbaImage, x0: u32, y0: u32, x1: u32, y1: u32, color: [u8; 3]) {
    for y in y0..y1 {
        for x in x0..x1 {
            let px = canvas.get_pixel_mut(x, y);
            for c in 0..3 {
                px.0[c] = (f32::from(px.0[c]) * (1.0 - FILL_ALPHA)
                    + f32::from(color[c]) * FILL_ALPHA) as u8;
            }
        }
    }
}

fn stroke_rect(canvas: &mut RgbaImage, x0: u32, y0: u32, x1: u32, y1: u32, color: [u8; 3]) {
    let solid = Rgba([color[0], color[1], color[2], 255]);
    for y in y0..y1 {
        for x in x0..x1 {
            let on_edge = x < x0 + STROKE || x >= x1.saturating_sub(STROKE) || y < y0 + STROKE
                || y >= y1.saturating_sub(STROKE);
            if on_edge {
                canvas.put_pixel(x, y, solid);
            }
        }
    }
}

/// Draws a label with the built-in 5x7 glyph set. Lowercase maps to
/// uppercase, unknown characters advance the cursor without drawing.
fn draw_text(canvas: &mut RgbaImage, x: u32, y: u32, text: &str, color: [u8; 3]) {
    let solid = Rgba([color[0], color[1], color[2], 255]);
    let mut cursor = x;
    for ch in text.chars() {
        if let Some(rows) = glyph(ch.to_ascii_uppercase()) {
            for (dy, bits) in rows.iter().enumerate() {
                for dx in 0..5u32 {
                    if bits & (1 << (4 - dx)) != 0 {
                        let px = cursor + dx;
                        let py = y + dy as u32;
                        if px < canvas.width() && py < canvas.height() {
                            canvas.put_pixel(px, py, solid);
                        }
                    }
                }
            }
        }
        cursor += 6;
    }
}

/// 5x7 bitmap glyphs, one row per byte, low 5 bits used.
#[allow(clippy::too_many_lines)]
fn glyph(c: char) -> Option<[u8; 7]> {
    let rows = match c {
        'A' => [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'B' => [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E],
        'C' => [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
        'D' => [0x1E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1E],
        'E' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
        'F' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10],
        'G' => [0x0E, 0x11, 0x10, 0x13, 0x11, 0x11, 0x0F],
        'H' => [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'I' => [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E],
        'J' => [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C],
        'K' => [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11],
        'L' => [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F],
        'M' => [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11],
        'N' => [0x11, 0x19, 0x15, 0x13, 0x11, 0x11, 0x11],
        'O' => [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'P' => [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10],
        'Q' => [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D],
        'R' => [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11],
        'S' => [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E],
        'T' => [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
        'U' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'V' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04],
        'W' => [0x11, 0x11, 0x11, 0x15, 0x15, 0x1B, 0x11],
        'X' => [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11],
        'Y' => [0x11, 0x11, 0x0A, 0x04, 0x04, 0x04, 0x04],
        'Z' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F],
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x06, 0x08, 0x10, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        '(' => [0x02, 0x04, 0x08, 0x08, 0x08, 0x04, 0x02],
        ')' => [0x08, 0x04, 0x02, 0x02, 0x02, 0x04, 0x08],
        '-' => [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
        '_' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x1F],
        '.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C],
        _ => return None,
    };
    Some(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Region;
    use image::RgbImage;

    fn gray_canvas(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, image::Rgb([128; 3])))
    }

    fn config_with(region: Region) -> RegionConfiguration {
        let mut config = RegionConfiguration::new("Preview", 200, 200);
        config.add_region(region);
        config
    }

    #[test]
    fn test_boundary_drawn_in_region_color() {
        let config = config_with(Region::new("A", 10, 10, 50, 50).with_color("#FF0000"));
        let preview = render_preview(&gray_canvas(200, 200), &config, false);
        let rgba = preview.to_rgba8();
        assert_eq!(rgba.get_pixel(10, 10).0, [255, 0, 0, 255]);
        // Bottom-right corner of the stroke
        assert_eq!(rgba.get_pixel(59, 59).0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_fill_is_translucent_blend() {
        let config = config_with(Region::new("A", 10, 10, 50, 50).with_color("#FF0000"));
        let preview = render_preview(&gray_canvas(200, 200), &config, false);
        let inner = preview.to_rgba8().get_pixel(35, 35).0;
        // Red channel pulled up from 128, but nowhere near full
        assert!(inner[0] > 128 && inner[0] < 200);
        // Green and blue pulled down
        assert!(inner[1] < 128);
    }

    #[test]
    fn test_pixels_outside_regions_untouched() {
        let config = config_with(Region::new("A", 10, 10, 50, 50));
        let preview = render_preview(&gray_canvas(200, 200), &config, true);
        assert_eq!(preview.to_rgba8().get_pixel(150, 150).0, [128, 128, 128, 255]);
    }

    #[test]
    fn test_disabled_regions_not_drawn() {
        let mut region = Region::new("Off", 10, 10, 50, 50).with_color("#00FF00");
        region.enabled = false;
        let config = config_with(region);
        let preview = render_preview(&gray_canvas(200, 200), &config, false);
        assert_eq!(preview.to_rgba8().get_pixel(10, 10).0, [128, 128, 128, 255]);
    }

    #[test]
    fn test_labels_change_pixels() {
        let config = config_with(Region::new("AB", 10, 10, 100, 60).with_color("#0000FF"));
        let without = render_preview(&gray_canvas(200, 200), &config, false).to_rgba8();
        let with = render_preview(&gray_canvas(200, 200), &config, true).to_rgba8();
        assert_ne!(without.as_raw(), with.as_raw());
    }

    #[test]
    fn test_region_larger_than_raster_is_clipped() {
        // Configuration screen is 200x200 but the preview raster is 64x64;
        // overlay drawing clips instead of panicking
        let config = config_with(Region::new("Big", 0, 0, 200, 200));
        let preview = render_preview(&gray_canvas(64, 64), &config, true);
        assert_eq!(preview.to_rgba8().dimensions(), (64, 64));
    }

    #[test]
    fn test_source_not_mutated() {
        let canvas = gray_canvas(64, 64);
        let config = config_with(Region::new("A", 0, 0, 32, 32));
        let _ = render_preview(&canvas, &config, true);
        assert_eq!(canvas.to_rgb8().get_pixel(0, 0).0, [128, 128, 128]);
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#FF0080"), Some([255, 0, 128]));
        assert_eq!(parse_hex_color("FF0080"), None);
        assert_eq!(parse_hex_color("#XYZ123"), None);
        assert_eq!(parse_hex_color("#FFF"), None);
    }
}
