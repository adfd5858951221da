//! Region crop extraction.

use image::{DynamicImage, GenericImageView};

use crate::domain::Region;

/// Extracts the part of a raster covered by a region.
///
/// The region is validated against the raster's own dimensions (the raster
/// may differ in size from the resolution the configuration was authored
/// for), then intersected with the raster rectangle. Returns `None` when the
/// region is invalid for the raster or the intersection has zero area; "no
/// crop possible" is never an error. The source is not mutated and an alpha
/// channel, if present, is preserved.
#[must_use]
#[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
pub fn crop_region(image: &DynamicImage, region: &Region) -> Option<DynamicImage> {
    let (width, height) = image.dimensions();
    if !region.is_valid_for_screen(width as i32, height as i32) {
        return None;
    }

    let x0 = region.x.max(0);
    let y0 = region.y.max(0);
    let x1 = (region.x + region.width).min(width as i32);
    let y1 = (region.y + region.height).min(height as i32);
    if x1 <= x0 || y1 <= y0 {
        return None;
    }

    Some(image.crop_imm(x0 as u32, y0 as u32, (x1 - x0) as u32, (y1 - y0) as u32))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};

    fn gradient(width: u32, height: u32) -> DynamicImage {
        #[allow(clippy::cast_possible_truncation)]
        let img = RgbImage::from_fn(width, height, |x, y| Rgb([x as u8, y as u8, 0]));
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn test_crop_fully_inside_matches_region_size() {
        let img = gradient(100, 80);
        let region = Region::new("Inner", 10, 20, 30, 40);
        let cropped = crop_region(&img, &region).expect("crop");
        assert_eq!(cropped.dimensions(), (30, 40));

        // Pixel content is offset by the region origin
        let rgb = cropped.to_rgb8();
        assert_eq!(rgb.get_pixel(0, 0).0, [10, 20, 0]);
        assert_eq!(rgb.get_pixel(29, 39).0, [39, 59, 0]);
    }

    #[test]
    fn test_crop_fully_outside_returns_none() {
        let img = gradient(100, 80);
        let region = Region::new("Gone", 200, 200, 50, 50);
        assert!(crop_region(&img, &region).is_none());
    }

    #[test]
    fn test_crop_partially_outside_returns_none() {
        // The invariant check runs against the raster size, so a region
        // spilling past the edge is rejected before intersection
        let img = gradient(100, 80);
        let region = Region::new("Spill", 90, 0, 30, 40);
        assert!(crop_region(&img, &region).is_none());
    }

    #[test]
    fn test_crop_degenerate_region_returns_none() {
        let img = gradient(100, 80);
        assert!(crop_region(&img, &Region::new("Flat", 0, 0, 0, 10)).is_none());
        assert!(crop_region(&img, &Region::new("Thin", 0, 0, 10, 0)).is_none());
    }

    #[test]
    fn test_crop_region_smaller_raster_than_configured() {
        // Region authored for 1920x1080, raster is only 640x480
        let img = gradient(640, 480);
        let region = Region::new("Right", 960, 0, 960, 540);
        assert!(crop_region(&img, &region).is_none());
    }

    #[test]
    fn test_crop_preserves_alpha() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            50,
            50,
            Rgba([100, 150, 200, 42]),
        ));
        let region = Region::new("A", 5, 5, 10, 10);
        let cropped = crop_region(&img, &region).expect("crop");
        let rgba = cropped.to_rgba8();
        assert_eq!(rgba.get_pixel(0, 0).0, [100, 150, 200, 42]);
    }

    #[test]
    fn test_crop_does_not_mutate_source() {
        let img = gradient(64, 64);
        let before = img.to_rgb8().as_raw().clone();
        let region = Region::new("A", 0, 0, 32, 32);
        let _ = crop_region(&img, &region);
        assert_eq!(img.to_rgb8().as_raw(), &before);
    }

    #[test]
    fn test_crop_full_raster() {
        let img = gradient(64, 48);
        let region = Region::new("Full", 0, 0, 64, 48);
        let cropped = crop_region(&img, &region).expect("crop");
        assert_eq!(cropped.dimensions(), (64, 48));
    }
}
