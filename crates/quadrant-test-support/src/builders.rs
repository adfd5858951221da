//! Synthetic raster builders for testing.

use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};

/// Builder for creating synthetic test rasters.
pub struct SyntheticRasterBuilder;

impl SyntheticRasterBuilder {
    /// Creates a high-contrast checkerboard with 8px cells.
    #[must_use]
    pub fn checkerboard(width: u32, height: u32) -> DynamicImage {
        let img = RgbImage::from_fn(width, height, |x, y| {
            if (x / 8 + y / 8) % 2 == 0 {
                Rgb([255, 255, 255])
            } else {
                Rgb([0, 0, 0])
            }
        });
        DynamicImage::ImageRgb8(img)
    }

    /// Creates a uniform RGB raster.
    #[must_use]
    pub fn uniform_rgb(width: u32, height: u32, r: u8, g: u8, b: u8) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([r, g, b])))
    }

    /// Creates a raster whose red/green channels encode the pixel position,
    /// handy for asserting crop offsets.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn coordinate_gradient(width: u32, height: u32) -> DynamicImage {
        let img = RgbImage::from_fn(width, height, |x, y| Rgb([x as u8, y as u8, 0]));
        DynamicImage::ImageRgb8(img)
    }

    /// Creates a uniform RGBA raster with the given alpha.
    #[must_use]
    pub fn uniform_rgba(width: u32, height: u32, rgb: [u8; 3], alpha: u8) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            width,
            height,
            Rgba([rgb[0], rgb[1], rgb[2], alpha]),
        ))
    }
}
