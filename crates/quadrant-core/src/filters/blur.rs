//! Blur filters for obscuring sensitive screen regions.
//!
//! Three algorithms are provided, selected by [`BlurMode`]. All of them work
//! on a flat 3-channel RGB layout internally; other source formats are
//! converted in and back out at the boundary.
//!
//! The "Gaussian" mode is historically misnamed: it applies an unweighted box
//! average over a radius derived from the intensity, and leaves the border
//! ring (width = radius) untouched. Existing processed archives were produced
//! with exactly this kernel, so it is kept bit-for-bit rather than replaced
//! with a true Gaussian.

use std::fmt;
use std::str::FromStr;

use anyhow::bail;
use image::{DynamicImage, RgbImage};
use serde::{Deserialize, Serialize};

/// Blur algorithm selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlurMode {
    /// Box average over a radius of `max(1, round(intensity * 1.5))`,
    /// borders unprocessed.
    Gaussian,
    /// Repeated box passes: kernel `max(3, 2 * intensity + 1)`, applied
    /// `max(1, intensity / 3)` times.
    Box,
    /// Horizontal smear compositing shifted, alpha-attenuated copies.
    Motion,
}

impl FromStr for BlurMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gaussian" => Ok(Self::Gaussian),
            "box" => Ok(Self::Box),
            "motion" => Ok(Self::Motion),
            other => bail!("unknown blur mode '{other}'"),
        }
    }
}

impl fmt::Display for BlurMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gaussian => write!(f, "gaussian"),
            Self::Box => write!(f, "box"),
            Self::Motion => write!(f, "motion"),
        }
    }
}

/// Validated blur parameters plus an optional performance warning.
#[derive(Debug, Clone)]
pub struct BlurSettings {
    /// Intensity clamped into `1..=10`.
    pub intensity: i32,
    /// Validated mode; unknown inputs fall back to [`BlurMode::Gaussian`].
    pub mode: BlurMode,
    /// Human-readable warning for expensive settings, if any.
    pub warning: Option<String>,
}

/// Clamps raw blur settings into their valid ranges.
///
/// Unknown mode names fall back to Gaussian; intensity is clamped to
/// `1..=10`. A warning is attached for Gaussian at intensity 7+ (box mode is
/// much cheaper) and for any mode at intensity 9+.
#[must_use]
pub fn validate_blur_settings(intensity: i32, mode: &str) -> BlurSettings {
    let mode = mode.parse().unwrap_or(BlurMode::Gaussian);
    let intensity = intensity.clamp(1, 10);

    let warning = if intensity >= 7 && mode == BlurMode::Gaussian {
        Some(format!(
            "Gaussian blur at intensity {intensity} is slow on large captures; \
             consider box mode"
        ))
    } else if intensity >= 9 {
        Some(format!(
            "Blur intensity {intensity} is expensive and will slow batch processing"
        ))
    } else {
        None
    };

    BlurSettings {
        intensity,
        mode,
        warning,
    }
}

/// Applies the selected blur to a raster, returning a new raster.
///
/// # Errors
///
/// Returns an error if `intensity` is outside `1..=10`. Call sites with
/// untrusted input should go through [`validate_blur_settings`] first, which
/// clamps instead.
pub fn apply_blur(image: &DynamicImage, intensity: i32, mode: BlurMode) -> anyhow::Result<DynamicImage> {
    if !(1..=10).contains(&intensity) {
        bail!("blur intensity must be within 1..=10, got {intensity}");
    }

    let rgb = image.to_rgb8();
    let blurred = match mode {
        BlurMode::Gaussian => gaussian_blur(&rgb, intensity),
        BlurMode::Box => box_blur(&rgb, intensity),
        BlurMode::Motion => motion_blur(&rgb, intensity),
    };
    Ok(DynamicImage::ImageRgb8(blurred))
}

/// One unweighted box-average pass over the interior of the image.
///
/// Pixels within `radius` of any edge are copied from the source unchanged.
/// The inner loop walks contiguous row slices so the kernel does not pay a
/// per-pixel bounds check.
fn box_average_pass(src: &RgbImage, radius: u32) -> RgbImage {
    let (width, height) = src.dimensions();
    let mut dst = src.clone();
    if width <= 2 * radius || height <= 2 * radius {
        return dst;
    }

    let stride = width as usize * 3;
    let window = (2 * radius + 1) as usize;
    let count = (window * window) as u32;
    let raw = src.as_raw();
    let out: &mut [u8] = &mut dst;

    for y in radius..height - radius {
        for x in radius..width - radius {
            let mut sum = [0u32; 3];
            for wy in (y - radius)..=(y + radius) {
                let start = wy as usize * stride + (x - radius) as usize * 3;
                for px in raw[start..start + window * 3].chunks_exact(3) {
                    sum[0] += u32::from(px[0]);
                    sum[1] += u32::from(px[1]);
                    sum[2] += u32::from(px[2]);
                }
            }
            let idx = y as usize * stride + x as usize * 3;
            #[allow(clippy::cast_possible_truncation)]
            {
                out[idx] = (sum[0] / count) as u8;
                out[idx + 1] = (sum[1] / count) as u8;
                out[idx + 2] = (sum[2] / count) as u8;
            }
        }
    }
    dst
}

fn gaussian_blur(src: &RgbImage, intensity: i32) -> RgbImage {
    let intensity = intensity.clamp(1, 10);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let radius = ((f64::from(intensity) * 1.5).round() as u32).max(1);
    box_average_pass(src, radius)
}

fn box_blur(src: &RgbImage, intensity: i32) -> RgbImage {
    let intensity = intensity.clamp(1, 10);
    let mut kernel = (2 * intensity + 1).max(3);
    if kernel % 2 == 0 {
        kernel += 1; // forced odd
    }
    #[allow(clippy::cast_sign_loss)]
    let radius = (kernel / 2) as u32;
    let passes = (intensity / 3).max(1);

    // The source is copied unmodified, then each pass feeds the next,
    // compounding the blur.
    let mut current = src.clone();
    for _ in 0..passes {
        current = box_average_pass(&current, radius);
    }
    current
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn motion_blur(src: &RgbImage, intensity: i32) -> RgbImage {
    let intensity = intensity.clamp(1, 10);
    let distance = (intensity * 3).max(2) as u32;
    // Per-copy alpha; copies further from the shift origin land darker.
    let alpha = (255 - intensity * 20).max(20) as f32 / 255.0 / distance as f32;

    let (width, height) = src.dimensions();
    let mut dst = src.clone();
    for shift in 0..distance {
        for y in 0..height {
            for x in 0..width.saturating_sub(shift) {
                let s = src.get_pixel(x + shift, y).0;
                let d = &mut dst.get_pixel_mut(x, y).0;
                for c in 0..3 {
                    d[c] = (f32::from(d[c]) * (1.0 - alpha) + f32::from(s[c]) * alpha) as u8;
                }
            }
        }
    }
    dst
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn checkerboard(width: u32, height: u32) -> DynamicImage {
        let img = RgbImage::from_fn(width, height, |x, y| {
            if (x + y) % 2 == 0 {
                Rgb([255, 255, 255])
            } else {
                Rgb([0, 0, 0])
            }
        });
        DynamicImage::ImageRgb8(img)
    }

    fn uniform(width: u32, height: u32, value: u8) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([value; 3])))
    }

    #[test]
    fn test_apply_blur_rejects_out_of_range_intensity() {
        let img = uniform(16, 16, 100);
        assert!(apply_blur(&img, 0, BlurMode::Gaussian).is_err());
        assert!(apply_blur(&img, 11, BlurMode::Box).is_err());
        assert!(apply_blur(&img, -3, BlurMode::Motion).is_err());
    }

    #[test]
    fn test_gaussian_averages_interior() {
        let img = checkerboard(32, 32);
        let blurred = apply_blur(&img, 1, BlurMode::Gaussian).expect("blur");
        // intensity 1 -> radius 2; pixel (16,16) sits well inside the interior
        let px = blurred.to_rgb8().get_pixel(16, 16).0;
        assert!(
            px[0] > 80 && px[0] < 180,
            "interior should be averaged toward mid-gray, got {}",
            px[0]
        );
    }

    #[test]
    fn test_gaussian_leaves_border_unprocessed() {
        let img = checkerboard(32, 32);
        let src = img.to_rgb8();
        let blurred = apply_blur(&img, 1, BlurMode::Gaussian).expect("blur");
        let out = blurred.to_rgb8();
        // intensity 1 -> radius 2; the two outermost rings are source pixels
        for x in 0..32 {
            assert_eq!(out.get_pixel(x, 0), src.get_pixel(x, 0));
            assert_eq!(out.get_pixel(x, 1), src.get_pixel(x, 1));
        }
        for y in 0..32 {
            assert_eq!(out.get_pixel(0, y), src.get_pixel(0, y));
            assert_eq!(out.get_pixel(31, y), src.get_pixel(31, y));
        }
    }

    #[test]
    fn test_gaussian_image_smaller_than_kernel_unchanged() {
        // radius 2 at intensity 1; a 3x3 image has no interior
        let img = checkerboard(3, 3);
        let blurred = apply_blur(&img, 1, BlurMode::Gaussian).expect("blur");
        assert_eq!(blurred.to_rgb8().as_raw(), img.to_rgb8().as_raw());
    }

    #[test]
    fn test_uniform_image_invariant_under_box_average() {
        let img = uniform(24, 24, 77);
        for mode in [BlurMode::Gaussian, BlurMode::Box] {
            let blurred = apply_blur(&img, 5, mode).expect("blur");
            assert!(
                blurred.to_rgb8().pixels().all(|p| p.0 == [77, 77, 77]),
                "uniform image must stay uniform under {mode}"
            );
        }
    }

    #[test]
    fn test_box_blur_widens_with_intensity() {
        // White left half, black right half; heavier settings (kernel 19,
        // 3 passes at intensity 9 vs kernel 3, 1 pass at intensity 1) must
        // produce a wider transition ramp at the boundary.
        let img = RgbImage::from_fn(64, 32, |x, _| {
            if x < 32 {
                Rgb([255, 255, 255])
            } else {
                Rgb([0, 0, 0])
            }
        });
        let src = DynamicImage::ImageRgb8(img);

        let soft = apply_blur(&src, 1, BlurMode::Box).expect("blur").to_rgb8();
        let heavy = apply_blur(&src, 9, BlurMode::Box).expect("blur").to_rgb8();

        let ramp_width = |img: &RgbImage| {
            (0..64)
                .filter(|&x| {
                    let v = img.get_pixel(x, 16).0[0];
                    v > 10 && v < 245
                })
                .count()
        };
        assert!(ramp_width(&heavy) > ramp_width(&soft));
    }

    #[test]
    fn test_motion_blur_smears_horizontally() {
        // White field with a black column at the right edge; the smear pulls
        // darkness leftward but leaves the far-left edge bright.
        let img = RgbImage::from_fn(40, 8, |x, _| {
            if x == 39 {
                Rgb([0, 0, 0])
            } else {
                Rgb([255, 255, 255])
            }
        });
        let blurred =
            apply_blur(&DynamicImage::ImageRgb8(img), 3, BlurMode::Motion).expect("blur");
        let out = blurred.to_rgb8();

        // intensity 3 -> distance 9; x=31 sees the black column at shift 8
        assert!(out.get_pixel(31, 4).0[0] < 240);
        assert!(out.get_pixel(0, 4).0[0] > 250);
    }

    #[test]
    fn test_validate_clamps_and_warns_for_gaussian() {
        let settings = validate_blur_settings(15, "gaussian");
        assert_eq!(settings.intensity, 10);
        assert_eq!(settings.mode, BlurMode::Gaussian);
        assert!(settings.warning.is_some());
    }

    #[test]
    fn test_validate_falls_back_to_gaussian_on_unknown_mode() {
        let settings = validate_blur_settings(3, "swirl");
        assert_eq!(settings.intensity, 3);
        assert_eq!(settings.mode, BlurMode::Gaussian);
        assert!(settings.warning.is_none());
    }

    #[test]
    fn test_validate_warns_for_high_intensity_any_mode() {
        let settings = validate_blur_settings(9, "motion");
        assert_eq!(settings.mode, BlurMode::Motion);
        assert!(settings.warning.is_some());
    }

    #[test]
    fn test_validate_clamps_low_intensity() {
        let settings = validate_blur_settings(-4, "box");
        assert_eq!(settings.intensity, 1);
        assert_eq!(settings.mode, BlurMode::Box);
        assert!(settings.warning.is_none());
    }

    #[test]
    fn test_mode_parse_case_insensitive() {
        assert_eq!("GAUSSIAN".parse::<BlurMode>().unwrap(), BlurMode::Gaussian);
        assert_eq!("Box".parse::<BlurMode>().unwrap(), BlurMode::Box);
        assert!("median".parse::<BlurMode>().is_err());
    }

    #[test]
    fn test_rgba_input_converted_to_rgb() {
        let img = DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(
            16,
            16,
            image::Rgba([10, 20, 30, 128]),
        ));
        let blurred = apply_blur(&img, 2, BlurMode::Gaussian).expect("blur");
        assert!(matches!(blurred, DynamicImage::ImageRgb8(_)));
    }
}
