//! Pixel-level filters: blur, crop extraction, and preview overlays.

mod blur;
mod crop;
mod preview;

pub use blur::{apply_blur, validate_blur_settings, BlurMode, BlurSettings};
pub use crop::crop_region;
pub use preview::render_preview;
