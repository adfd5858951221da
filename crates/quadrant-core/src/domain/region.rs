//! Named rectangular screen regions.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Characters that are not allowed in a single path segment on any of the
/// platforms we write output folders on.
const ILLEGAL_SEGMENT_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// A named rectangular sub-area of a screen capture.
///
/// Bounds are validated against a screen resolution when the region is added
/// to a [`RegionConfiguration`](super::RegionConfiguration), not at
/// construction time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Region {
    /// Region name, unique (case-insensitive) within a configuration.
    pub name: String,
    /// Left edge in pixels.
    pub x: i32,
    /// Top edge in pixels.
    pub y: i32,
    /// Width in pixels (must be positive).
    pub width: i32,
    /// Height in pixels (must be positive).
    pub height: i32,
    /// Whether the region participates in batch processing.
    pub enabled: bool,
    /// Hex color (`#RRGGBB`) used by the preview renderer. Cosmetic only.
    pub preview_color: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Creation timestamp.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Region {
    /// Creates an enabled region with default preview color and no description.
    #[must_use]
    pub fn new(name: impl Into<String>, x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            width,
            height,
            enabled: true,
            preview_color: "#FF5722".to_string(),
            description: String::new(),
            created_at: OffsetDateTime::now_utc(),
        }
    }

    /// Sets the preview color, builder style.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.preview_color = color.into();
        self
    }

    /// Returns true when the bounds lie fully inside a screen of the given size.
    #[must_use]
    pub fn is_valid_for_screen(&self, screen_width: i32, screen_height: i32) -> bool {
        self.width > 0
            && self.height > 0
            && self.x >= 0
            && self.y >= 0
            && self.x + self.width <= screen_width
            && self.y + self.height <= screen_height
    }

    /// Returns a file-system-safe folder name derived from the region name.
    ///
    /// Every character illegal in a path segment is replaced with `_`. If the
    /// sanitized name is empty or whitespace-only, falls back to
    /// `Quadrant_<x>_<y>`.
    #[must_use]
    pub fn folder_name(&self) -> String {
        let sanitized: String = self
            .name
            .chars()
            .map(|c| {
                if ILLEGAL_SEGMENT_CHARS.contains(&c) || c.is_control() {
                    '_'
                } else {
                    c
                }
            })
            .collect();

        if sanitized.trim().is_empty() {
            format!("Quadrant_{}_{}", self.x, self.y)
        } else {
            sanitized
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_region_inside_screen() {
        let region = Region::new("Left", 0, 0, 960, 1080);
        assert!(region.is_valid_for_screen(1920, 1080));
    }

    #[test]
    fn test_region_exceeding_screen_edge_invalid() {
        // One pixel past the right edge
        let region = Region::new("Wide", 961, 0, 960, 1080);
        assert!(!region.is_valid_for_screen(1920, 1080));

        // One pixel past the bottom edge
        let region = Region::new("Tall", 0, 1, 960, 1080);
        assert!(!region.is_valid_for_screen(1920, 1080));
    }

    #[test]
    fn test_region_filling_screen_exactly_valid() {
        let region = Region::new("Full", 0, 0, 1920, 1080);
        assert!(region.is_valid_for_screen(1920, 1080));
    }

    #[test]
    fn test_negative_origin_invalid() {
        assert!(!Region::new("A", -1, 0, 10, 10).is_valid_for_screen(100, 100));
        assert!(!Region::new("B", 0, -1, 10, 10).is_valid_for_screen(100, 100));
    }

    #[test]
    fn test_degenerate_dimensions_invalid() {
        assert!(!Region::new("A", 0, 0, 0, 10).is_valid_for_screen(100, 100));
        assert!(!Region::new("B", 0, 0, 10, 0).is_valid_for_screen(100, 100));
        assert!(!Region::new("C", 0, 0, -5, 10).is_valid_for_screen(100, 100));
    }

    #[test]
    fn test_folder_name_replaces_separators() {
        let region = Region::new("A/B", 0, 0, 10, 10);
        assert_eq!(region.folder_name(), "A_B");
    }

    #[test]
    fn test_folder_name_replaces_all_illegal_chars() {
        let region = Region::new(r#"a<b>c:d"e/f\g|h?i*j"#, 0, 0, 10, 10);
        assert_eq!(region.folder_name(), "a_b_c_d_e_f_g_h_i_j");
    }

    #[test]
    fn test_folder_name_empty_falls_back_to_coordinates() {
        let region = Region::new("", 40, 60, 10, 10);
        assert_eq!(region.folder_name(), "Quadrant_40_60");
    }

    #[test]
    fn test_folder_name_whitespace_falls_back_to_coordinates() {
        let region = Region::new("   ", 0, 0, 10, 10);
        assert_eq!(region.folder_name(), "Quadrant_0_0");
    }

    #[test]
    fn test_folder_name_sanitized_to_underscores_falls_back() {
        // All characters illegal: sanitizes to "___", which is kept (not
        // whitespace), so no fallback
        let region = Region::new("///", 5, 5, 10, 10);
        assert_eq!(region.folder_name(), "___");
    }

    #[test]
    fn test_serde_round_trip() {
        let region = Region::new("Top Left", 0, 0, 960, 540).with_color("#1E88E5");
        let json = serde_json::to_string(&region).expect("serialize");
        let back: Region = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.name, "Top Left");
        assert_eq!(back.preview_color, "#1E88E5");
        assert_eq!((back.x, back.y, back.width, back.height), (0, 0, 960, 540));
        assert!(back.enabled);
    }
}
