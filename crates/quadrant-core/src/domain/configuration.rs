//! Screen-resolution-bound collections of regions.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::debug;

use super::Region;

/// A named, ordered collection of [`Region`]s bound to a screen resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionConfiguration {
    /// Configuration name.
    pub name: String,
    /// Target screen width in pixels.
    pub screen_width: i32,
    /// Target screen height in pixels.
    pub screen_height: i32,
    /// Regions in insertion order.
    pub regions: Vec<Region>,
    /// Creation timestamp.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// Last modification timestamp.
    #[serde(with = "time::serde::rfc3339")]
    pub modified_at: OffsetDateTime,
    /// Whether this configuration is the active one for its screen.
    pub active: bool,
}

impl RegionConfiguration {
    /// Creates an empty configuration for the given screen resolution.
    #[must_use]
    pub fn new(name: impl Into<String>, screen_width: i32, screen_height: i32) -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            name: name.into(),
            screen_width,
            screen_height,
            regions: Vec::new(),
            created_at: now,
            modified_at: now,
            active: true,
        }
    }

    /// Creates the default 2x2 grid configuration: four equal quadrants with
    /// canonical names and distinct preview colors.
    ///
    /// With odd resolutions the right/bottom quadrants absorb the remainder
    /// pixel so the grid still covers the full screen.
    #[must_use]
    pub fn default_grid(name: impl Into<String>, screen_width: i32, screen_height: i32) -> Self {
        let half_w = screen_width / 2;
        let half_h = screen_height / 2;
        let rest_w = screen_width - half_w;
        let rest_h = screen_height - half_h;

        let mut config = Self::new(name, screen_width, screen_height);
        config.add_region(Region::new("Top Left", 0, 0, half_w, half_h).with_color("#E53935"));
        config
            .add_region(Region::new("Top Right", half_w, 0, rest_w, half_h).with_color("#1E88E5"));
        config
            .add_region(Region::new("Bottom Left", 0, half_h, half_w, rest_h).with_color("#43A047"));
        config.add_region(
            Region::new("Bottom Right", half_w, half_h, rest_w, rest_h).with_color("#FDD835"),
        );
        config
    }

    /// Adds a region, validating it against this configuration's resolution.
    ///
    /// Invalid regions (out-of-bounds, degenerate, or duplicate name) are
    /// silently dropped; callers rely on this being a no-op rather than an
    /// error. Returns whether the region was added.
    pub fn add_region(&mut self, region: Region) -> bool {
        if !region.is_valid_for_screen(self.screen_width, self.screen_height) {
            debug!(
                "Rejecting region '{}': bounds {}x{}+{}+{} outside {}x{}",
                region.name,
                region.width,
                region.height,
                region.x,
                region.y,
                self.screen_width,
                self.screen_height
            );
            return false;
        }
        if self
            .regions
            .iter()
            .any(|r| r.name.eq_ignore_ascii_case(&region.name))
        {
            debug!("Rejecting region '{}': duplicate name", region.name);
            return false;
        }

        self.regions.push(region);
        self.modified_at = OffsetDateTime::now_utc();
        true
    }

    /// Removes a region by case-insensitive name match.
    ///
    /// Returns whether a region was removed; updates the modification stamp
    /// only on an actual removal.
    pub fn remove_region(&mut self, name: &str) -> bool {
        let before = self.regions.len();
        self.regions.retain(|r| !r.name.eq_ignore_ascii_case(name));
        if self.regions.len() == before {
            return false;
        }
        self.modified_at = OffsetDateTime::now_utc();
        true
    }

    /// Returns the enabled regions in insertion order.
    pub fn enabled_regions(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter().filter(|r| r.enabled)
    }

    /// Returns true when the configuration holds at least one region and all
    /// invariants hold (bounds inside the resolution, unique names).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        if self.regions.is_empty() {
            return false;
        }
        if !self
            .regions
            .iter()
            .all(|r| r.is_valid_for_screen(self.screen_width, self.screen_height))
        {
            return false;
        }
        // Pairwise case-insensitive uniqueness; region counts are small
        for (i, a) in self.regions.iter().enumerate() {
            if self.regions[i + 1..]
                .iter()
                .any(|b| b.name.eq_ignore_ascii_case(&a.name))
            {
                return false;
            }
        }
        true
    }
}
