use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::config::{
    DEFAULT_BATTERY_MAH, DEFAULT_CAMERA_MP, DEFAULT_PRICE, DEFAULT_RAM_GB, DEFAULT_REAR_CAMERAS,
};

/// A trigger substring and the pattern that captures its number.
struct Extractor {
    trigger: &'static str,
    pattern: Regex,
}

impl Extractor {
    fn new(trigger: &'static str, pattern: &str) -> Self {
        Self {
            trigger,
            pattern: Regex::new(pattern).expect("extractor patterns are valid"),
        }
    }

    fn triggered(&self, query: &str) -> bool {
        query.contains(self.trigger)
    }

    /// First captured number, or `None` when the trigger is absent, the
    /// pattern does not match, or the digits overflow `u32`. Zero counts as
    /// unstated so the default applies.
    fn capture(&self, query: &str) -> Option<u32> {
        if !self.triggered(query) {
            return None;
        }
        self.pattern
            .captures(query)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok())
            .filter(|v| *v != 0)
    }
}

static UNDER: LazyLock<Extractor> = LazyLock::new(|| Extractor::new("under", r"under (\d+)"));
static ABOVE: LazyLock<Extractor> = LazyLock::new(|| Extractor::new("above", r"above (\d+)"));
static RAM: LazyLock<Extractor> = LazyLock::new(|| Extractor::new("gb ram", r"(\d+) gb ram"));
static BATTERY: LazyLock<Extractor> = LazyLock::new(|| Extractor::new("mah", r"(\d+) mah"));
static CAMERA: LazyLock<Extractor> =
    LazyLock::new(|| Extractor::new("mp camera", r"(\d+) mp camera"));
static REAR_CAMERAS: LazyLock<Extractor> =
    LazyLock::new(|| Extractor::new("rear cameras", r"(\d+) rear cameras"));

/// Which side of the price the query bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceDirection {
    /// "under N": price ≤ N.
    AtMost,
    /// "above N": price ≥ N.
    AtLeast,
}

/// Numeric constraints extracted from a free-text query.
///
/// Fields hold only what the text actually stated. The accessors resolve
/// absent values to the sentinel defaults in [`crate::config`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct QueryConstraints {
    /// Set when "under" or "above" occurs, even if no number follows.
    pub price_direction: Option<PriceDirection>,
    pub price: Option<u32>,
    pub ram_gb: Option<u32>,
    pub battery_mah: Option<u32>,
    pub camera_mp: Option<u32>,
    pub rear_cameras: Option<u32>,
}

impl QueryConstraints {
    pub fn price_or_default(&self) -> u32 {
        self.price.unwrap_or(DEFAULT_PRICE)
    }

    /// Direction and amount of the price filter, if one applies.
    pub fn price_bound(&self) -> Option<(PriceDirection, u32)> {
        self.price_direction
            .map(|direction| (direction, self.price_or_default()))
    }

    pub fn min_ram_gb(&self) -> u32 {
        self.ram_gb.unwrap_or(DEFAULT_RAM_GB)
    }

    pub fn min_battery_mah(&self) -> u32 {
        self.battery_mah.unwrap_or(DEFAULT_BATTERY_MAH)
    }

    pub fn min_camera_mp(&self) -> u32 {
        self.camera_mp.unwrap_or(DEFAULT_CAMERA_MP)
    }

    pub fn min_rear_cameras(&self) -> u32 {
        self.rear_cameras.unwrap_or(DEFAULT_REAR_CAMERAS)
    }
}

/// Extract numeric constraints from `query`.
///
/// Matching is case-insensitive and substring-based: "under" inside another
/// word still counts. When both "under" and "above" appear, "under" wins.
/// A trigger without a number sets nothing except the price direction.
pub fn parse_query(query: &str) -> QueryConstraints {
    let query = query.to_lowercase();

    let (price_direction, price) = if UNDER.triggered(&query) {
        (Some(PriceDirection::AtMost), UNDER.capture(&query))
    } else if ABOVE.triggered(&query) {
        (Some(PriceDirection::AtLeast), ABOVE.capture(&query))
    } else {
        (None, None)
    };

    QueryConstraints {
        price_direction,
        price,
        ram_gb: RAM.capture(&query),
        battery_mah: BATTERY.capture(&query),
        camera_mp: CAMERA.capture(&query),
        rear_cameras: REAR_CAMERAS.capture(&query),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved(c: &QueryConstraints) -> (Option<(PriceDirection, u32)>, u32, u32, u32, u32) {
        (
            c.price_bound(),
            c.min_ram_gb(),
            c.min_battery_mah(),
            c.min_camera_mp(),
            c.min_rear_cameras(),
        )
    }

    #[test]
    fn no_keywords_yield_defaults() {
        for query in ["best phone", "", "   ", "samsung phones", "something with a good screen"] {
            let c = parse_query(query);
            assert_eq!(c, QueryConstraints::default(), "query: {query:?}");
            assert_eq!(resolved(&c), (None, 6, 4000, 48, 2));
            assert_eq!(c.price_or_default(), 50_000);
        }
    }

    #[test]
    fn under_sets_at_most() {
        let c = parse_query("best phone under 20000");
        assert_eq!(c.price_bound(), Some((PriceDirection::AtMost, 20_000)));
    }

    #[test]
    fn above_sets_at_least() {
        let c = parse_query("phones above 30000");
        assert_eq!(c.price_bound(), Some((PriceDirection::AtLeast, 30_000)));
    }

    #[test]
    fn under_wins_over_above() {
        let c = parse_query("above 10000 and under 20000");
        assert_eq!(c.price_bound(), Some((PriceDirection::AtMost, 20_000)));
    }

    #[test]
    fn all_fields_extracted() {
        let c = parse_query("Samsung under 25000 with 8 GB RAM, 5000 mAh battery, 64 MP camera and 3 rear cameras");
        assert_eq!(
            c,
            QueryConstraints {
                price_direction: Some(PriceDirection::AtMost),
                price: Some(25_000),
                ram_gb: Some(8),
                battery_mah: Some(5000),
                camera_mp: Some(64),
                rear_cameras: Some(3),
            }
        );
    }

    #[test]
    fn trigger_without_number_falls_back_to_default() {
        let c = parse_query("something under budget with lots of gb ram");
        assert_eq!(c.price_direction, Some(PriceDirection::AtMost));
        assert_eq!(c.price, None);
        assert_eq!(c.price_bound(), Some((PriceDirection::AtMost, 50_000)));
        assert_eq!(c.ram_gb, None);
        assert_eq!(c.min_ram_gb(), 6);
    }

    #[test]
    fn unit_without_space_is_not_captured() {
        // The patterns require a space between the number and the unit.
        let c = parse_query("5000mah battery and 12gb ram");
        assert_eq!(c.battery_mah, None);
        assert_eq!(c.ram_gb, None);
    }

    #[test]
    fn trigger_inside_word_still_counts() {
        // "thunder" contains "under".
        let c = parse_query("thunder 15000");
        assert_eq!(c.price_bound(), Some((PriceDirection::AtMost, 15_000)));
        let c = parse_query("underwater phone");
        assert_eq!(c.price_bound(), Some((PriceDirection::AtMost, 50_000)));
    }

    #[test]
    fn first_occurrence_wins() {
        let c = parse_query("4 gb ram or 8 gb ram");
        assert_eq!(c.ram_gb, Some(4));
    }

    #[test]
    fn zero_falls_back_to_default() {
        let c = parse_query("0 gb ram 0 mah 0 mp camera 0 rear cameras under 0");
        assert_eq!(c.ram_gb, None);
        assert_eq!(
            resolved(&c),
            (Some((PriceDirection::AtMost, 50_000)), 6, 4000, 48, 2)
        );

        let c = parse_query("above 000");
        assert_eq!(c.price_bound(), Some((PriceDirection::AtLeast, 50_000)));
    }

    #[test]
    fn overflowing_number_is_absent() {
        let c = parse_query("under 99999999999999999999");
        assert_eq!(c.price, None);
        assert_eq!(c.price_or_default(), 50_000);
    }

    #[test]
    fn parsing_is_pure() {
        let query = "oneplus above 30000 with 12 gb ram";
        assert_eq!(parse_query(query), parse_query(query));
    }
}
