use core::str::FromStr;

use crate::{AxisThresholds, ScrollGeometry, ThresholdParseError};

/// How close to an edge the scroll position must be for a load to trigger.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollThreshold {
    /// A fraction of the viewport size, clamped to `(0, 1]`.
    ///
    /// Values `<= 0` become `0.1`, values `> 1` become `1`.
    Ratio(f64),
    /// An absolute distance in pixels. The sign is ignored.
    Pixels(i64),
}

impl Default for ScrollThreshold {
    fn default() -> Self {
        Self::Ratio(1.0)
    }
}

impl From<f64> for ScrollThreshold {
    fn from(ratio: f64) -> Self {
        Self::Ratio(ratio)
    }
}

impl FromStr for ScrollThreshold {
    type Err = ThresholdParseError;

    /// Parses the leading integer of a string like `"200px"`; trailing units are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim_start();
        let (negative, digits) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, &trimmed[1..]),
            Some(b'+') => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };
        let end = digits
            .bytes()
            .position(|b| !b.is_ascii_digit())
            .unwrap_or(digits.len());
        let value: i64 = digits[..end].parse().map_err(|_| ThresholdParseError {
            input: s.to_owned(),
        })?;
        Ok(Self::Pixels(if negative { -value } else { value }))
    }
}

/// Returns `value` unless its magnitude exceeds `scroll_size`, in which case `fallback` is used.
///
/// Without a fallback, the result is `scroll_size` carrying the sign of `value`.
pub fn valid_scroll_value(value: f64, scroll_size: f64, fallback: Option<f64>) -> f64 {
    if value.abs() > scroll_size {
        fallback.unwrap_or(if value < 0.0 { -scroll_size } else { scroll_size })
    } else {
        value
    }
}

/// Converts a [`ScrollThreshold`] into per-axis pixel distances.
pub fn compute_thresholds(threshold: ScrollThreshold, geometry: &ScrollGeometry) -> AxisThresholds {
    match threshold {
        ScrollThreshold::Pixels(px) => {
            let px = px.unsigned_abs() as f64;
            AxisThresholds {
                vertical: valid_scroll_value(
                    px,
                    geometry.scroll_height,
                    Some(geometry.client_height),
                ),
                horizontal: valid_scroll_value(
                    px,
                    geometry.scroll_width,
                    Some(geometry.client_width),
                ),
            }
        }
        ScrollThreshold::Ratio(ratio) => {
            // NaN falls through to the minimum.
            let ratio = if ratio > 1.0 {
                1.0
            } else if ratio > 0.0 {
                ratio
            } else {
                0.1
            };
            AxisThresholds {
                vertical: ratio * geometry.client_height,
                horizontal: ratio * geometry.client_width,
            }
        }
    }
}

/// Memoizes [`compute_thresholds`] on viewport size.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ThresholdCalculator {
    client: Option<(f64, f64)>,
    computed: AxisThresholds,
}

impl ThresholdCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns thresholds for `geometry`, recomputing only when the viewport size changed.
    pub fn compute(&mut self, threshold: ScrollThreshold, geometry: &ScrollGeometry) -> AxisThresholds {
        let client = (geometry.client_height, geometry.client_width);
        if self.client == Some(client) {
            return self.computed;
        }
        self.computed = compute_thresholds(threshold, geometry);
        self.client = Some(client);
        itrace!(
            vertical = self.computed.vertical,
            horizontal = self.computed.horizontal,
            "thresholds recomputed"
        );
        self.computed
    }

    /// Last computed thresholds (zero before the first computation).
    pub fn thresholds(&self) -> AxisThresholds {
        self.computed
    }

    /// The viewport size `(client_height, client_width)` the thresholds were computed for.
    pub fn client_size(&self) -> Option<(f64, f64)> {
        self.client
    }

    /// Forces the next [`Self::compute`] to recompute.
    pub fn invalidate(&mut self) {
        self.client = None;
    }
}
