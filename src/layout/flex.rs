//! # Flex Distribution
//!
//! The main-axis arithmetic behind container layout. Fixed children keep
//! their declared extents; flex children split whatever remains after the
//! fixed extents and the gaps, in proportion to their weights.

use crate::model::Sizing;

/// Main-axis extents for `sizings` inside a container `extent` boxes long
/// with `gap` boxes between neighbours.
///
/// Every flex share is computed straight from its own weight ratio, never
/// from a running total, so rounding error cannot accumulate along the row.
/// A container that is already overfull gives its flex children nothing;
/// fixed children keep their extents and overflow.
pub fn distribute(sizings: &[Sizing], extent: f64, gap: f64) -> Vec<f64> {
    if sizings.is_empty() {
        return vec![];
    }

    let total_weight: f64 = sizings
        .iter()
        .map(|s| match s {
            Sizing::Flex(w) => w.max(0.0),
            Sizing::Fixed(_) => 0.0,
        })
        .sum();
    let remaining = remaining_space(sizings, extent, gap);

    sizings
        .iter()
        .map(|s| match *s {
            Sizing::Fixed(v) => v.max(0.0),
            Sizing::Flex(w) => {
                if remaining <= 0.0 || total_weight <= 0.0 {
                    0.0
                } else {
                    remaining * (w.max(0.0) / total_weight)
                }
            }
        })
        .collect()
}

/// Space left for flex children after fixed extents and gaps, clamped at 0.
fn remaining_space(sizings: &[Sizing], extent: f64, gap: f64) -> f64 {
    let fixed_total: f64 = sizings
        .iter()
        .filter_map(|s| match s {
            Sizing::Fixed(v) => Some(v.max(0.0)),
            Sizing::Flex(_) => None,
        })
        .sum();
    let gaps = gap * sizings.len().saturating_sub(1) as f64;
    (extent - fixed_total - gaps).max(0.0)
}
