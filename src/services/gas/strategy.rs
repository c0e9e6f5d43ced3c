use super::types::{CongestionLevel, PriceEstimate};

/// Percentile positions for the three tiers, as whole percents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PercentileBand {
    pub safe_low: u32,
    pub standard: u32,
    pub fast: u32,
}

/// 0-based positions into an ascending sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierIndices {
    pub safe_low: usize,
    pub standard: usize,
    pub fast: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TierSelection {
    pub estimate: PriceEstimate,
    pub congestion: CongestionLevel,
    pub ratio: f64,
    pub indices: TierIndices,
}

pub trait TierStrategy: Send + Sync {
    /// Pick the three tiers from an ascending, non-empty reference sequence.
    /// Returns `None` for an empty sequence.
    fn select(&self, reference: &[u128]) -> Option<TierSelection>;
}

/// Widens the gap between tiers as the spread of recent prices grows
pub struct CongestionAwareStrategy {
    pub high: PercentileBand,
    pub medium: PercentileBand,
    pub low: PercentileBand,
}

impl Default for CongestionAwareStrategy {
    fn default() -> Self {
        Self {
            high: PercentileBand { safe_low: 10, standard: 40, fast: 70 },
            medium: PercentileBand { safe_low: 15, standard: 45, fast: 75 },
            low: PercentileBand { safe_low: 20, standard: 50, fast: 80 },
        }
    }
}

impl CongestionAwareStrategy {
    pub fn band(&self, level: CongestionLevel) -> PercentileBand {
        match level {
            CongestionLevel::High => self.high,
            CongestionLevel::Medium => self.medium,
            CongestionLevel::Low => self.low,
        }
    }
}

impl TierStrategy for CongestionAwareStrategy {
    fn select(&self, reference: &[u128]) -> Option<TierSelection> {
        if reference.is_empty() {
            return None;
        }

        let congestion = congestion_level(reference);
        let indices = tier_indices(reference.len(), self.band(congestion));

        Some(TierSelection {
            estimate: PriceEstimate {
                safe_low: reference[indices.safe_low],
                standard: reference[indices.standard],
                fast: reference[indices.fast],
            },
            congestion,
            ratio: congestion_ratio(reference),
            indices,
        })
    }
}

fn bounds(sorted: &[u128]) -> Option<(u128, u128)> {
    Some((*sorted.first()?, *sorted.last()?))
}

/// (max - min) / min over an ascending sequence; 0 for fewer than two samples
pub fn congestion_ratio(sorted: &[u128]) -> f64 {
    match bounds(sorted) {
        Some((min, max)) if sorted.len() > 1 && min > 0 => (max - min) as f64 / min as f64,
        _ => 0.0,
    }
}

/// Classify the spread exactly: ratio > 1/2 is high, ratio > 1/5 is medium
pub fn congestion_level(sorted: &[u128]) -> CongestionLevel {
    let Some((min, max)) = bounds(sorted) else {
        return CongestionLevel::Low;
    };
    if sorted.len() < 2 || min == 0 {
        return CongestionLevel::Low;
    }

    let spread = max - min;
    // spread * k overflowing u128 means the ratio is far above any threshold
    let exceeds = |k: u128| spread.checked_mul(k).map_or(true, |scaled| scaled > min);

    if exceeds(2) {
        CongestionLevel::High
    } else if exceeds(5) {
        CongestionLevel::Medium
    } else {
        CongestionLevel::Low
    }
}

/// Tier positions for `n` ascending samples, all clamped into `[0, n-1]`
pub fn tier_indices(n: usize, band: PercentileBand) -> TierIndices {
    let last = n.saturating_sub(1);
    let at = |pct: u32| n.saturating_mul(pct as usize) / 100;

    TierIndices {
        safe_low: at(band.safe_low).saturating_sub(1).min(last),
        standard: at(band.standard).min(last),
        fast: at(band.fast).min(last),
    }
}

/// Estimate used when the window holds no priced transactions
pub fn fallback_estimate(base: u128) -> PriceEstimate {
    PriceEstimate {
        safe_low: base / 10 * 7 + base % 10 * 7 / 10,
        standard: base,
        fast: base.saturating_add(base / 2),
    }
}
