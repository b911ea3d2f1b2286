use std::collections::BTreeMap;

/// Percent mixes are divided by this constant, never by their own sum.
pub const PERCENT_SCALE: f64 = 100.0;

/// A mix counts as valid when its raw sum is within this distance of 100.
pub const MIX_TOLERANCE: f64 = 0.001;

/// Unit-interval weights derived from a raw percentage mix.
#[derive(Debug, Clone, PartialEq)]
pub struct MixWeights<K: Ord> {
    weights: BTreeMap<K, f64>,
    pub sum: f64,
    pub is_valid: bool,
}

impl<K: Ord> MixWeights<K> {
    /// Weight for `key`, or 0 when the mix has no entry for it.
    pub fn weight(&self, key: &K) -> f64 {
        self.weights.get(key).copied().unwrap_or(0.0)
    }

    /// Sum of all weights; 1.0 exactly when the raw mix sums to 100.
    pub fn total(&self) -> f64 {
        self.weights.values().sum()
    }
}

/// Converts raw percents into `value / 100` weights and reports the raw sum.
///
/// A mix that sums to 90 keeps weights summing to 0.9; nothing is rescaled.
pub fn normalize_mix<K, I>(entries: I) -> MixWeights<K>
where
    K: Ord,
    I: IntoIterator<Item = (K, f64)>,
{
    let mut weights = BTreeMap::new();
    let mut sum = 0.0;
    for (key, value) in entries {
        sum += value;
        weights.insert(key, value / PERCENT_SCALE);
    }

    MixWeights {
        weights,
        sum,
        is_valid: is_valid_sum(sum),
    }
}

pub fn is_valid_sum(sum: f64) -> bool {
    (sum - PERCENT_SCALE).abs() < MIX_TOLERANCE
}
