//! Upload progress arithmetic.

/// Percentage of `total` covered by `loaded`, rounded half up.
///
/// Returns `None` when the total is unknown (zero). `loaded` beyond `total`
/// is clamped, so the result is always within `0..=100`.
pub fn percent(loaded: u64, total: u64) -> Option<u8> {
    if total == 0 {
        return None;
    }
    let loaded = u128::from(loaded.min(total));
    let total = u128::from(total);
    // round(loaded * 100 / total) == floor((loaded * 200 + total) / (2 * total))
    let pct = (loaded * 200 + total) / (total * 2);
    Some(pct as u8)
}

/// Turns a stream of raw byte counts into progress events for one
/// submission.
///
/// Emits a percentage only when it is greater than the last emitted one,
/// so consumers see a strictly increasing sequence.
#[derive(Debug, Default)]
pub struct ProgressTracker {
    last: Option<u8>,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, loaded: u64, total: u64) -> Option<u8> {
        let pct = percent(loaded, total)?;
        match self.last {
            Some(last) if pct <= last => None,
            _ => {
                self.last = Some(pct);
                Some(pct)
            }
        }
    }

    pub fn last(&self) -> Option<u8> {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_way_is_fifty() {
        assert_eq!(percent(500, 1000), Some(50));
    }

    #[test]
    fn rounds_half_up() {
        assert_eq!(percent(1, 200), Some(1));
        assert_eq!(percent(1, 201), Some(0));
        assert_eq!(percent(2, 3), Some(67));
    }

    #[test]
    fn unknown_total_reports_nothing() {
        assert_eq!(percent(10, 0), None);
        assert_eq!(ProgressTracker::new().observe(10, 0), None);
    }

    #[test]
    fn overshoot_is_clamped() {
        assert_eq!(percent(1500, 1000), Some(100));
        assert_eq!(percent(u64::MAX, u64::MAX), Some(100));
    }

    #[test]
    fn tracker_emits_only_increases() {
        let mut tracker = ProgressTracker::new();
        let emitted: Vec<u8> = [(0, 100), (0, 100), (40, 100), (30, 100), (40, 100), (100, 100)]
            .into_iter()
            .filter_map(|(l, t)| tracker.observe(l, t))
            .collect();
        assert_eq!(emitted, [0, 40, 100]);
        assert_eq!(tracker.last(), Some(100));
    }
}
