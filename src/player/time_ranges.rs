//! Buffered time ranges
//!
//! Ordered, non-overlapping `[start, end)` second-intervals, the shape a
//! media element reports its buffered data in.

/// Non-contiguous chronological ranges of time, in seconds.
/// Always sorted by start and non-overlapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BufferedRanges {
    ranges: Vec<(f64, f64)>,
}

impl BufferedRanges {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from arbitrary `(start, end)` pairs, merging overlaps.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (f64, f64)>) -> Self {
        let mut ranges = BufferedRanges::new();
        for (start, end) in pairs {
            ranges.add(start, end);
        }
        ranges
    }

    /// Add a range, merging it with the ranges already there.
    /// Empty or inverted ranges are ignored.
    pub fn add(&mut self, start: f64, end: f64) {
        if !start.is_finite() || !end.is_finite() || end <= start {
            return;
        }
        let start = start.max(0.0);

        self.ranges.push((start, end));
        self.ranges.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut merged: Vec<(f64, f64)> = Vec::with_capacity(self.ranges.len());
        for (s, e) in self.ranges.drain(..) {
            match merged.last_mut() {
                Some(last) if s <= last.1 => last.1 = last.1.max(e),
                _ => merged.push((s, e)),
            }
        }
        self.ranges = merged;
    }

    /// Clamp every range to `[0, max]`, dropping ranges that fall empty.
    pub fn clamp_to(&mut self, max: f64) {
        self.ranges
            .retain_mut(|(start, end)| {
                *start = start.min(max);
                *end = end.min(max);
                *end > *start
            });
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn start(&self, idx: usize) -> Option<f64> {
        self.ranges.get(idx).map(|r| r.0)
    }

    pub fn end(&self, idx: usize) -> Option<f64> {
        self.ranges.get(idx).map(|r| r.1)
    }

    /// Whether the given position falls inside a buffered range.
    pub fn contains(&self, pos: f64) -> bool {
        self.ranges.iter().any(|&(s, e)| pos >= s && pos < e)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(f64, f64)> {
        self.ranges.iter()
    }

    pub fn clear(&mut self) {
        self.ranges.clear();
    }
}
