/// A closed parameter range `[min, max]` along a ray.
///
/// The renderer uses it for the camera's near/far bracket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    /// Create a new interval given min and max values.
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Returns the size of the interval (max - min).
    pub fn size(&self) -> f32 {
        self.max - self.min
    }

    /// Returns true if x is within the interval [min, max] (inclusive).
    pub fn contains(&self, x: f32) -> bool {
        self.min <= x && x <= self.max
    }

    /// Returns true if the interval has no positive length.
    pub fn is_empty(&self) -> bool {
        !(self.max > self.min)
    }

    /// Number of whole steps of length `dt` that fit in the interval.
    ///
    /// Empty intervals and non-positive or non-finite step sizes give zero.
    /// Counts too large for `usize` saturate at `usize::MAX`.
    pub fn steps(&self, dt: f32) -> usize {
        if self.is_empty() || !(dt > 0.0) || !dt.is_finite() {
            return 0;
        }
        let n = self.size() / dt;
        if n.is_finite() { n as usize } else { 0 }
    }
}
