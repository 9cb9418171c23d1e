use crate::history::MetricSeries;

/// Weight of the newest sample. Lower values give a smoother line.
pub const DEFAULT_ALPHA: f64 = 0.2;

/// Exponentially weighted moving average over a series' latest value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ewma {
    alpha: f64,
}

impl Ewma {
    /// `alpha` is clamped into `(0, 1]`; non-finite values fall back to
    /// [`DEFAULT_ALPHA`].
    pub fn new(alpha: f64) -> Self {
        let alpha = if alpha.is_finite() && alpha > 0.0 {
            alpha.min(1.0)
        } else {
            DEFAULT_ALPHA
        };
        Self { alpha }
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Next smoothed value given the previous one. A cold start (no previous
    /// value) returns `raw` unchanged.
    pub fn next(&self, previous: Option<f64>, raw: f64) -> f64 {
        match previous {
            None       => raw,
            Some(last) => self.alpha * raw + (1.0 - self.alpha) * last,
        }
    }

    /// Smooth `raw` against the series' last value and push the result.
    pub fn push(&self, series: &mut MetricSeries, raw: f64) {
        let value = self.next(series.latest(), raw);
        series.push(value);
    }
}

impl Default for Ewma {
    fn default() -> Self {
        Self::new(DEFAULT_ALPHA)
    }
}

/// `series` with the smoothed form of `raw` appended. The input is left
/// untouched.
#[must_use]
pub fn append_smoothed(series: &MetricSeries, raw: f64, ewma: &Ewma) -> MetricSeries {
    let mut next = series.clone();
    ewma.push(&mut next, raw);
    next
}
