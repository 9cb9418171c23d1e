use std::collections::VecDeque;

/// Rolling history of one metric, oldest sample first, for sparkline
/// rendering.
///
/// Never holds more than `capacity` samples; pushing onto a full series
/// evicts the oldest one.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSeries {
    samples:  VecDeque<f64>,
    capacity: usize,
}

impl MetricSeries {
    /// A capacity of zero is bumped to one so every series can show its
    /// latest value.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a new sample, evicting the oldest if at capacity.
    pub fn push(&mut self, value: f64) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(value);
    }

    /// Most recent sample, if any.
    pub fn latest(&self) -> Option<f64> {
        self.samples.back().copied()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().copied()
    }

    /// Copy of the samples in chronological order.
    pub fn values(&self) -> Vec<f64> {
        self.iter().collect()
    }

    /// Average of all samples in the history window.
    pub fn average(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples.iter().sum::<f64>() / self.samples.len() as f64
    }
}

/// `series` with `value` appended under the sliding-window rule. The input
/// is left untouched.
#[must_use]
pub fn append(series: &MetricSeries, value: f64) -> MetricSeries {
    let mut next = series.clone();
    next.push(value);
    next
}
