use hud_core::{CounterPolicy, Counters, Metric};
use std::fmt;

/// Per-second rates derived from two consecutive snapshots.
///
/// `None` means the rate was skipped this cycle and nothing should be
/// appended to its series.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rates {
    pub rows:     Option<f64>,
    pub bytes:    Option<f64>,
    pub cpu_time: Option<f64>,
}

impl Rates {
    /// Rate for one of the rate metrics; `None` for any other metric.
    pub fn get(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::RowInputRate  => self.rows,
            Metric::ByteInputRate => self.bytes,
            Metric::CpuTimeRate   => self.cpu_time,
            _ => None,
        }
    }
}

/// Degenerate input seen while computing rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateAnomaly {
    /// The two snapshots were taken at the same instant, or out of order.
    NonPositiveElapsed { elapsed_ms: i64 },
    /// A cumulative counter went backwards, usually a coordinator restart.
    CounterDecreased { metric: Metric, previous: u64, current: u64 },
    /// No active workers to spread CPU time over.
    NoWorkers,
}

impl fmt::Display for RateAnomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveElapsed { elapsed_ms } => {
                write!(f, "non-positive elapsed time ({elapsed_ms} ms)")
            }
            Self::CounterDecreased { metric, previous, current } => {
                write!(f, "{metric} counter decreased from {previous} to {current}")
            }
            Self::NoWorkers => f.write_str("no active workers"),
        }
    }
}

/// Result of one rate calculation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateOutcome {
    pub rates:     Rates,
    pub anomalies: Vec<RateAnomaly>,
}

/// Turns cumulative counters into per-second rates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RateCalculator {
    policy: CounterPolicy,
}

impl RateCalculator {
    pub fn new(policy: CounterPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> CounterPolicy {
        self.policy
    }

    /// Rates between `previous` and `current`, given the worker count of the
    /// current snapshot.
    ///
    /// A non-positive elapsed time skips every rate whatever the policy.
    /// Counter decreases and an empty worker pool follow the policy and only
    /// affect their own series.
    pub fn compute(&self, previous: &Counters, current: &Counters, workers: u64) -> RateOutcome {
        let mut anomalies = Vec::new();

        let elapsed_ms = current.at_ms - previous.at_ms;
        if elapsed_ms <= 0 {
            anomalies.push(RateAnomaly::NonPositiveElapsed { elapsed_ms });
            return RateOutcome { rates: Rates::default(), anomalies };
        }
        let elapsed = elapsed_ms as f64 / 1000.0;

        let rows = self.delta(Metric::RowInputRate, previous.rows, current.rows, &mut anomalies)
            .map(|d| d / elapsed);
        let bytes = self.delta(Metric::ByteInputRate, previous.bytes, current.bytes, &mut anomalies)
            .map(|d| d / elapsed);

        let cpu_delta =
            self.delta(Metric::CpuTimeRate, previous.cpu_secs, current.cpu_secs, &mut anomalies);
        let cpu_time = match cpu_delta {
            Some(_) if workers == 0 => {
                anomalies.push(RateAnomaly::NoWorkers);
                self.degenerate()
            }
            Some(d) => Some((d / workers as f64) / elapsed),
            None => None,
        };

        RateOutcome {
            rates: Rates { rows, bytes, cpu_time },
            anomalies,
        }
    }

    /// Counter increase as `f64`, or the policy's answer for a decrease.
    fn delta(
        &self,
        metric: Metric,
        previous: u64,
        current: u64,
        anomalies: &mut Vec<RateAnomaly>,
    ) -> Option<f64> {
        match current.checked_sub(previous) {
            Some(d) => Some(d as f64),
            None => {
                anomalies.push(RateAnomaly::CounterDecreased { metric, previous, current });
                self.degenerate()
            }
        }
    }

    fn degenerate(&self) -> Option<f64> {
        match self.policy {
            CounterPolicy::Skip  => None,
            CounterPolicy::Clamp => Some(0.0),
        }
    }
}
