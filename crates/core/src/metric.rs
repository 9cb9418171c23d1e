use serde::{Deserialize, Serialize};
use std::fmt;

/// Every series tracked by the HUD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Metric {
    // ── Raw history ──────────────────────────────────────────────────────────
    RunningQueries,
    QueuedQueries,
    BlockedQueries,
    ActiveWorkers,
    ClusterCount,

    // ── Moving averages ──────────────────────────────────────────────────────
    RunningDrivers,
    ReservedMemory,

    // ── Moving averages of counter deltas ────────────────────────────────────
    RowInputRate,
    ByteInputRate,
    CpuTimeRate,
}

/// How a series is fed from a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    /// Raw instantaneous value, appended as is.
    Instant,
    /// Instantaneous value passed through the EWMA smoother.
    Smoothed,
    /// Per-second rate derived from two snapshots, then smoothed.
    Rate,
}

/// Display formatter a renderer should use for a metric's values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueFormat {
    Integer,
    Decimal,
    Count,
    Bytes,
}

impl Metric {
    pub const COUNT: usize = 10;

    pub const ALL: [Metric; Metric::COUNT] = [
        Metric::RunningQueries,
        Metric::QueuedQueries,
        Metric::BlockedQueries,
        Metric::ActiveWorkers,
        Metric::ClusterCount,
        Metric::RunningDrivers,
        Metric::ReservedMemory,
        Metric::RowInputRate,
        Metric::ByteInputRate,
        Metric::CpuTimeRate,
    ];

    /// Stable snake_case identifier, e.g. `"row_input_rate"`.
    pub fn name(self) -> &'static str {
        match self {
            Metric::RunningQueries => "running_queries",
            Metric::QueuedQueries  => "queued_queries",
            Metric::BlockedQueries => "blocked_queries",
            Metric::ActiveWorkers  => "active_workers",
            Metric::ClusterCount   => "cluster_count",
            Metric::RunningDrivers => "running_drivers",
            Metric::ReservedMemory => "reserved_memory",
            Metric::RowInputRate   => "row_input_rate",
            Metric::ByteInputRate  => "byte_input_rate",
            Metric::CpuTimeRate    => "cpu_time_rate",
        }
    }

    /// Human-readable title for panel headings.
    pub fn title(self) -> &'static str {
        match self {
            Metric::RunningQueries => "Running queries",
            Metric::QueuedQueries  => "Queued queries",
            Metric::BlockedQueries => "Blocked queries",
            Metric::ActiveWorkers  => "Active workers",
            Metric::ClusterCount   => "Cluster count",
            Metric::RunningDrivers => "Running drivers",
            Metric::ReservedMemory => "Reserved memory",
            Metric::RowInputRate   => "Rows/sec",
            Metric::ByteInputRate  => "Bytes/sec",
            Metric::CpuTimeRate    => "Worker parallelism",
        }
    }

    pub fn kind(self) -> MetricKind {
        match self {
            Metric::RunningQueries
            | Metric::QueuedQueries
            | Metric::BlockedQueries
            | Metric::ActiveWorkers
            | Metric::ClusterCount => MetricKind::Instant,
            Metric::RunningDrivers | Metric::ReservedMemory => MetricKind::Smoothed,
            Metric::RowInputRate | Metric::ByteInputRate | Metric::CpuTimeRate => {
                MetricKind::Rate
            }
        }
    }

    pub fn value_format(self) -> ValueFormat {
        match self {
            Metric::RunningDrivers | Metric::CpuTimeRate => ValueFormat::Decimal,
            Metric::ReservedMemory | Metric::ByteInputRate => ValueFormat::Bytes,
            Metric::RowInputRate => ValueFormat::Count,
            _ => ValueFormat::Integer,
        }
    }

    /// Raw counts are charted from zero so a flat line at 3 doesn't look busy.
    pub fn range_floor(self) -> Option<f64> {
        match self.kind() {
            MetricKind::Instant => Some(0.0),
            _ => None,
        }
    }

    /// Position of this metric in [`Metric::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What the rate calculator does with a decreasing counter or a zero worker
/// count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CounterPolicy {
    /// Leave the affected series untouched for this cycle.
    #[default]
    Skip,
    /// Append `0.0` to the affected series.
    Clamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_is_in_index_order() {
        for (i, metric) in Metric::ALL.iter().enumerate() {
            assert_eq!(metric.index(), i, "{metric}");
        }
    }

    #[test]
    fn kinds_partition_the_catalogue() {
        let count = |kind| Metric::ALL.iter().filter(|m| m.kind() == kind).count();
        assert_eq!(count(MetricKind::Instant), 5);
        assert_eq!(count(MetricKind::Smoothed), 2);
        assert_eq!(count(MetricKind::Rate), 3);
    }

    #[test]
    fn only_raw_counts_are_floored() {
        assert_eq!(Metric::QueuedQueries.range_floor(), Some(0.0));
        assert_eq!(Metric::ReservedMemory.range_floor(), None);
        assert_eq!(Metric::ByteInputRate.range_floor(), None);
    }
}
