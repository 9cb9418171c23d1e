use crate::{
    ewma::Ewma,
    history::MetricSeries,
    rate::{RateCalculator, Rates},
};
use hud_core::{ClusterSnapshot, Metric, MetricKind};
use tracing::debug;

/// Whether the hosting view still wants updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Liveness {
    Active,
    Terminated,
}

/// Everything the panel remembers between poll cycles.
///
/// Owned by the engine; renderers only get read access to the series.
#[derive(Debug, Clone)]
pub struct EngineState {
    series:         [MetricSeries; Metric::COUNT],
    previous:       Option<ClusterSnapshot>,
    last_fetch_ms:  Option<i64>,
    last_render_ms: Option<i64>,
    liveness:       Liveness,
    cycles:         u64,
    ewma:           Ewma,
    rates:          RateCalculator,
}

impl EngineState {
    pub fn new(capacity: usize, ewma: Ewma, rates: RateCalculator) -> Self {
        Self {
            series:         std::array::from_fn(|_| MetricSeries::new(capacity)),
            previous:       None,
            last_fetch_ms:  None,
            last_render_ms: None,
            liveness:       Liveness::Active,
            cycles:         0,
            ewma,
            rates,
        }
    }

    /// Fold one snapshot into every series.
    ///
    /// Returns `false` without touching anything once the state has been
    /// terminated; late fetch completions are expected and harmless.
    pub fn apply(&mut self, snapshot: ClusterSnapshot) -> bool {
        if self.liveness == Liveness::Terminated {
            debug!("Dropping snapshot that arrived after termination");
            return false;
        }

        // No previous snapshot means no rate this cycle; rate series only
        // start once two samples exist.
        let rates = match &self.previous {
            Some(previous) => {
                let outcome = self.rates.compute(
                    &previous.counters(),
                    &snapshot.counters(),
                    snapshot.active_workers,
                );
                for anomaly in &outcome.anomalies {
                    debug!(policy = ?self.rates.policy(), "Rate anomaly: {anomaly}");
                }
                outcome.rates
            }
            None => Rates::default(),
        };

        for metric in Metric::ALL {
            let series = &mut self.series[metric.index()];
            match metric.kind() {
                MetricKind::Instant => series.push(instant_value(&snapshot, metric)),
                MetricKind::Smoothed => self.ewma.push(series, instant_value(&snapshot, metric)),
                MetricKind::Rate => {
                    if let Some(rate) = rates.get(metric) {
                        self.ewma.push(series, rate);
                    }
                }
            }
        }

        self.last_fetch_ms = Some(snapshot.captured_at_ms);
        self.previous = Some(snapshot);
        self.cycles += 1;
        debug!(cycle = self.cycles, "Applied cluster snapshot");
        true
    }

    /// Stop accepting snapshots. Irreversible.
    pub fn terminate(&mut self) {
        self.liveness = Liveness::Terminated;
    }

    pub fn liveness(&self) -> Liveness {
        self.liveness
    }

    pub fn is_active(&self) -> bool {
        self.liveness == Liveness::Active
    }

    pub fn series(&self, metric: Metric) -> &MetricSeries {
        &self.series[metric.index()]
    }

    /// Current value of a metric, i.e. its newest sample.
    pub fn latest(&self, metric: Metric) -> Option<f64> {
        self.series(metric).latest()
    }

    pub fn previous(&self) -> Option<&ClusterSnapshot> {
        self.previous.as_ref()
    }

    /// Capture time of the last applied snapshot.
    pub fn last_fetch_ms(&self) -> Option<i64> {
        self.last_fetch_ms
    }

    pub fn last_render_ms(&self) -> Option<i64> {
        self.last_render_ms
    }

    pub fn record_render(&mut self, at_ms: i64) {
        self.last_render_ms = Some(at_ms);
    }

    /// Number of snapshots applied so far.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::new(300, Ewma::default(), RateCalculator::default())
    }
}

fn instant_value(snapshot: &ClusterSnapshot, metric: Metric) -> f64 {
    match metric {
        Metric::RunningQueries => snapshot.running_queries as f64,
        Metric::QueuedQueries  => snapshot.queued_queries as f64,
        Metric::BlockedQueries => snapshot.blocked_queries as f64,
        Metric::ActiveWorkers  => snapshot.active_workers as f64,
        Metric::ClusterCount   => snapshot.cluster_count as f64,
        Metric::RunningDrivers => snapshot.running_drivers,
        Metric::ReservedMemory => snapshot.reserved_memory,
        Metric::RowInputRate | Metric::ByteInputRate | Metric::CpuTimeRate => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hud_core::CounterPolicy;

    fn snapshot(at_ms: i64, rows: u64, bytes: u64, cpu_secs: u64, workers: u64) -> ClusterSnapshot {
        ClusterSnapshot {
            running_queries: 4,
            queued_queries: 2,
            blocked_queries: 1,
            active_workers: workers,
            cluster_count: 1,
            running_drivers: 64.0,
            reserved_memory: 2_048.0,
            total_input_rows: rows,
            total_input_bytes: bytes,
            total_cpu_time_secs: cpu_secs,
            captured_at_ms: at_ms,
        }
    }

    const RATES: [Metric; 3] = [Metric::RowInputRate, Metric::ByteInputRate, Metric::CpuTimeRate];

    #[test]
    fn first_cycle_fills_instant_series_only() {
        let mut state = EngineState::default();
        assert!(state.apply(snapshot(0, 0, 0, 0, 2)));

        for metric in Metric::ALL {
            let expected = if metric.kind() == MetricKind::Rate { 0 } else { 1 };
            assert_eq!(state.series(metric).len(), expected, "{metric}");
        }
        assert_eq!(state.latest(Metric::RunningQueries), Some(4.0));
        assert_eq!(state.latest(Metric::ReservedMemory), Some(2_048.0));
        assert_eq!(state.last_fetch_ms(), Some(0));
    }

    #[test]
    fn second_cycle_derives_rates_from_cold_start() {
        let mut state = EngineState::default();
        state.apply(snapshot(0, 0, 0, 0, 2));
        state.apply(snapshot(2_000, 200, 4_096, 4, 2));

        assert_eq!(state.series(Metric::RowInputRate).values(), vec![100.0]);
        assert_eq!(state.series(Metric::ByteInputRate).values(), vec![2_048.0]);
        assert_eq!(state.series(Metric::CpuTimeRate).values(), vec![1.0]);
        assert_eq!(state.previous().map(|s| s.captured_at_ms), Some(2_000));
        assert_eq!(state.cycles(), 2);
    }

    #[test]
    fn later_rates_are_smoothed() {
        let mut state = EngineState::default();
        state.apply(snapshot(0, 0, 0, 0, 1));
        state.apply(snapshot(1_000, 100, 0, 0, 1));
        state.apply(snapshot(2_000, 300, 0, 0, 1));

        // 0.2 * 200 + 0.8 * 100
        let latest = state.latest(Metric::RowInputRate).unwrap();
        assert!((latest - 120.0).abs() < 1e-9);
    }

    #[test]
    fn counter_reset_skips_only_rate_series() {
        let mut state = EngineState::default();
        state.apply(snapshot(0, 1_000, 1_000, 10, 1));
        state.apply(snapshot(1_000, 10, 2_000, 11, 1));

        assert!(state.series(Metric::RowInputRate).is_empty());
        assert_eq!(state.series(Metric::ByteInputRate).len(), 1);
        assert_eq!(state.series(Metric::RunningQueries).len(), 2);
    }

    #[test]
    fn zero_elapsed_appends_no_rates() {
        let mut state =
            EngineState::new(10, Ewma::default(), RateCalculator::new(CounterPolicy::Clamp));
        state.apply(snapshot(500, 0, 0, 0, 1));
        state.apply(snapshot(500, 10, 10, 10, 1));

        for metric in RATES {
            assert!(state.series(metric).is_empty(), "{metric}");
        }
        assert_eq!(state.cycles(), 2);
    }

    #[test]
    fn apply_after_terminate_is_a_no_op() {
        let mut state = EngineState::default();
        state.apply(snapshot(0, 0, 0, 0, 1));
        state.terminate();

        assert!(!state.apply(snapshot(1_000, 10, 10, 10, 1)));
        assert_eq!(state.cycles(), 1);
        assert_eq!(state.series(Metric::ActiveWorkers).len(), 1);
        assert!(state.series(Metric::RowInputRate).is_empty());
        assert_eq!(state.liveness(), Liveness::Terminated);
    }

    #[test]
    fn series_respect_capacity() {
        let mut state = EngineState::new(5, Ewma::default(), RateCalculator::default());
        for i in 0..20 {
            state.apply(snapshot(i * 1_000, (i * 10) as u64, 0, 0, 1));
        }
        for metric in Metric::ALL {
            assert!(state.series(metric).len() <= 5, "{metric}");
        }
        assert_eq!(state.series(Metric::RowInputRate).len(), 5);
    }
}
