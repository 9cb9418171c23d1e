use chrono::Utc;
use serde::{Deserialize, Serialize};

/// One atomic sample of cluster-wide metrics.
///
/// Field names follow the camelCase JSON served by the cluster endpoint.
/// Unknown fields are ignored and missing ones default to zero so that older
/// or newer coordinators still decode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClusterSnapshot {
    // ── Instantaneous counts ─────────────────────────────────────────────────
    pub running_queries: u64,
    pub queued_queries:  u64,
    pub blocked_queries: u64,
    pub active_workers:  u64,
    pub cluster_count:   u64,
    pub running_drivers: f64,
    /// Reserved memory across the cluster, in bytes.
    pub reserved_memory: f64,

    // ── Cumulative counters ──────────────────────────────────────────────────
    pub total_input_rows:    u64,
    pub total_input_bytes:   u64,
    pub total_cpu_time_secs: u64,

    /// Capture time in Unix milliseconds. Stamped by the fetcher, never
    /// read from the wire.
    #[serde(skip)]
    pub captured_at_ms: i64,
}

impl ClusterSnapshot {
    /// Stamp the snapshot with the current wall-clock time.
    #[must_use]
    pub fn stamped_now(self) -> Self {
        self.stamped_at(Utc::now().timestamp_millis())
    }

    #[must_use]
    pub fn stamped_at(mut self, captured_at_ms: i64) -> Self {
        self.captured_at_ms = captured_at_ms;
        self
    }

    /// The cumulative counters of this snapshot, paired with its capture time.
    #[must_use]
    pub fn counters(&self) -> Counters {
        Counters {
            rows:     self.total_input_rows,
            bytes:    self.total_input_bytes,
            cpu_secs: self.total_cpu_time_secs,
            at_ms:    self.captured_at_ms,
        }
    }
}

/// Cumulative counters captured at a point in time; the input of a rate
/// calculation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    pub rows:     u64,
    pub bytes:    u64,
    pub cpu_secs: u64,
    pub at_ms:    i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_cluster_endpoint_json() {
        let raw = r#"{
            "runningQueries": 3,
            "blockedQueries": 1,
            "queuedQueries": 7,
            "activeCoordinators": 1,
            "activeWorkers": 12,
            "runningDrivers": 420,
            "totalAvailableProcessors": 96,
            "reservedMemory": 1073741824.0,
            "totalInputRows": 1500,
            "totalInputBytes": 65536,
            "totalCpuTimeSecs": 88,
            "adjustedQueueSize": 0
        }"#;

        let snapshot: ClusterSnapshot = serde_json::from_str(raw).unwrap();
        assert_eq!(snapshot.running_queries, 3);
        assert_eq!(snapshot.queued_queries, 7);
        assert_eq!(snapshot.active_workers, 12);
        assert_eq!(snapshot.reserved_memory, 1_073_741_824.0);
        assert_eq!(snapshot.total_cpu_time_secs, 88);
        // Absent on single-cluster deployments.
        assert_eq!(snapshot.cluster_count, 0);
        assert_eq!(snapshot.captured_at_ms, 0);
    }

    #[test]
    fn counters_carry_capture_time() {
        let snapshot = ClusterSnapshot {
            total_input_rows: 200,
            total_input_bytes: 4096,
            total_cpu_time_secs: 4,
            ..Default::default()
        }
        .stamped_at(2_000);

        assert_eq!(
            snapshot.counters(),
            Counters { rows: 200, bytes: 4096, cpu_secs: 4, at_ms: 2_000 }
        );
    }
}
