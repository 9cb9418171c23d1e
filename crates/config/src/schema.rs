use hud_core::{CounterPolicy, HudError, Result};
use serde::{Deserialize, Serialize};

/// Root configuration structure parsed from `hud.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HudConfig {
    /// Where snapshots come from.
    pub source: SourceConfig,
    /// Sampling, smoothing and redraw cadence.
    pub engine: EngineConfig,
}

impl HudConfig {
    /// Reject settings the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        self.source.validate()?;
        self.engine.validate()
    }
}

/// Snapshot transport settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Cluster statistics endpoint.
    pub endpoint: String,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            endpoint:   "http://localhost:8080/v1/cluster".to_string(),
            timeout_ms: 5_000,
        }
    }
}

impl SourceConfig {
    fn validate(&self) -> Result<()> {
        if self.endpoint.trim().is_empty() {
            return Err(HudError::Config("source.endpoint must not be empty".into()));
        }
        if self.timeout_ms == 0 {
            return Err(HudError::Config("source.timeout_ms must be positive".into()));
        }
        Ok(())
    }
}

/// Engine tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Delay between the end of one poll cycle and the start of the next.
    pub poll_interval_ms: u64,
    /// Minimum spacing between two redraws.
    pub render_interval_ms: u64,
    /// Samples kept per series (300 = five minutes at one per second).
    pub history_capacity: usize,
    /// EWMA weight of the newest sample, in `(0, 1)`.
    pub smoothing_alpha: f64,
    /// Handling of counter resets and empty worker pools.
    pub counter_policy: CounterPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms:   1_000,
            render_interval_ms: 1_000,
            history_capacity:   300,
            smoothing_alpha:    0.2,
            counter_policy:     CounterPolicy::Skip,
        }
    }
}

impl EngineConfig {
    fn validate(&self) -> Result<()> {
        if self.poll_interval_ms == 0 {
            return Err(HudError::Config("engine.poll_interval_ms must be positive".into()));
        }
        if self.render_interval_ms == 0 {
            return Err(HudError::Config("engine.render_interval_ms must be positive".into()));
        }
        if self.history_capacity == 0 {
            return Err(HudError::Config("engine.history_capacity must be positive".into()));
        }
        if !(self.smoothing_alpha > 0.0 && self.smoothing_alpha < 1.0) {
            return Err(HudError::Config(format!(
                "engine.smoothing_alpha must be in (0, 1), got {}",
                self.smoothing_alpha
            )));
        }
        Ok(())
    }
}
