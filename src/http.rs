use hud_config::SourceConfig;
use hud_core::{ClusterSnapshot, HudError, Result, SnapshotSource};
use std::time::Duration;

/// Polls the coordinator's cluster statistics endpoint over HTTP.
pub struct HttpSource {
    client:   reqwest::Client,
    endpoint: String,
}

impl HttpSource {
    pub fn new(config: &SourceConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| HudError::Fetch(format!("build client: {e}")))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }
}

impl SnapshotSource for HttpSource {
    async fn fetch(&mut self) -> Result<ClusterSnapshot> {
        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| HudError::Fetch(format!("GET {}: {e}", self.endpoint)))?;

        let snapshot: ClusterSnapshot = response
            .json()
            .await
            .map_err(|e| HudError::Decode(format!("cluster snapshot: {e}")))?;

        Ok(snapshot.stamped_now())
    }
}
