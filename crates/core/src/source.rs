use crate::{state::ClusterSnapshot, Result};
use std::future::Future;

/// Fetches one [`ClusterSnapshot`] per poll cycle.
///
/// Implementations stamp the snapshot's capture time. A failed fetch is
/// never fatal: the engine logs it and retries on the next interval.
pub trait SnapshotSource {
    fn fetch(&mut self) -> impl Future<Output = Result<ClusterSnapshot>>;
}
