pub mod error;
pub mod event;
pub mod metric;
pub mod render;
pub mod source;
pub mod state;

pub use error::{HudError, Result};
pub use event::{PollEvent, TimerId};
pub use metric::{CounterPolicy, Metric, MetricKind, ValueFormat};
pub use render::{RenderTargets, Sparkline};
pub use source::SnapshotSource;
pub use state::{ClusterSnapshot, Counters};
