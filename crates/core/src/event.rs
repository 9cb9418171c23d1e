use crate::state::ClusterSnapshot;

/// Identifies one armed poll timer. Ids only grow, so a timer that fires
/// after it was superseded can be recognised and ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(pub u64);

/// Events that drive the poll state machine.
///
/// Sources:
/// - Armed timer           → `TimerFired`
/// - Snapshot source       → `FetchSucceeded`, `FetchFailed`
/// - Hosting view          → `Terminate`
#[derive(Debug, Clone)]
pub enum PollEvent {
    /// The timer with this id elapsed.
    TimerFired(TimerId),
    /// A snapshot arrived for the in-flight request.
    FetchSucceeded(ClusterSnapshot),
    /// The in-flight request failed; carries the rendered error for logging.
    FetchFailed(String),
    /// The hosting view is no longer active.
    Terminate,
}
