use hud_core::{ClusterSnapshot, PollEvent, TimerId};
use std::time::Duration;
use tracing::{debug, warn};

/// Where the poll loop currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    /// Waiting for the armed timer.
    Idle,
    /// A snapshot request is in flight.
    Fetching,
    /// A snapshot arrived and is being folded into the engine state.
    Applying,
    /// The request failed; the state is left alone and the timer re-armed.
    Retrying,
    /// The hosting view went away. Nothing leaves this state.
    Terminated,
}

/// A timer the driver should start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    pub id:    TimerId,
    pub delay: Duration,
}

/// What the driver must do after feeding an event to the scheduler.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Nothing; the event was stale or arrived in the wrong state.
    Ignore,
    /// Issue one snapshot request.
    Fetch,
    /// Fold this snapshot into the engine state, then call
    /// [`PollScheduler::complete`].
    Apply(ClusterSnapshot),
    /// Leave the engine state untouched, then call
    /// [`PollScheduler::complete`].
    Retry,
    /// Tear down; no timer is armed any more.
    Halt,
}

/// Self-rescheduling poll timer as an explicit state machine.
///
/// At most one timer is armed at a time. Arming a new one supersedes the
/// previous id, so a duplicate or late firing is recognised and ignored.
/// Intervals run from the end of a cycle, never from its start, so two
/// requests can't overlap.
#[derive(Debug, Clone)]
pub struct PollScheduler {
    state:    PollState,
    armed:    Option<TimerId>,
    next_id:  u64,
    interval: Duration,
}

impl PollScheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            state:    PollState::Idle,
            armed:    None,
            next_id:  0,
            interval,
        }
    }

    pub fn state(&self) -> PollState {
        self.state
    }

    /// Id of the timer that is currently allowed to fire.
    pub fn armed(&self) -> Option<TimerId> {
        self.armed
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Arm the first timer with no delay so the panel fills right away.
    pub fn start(&mut self) -> Option<Timer> {
        self.arm_after(Duration::ZERO)
    }

    /// Feed one event and get back what the driver has to do.
    pub fn on_event(&mut self, event: PollEvent) -> Command {
        match (self.state, event) {
            (PollState::Terminated, PollEvent::Terminate) => Command::Halt,
            (PollState::Terminated, _) => {
                debug!("Ignoring poll event after termination");
                Command::Ignore
            }
            (_, PollEvent::Terminate) => {
                self.state = PollState::Terminated;
                self.armed = None;
                Command::Halt
            }
            (PollState::Idle, PollEvent::TimerFired(id)) if self.armed == Some(id) => {
                self.armed = None;
                self.state = PollState::Fetching;
                Command::Fetch
            }
            (_, PollEvent::TimerFired(id)) => {
                debug!(timer = id.0, armed = ?self.armed, "Ignoring stale poll timer");
                Command::Ignore
            }
            (PollState::Fetching, PollEvent::FetchSucceeded(snapshot)) => {
                self.state = PollState::Applying;
                Command::Apply(snapshot)
            }
            (PollState::Fetching, PollEvent::FetchFailed(reason)) => {
                warn!("Cluster snapshot fetch failed: {reason}; retrying in {:?}", self.interval);
                self.state = PollState::Retrying;
                Command::Retry
            }
            (state, _) => {
                debug!(?state, "Ignoring fetch result with no request in flight");
                Command::Ignore
            }
        }
    }

    /// Finish an `Applying` or `Retrying` cycle: re-arm while the view is
    /// still live, otherwise terminate.
    pub fn complete(&mut self, live: bool) -> Option<Timer> {
        match self.state {
            PollState::Applying | PollState::Retrying if live => self.arm_after(self.interval),
            PollState::Applying | PollState::Retrying => {
                self.state = PollState::Terminated;
                self.armed = None;
                None
            }
            _ => None,
        }
    }

    fn arm_after(&mut self, delay: Duration) -> Option<Timer> {
        if self.state == PollState::Terminated {
            return None;
        }
        // Replacing the id cancels whatever timer was armed before.
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.armed = Some(id);
        self.state = PollState::Idle;
        Some(Timer { id, delay })
    }
}
