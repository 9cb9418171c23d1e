//! Poll loop for the cluster HUD.
//!
//! Owns the [`EngineState`] and wires together:
//! - the poll state machine (one armed timer, one request in flight)
//! - the host's [`SnapshotSource`]
//! - the render throttle and the host's [`RenderTargets`]
//! - the lifecycle signal that ends polling

pub mod lifecycle;
pub mod scheduler;
pub mod throttle;

pub use lifecycle::{lifecycle, Lifecycle, LifecycleHandle};
pub use scheduler::{Command, PollScheduler, PollState, Timer};
pub use throttle::RenderThrottle;

use hud_config::EngineConfig;
use hud_core::{PollEvent, RenderTargets, SnapshotSource, TimerId};
use hud_metrics::{EngineState, Ewma, RateCalculator};
use std::time::Duration;
use tokio::time::{self, Instant};
use tracing::{debug, info};

/// What the loop does after one event.
enum Step {
    /// Wait for a freshly armed timer.
    Rearm(Timer),
    /// Keep waiting for the timer that is already armed.
    Keep,
    Stop,
}

/// Drives one panel: polls `source`, folds snapshots into the state and
/// redraws through the throttle until the lifecycle ends.
pub struct Engine<S> {
    source:    S,
    lifecycle: Lifecycle,
    scheduler: PollScheduler,
    throttle:  RenderThrottle,
    state:     EngineState,
    started:   Instant,
}

impl<S: SnapshotSource> Engine<S> {
    pub fn new(source: S, lifecycle: Lifecycle, config: &EngineConfig) -> Self {
        let state = EngineState::new(
            config.history_capacity,
            Ewma::new(config.smoothing_alpha),
            RateCalculator::new(config.counter_policy),
        );

        Self {
            source,
            lifecycle,
            scheduler: PollScheduler::new(Duration::from_millis(config.poll_interval_ms)),
            throttle:  RenderThrottle::new(Duration::from_millis(config.render_interval_ms)),
            state,
            started:   Instant::now(),
        }
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    /// Run until the lifecycle ends, then hand back the final state.
    ///
    /// The first poll starts immediately. Each later one is armed only after
    /// the previous cycle completed, so requests never overlap. A pending
    /// timer is cancelled as soon as termination is signalled; a request
    /// already in flight is allowed to finish but its result is discarded.
    pub async fn run(mut self, mut targets: RenderTargets) -> EngineState {
        info!(
            interval = ?self.scheduler.interval(),
            renderers = targets.len(),
            "Cluster HUD polling started"
        );

        let mut pending = self.scheduler.start().map(deadline);

        while let Some((id, at)) = pending {
            // Termination wins over a timer that is due at the same instant.
            let event = tokio::select! {
                biased;
                _ = self.lifecycle.terminated() => PollEvent::Terminate,
                _ = time::sleep_until(at) => PollEvent::TimerFired(id),
            };

            pending = match self.step(event, &mut targets).await {
                Step::Rearm(timer) => Some(deadline(timer)),
                Step::Keep => pending,
                Step::Stop => None,
            };
        }

        self.state.terminate();
        info!(cycles = self.state.cycles(), "Cluster HUD polling stopped");
        self.state
    }

    async fn step(&mut self, event: PollEvent, targets: &mut RenderTargets) -> Step {
        match self.scheduler.on_event(event) {
            Command::Fetch => self.poll_once(targets).await,
            Command::Halt => Step::Stop,
            Command::Ignore => Step::Keep,
            // Fetch results are only fed from `poll_once`.
            Command::Apply(_) | Command::Retry => Step::Keep,
        }
    }

    async fn poll_once(&mut self, targets: &mut RenderTargets) -> Step {
        let result = self.source.fetch().await;

        if !self.lifecycle.is_active() {
            debug!("View went inactive during fetch; discarding result");
            self.scheduler.on_event(PollEvent::Terminate);
            return Step::Stop;
        }

        let event = match result {
            Ok(snapshot) => PollEvent::FetchSucceeded(snapshot),
            Err(e) => PollEvent::FetchFailed(e.to_string()),
        };

        if let Command::Apply(snapshot) = self.scheduler.on_event(event) {
            if self.state.apply(snapshot) {
                self.render(targets);
            }
        }

        match self.scheduler.complete(self.lifecycle.is_active()) {
            Some(timer) => Step::Rearm(timer),
            None => Step::Stop,
        }
    }

    fn render(&mut self, targets: &mut RenderTargets) {
        let now_ms = i64::try_from(self.started.elapsed().as_millis()).unwrap_or(i64::MAX);
        if !self.throttle.try_render(&mut self.state, now_ms) {
            debug!(now_ms, "Redraw throttled");
            return;
        }
        let state = &self.state;
        targets.draw_all(|metric| state.series(metric).values());
    }
}

fn deadline(timer: Timer) -> (TimerId, Instant) {
    (timer.id, Instant::now() + timer.delay)
}
