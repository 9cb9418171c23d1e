use hud_metrics::EngineState;
use std::time::Duration;

/// Limits how often the series are pushed to the renderers.
///
/// A redraw is allowed when none happened within the last `min_interval`;
/// otherwise it is dropped and the next poll cycle asks again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderThrottle {
    min_interval_ms: i64,
}

impl RenderThrottle {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval_ms: i64::try_from(min_interval.as_millis()).unwrap_or(i64::MAX),
        }
    }

    pub fn should_render(&self, last_render_ms: Option<i64>, now_ms: i64) -> bool {
        match last_render_ms {
            None       => true,
            Some(last) => now_ms.saturating_sub(last) >= self.min_interval_ms,
        }
    }

    /// Record a redraw on `state` if one is due. Returns whether the caller
    /// should draw.
    pub fn try_render(&self, state: &mut EngineState, now_ms: i64) -> bool {
        if !self.should_render(state.last_render_ms(), now_ms) {
            return false;
        }
        state.record_render(now_ms);
        true
    }
}

impl Default for RenderThrottle {
    fn default() -> Self {
        Self::new(Duration::from_millis(1_000))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_mutation_always_renders() {
        let mut state = EngineState::default();
        assert!(RenderThrottle::default().try_render(&mut state, 0));
        assert_eq!(state.last_render_ms(), Some(0));
    }

    #[test]
    fn close_mutations_render_once() {
        let throttle = RenderThrottle::default();
        let mut state = EngineState::default();

        let renders = [100, 600, 1_099]
            .into_iter()
            .filter(|&now| throttle.try_render(&mut state, now))
            .count();

        assert_eq!(renders, 1);
        assert_eq!(state.last_render_ms(), Some(100));
    }

    #[test]
    fn spaced_mutations_each_render() {
        let throttle = RenderThrottle::default();
        let mut state = EngineState::default();

        for now in [0, 1_000, 2_500, 3_500] {
            assert!(throttle.try_render(&mut state, now), "t={now}");
        }
        assert_eq!(state.last_render_ms(), Some(3_500));
    }

    #[test]
    fn dropped_request_does_not_move_the_window() {
        let throttle = RenderThrottle::default();
        let mut state = EngineState::default();

        assert!(throttle.try_render(&mut state, 0));
        assert!(!throttle.try_render(&mut state, 900));
        assert!(throttle.try_render(&mut state, 1_000));
    }
}
