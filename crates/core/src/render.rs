use crate::metric::Metric;
use std::collections::BTreeMap;

/// A host-supplied drawing surface for one metric's history.
///
/// Handles only ever see a read-only copy of the series, oldest sample first.
pub trait Sparkline {
    fn draw(&mut self, metric: Metric, values: &[f64]);
}

impl<F> Sparkline for F
where
    F: FnMut(Metric, &[f64]),
{
    fn draw(&mut self, metric: Metric, values: &[f64]) {
        self(metric, values)
    }
}

/// Explicit mapping from metric to the handle that renders it.
///
/// Metrics without a bound handle are tracked but never drawn.
#[derive(Default)]
pub struct RenderTargets {
    handles: BTreeMap<Metric, Box<dyn Sparkline>>,
}

impl RenderTargets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `handle` to `metric`, replacing any earlier binding.
    pub fn bind(mut self, metric: Metric, handle: impl Sparkline + 'static) -> Self {
        self.handles.insert(metric, Box::new(handle));
        self
    }

    pub fn is_bound(&self, metric: Metric) -> bool {
        self.handles.contains_key(&metric)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Draw every bound metric, in catalogue order, with the values
    /// `series` yields for it.
    pub fn draw_all(&mut self, mut series: impl FnMut(Metric) -> Vec<f64>) {
        for (metric, handle) in self.handles.iter_mut() {
            let values = series(*metric);
            handle.draw(*metric, &values);
        }
    }
}

impl std::fmt::Debug for RenderTargets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.handles.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn draws_only_bound_metrics_in_catalogue_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = |seen: &Rc<RefCell<Vec<Metric>>>| {
            let seen = Rc::clone(seen);
            move |metric: Metric, _: &[f64]| seen.borrow_mut().push(metric)
        };

        let mut targets = RenderTargets::new()
            .bind(Metric::CpuTimeRate, log(&seen))
            .bind(Metric::RunningQueries, log(&seen));

        targets.draw_all(|_| vec![1.0]);

        assert_eq!(*seen.borrow(), vec![Metric::RunningQueries, Metric::CpuTimeRate]);
        assert!(!targets.is_bound(Metric::QueuedQueries));
        assert_eq!(targets.len(), 2);
    }

    #[test]
    fn handles_receive_the_series_values() {
        let drawn = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&drawn);
        let mut targets = RenderTargets::new().bind(
            Metric::ActiveWorkers,
            move |_: Metric, values: &[f64]| sink.borrow_mut().extend_from_slice(values),
        );

        targets.draw_all(|_| vec![2.0, 3.0]);

        assert_eq!(*drawn.borrow(), vec![2.0, 3.0]);
    }
}
