use tokio::sync::watch;

/// Create a connected lifecycle pair. The engine keeps the [`Lifecycle`];
/// the hosting view keeps the [`LifecycleHandle`].
pub fn lifecycle() -> (LifecycleHandle, Lifecycle) {
    let (tx, rx) = watch::channel(true);
    (LifecycleHandle { tx }, Lifecycle { rx })
}

/// Held by the hosting view. Calling [`terminate`](Self::terminate) or
/// dropping the handle tells the engine to stop polling.
#[derive(Debug)]
pub struct LifecycleHandle {
    tx: watch::Sender<bool>,
}

impl LifecycleHandle {
    /// Signal that the view is no longer active, e.g. its query finished.
    pub fn terminate(&self) {
        self.tx.send_replace(false);
    }

    pub fn is_active(&self) -> bool {
        *self.tx.borrow()
    }
}

/// The engine's side of the liveness signal.
#[derive(Debug, Clone)]
pub struct Lifecycle {
    rx: watch::Receiver<bool>,
}

impl Lifecycle {
    /// Should polling continue?
    pub fn is_active(&self) -> bool {
        // A closed channel means the view was torn down.
        *self.rx.borrow() && self.rx.has_changed().is_ok()
    }

    /// Resolves once the view is no longer active.
    pub async fn terminated(&mut self) {
        // An error means the handle was dropped, which is termination too.
        let _ = self.rx.wait_for(|active| !*active).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_active() {
        let (handle, lifecycle) = lifecycle();
        assert!(handle.is_active());
        assert!(lifecycle.is_active());
    }

    #[test]
    fn terminate_is_visible_to_engine() {
        let (handle, lifecycle) = lifecycle();
        handle.terminate();
        assert!(!lifecycle.is_active());
    }

    #[test]
    fn dropping_the_handle_terminates() {
        let (handle, lifecycle) = lifecycle();
        drop(handle);
        assert!(!lifecycle.is_active());
    }

    #[tokio::test]
    async fn terminated_resolves_after_signal() {
        let (handle, mut lifecycle) = lifecycle();
        handle.terminate();
        lifecycle.terminated().await;
    }

    #[tokio::test]
    async fn terminated_resolves_when_handle_dropped() {
        let (handle, mut lifecycle) = lifecycle();
        drop(handle);
        lifecycle.terminated().await;
    }
}
