use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    SplashDwell,
    FadeStep,
    DarkModeMonitor,
    ExitDwell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timing {
    Once(Duration),
    Every(Duration),
}

/// Handle to a scheduled timer. Cancelling is idempotent and also happens on
/// drop, so a handle that goes out of scope never leaves a live timer behind.
pub struct ScheduledTask {
    kind: TimerKind,
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl ScheduledTask {
    pub fn new<F>(kind: TimerKind, cancel: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            kind,
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn kind(&self) -> TimerKind {
        self.kind
    }

    pub fn cancel(mut self) {
        self.run_cancel();
    }

    fn run_cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.run_cancel();
    }
}

impl std::fmt::Debug for ScheduledTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScheduledTask")
            .field("kind", &self.kind)
            .field("live", &self.cancel.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use super::*;

    fn counting_task(counter: &Arc<AtomicUsize>) -> ScheduledTask {
        let counter = Arc::clone(counter);
        ScheduledTask::new(TimerKind::FadeStep, move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn drop_cancels_exactly_once() {
        let counter = Arc::new(AtomicUsize::new(0));
        {
            let _task = counting_task(&counter);
        }
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn explicit_cancel_does_not_cancel_again_on_drop() {
        let counter = Arc::new(AtomicUsize::new(0));
        let task = counting_task(&counter);

        task.cancel();

        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn replacing_a_stored_handle_cancels_the_previous_one() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut slot = Some(counting_task(&counter));

        slot = Some(counting_task(&counter));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert_eq!(slot.as_ref().map(ScheduledTask::kind), Some(TimerKind::FadeStep));

        slot.take();
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }
}
