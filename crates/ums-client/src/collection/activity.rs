use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Kind of remote operation that can be in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    Loading,
    Creating,
    Editing,
    Deleting,
}

impl Activity {
    const fn slot(self) -> usize {
        match self {
            Self::Loading => 0,
            Self::Creating => 1,
            Self::Editing => 2,
            Self::Deleting => 3,
        }
    }
}

/// Count of outstanding requests per [`Activity`].
///
/// Starts out loading until the first load settles.
#[derive(Debug)]
pub(crate) struct InFlight {
    counts: [AtomicUsize; 4],
    awaiting_first_load: AtomicBool,
}

impl Default for InFlight {
    fn default() -> Self {
        Self {
            counts: Default::default(),
            awaiting_first_load: AtomicBool::new(true),
        }
    }
}

impl InFlight {
    pub(crate) fn enter(&self, activity: Activity) -> InFlightGuard<'_> {
        self.counts[activity.slot()].fetch_add(1, Ordering::SeqCst);
        InFlightGuard {
            count: &self.counts[activity.slot()],
        }
    }

    pub(crate) fn first_load_settled(&self) {
        self.awaiting_first_load.store(false, Ordering::SeqCst);
    }

    pub(crate) fn is_active(&self, activity: Activity) -> bool {
        let pending = self.counts[activity.slot()].load(Ordering::SeqCst) > 0;
        match activity {
            Activity::Loading => pending || self.awaiting_first_load.load(Ordering::SeqCst),
            _ => pending,
        }
    }
}

/// Marks one request as finished when dropped
#[must_use]
pub(crate) struct InFlightGuard<'a> {
    count: &'a AtomicUsize,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.count.fetch_sub(1, Ordering::SeqCst);
    }
}
