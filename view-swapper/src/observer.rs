use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicBool, Ordering};

/// Receives data-set change notifications from a [`crate::SwapperAdapter`].
pub trait DataSetObserver {
    fn on_changed(&self);

    fn on_invalidated(&self) {
        self.on_changed();
    }
}

/// The single notification slot a [`crate::ViewSwapper`] attaches to its adapter.
///
/// Notifications only raise a pending flag. The swapper owns its adapter, so it reconciles
/// right after the call that mutated the adapter returns (see
/// [`crate::ViewSwapper::update_adapter`]). The flag is atomic so the slot can be signalled
/// from an observer dispatch that runs off the owning thread.
#[derive(Clone, Debug, Default)]
pub struct SwapperObserver {
    pending: Arc<AtomicBool>,
}

impl SwapperObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    /// Clears the pending flag and returns whether it was set.
    pub fn take_pending(&self) -> bool {
        self.pending.swap(false, Ordering::AcqRel)
    }
}

impl DataSetObserver for SwapperObserver {
    fn on_changed(&self) {
        self.pending.store(true, Ordering::Release);
    }
}

/// Two independent notification channels: the swapper slot plus any number of external
/// observers. Both fire on every change.
#[derive(Default)]
pub struct DataSetObservable {
    swapper: Option<SwapperObserver>,
    observers: Vec<Arc<dyn DataSetObserver + Send + Sync>>,
}

impl DataSetObservable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_observer(&mut self, observer: Arc<dyn DataSetObserver + Send + Sync>) {
        if self.observers.iter().any(|o| Arc::ptr_eq(o, &observer)) {
            vwarn!("DataSetObservable: observer already registered");
            return;
        }
        self.observers.push(observer);
    }

    pub fn unregister_observer(&mut self, observer: &Arc<dyn DataSetObserver + Send + Sync>) {
        self.observers.retain(|o| !Arc::ptr_eq(o, observer));
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    pub fn set_swapper_observer(&mut self, observer: Option<SwapperObserver>) {
        self.swapper = observer;
    }

    pub fn swapper_observer(&self) -> Option<&SwapperObserver> {
        self.swapper.as_ref()
    }

    pub fn notify_changed(&self) {
        if let Some(swapper) = &self.swapper {
            swapper.on_changed();
        }
        for observer in &self.observers {
            observer.on_changed();
        }
    }

    pub fn notify_invalidated(&self) {
        if let Some(swapper) = &self.swapper {
            swapper.on_invalidated();
        }
        for observer in &self.observers {
            observer.on_invalidated();
        }
    }
}

impl core::fmt::Debug for DataSetObservable {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DataSetObservable")
            .field("swapper", &self.swapper)
            .field("observers", &self.observers.len())
            .finish()
    }
}
