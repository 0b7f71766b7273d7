use alloc::vec::Vec;
use core::fmt;
use core::mem;

use crate::{
    Bundle, Container, ItemInfo, ItemPosition, SavedState, SwapperAdapter, SwapperError,
    SwapperObserver,
};

#[derive(Debug)]
struct PendingRestore {
    position: Option<usize>,
    adapter_state: Option<Bundle>,
}

/// A headless container that shows exactly one adapter item at a time.
///
/// This type is intentionally UI-agnostic:
/// - It wraps a host [`Container`] instead of being one.
/// - Items are produced and destroyed by the adapter; the swapper only keeps them in a
///   position-ordered registry and hands them back.
/// - Navigation UI drives it through [`ViewSwapper::show_item_at`].
///
/// All operations are synchronous. Adapter notifications are delivered through
/// [`ViewSwapper::update_adapter`], which reconciles the registry once the mutation returns.
pub struct ViewSwapper<C, A>
where
    C: Container,
    A: SwapperAdapter<C>,
{
    container: C,
    adapter: Option<A>,
    items: Vec<ItemInfo<A::Item>>,
    current_item: usize,
    observer: SwapperObserver,
    pending_restore: Option<PendingRestore>,
}

impl<C, A> ViewSwapper<C, A>
where
    C: Container,
    A: SwapperAdapter<C>,
{
    pub fn new(container: C) -> Self {
        Self {
            container,
            adapter: None,
            items: Vec::new(),
            current_item: 0,
            observer: SwapperObserver::new(),
            pending_restore: None,
        }
    }

    pub fn container(&self) -> &C {
        &self.container
    }

    pub fn container_mut(&mut self) -> &mut C {
        &mut self.container
    }

    pub fn adapter(&self) -> Option<&A> {
        self.adapter.as_ref()
    }

    pub fn current_item(&self) -> usize {
        self.current_item
    }

    /// The registry, ordered by position.
    pub fn items(&self) -> &[ItemInfo<A::Item>] {
        &self.items
    }

    /// The instantiated item at `position`, if any.
    pub fn item_at(&self, position: usize) -> Option<&A::Item> {
        let index = find_entry(&self.items, position)?;
        self.items[index].item.as_ref()
    }

    /// Replaces the adapter and returns the previous one.
    ///
    /// The previous adapter loses the swapper's observer and has every live item destroyed in
    /// one batch. The new adapter gets one registry entry per position; a pending restore is
    /// applied right away, otherwise position 0 is shown once the container has been laid out.
    pub fn set_adapter(&mut self, adapter: Option<A>) -> Result<Option<A>, SwapperError> {
        let previous = self.detach_adapter()?;

        let Some(mut adapter) = adapter else {
            return Ok(previous);
        };

        let count = adapter.count();
        vdebug!(count, "ViewSwapper::set_adapter");
        self.items = (0..count).map(ItemInfo::new).collect();
        adapter.set_swapper_observer(Some(self.observer.clone()));

        match self.pending_restore.take() {
            Some(pending) => {
                vdebug!(position = ?pending.position, "ViewSwapper: consuming pending restore");
                if let Some(state) = pending.adapter_state {
                    adapter.restore_state(state);
                }
                self.adapter = Some(adapter);
                match pending.position {
                    Some(position) => self.show_position(position)?,
                    None => self.show_initial_if_laid_out()?,
                }
            }
            None => {
                self.adapter = Some(adapter);
                self.show_initial_if_laid_out()?;
            }
        }

        Ok(previous)
    }

    /// Detaches and returns the current adapter, destroying its live items.
    pub fn take_adapter(&mut self) -> Result<Option<A>, SwapperError> {
        self.set_adapter(None)
    }

    /// Shows the item at `position`.
    ///
    /// Re-showing the current position clears its item instead of destroying it. Without an
    /// adapter, or for a position past the adapter's count, this does nothing.
    pub fn show_item_at(&mut self, position: usize) -> Result<(), SwapperError> {
        let Some(adapter) = self.adapter.as_ref() else {
            return Ok(());
        };
        let count = adapter.count();
        if position >= count {
            vwarn!(position, count, "ViewSwapper::show_item_at: position out of range");
            return Ok(());
        }
        vtrace!(from = self.current_item, to = position, "ViewSwapper::show_item_at");
        self.transition_to(position)
    }

    /// Gives mutable access to the adapter and reconciles if it notified a data set change.
    ///
    /// Returns `None` when no adapter is attached.
    pub fn update_adapter<R>(
        &mut self,
        f: impl FnOnce(&mut A) -> R,
    ) -> Result<Option<R>, SwapperError> {
        let Some(adapter) = self.adapter.as_mut() else {
            return Ok(None);
        };
        let out = f(adapter);
        if self.observer.take_pending() {
            self.data_set_changed()?;
        }
        Ok(Some(out))
    }

    /// Reconciles the registry against the adapter right away.
    pub fn notify_data_set_changed(&mut self) -> Result<(), SwapperError> {
        self.observer.take_pending();
        self.data_set_changed()
    }

    /// Hook for the host's attach-to-window callback.
    ///
    /// Shows position 0 when an adapter is attached but nothing has been displayed yet.
    pub fn on_attached_to_window(&mut self) -> Result<(), SwapperError> {
        let Some(adapter) = self.adapter.as_ref() else {
            return Ok(());
        };
        if self.pending_restore.is_some() || adapter.count() == 0 {
            return Ok(());
        }
        if self.items.iter().any(ItemInfo::is_instantiated) {
            return Ok(());
        }
        self.show_position(0)
    }

    pub fn save_instance_state(&self) -> Bundle {
        SavedState {
            position: Some(self.current_item),
            adapter_state: self.adapter.as_ref().and_then(|a| a.save_state()),
            super_state: self.container.save_instance_state(),
        }
        .into_bundle()
    }

    /// Restores a bundle produced by [`ViewSwapper::save_instance_state`].
    ///
    /// Foreign bundles go to the container's default restoration. Without an adapter the state
    /// is kept until the next [`ViewSwapper::set_adapter`].
    pub fn restore_instance_state(&mut self, state: Bundle) -> Result<(), SwapperError> {
        let saved = match SavedState::from_bundle(state) {
            Ok(saved) => saved,
            Err(foreign) => {
                self.container.restore_instance_state(foreign);
                return Ok(());
            }
        };

        if let Some(super_state) = saved.super_state {
            self.container.restore_instance_state(super_state);
        }

        match self.adapter.as_mut() {
            Some(adapter) => {
                if let Some(state) = saved.adapter_state {
                    adapter.restore_state(state);
                }
                let position = saved.position.unwrap_or(0);
                vdebug!(position, "ViewSwapper::restore_instance_state");
                self.show_position(position)
            }
            None => {
                vdebug!(position = ?saved.position, "ViewSwapper: stashing pending restore");
                self.pending_restore = Some(PendingRestore {
                    position: saved.position,
                    adapter_state: saved.adapter_state,
                });
                Ok(())
            }
        }
    }

    /// Tears down the current adapter's live items and takes the adapter out.
    ///
    /// A failing `start_update` leaves the adapter, its observer and the registry in place.
    fn detach_adapter(&mut self) -> Result<Option<A>, SwapperError> {
        let Some(adapter) = self.adapter.as_mut() else {
            return Ok(None);
        };
        vdebug!(items = self.items.len(), "ViewSwapper: detaching adapter");

        if self.items.iter().any(ItemInfo::is_instantiated) {
            adapter.start_update(&mut self.container)?;
            for info in mem::take(&mut self.items) {
                if let Some(item) = info.item {
                    adapter.destroy_item(&mut self.container, info.position, item);
                }
            }
            adapter.finish_update(&mut self.container);
        }

        self.items.clear();
        self.current_item = 0;
        self.observer.take_pending();
        let mut adapter = self.adapter.take();
        if let Some(adapter) = adapter.as_mut() {
            adapter.set_swapper_observer(None);
        }
        Ok(adapter)
    }

    fn show_initial_if_laid_out(&mut self) -> Result<(), SwapperError> {
        if self.container.is_laid_out() {
            self.show_position(0)?;
        }
        Ok(())
    }

    /// Shows `position`, clamped to the adapter's count. Does nothing for an empty adapter.
    fn show_position(&mut self, position: usize) -> Result<(), SwapperError> {
        let Some(adapter) = self.adapter.as_ref() else {
            return Ok(());
        };
        let count = adapter.count();
        if count == 0 {
            return Ok(());
        }
        if position >= count {
            vwarn!(position, count, "ViewSwapper: restored position out of range, clamping");
        }
        self.transition_to(position.min(count - 1))
    }

    /// One batch: clear or destroy the current item, then display `position`.
    fn transition_to(&mut self, position: usize) -> Result<(), SwapperError> {
        let Some(adapter) = self.adapter.as_mut() else {
            return Ok(());
        };
        ensure_entry(&mut self.items, position);
        adapter.start_update(&mut self.container)?;

        let current = self.current_item;
        let outgoing =
            find_entry(&self.items, current).and_then(|index| self.items[index].item.take());
        if let Some(item) = outgoing {
            if current == position {
                adapter.clear_item(&mut self.container, current, item);
            } else {
                adapter.destroy_item(&mut self.container, current, item);
            }
        }

        self.show_item_internal(position)
    }

    /// Instantiates `position` if needed and commits the open batch.
    fn show_item_internal(&mut self, position: usize) -> Result<(), SwapperError> {
        let Some(adapter) = self.adapter.as_mut() else {
            return Ok(());
        };
        self.current_item = position;
        let index = ensure_entry(&mut self.items, position);
        if self.items[index].item.is_none() {
            let item = adapter.instantiate_item(&mut self.container, position)?;
            self.items[index].item = Some(item);
        }
        adapter.finish_update(&mut self.container);
        Ok(())
    }

    /// Aligns the registry with the adapter's changed data set.
    ///
    /// Every live item is classified before any entry is touched, so removals never shift the
    /// entries still waiting to be looked at.
    fn data_set_changed(&mut self) -> Result<(), SwapperError> {
        let Some(adapter) = self.adapter.as_mut() else {
            return Ok(());
        };
        let count = adapter.count();
        let current = self.current_item;

        let classified: Vec<ItemPosition> = self
            .items
            .iter()
            .map(|info| {
                info.item
                    .as_ref()
                    .map_or(ItemPosition::Unchanged, |item| adapter.item_position(item))
            })
            .collect();

        let removing = classified.contains(&ItemPosition::None);
        if removing {
            adapter.start_update(&mut self.container)?;
        }

        let mut need_populate = self.items.len() < count;
        let mut new_current = current;

        let entries = mem::take(&mut self.items);
        self.items.reserve(entries.len());
        for (mut info, position) in entries.into_iter().zip(classified) {
            match position {
                ItemPosition::Unchanged => self.items.push(info),
                ItemPosition::None => {
                    if let Some(item) = info.item.take() {
                        adapter.destroy_item(&mut self.container, info.position, item);
                    }
                    need_populate = true;
                    if info.position == current {
                        new_current = current.min(count.saturating_sub(1));
                    }
                }
                ItemPosition::Moved(to) => {
                    if to != info.position {
                        if info.position == current {
                            new_current = to;
                        }
                        info.position = to;
                        need_populate = true;
                    }
                    self.items.push(info);
                }
            }
        }

        if removing {
            adapter.finish_update(&mut self.container);
        }

        normalize(&mut self.items, count);
        vdebug!(
            count,
            items = self.items.len(),
            current = new_current,
            need_populate,
            "ViewSwapper::data_set_changed"
        );

        if need_populate {
            self.current_item = new_current;
            if count > 0 {
                adapter.start_update(&mut self.container)?;
                self.show_item_internal(new_current.min(count - 1))?;
            }
            self.container.request_layout();
        }
        Ok(())
    }
}

impl<C, A> fmt::Debug for ViewSwapper<C, A>
where
    C: Container,
    A: SwapperAdapter<C>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewSwapper")
            .field("has_adapter", &self.adapter.is_some())
            .field("items", &self.items.len())
            .field("current_item", &self.current_item)
            .field("pending_restore", &self.pending_restore)
            .finish()
    }
}

fn find_entry<T>(items: &[ItemInfo<T>], position: usize) -> Option<usize> {
    items.binary_search_by_key(&position, |info| info.position).ok()
}

/// Returns the index of the entry for `position`, inserting an empty one in order if needed.
fn ensure_entry<T>(items: &mut Vec<ItemInfo<T>>, position: usize) -> usize {
    match items.binary_search_by_key(&position, |info| info.position) {
        Ok(index) => index,
        Err(index) => {
            items.insert(index, ItemInfo::new(position));
            index
        }
    }
}

/// Restores the registry invariants after reconciliation: sorted by position, one entry per
/// position (a live item wins over an empty entry), and an entry for every position below
/// `count`.
fn normalize<T>(items: &mut Vec<ItemInfo<T>>, count: usize) {
    items.sort_by_key(|info| (info.position, !info.is_instantiated()));
    items.dedup_by(|later, earlier| later.position == earlier.position && later.item.is_none());
    items.retain(|info| info.position < count || info.is_instantiated());

    let existing: &[ItemInfo<T>] = items;
    let missing: Vec<usize> = (0..count)
        .filter(|&position| find_entry(existing, position).is_none())
        .collect();
    if !missing.is_empty() {
        items.extend(missing.into_iter().map(ItemInfo::new));
        items.sort_by_key(|info| info.position);
    }
}
