use alloc::vec::Vec;
use core::cell::Cell;
use core::fmt;

use crate::{
    DataSetObservable, ItemPosition, SwapperAdapter, SwapperError, ViewContainer, ViewId,
};

/// The item a [`ViewAdapter`] hands to the swapper: the page key plus the child view it added.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewItem<K> {
    pub key: K,
    pub view: ViewId,
    position: Cell<usize>,
}

impl<K> ViewItem<K> {
    /// The position the item was created for, or last reported as moved to.
    pub fn position(&self) -> usize {
        self.position.get()
    }
}

/// An adapter that shows plain views built from a keyed page list.
///
/// Views are created on demand by `factory` and removed from the container when their page is
/// swapped away. Page keys identify items across data set changes. A key still found at its
/// item's last known position stays put, and a key that disappeared reports
/// [`ItemPosition::None`]. Otherwise the item moves to the first occurrence of its key.
pub struct ViewAdapter<K, F> {
    pages: Vec<K>,
    factory: F,
    observable: DataSetObservable,
}

impl<K, F> ViewAdapter<K, F>
where
    K: Clone + PartialEq,
{
    pub fn new(pages: impl IntoIterator<Item = K>, factory: F) -> Self {
        Self {
            pages: pages.into_iter().collect(),
            factory,
            observable: DataSetObservable::new(),
        }
    }

    pub fn pages(&self) -> &[K] {
        &self.pages
    }

    pub fn position_of(&self, key: &K) -> Option<usize> {
        self.pages.iter().position(|k| k == key)
    }

    pub fn set_pages(&mut self, pages: impl IntoIterator<Item = K>) {
        self.pages = pages.into_iter().collect();
        self.observable.notify_changed();
    }

    pub fn push_page(&mut self, key: K) {
        self.pages.push(key);
        self.observable.notify_changed();
    }

    pub fn insert_page(&mut self, index: usize, key: K) {
        let index = index.min(self.pages.len());
        self.pages.insert(index, key);
        self.observable.notify_changed();
    }

    pub fn remove_page(&mut self, index: usize) -> Option<K> {
        if index >= self.pages.len() {
            return None;
        }
        let key = self.pages.remove(index);
        self.observable.notify_changed();
        Some(key)
    }

    /// Moves the page at `from` so it ends up at `to`. Out-of-range indexes are ignored.
    pub fn move_page(&mut self, from: usize, to: usize) {
        if from >= self.pages.len() || to >= self.pages.len() || from == to {
            return;
        }
        let key = self.pages.remove(from);
        self.pages.insert(to, key);
        self.observable.notify_changed();
    }
}

impl<C, K, F> SwapperAdapter<C> for ViewAdapter<K, F>
where
    C: ViewContainer,
    K: Clone + PartialEq,
    F: FnMut(&K) -> C::View,
{
    type Item = ViewItem<K>;

    fn count(&self) -> usize {
        self.pages.len()
    }

    fn instantiate_item(
        &mut self,
        container: &mut C,
        position: usize,
    ) -> Result<Self::Item, SwapperError> {
        let key = self
            .pages
            .get(position)
            .cloned()
            .ok_or(SwapperError::UnknownPage { position })?;
        let view = container.add_view((self.factory)(&key));
        Ok(ViewItem {
            key,
            view,
            position: Cell::new(position),
        })
    }

    fn destroy_item(&mut self, container: &mut C, _position: usize, item: Self::Item) {
        container.remove_view(item.view);
    }

    fn finish_update(&mut self, container: &mut C) {
        container.request_layout();
    }

    fn item_position(&self, item: &Self::Item) -> ItemPosition {
        if self.pages.get(item.position.get()) == Some(&item.key) {
            return ItemPosition::Unchanged;
        }
        match self.position_of(&item.key) {
            Some(position) => {
                item.position.set(position);
                ItemPosition::Moved(position)
            }
            None => ItemPosition::None,
        }
    }

    fn observable(&self) -> &DataSetObservable {
        &self.observable
    }

    fn observable_mut(&mut self) -> &mut DataSetObservable {
        &mut self.observable
    }
}

impl<K: fmt::Debug, F> fmt::Debug for ViewAdapter<K, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewAdapter")
            .field("pages", &self.pages)
            .field("observable", &self.observable)
            .finish()
    }
}
