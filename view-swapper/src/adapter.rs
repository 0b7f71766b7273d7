use alloc::boxed::Box;
use alloc::sync::Arc;

use crate::{
    Bundle, Container, DataSetObservable, DataSetObserver, ItemPosition, SwapperError,
    SwapperObserver,
};

/// Produces and destroys the items a [`crate::ViewSwapper`] shows.
///
/// Calls arrive in batches: `start_update`, then any number of `instantiate_item` /
/// `destroy_item` / `clear_item`, then `finish_update`, which commits the batch as one update.
/// Items are handed back to the adapter by value when they are destroyed; the swapper never
/// inspects them.
pub trait SwapperAdapter<C: Container + ?Sized> {
    type Item;

    fn count(&self) -> usize;

    /// Signals that a batch is coming. Adapters validate their preconditions here.
    fn start_update(&mut self, container: &mut C) -> Result<(), SwapperError> {
        let _ = container;
        Ok(())
    }

    fn instantiate_item(
        &mut self,
        container: &mut C,
        position: usize,
    ) -> Result<Self::Item, SwapperError>;

    fn destroy_item(&mut self, container: &mut C, position: usize, item: Self::Item);

    /// Hides an item when the swapper re-shows the same position. Defaults to `destroy_item`.
    fn clear_item(&mut self, container: &mut C, position: usize, item: Self::Item) {
        self.destroy_item(container, position, item);
    }

    fn finish_update(&mut self, container: &mut C);

    /// Classifies an item after the data set changed.
    fn item_position(&self, item: &Self::Item) -> ItemPosition {
        let _ = item;
        ItemPosition::Unchanged
    }

    fn save_state(&self) -> Option<Bundle> {
        None
    }

    fn restore_state(&mut self, state: Bundle) {
        let _ = state;
    }

    fn observable(&self) -> &DataSetObservable;

    fn observable_mut(&mut self) -> &mut DataSetObservable;

    fn notify_data_set_changed(&self) {
        self.observable().notify_changed();
    }

    fn notify_data_set_invalidated(&self) {
        self.observable().notify_invalidated();
    }

    fn register_data_set_observer(&mut self, observer: Arc<dyn DataSetObserver + Send + Sync>) {
        self.observable_mut().register_observer(observer);
    }

    fn unregister_data_set_observer(&mut self, observer: &Arc<dyn DataSetObserver + Send + Sync>) {
        self.observable_mut().unregister_observer(observer);
    }

    fn set_swapper_observer(&mut self, observer: Option<SwapperObserver>) {
        self.observable_mut().set_swapper_observer(observer);
    }
}

impl<C, A> SwapperAdapter<C> for Box<A>
where
    C: Container + ?Sized,
    A: SwapperAdapter<C> + ?Sized,
{
    type Item = A::Item;

    fn count(&self) -> usize {
        (**self).count()
    }

    fn start_update(&mut self, container: &mut C) -> Result<(), SwapperError> {
        (**self).start_update(container)
    }

    fn instantiate_item(
        &mut self,
        container: &mut C,
        position: usize,
    ) -> Result<Self::Item, SwapperError> {
        (**self).instantiate_item(container, position)
    }

    fn destroy_item(&mut self, container: &mut C, position: usize, item: Self::Item) {
        (**self).destroy_item(container, position, item);
    }

    fn clear_item(&mut self, container: &mut C, position: usize, item: Self::Item) {
        (**self).clear_item(container, position, item);
    }

    fn finish_update(&mut self, container: &mut C) {
        (**self).finish_update(container);
    }

    fn item_position(&self, item: &Self::Item) -> ItemPosition {
        (**self).item_position(item)
    }

    fn save_state(&self) -> Option<Bundle> {
        (**self).save_state()
    }

    fn restore_state(&mut self, state: Bundle) {
        (**self).restore_state(state);
    }

    fn observable(&self) -> &DataSetObservable {
        (**self).observable()
    }

    fn observable_mut(&mut self) -> &mut DataSetObservable {
        (**self).observable_mut()
    }
}
