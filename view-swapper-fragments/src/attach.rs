use alloc::format;
use alloc::string::String;
use core::fmt;

use view_swapper::{
    Container, ContainerId, DataSetObservable, ItemPosition, SwapperAdapter, SwapperError,
};

use crate::{Fragment, FragmentManager, FragmentPages, FragmentTransaction};

/// A [`SwapperAdapter`] that keeps every page it ever showed alive in the fragment manager.
///
/// Pages swapped away are only detached. Showing a page again looks the unit up by a name
/// derived from the container id and the page's item id and re-attaches it, so it comes back
/// with its previous state. Names must be stable and collision-free.
pub struct FragmentSwapperAdapter<M: FragmentManager, P> {
    manager: M,
    pages: P,
    transaction: Option<FragmentTransaction<M::Fragment>>,
    observable: DataSetObservable,
}

impl<M, P> FragmentSwapperAdapter<M, P>
where
    M: FragmentManager,
    P: FragmentPages<M::Fragment>,
{
    pub fn new(manager: M, pages: P) -> Self {
        Self {
            manager,
            pages,
            transaction: None,
            observable: DataSetObservable::new(),
        }
    }

    pub fn manager(&self) -> &M {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut M {
        &mut self.manager
    }

    pub fn pages(&self) -> &P {
        &self.pages
    }

    /// Mutable access to the page provider. Call `notify_data_set_changed` after changing it.
    pub fn pages_mut(&mut self) -> &mut P {
        &mut self.pages
    }

    fn transaction(&mut self) -> &mut FragmentTransaction<M::Fragment> {
        self.transaction.get_or_insert_with(FragmentTransaction::new)
    }
}

/// The name a page is registered under: `swapper:<container id>:<item id>`.
pub(crate) fn make_fragment_name(container: ContainerId, item_id: u64) -> String {
    format!("swapper:{container}:{item_id}")
}

impl<C, M, P> SwapperAdapter<C> for FragmentSwapperAdapter<M, P>
where
    C: Container,
    M: FragmentManager,
    P: FragmentPages<M::Fragment>,
{
    type Item = M::Fragment;

    fn count(&self) -> usize {
        self.pages.count()
    }

    fn start_update(&mut self, container: &mut C) -> Result<(), SwapperError> {
        if container.id().is_none() {
            return Err(SwapperError::MissingContainerId {
                adapter: "FragmentSwapperAdapter",
            });
        }
        Ok(())
    }

    fn instantiate_item(
        &mut self,
        container: &mut C,
        position: usize,
    ) -> Result<M::Fragment, SwapperError> {
        let container_id = container.id().ok_or(SwapperError::MissingContainerId {
            adapter: "FragmentSwapperAdapter",
        })?;
        let name = make_fragment_name(container_id, self.pages.item_id(position));

        let fragment = match self.manager.find_fragment_by_tag(&name) {
            Some(mut fragment) => {
                vtrace!(position, name = %name, "re-attaching fragment");
                fragment.set_menu_visibility(true);
                fragment.set_user_visible_hint(true);
                self.transaction().attach(fragment.clone());
                fragment
            }
            None => {
                vtrace!(position, name = %name, "adding fragment");
                let mut fragment = self.pages.create(position)?;
                fragment.set_menu_visibility(true);
                fragment.set_user_visible_hint(true);
                self.transaction()
                    .add(container_id, fragment.clone(), Some(name));
                fragment
            }
        };
        Ok(fragment)
    }

    fn destroy_item(&mut self, _container: &mut C, _position: usize, mut item: M::Fragment) {
        vtrace!("detaching fragment");
        item.set_menu_visibility(false);
        item.set_user_visible_hint(false);
        self.transaction().detach(item);
    }

    fn finish_update(&mut self, _container: &mut C) {
        if let Some(transaction) = self.transaction.take() {
            if !transaction.is_empty() {
                self.manager.commit_now_allowing_state_loss(transaction);
            }
        }
    }

    fn item_position(&self, item: &M::Fragment) -> ItemPosition {
        self.pages.item_position(item)
    }

    fn observable(&self) -> &DataSetObservable {
        &self.observable
    }

    fn observable_mut(&mut self) -> &mut DataSetObservable {
        &mut self.observable
    }
}

impl<M, P> fmt::Debug for FragmentSwapperAdapter<M, P>
where
    M: FragmentManager + fmt::Debug,
    P: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FragmentSwapperAdapter")
            .field("manager", &self.manager)
            .field("pages", &self.pages)
            .field("pending_ops", &self.transaction.as_ref().map_or(0, |t| t.ops().len()))
            .finish()
    }
}
