use alloc::format;
use alloc::vec::Vec;
use core::fmt;

use view_swapper::{
    Bundle, Container, DataSetObservable, ItemPosition, SwapperAdapter, SwapperError,
};

use crate::{Fragment, FragmentManager, FragmentPages, FragmentTransaction};

const STATES_KEY: &str = "states";
const FRAGMENT_KEY_PREFIX: char = 'f';

/// A [`SwapperAdapter`] that fully removes pages when they are swapped away.
///
/// Before a page is removed, its state is saved into a per-position slot. When the page is
/// shown again, the freshly created unit receives that snapshot before it is added.
/// [`SwapperAdapter::save_state`] persists the slots plus references to the units that are
/// live at that moment (under `f<position>` keys).
pub struct FragmentStateSwapperAdapter<M: FragmentManager, P> {
    manager: M,
    pages: P,
    saved_states: Vec<Option<Bundle>>,
    fragments: Vec<Option<M::Fragment>>,
    transaction: Option<FragmentTransaction<M::Fragment>>,
    observable: DataSetObservable,
}

impl<M, P> FragmentStateSwapperAdapter<M, P>
where
    M: FragmentManager,
    P: FragmentPages<M::Fragment>,
{
    pub fn new(manager: M, pages: P) -> Self {
        Self {
            manager,
            pages,
            saved_states: Vec::new(),
            fragments: Vec::new(),
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

    /// The state saved when the page at `position` was last removed.
    pub fn saved_state(&self, position: usize) -> Option<&Bundle> {
        self.saved_states.get(position)?.as_ref()
    }

    /// The live unit for `position`, if one is currently added.
    pub fn fragment(&self, position: usize) -> Option<&M::Fragment> {
        self.fragments.get(position)?.as_ref()
    }

    fn transaction(&mut self) -> &mut FragmentTransaction<M::Fragment> {
        self.transaction.get_or_insert_with(FragmentTransaction::new)
    }
}

fn slot<T>(slots: &mut Vec<Option<T>>, position: usize) -> &mut Option<T> {
    if slots.len() <= position {
        slots.resize_with(position + 1, || None);
    }
    &mut slots[position]
}

fn show<F: Fragment>(fragment: &mut F) {
    fragment.set_menu_visibility(true);
    fragment.set_user_visible_hint(true);
}

impl<C, M, P> SwapperAdapter<C> for FragmentStateSwapperAdapter<M, P>
where
    C: Container,
    M: FragmentManager,
    P: FragmentPages<M::Fragment>,
{
    type Item = M::Fragment;

    fn count(&self) -> usize {
        self.pages.count()
    }

    fn instantiate_item(
        &mut self,
        container: &mut C,
        position: usize,
    ) -> Result<M::Fragment, SwapperError> {
        if let Some(fragment) = self.fragment(position) {
            return Ok(fragment.clone());
        }

        let container_id = container.id().ok_or(SwapperError::MissingContainerId {
            adapter: "FragmentStateSwapperAdapter",
        })?;

        let mut fragment = self.pages.create(position)?;
        if let Some(state) = self.saved_state(position) {
            vtrace!(position, "handing saved state to new fragment");
            fragment.set_initial_saved_state(state.clone());
        }
        show(&mut fragment);

        *slot(&mut self.fragments, position) = Some(fragment.clone());
        self.transaction().add(container_id, fragment.clone(), None);
        Ok(fragment)
    }

    fn destroy_item(&mut self, _container: &mut C, position: usize, item: M::Fragment) {
        *slot(&mut self.saved_states, position) = self.manager.save_fragment_instance_state(&item);
        if let Some(live) = self.fragments.get_mut(position) {
            *live = None;
        }
        self.transaction().remove(item);
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

    fn save_state(&self) -> Option<Bundle> {
        let mut state: Option<Bundle> = None;
        if !self.saved_states.is_empty() {
            state
                .get_or_insert_with(Bundle::new)
                .put_bundle_list(STATES_KEY, self.saved_states.clone());
        }
        for (position, fragment) in self.fragments.iter().enumerate() {
            if let Some(fragment) = fragment {
                let key = format!("{FRAGMENT_KEY_PREFIX}{position}");
                let bundle = state.get_or_insert_with(Bundle::new);
                self.manager.put_fragment(bundle, &key, fragment);
            }
        }
        state
    }

    fn restore_state(&mut self, state: Bundle) {
        self.saved_states.clear();
        self.fragments.clear();

        if let Some(states) = state.get_bundle_list(STATES_KEY) {
            self.saved_states.extend(states.iter().cloned());
        }

        for key in state.keys() {
            let Some(index) = key.strip_prefix(FRAGMENT_KEY_PREFIX) else {
                continue;
            };
            let Ok(position) = index.parse::<usize>() else {
                vwarn!(key, "ignoring malformed fragment key");
                continue;
            };
            match self.manager.get_fragment(&state, key) {
                Some(mut fragment) => {
                    show(&mut fragment);
                    *slot(&mut self.fragments, position) = Some(fragment);
                }
                None => {
                    vwarn!(key, "fragment no longer exists");
                }
            }
        }
        vdebug!(
            saved = self.saved_states.len(),
            live = self.fragments.iter().flatten().count(),
            "FragmentStateSwapperAdapter::restore_state"
        );
    }

    fn observable(&self) -> &DataSetObservable {
        &self.observable
    }

    fn observable_mut(&mut self) -> &mut DataSetObservable {
        &mut self.observable
    }
}

impl<M, P> fmt::Debug for FragmentStateSwapperAdapter<M, P>
where
    M: FragmentManager + fmt::Debug,
    M::Fragment: fmt::Debug,
    P: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FragmentStateSwapperAdapter")
            .field("manager", &self.manager)
            .field("pages", &self.pages)
            .field("saved_states", &self.saved_states)
            .field("fragments", &self.fragments)
            .finish()
    }
}
