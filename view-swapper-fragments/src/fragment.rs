use alloc::string::String;
use alloc::vec::Vec;

use view_swapper::{Bundle, ContainerId, ItemPosition, SwapperError};

/// A fragment-like content unit owned by the host's [`FragmentManager`].
///
/// Implementations are handles: clones refer to the same unit.
pub trait Fragment: Clone {
    fn set_menu_visibility(&mut self, visible: bool);

    fn set_user_visible_hint(&mut self, visible: bool);

    /// Hands a state snapshot to a unit that has not been added yet.
    fn set_initial_saved_state(&mut self, state: Bundle);
}

/// One operation queued in a [`FragmentTransaction`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FragmentOp<F> {
    /// Adds a new unit to the container, optionally under a lookup tag.
    Add {
        container: ContainerId,
        fragment: F,
        tag: Option<String>,
    },
    /// Re-attaches a detached unit.
    Attach(F),
    /// Detaches a unit without destroying its state.
    Detach(F),
    /// Removes a unit entirely.
    Remove(F),
}

/// A batch of fragment operations committed together by the [`FragmentManager`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FragmentTransaction<F> {
    ops: Vec<FragmentOp<F>>,
}

impl<F> Default for FragmentTransaction<F> {
    fn default() -> Self {
        Self { ops: Vec::new() }
    }
}

impl<F> FragmentTransaction<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, container: ContainerId, fragment: F, tag: Option<String>) {
        self.ops.push(FragmentOp::Add {
            container,
            fragment,
            tag,
        });
    }

    pub fn attach(&mut self, fragment: F) {
        self.ops.push(FragmentOp::Attach(fragment));
    }

    pub fn detach(&mut self, fragment: F) {
        self.ops.push(FragmentOp::Detach(fragment));
    }

    pub fn remove(&mut self, fragment: F) {
        self.ops.push(FragmentOp::Remove(fragment));
    }

    pub fn ops(&self) -> &[FragmentOp<F>] {
        &self.ops
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn into_ops(self) -> Vec<FragmentOp<F>> {
        self.ops
    }
}

/// The host's fragment manager.
pub trait FragmentManager {
    type Fragment: Fragment;

    fn find_fragment_by_tag(&self, tag: &str) -> Option<Self::Fragment>;

    /// Applies a transaction immediately, without a back-stack entry.
    ///
    /// The owning container may already be torn down; losing state in that case is acceptable.
    fn commit_now_allowing_state_loss(&mut self, transaction: FragmentTransaction<Self::Fragment>);

    fn save_fragment_instance_state(&mut self, fragment: &Self::Fragment) -> Option<Bundle>;

    /// Stores a reference to a live unit under `key`.
    fn put_fragment(&self, bundle: &mut Bundle, key: &str, fragment: &Self::Fragment);

    /// Resolves a reference stored by [`FragmentManager::put_fragment`].
    fn get_fragment(&self, bundle: &Bundle, key: &str) -> Option<Self::Fragment>;
}

/// Supplies the pages shown by a fragment-backed adapter.
pub trait FragmentPages<F> {
    fn count(&self) -> usize;

    /// Creates the unit for `position`.
    fn create(&mut self, position: usize) -> Result<F, SwapperError>;

    /// A stable identifier for the page at `position`. Defaults to the position itself.
    fn item_id(&self, position: usize) -> u64 {
        position as u64
    }

    fn item_position(&self, fragment: &F) -> ItemPosition {
        let _ = fragment;
        ItemPosition::Unchanged
    }
}
