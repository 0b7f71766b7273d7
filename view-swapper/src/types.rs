/// Identifier of a host container, used to key child units that belong to it.
pub type ContainerId = u32;

/// Identifier of a child view added to a [`crate::ViewContainer`].
pub type ViewId = u64;

/// An adapter's classification of an item after its data set changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemPosition {
    /// The position the swapper recorded for the item is still correct.
    Unchanged,
    /// The item is gone; the swapper destroys it and drops its registry entry.
    None,
    /// The item moved to a new position.
    Moved(usize),
}

/// A registry entry: a position plus the item instantiated for it, if any.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemInfo<T> {
    pub position: usize,
    pub item: Option<T>,
}

impl<T> ItemInfo<T> {
    pub fn new(position: usize) -> Self {
        Self {
            position,
            item: None,
        }
    }

    pub fn is_instantiated(&self) -> bool {
        self.item.is_some()
    }
}
