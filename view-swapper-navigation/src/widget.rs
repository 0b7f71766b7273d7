use alloc::boxed::Box;

use view_swapper::Bundle;

/// The stable identifier of a menu entry.
pub type MenuItemId = u32;

/// An externally registered selection listener. Returns whether it handled the selection.
pub type ItemSelectedListener = Box<dyn FnMut(MenuItemId) -> bool>;

/// The host navigation widget (bottom bar or drawer menu).
pub trait NavigationWidget {
    /// Number of menu entries.
    fn menu_len(&self) -> usize;

    /// The id of the menu entry at `index`.
    fn menu_item_id(&self, index: usize) -> Option<MenuItemId>;

    fn set_item_checked(&mut self, index: usize, checked: bool);

    /// The widget's own state, wrapped by the shim's saved state.
    fn save_instance_state(&self) -> Option<Bundle> {
        None
    }

    /// The widget's default restoration path.
    fn restore_instance_state(&mut self, state: Bundle) {
        let _ = state;
    }

    /// The drawer container this widget sits in, if any.
    fn parent_drawer(&mut self) -> Option<&mut dyn Drawer> {
        None
    }
}

/// A host drawer container.
pub trait Drawer {
    fn close_drawers(&mut self);
}

/// Scans the menu for the entry with `item_id`.
pub(crate) fn index_of<W>(widget: &W, item_id: MenuItemId) -> Option<usize>
where
    W: NavigationWidget + ?Sized,
{
    (0..widget.menu_len()).find(|&index| widget.menu_item_id(index) == Some(item_id))
}

/// Checks the restored selection, if the menu still has that many entries.
pub(crate) fn check_restored<W: NavigationWidget + ?Sized>(widget: &mut W, index: usize) {
    let len = widget.menu_len();
    if index < len {
        widget.set_item_checked(index, true);
    } else {
        vwarn!(index, len, "restored selection is past the end of the menu");
    }
}
