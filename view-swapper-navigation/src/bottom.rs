use core::fmt;

use view_swapper::{Bundle, SwapperError};

use crate::state::{restore_widget, save_widget};
use crate::widget::index_of;
use crate::{ItemSelectedListener, MenuItemId, NavigationWidget, SwapperHandle};

/// A bottom navigation bar bound to a swapper.
///
/// Every selection of a known menu entry switches the swapper to that entry's index. The
/// external listener only observes selections; its answer is ignored.
pub struct BottomNavigation<W, S> {
    widget: W,
    swapper: Option<S>,
    listener: Option<ItemSelectedListener>,
    selected_position: usize,
}

impl<W, S> BottomNavigation<W, S>
where
    W: NavigationWidget,
    S: SwapperHandle,
{
    /// Wraps `widget`. Selections do nothing until a swapper is bound.
    pub fn new(widget: W) -> Self {
        Self {
            widget,
            swapper: None,
            listener: None,
            selected_position: 0,
        }
    }

    /// Wraps `widget` and binds it to `swapper`.
    pub fn with_view_swapper(widget: W, swapper: S) -> Self {
        let mut nav = Self::new(widget);
        nav.swapper = Some(swapper);
        nav
    }

    /// Binds (or with `None`, unbinds) the swapper and returns the previous one.
    pub fn setup_with_view_swapper(&mut self, swapper: Option<S>) -> Option<S> {
        core::mem::replace(&mut self.swapper, swapper)
    }

    /// Replaces the external selection listener.
    pub fn set_on_item_selected_listener(&mut self, listener: Option<ItemSelectedListener>) {
        self.listener = listener;
    }

    pub fn selected_position(&self) -> usize {
        self.selected_position
    }

    pub fn widget(&self) -> &W {
        &self.widget
    }

    pub fn widget_mut(&mut self) -> &mut W {
        &mut self.widget
    }

    pub fn swapper(&self) -> Option<&S> {
        self.swapper.as_ref()
    }

    pub fn swapper_mut(&mut self) -> Option<&mut S> {
        self.swapper.as_mut()
    }

    /// Handles the selection of the menu entry `item_id`.
    ///
    /// Returns `Ok(false)` only when no swapper is bound; bound selections are always handled.
    pub fn on_item_selected(&mut self, item_id: MenuItemId) -> Result<bool, SwapperError> {
        let Some(swapper) = self.swapper.as_mut() else {
            return Ok(false);
        };
        if let Some(index) = index_of(&self.widget, item_id) {
            vtrace!(item_id, index, "BottomNavigation: selected");
            self.selected_position = index;
            swapper.show_item_at(index)?;
        }
        if let Some(listener) = self.listener.as_mut() {
            listener(item_id);
        }
        Ok(true)
    }

    pub fn save_instance_state(&self) -> Bundle {
        save_widget(&self.widget, self.selected_position)
    }

    /// Restores the selection and checks its menu entry. Foreign bundles go to the widget.
    pub fn restore_instance_state(&mut self, state: Bundle) {
        if let Some(selected) = restore_widget(&mut self.widget, state) {
            vdebug!(selected, "BottomNavigation::restore_instance_state");
            self.selected_position = selected;
        }
    }
}

impl<W: fmt::Debug, S: fmt::Debug> fmt::Debug for BottomNavigation<W, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BottomNavigation")
            .field("widget", &self.widget)
            .field("swapper", &self.swapper)
            .field("has_listener", &self.listener.is_some())
            .field("selected_position", &self.selected_position)
            .finish()
    }
}
