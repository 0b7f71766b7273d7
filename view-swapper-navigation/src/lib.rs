//! Bottom-navigation and drawer bindings for the `view-swapper` crate.
//!
//! Both shims wrap a host [`NavigationWidget`] and translate menu selections into
//! [`SwapperHandle::show_item_at`] calls on the swapper they are bound to:
//!
//! - [`BottomNavigation`]: always switches pages, then lets the external listener observe the
//!   selection.
//! - [`DrawerNavigation`]: gives the external listener the first chance to handle the
//!   selection, and only switches pages (closing the parent drawer) when it declines.
//!
//! Each shim remembers the selected menu index across configuration changes by wrapping the
//! widget's own saved state in a [`NavigationSavedState`].
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod bottom;
mod drawer;
mod handle;
mod state;
mod widget;


pub use bottom::BottomNavigation;
pub use drawer::DrawerNavigation;
pub use handle::SwapperHandle;
pub use state::NavigationSavedState;
pub use view_swapper::SwapperError;
pub use widget::{Drawer, ItemSelectedListener, MenuItemId, NavigationWidget};
