//! Fragment-backed adapters for the `view-swapper` crate.
//!
//! The `view-swapper` crate only knows about opaque items. This crate provides the two adapters
//! needed when pages are fragment-like units with their own lifecycle, managed by a host
//! [`FragmentManager`]:
//!
//! - [`FragmentSwapperAdapter`]: detaches pages that are swapped away and re-attaches them by
//!   name, so each page keeps its state for as long as the manager keeps the unit (tab strips).
//! - [`FragmentStateSwapperAdapter`]: removes pages that are swapped away and remembers only
//!   their serialized state, which is handed to the replacement unit (swipe-through pagers).
//!
//! This crate is intentionally framework-agnostic: the host implements [`Fragment`] and
//! [`FragmentManager`] over its real fragment machinery.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod attach;
mod fragment;
mod state;

#[cfg(test)]
mod tests;

pub use attach::FragmentSwapperAdapter;
pub use fragment::{Fragment, FragmentManager, FragmentOp, FragmentPages, FragmentTransaction};
pub use state::FragmentStateSwapperAdapter;
pub use view_swapper::SwapperError;
