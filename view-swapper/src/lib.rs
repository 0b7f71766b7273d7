//! A headless single-page content swapper.
//!
//! For fragment-backed adapters, see the `view-swapper-fragments` crate. For bottom-navigation
//! and drawer bindings, see the `view-swapper-navigation` crate.
//!
//! This crate holds the container logic needed to show exactly one page at a time: a
//! position-indexed registry of lazily created items, an adapter contract that produces and
//! destroys those items, reconciliation when the adapter's data set changes, and state capture
//! that survives configuration changes.
//!
//! It is UI-agnostic. A host UI layer is expected to provide:
//! - a [`Container`] (identifier, layout status, default state restoration)
//! - an adapter implementing [`SwapperAdapter`] (or the ready-made [`ViewAdapter`])
//! - navigation events that end up in [`ViewSwapper::show_item_at`]
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod adapter;
mod bundle;
mod container;
mod error;
mod observer;
mod state;
mod swapper;
mod types;
mod view_adapter;


pub use adapter::SwapperAdapter;
pub use bundle::{Bundle, StateValue};
pub use container::{Container, ViewContainer};
pub use error::SwapperError;
pub use observer::{DataSetObservable, DataSetObserver, SwapperObserver};
pub use state::SavedState;
pub use swapper::ViewSwapper;
pub use types::{ContainerId, ItemInfo, ItemPosition, ViewId};
pub use view_adapter::{ViewAdapter, ViewItem};
