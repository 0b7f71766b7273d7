use crate::Bundle;

const KIND_KEY: &str = "view_swapper:kind";
const KIND: &str = "ViewSwapper.SavedState";
const POSITION_KEY: &str = "view_swapper:position";
const ADAPTER_KEY: &str = "view_swapper:adapter";
const SUPER_KEY: &str = "view_swapper:super";

/// A snapshot of a [`crate::ViewSwapper`]: the displayed position, the adapter's own state and
/// the host container's state it wraps.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SavedState {
    /// `None` when the saved position was negative (nothing to restore).
    pub position: Option<usize>,
    pub adapter_state: Option<Bundle>,
    pub super_state: Option<Bundle>,
}

impl SavedState {
    pub fn into_bundle(self) -> Bundle {
        let mut bundle = Bundle::new();
        bundle.put_str(KIND_KEY, KIND);
        bundle.put_int(
            POSITION_KEY,
            self.position.map_or(-1, |p| i64::try_from(p).unwrap_or(i64::MAX)),
        );
        if let Some(adapter_state) = self.adapter_state {
            bundle.put_bundle(ADAPTER_KEY, adapter_state);
        }
        if let Some(super_state) = self.super_state {
            bundle.put_bundle(SUPER_KEY, super_state);
        }
        bundle
    }

    /// Unwraps a bundle produced by [`SavedState::into_bundle`].
    ///
    /// Any other bundle is handed back untouched so the caller can delegate it.
    pub fn from_bundle(mut bundle: Bundle) -> Result<Self, Bundle> {
        if bundle.get_str(KIND_KEY) != Some(KIND) {
            return Err(bundle);
        }
        let position = bundle
            .get_int(POSITION_KEY)
            .and_then(|p| usize::try_from(p).ok());
        Ok(Self {
            position,
            adapter_state: bundle.take_bundle(ADAPTER_KEY),
            super_state: bundle.take_bundle(SUPER_KEY),
        })
    }
}
