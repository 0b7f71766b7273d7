use view_swapper::Bundle;

use crate::NavigationWidget;
use crate::widget::check_restored;

const SELECTED_KEY: &str = "navigation:selected";
const SUPER_KEY: &str = "navigation:super";

/// The selected menu index plus the navigation widget's own state.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NavigationSavedState {
    pub selected_position: usize,
    pub super_state: Option<Bundle>,
}

impl NavigationSavedState {
    pub fn into_bundle(self) -> Bundle {
        let mut bundle = Bundle::new();
        bundle.put_int(
            SELECTED_KEY,
            i64::try_from(self.selected_position).unwrap_or(i64::MAX),
        );
        if let Some(super_state) = self.super_state {
            bundle.put_bundle(SUPER_KEY, super_state);
        }
        bundle
    }

    /// Unwraps a bundle produced by [`NavigationSavedState::into_bundle`], handing anything else
    /// back untouched.
    pub fn from_bundle(mut bundle: Bundle) -> Result<Self, Bundle> {
        let Some(selected_position) = bundle
            .get_int(SELECTED_KEY)
            .and_then(|p| usize::try_from(p).ok())
        else {
            return Err(bundle);
        };
        Ok(Self {
            selected_position,
            super_state: bundle.take_bundle(SUPER_KEY),
        })
    }
}

pub(crate) fn save_widget<W>(widget: &W, selected_position: usize) -> Bundle
where
    W: NavigationWidget + ?Sized,
{
    NavigationSavedState {
        selected_position,
        super_state: widget.save_instance_state(),
    }
    .into_bundle()
}

/// Restores `state` into `widget` and returns the restored selection, or `None` when the
/// bundle was not produced by a navigation shim.
pub(crate) fn restore_widget<W>(widget: &mut W, state: Bundle) -> Option<usize>
where
    W: NavigationWidget + ?Sized,
{
    let saved = match NavigationSavedState::from_bundle(state) {
        Ok(saved) => saved,
        Err(foreign) => {
            widget.restore_instance_state(foreign);
            return None;
        }
    };
    if let Some(super_state) = saved.super_state {
        widget.restore_instance_state(super_state);
    }
    check_restored(widget, saved.selected_position);
    Some(saved.selected_position)
}
