use crate::{Bundle, ContainerId, ViewId};

/// The host-side container primitive a [`crate::ViewSwapper`] wraps.
///
/// The swapper never lays out or draws anything itself. It asks the host for a stable
/// identifier, whether a first layout pass has happened, and delegates state it does not
/// recognize back to the host.
pub trait Container {
    /// A stable identifier for the container, if the host assigned one.
    fn id(&self) -> Option<ContainerId>;

    /// Whether the container has completed its first layout pass and has real dimensions.
    fn is_laid_out(&self) -> bool;

    fn request_layout(&mut self);

    /// The host's own saved state, wrapped by the swapper's saved state.
    fn save_instance_state(&self) -> Option<Bundle> {
        None
    }

    /// The host's default restoration path.
    fn restore_instance_state(&mut self, state: Bundle) {
        let _ = state;
    }
}

/// A container that accepts plain child views.
pub trait ViewContainer: Container {
    type View;

    /// Adds a child view and returns the identifier it can be removed by.
    fn add_view(&mut self, view: Self::View) -> ViewId;

    fn remove_view(&mut self, id: ViewId) -> Option<Self::View>;
}
