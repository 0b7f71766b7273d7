/// Errors raised while driving a [`crate::ViewSwapper`] and its adapter.
///
/// Only configuration problems are errors. Missing adapters, untracked items and foreign saved
/// state are handled as silent no-ops instead.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SwapperError {
    /// The adapter needs the container to carry an identifier, but the container has none.
    #[error("view swapper with adapter {adapter} requires a container id")]
    MissingContainerId { adapter: &'static str },

    /// A page factory was asked for a position it does not know how to build.
    #[error("unknown page at position {position}")]
    UnknownPage { position: usize },
}
