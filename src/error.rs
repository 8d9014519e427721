/// Errors surfaced by [`Tree`][crate::Tree] operations whose precondition was violated.
///
/// Queries that simply have no answer (e.g. [`find`][crate::Tree::find] on a missing value)
/// return `None` instead.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The value to delete is not stored in the tree. Nothing was changed.
    #[error("value not found in tree")]
    NotFound,
}

/// Shorthand for results carrying this crate's [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;
