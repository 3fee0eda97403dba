use thiserror::Error;

use crate::measure::Axis;

/// Errors the component can log. None of these surface to callers as a
/// returned fault: a precondition failure aborts the search with a warning
/// and leaves all state untouched.
#[derive(Debug, Error)]
pub enum FitError {
    /// The container reported a zero or NaN dimension. The element must be
    /// displayed and have a static size before a search can run.
    #[error("cannot fit text in an element without a usable {0}; make sure the element is displayed and has a static {0}")]
    UnusableAxis(Axis),
}

/// Cancellation sentinel carried through the step/loop continuation channel.
///
/// `Err(Interrupt)` means a newer generation superseded the running session
/// (or the component was torn down). It is not a failure and it is never
/// surfaced to the caller. The search has no genuine failure case of its own;
/// this is the only value the channel ever carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("superseded by a newer search generation")]
pub struct Interrupt;
