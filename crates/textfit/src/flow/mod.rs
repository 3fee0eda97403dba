//! Cooperative async control flow for the fit search.
//!
//! The search is a fixed sequence of steps, two of which are themselves
//! loops, all mutating one session struct. [`series`] runs steps strictly in
//! order; [`whilst`] repeats a step while a synchronous predicate over the
//! session holds. Both stop at the first `Err(Interrupt)`, which is the
//! cancellation channel rather than a genuine failure (see
//! [`Interrupt`](crate::errors::Interrupt)).

pub mod series;
pub mod whilst;

pub use series::series;
pub use whilst::whilst;

use async_trait::async_trait;

use crate::errors::Interrupt;

/// Result carried through the step/loop channel. The only error value is the
/// cancellation sentinel.
pub type FlowResult = Result<(), Interrupt>;

/// One unit of async work against the shared session state.
///
/// Steps receive the session exclusively for the duration of the call; no two
/// steps ever run concurrently, so reasoning about `low`/`high`/`mid` stays
/// sequential.
#[async_trait]
pub trait FlowStep<S: Send>: Send {
    async fn run(&mut self, state: &mut S) -> FlowResult;
}
