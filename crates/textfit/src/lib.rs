//! Best-fit font sizing for fixed containers.
//!
//! Given a container with a fixed content box and a block of text, finds the
//! largest integer font size in `[min, max]` at which the rendered text still
//! fits, by binary-searching candidate sizes against a host-provided
//! measurement surface. The search is cooperative: applying a candidate size
//! suspends until the host's next layout pass, and a newer search (or
//! teardown) silently cancels any search still in flight.
//!
//! The crate does not lay out text itself: the host implements
//! [`TextSurface`] on top of its rendering engine and the component drives it.

pub mod component;
pub mod config;
pub mod errors;
pub mod flow;
pub mod guard;
pub mod measure;
pub mod search;
pub mod throttle;

pub use component::{FitResult, Textfit};
pub use config::{FitConfig, FitMode};
pub use errors::{FitError, Interrupt};
pub use guard::{GenerationGuard, SessionToken};
pub use measure::{Axis, TextSurface};
