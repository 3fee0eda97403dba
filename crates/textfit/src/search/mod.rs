//! Fit search engine: a two-phase binary search over integer font sizes.
//!
//! # Steps
//! 1. Primary pass: largest size satisfying the primary axis (height in
//!    multi-line mode, width in single-line mode).
//! 2. Secondary pass: if the primary winner overflows the other axis,
//!    re-search below it for the largest size satisfying both. Skipped
//!    entirely in single-line mode with `force_single_mode_width`.
//! 3. Clamp: recompute the committed size from the loop-exit window, clamp
//!    into `[min, max]`, floor at 0, apply it.
//!
//! Correctness rests on the fit predicate being monotonically non-increasing
//! in font size: a larger font never fits where a smaller one did not.
//! Every suspension point re-checks the session token; a stale token aborts
//! the whole sequence through the `Interrupt` channel.

pub mod session;

pub use session::SearchSession;

use async_trait::async_trait;

use crate::config::{FitConfig, FitMode};
use crate::errors::Interrupt;
use crate::flow::{series, whilst, FlowResult, FlowStep};
use crate::guard::SessionToken;
use crate::measure::{fits_height, fits_width, Axis, TextSurface};

// ────────────────────────────────────────────────────────────────────────────
// Axis selection
// ────────────────────────────────────────────────────────────────────────────

/// Primary and secondary test axes for a mode.
fn axes_for(mode: FitMode) -> (Axis, Axis) {
    match mode {
        FitMode::Multi => (Axis::Height, Axis::Width),
        FitMode::Single => (Axis::Width, Axis::Height),
    }
}

fn axis_fits<S: TextSurface>(surface: &S, axis: Axis, session: &SearchSession) -> bool {
    match axis {
        Axis::Width => fits_width(surface, session.target_width),
        Axis::Height => fits_height(surface, session.target_height),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Steps
// ────────────────────────────────────────────────────────────────────────────

/// One bisection probe: apply the midpoint, wait out the layout pass, then
/// narrow the window on the probed axis.
struct Probe<'a, S> {
    surface: &'a S,
    token: &'a SessionToken<'a>,
    axis: Axis,
}

#[async_trait]
impl<S: TextSurface> FlowStep<SearchSession> for Probe<'_, S> {
    async fn run(&mut self, session: &mut SearchSession) -> FlowResult {
        if !self.token.is_current() {
            return Err(Interrupt);
        }
        let candidate = session.bisect();
        self.surface.set_font_size(candidate).await;
        if !self.token.is_current() {
            return Err(Interrupt);
        }
        if axis_fits(self.surface, self.axis, session) {
            session.low = session.mid + 1;
        } else {
            session.high = session.mid - 1;
        }
        Ok(())
    }
}

/// Step 1: upper-bound binary search on the primary axis over `[low, high]`.
struct PrimaryPass<'a, S> {
    surface: &'a S,
    token: &'a SessionToken<'a>,
    axis: Axis,
}

#[async_trait]
impl<S: TextSurface> FlowStep<SearchSession> for PrimaryPass<'_, S> {
    async fn run(&mut self, session: &mut SearchSession) -> FlowResult {
        let mut probe = Probe {
            surface: self.surface,
            token: self.token,
            axis: self.axis,
        };
        whilst(session, |s| s.low <= s.high, &mut probe).await
    }
}

/// Step 2: refinement on the secondary axis, bounded above by the `mid` the
/// primary pass exited with.
struct SecondaryPass<'a, S> {
    surface: &'a S,
    token: &'a SessionToken<'a>,
    config: &'a FitConfig,
    axis: Axis,
}

#[async_trait]
impl<S: TextSurface> FlowStep<SearchSession> for SecondaryPass<'_, S> {
    async fn run(&mut self, session: &mut SearchSession) -> FlowResult {
        // Single-line callers may prefer overflowing width over shrinking
        // below the width-fit size.
        if self.config.mode == FitMode::Single && self.config.force_single_mode_width {
            return Ok(());
        }
        if axis_fits(self.surface, self.axis, session) {
            return Ok(());
        }
        session.low = self.config.min as i32;
        session.high = session.mid;
        let mut probe = Probe {
            surface: self.surface,
            token: self.token,
            axis: self.axis,
        };
        whilst(session, |s| s.low < s.high, &mut probe).await
    }
}

/// Step 3: the loops exit without re-testing the final midpoint, so the
/// committed size is recomputed from the exit window, bounded to the
/// configured limits, and applied.
struct ClampPass<'a, S> {
    surface: &'a S,
    token: &'a SessionToken<'a>,
    min: u32,
    max: u32,
}

#[async_trait]
impl<S: TextSurface> FlowStep<SearchSession> for ClampPass<'_, S> {
    async fn run(&mut self, session: &mut SearchSession) -> FlowResult {
        session.mid = session.low.min(session.high);
        session.mid = session.mid.max(self.min as i32);
        session.mid = session.mid.min(self.max as i32);
        session.mid = session.mid.max(0);

        if !self.token.is_current() {
            return Err(Interrupt);
        }
        self.surface.set_font_size(session.mid as u32).await;
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Entry point
// ────────────────────────────────────────────────────────────────────────────

/// Runs the full three-step search against `surface`, mutating `session` in
/// place. `Ok(())` leaves the committed size in `session.mid`;
/// `Err(Interrupt)` means a newer session superseded this one and nothing
/// was committed.
pub async fn run<S: TextSurface>(
    surface: &S,
    config: &FitConfig,
    token: &SessionToken<'_>,
    session: &mut SearchSession,
) -> FlowResult {
    let (primary, secondary) = axes_for(config.mode);

    let mut step1 = PrimaryPass {
        surface,
        token,
        axis: primary,
    };
    let mut step2 = SecondaryPass {
        surface,
        token,
        config,
        axis: secondary,
    };
    let mut step3 = ClampPass {
        surface,
        token,
        min: config.min,
        max: config.max,
    };

    series(session, &mut [&mut step1, &mut step2, &mut step3]).await
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
