//! Ordered execution of async steps with short-circuit cancellation.

use crate::flow::{FlowResult, FlowStep};

/// Runs `steps` one at a time, strictly in order, each to completion before
/// the next starts. The first `Err(Interrupt)` stops the sequence and
/// propagates; normal completion of every step yields `Ok(())`.
pub async fn series<S: Send>(
    state: &mut S,
    steps: &mut [&mut dyn FlowStep<S>],
) -> FlowResult {
    for step in steps.iter_mut() {
        step.run(state).await?;
    }
    Ok(())
}
