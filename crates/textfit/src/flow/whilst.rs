//! Conditional async loop with cooperative cancellation.

use crate::flow::{FlowResult, FlowStep};

/// Repeats `step` while `predicate` holds over the current state.
///
/// The predicate is re-evaluated fresh after every completed step, so it may
/// observe mutations the step made (the search loops move `low`/`high` this
/// way). An `Err(Interrupt)` from the step stops the loop immediately and
/// propagates; the predicate turning false completes the loop with `Ok(())`.
pub async fn whilst<S, P>(
    state: &mut S,
    mut predicate: P,
    step: &mut dyn FlowStep<S>,
) -> FlowResult
where
    S: Send,
    P: FnMut(&S) -> bool + Send,
{
    while predicate(state) {
        step.run(state).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Interrupt;
    use async_trait::async_trait;

    struct Countdown;

    #[async_trait]
    impl FlowStep<(u32, u32)> for Countdown {
        // state = (remaining, executed)
        async fn run(&mut self, state: &mut (u32, u32)) -> FlowResult {
            state.0 -= 1;
            state.1 += 1;
            Ok(())
        }
    }

    struct HaltAfter(u32);

    #[async_trait]
    impl FlowStep<(u32, u32)> for HaltAfter {
        async fn run(&mut self, state: &mut (u32, u32)) -> FlowResult {
            state.1 += 1;
            if state.1 >= self.0 {
                return Err(Interrupt);
            }
            state.0 -= 1;
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_whilst_runs_until_predicate_fails() {
        let mut state = (3u32, 0u32);
        let result = whilst(&mut state, |s| s.0 > 0, &mut Countdown).await;
        assert_eq!(result, Ok(()));
        assert_eq!(state.1, 3, "step must run once per predicate pass");
    }

    #[tokio::test]
    async fn test_whilst_false_predicate_never_runs_step() {
        let mut state = (0u32, 0u32);
        let result = whilst(&mut state, |s| s.0 > 0, &mut Countdown).await;
        assert_eq!(result, Ok(()));
        assert_eq!(state.1, 0);
    }

    #[tokio::test]
    async fn test_whilst_interrupt_stops_the_loop() {
        let mut state = (100u32, 0u32);
        let result = whilst(&mut state, |s| s.0 > 0, &mut HaltAfter(2)).await;
        assert_eq!(result, Err(Interrupt));
        assert_eq!(state.1, 2, "loop must stop at the interrupting step");
    }
}
