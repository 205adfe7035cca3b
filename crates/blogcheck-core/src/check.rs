use crate::types::CheckResult;

/// A single independent check over some loaded input.
///
/// Implementations are stateless; the same input always produces the same result.
pub trait Check<I: ?Sized>: Send + Sync {
    fn id(&self) -> &str;
    fn eval(&self, input: &I) -> CheckResult;
}

/// Runs every check in order and collects the results.
pub fn eval_all<I: ?Sized>(checks: &[Box<dyn Check<I>>], input: &I) -> Vec<CheckResult> {
    checks
        .iter()
        .map(|c| {
            let r = c.eval(input);
            tracing::debug!(check = c.id(), outcome = ?r.outcome, "evaluated");
            r
        })
        .collect()
}
