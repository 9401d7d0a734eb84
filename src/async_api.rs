//! Uniqueness protocol over caller-supplied existence checks.
//!
//! The external store stays the final arbiter of uniqueness (its unique
//! index, not this module); these helpers only drive collision probability
//! toward zero before an insert. Each await is a call into the caller's
//! collaborator, which owns its own timeout policy.

use std::collections::HashSet;
use std::future::Future;

use crate::display_id::{DisplayIdError, generate_display_id};

/// Attempt budget for [`generate_unique_display_id`].
pub const DEFAULT_MAX_ATTEMPTS: usize = 5;

/// Generate an id the store does not already contain, with an explicit
/// attempt budget.
///
/// `exists` is awaited once per candidate and returns `true` when the id
/// is taken. Rounds run sequentially, each with a fresh random draw.
/// Exhausting the budget yields [`DisplayIdError::Exhausted`]; with the
/// payload space this large that points at pathological clustering or a
/// broken collaborator, so it is surfaced rather than swallowed.
pub async fn generate_unique_display_id_with_attempts<F, Fut>(
    mut exists: F,
    max_attempts: usize,
) -> Result<String, DisplayIdError>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = bool>,
{
    for _ in 0..max_attempts {
        let candidate = generate_display_id();
        if !exists(candidate.clone()).await {
            return Ok(candidate);
        }
    }
    Err(DisplayIdError::Exhausted {
        attempts: max_attempts,
    })
}

/// [`generate_unique_display_id_with_attempts`] with the default budget.
pub async fn generate_unique_display_id<F, Fut>(exists: F) -> Result<String, DisplayIdError>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = bool>,
{
    generate_unique_display_id_with_attempts(exists, DEFAULT_MAX_ATTEMPTS).await
}

/// Mint up to `count` ids in a single existence round-trip.
///
/// Over-generates two candidates per requested id, dedups them locally so
/// an in-batch duplicate never wastes the round-trip, asks the store once
/// which candidates already exist, and returns the survivors truncated to
/// `count`. May return fewer than `count` when the buffer was insufficient;
/// callers must check the returned length.
pub async fn generate_batch_display_ids<F, Fut>(count: usize, exists_batch: F) -> Vec<String>
where
    F: FnOnce(Vec<String>) -> Fut,
    Fut: Future<Output = Vec<String>>,
{
    let mut seen = HashSet::new();
    let mut candidates = Vec::with_capacity(count * 2);
    while candidates.len() < count * 2 {
        let id = generate_display_id();
        if seen.insert(id.clone()) {
            candidates.push(id);
        }
    }

    let taken: HashSet<String> = exists_batch(candidates.clone()).await.into_iter().collect();
    candidates.retain(|id| !taken.contains(id));
    candidates.truncate(count);
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display_id::validate_display_id;
    use futures::executor::block_on;
    use std::cell::{Cell, RefCell};
    use std::collections::HashSet;

    #[test]
    fn test_unique_returns_first_free_candidate() {
        let calls = Cell::new(0usize);
        let id = block_on(generate_unique_display_id(|_| {
            let n = calls.get();
            calls.set(n + 1);
            async move { n < 2 }
        }))
        .unwrap();
        assert!(validate_display_id(&id));
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn test_unique_exhausts_attempt_budget() {
        let calls = Cell::new(0usize);
        let err = block_on(generate_unique_display_id(|_| {
            calls.set(calls.get() + 1);
            async { true }
        }))
        .unwrap_err();
        assert_eq!(calls.get(), DEFAULT_MAX_ATTEMPTS);
        assert!(matches!(err, DisplayIdError::Exhausted { attempts: 5 }));
        assert!(err.to_string().contains("5 attempts"));
    }

    #[test]
    fn test_unique_honors_custom_budget() {
        let calls = Cell::new(0usize);
        let err = block_on(generate_unique_display_id_with_attempts(
            |_| {
                calls.set(calls.get() + 1);
                async { true }
            },
            2,
        ))
        .unwrap_err();
        assert_eq!(calls.get(), 2);
        assert!(matches!(err, DisplayIdError::Exhausted { attempts: 2 }));
    }

    #[test]
    fn test_batch_without_collisions_returns_exact_count() {
        let ids = block_on(generate_batch_display_ids(10, |_| async { Vec::<String>::new() }));
        assert_eq!(ids.len(), 10);
        assert!(ids.iter().all(|id| validate_display_id(id)));
        let distinct: HashSet<&String> = ids.iter().collect();
        assert_eq!(distinct.len(), 10);
    }

    #[test]
    fn test_batch_filters_existing_ids() {
        let flagged = RefCell::new(String::new());
        let ids = block_on(generate_batch_display_ids(3, |candidates| {
            *flagged.borrow_mut() = candidates[0].clone();
            let taken = vec![candidates[0].clone()];
            async move { taken }
        }));
        assert_eq!(ids.len(), 3);
        assert!(!ids.contains(&*flagged.borrow()));
    }

    #[test]
    fn test_batch_reports_shortfall_instead_of_failing() {
        // Store claims everything is taken; survivors run out.
        let ids = block_on(generate_batch_display_ids(4, |candidates| async move {
            candidates
        }));
        assert!(ids.is_empty());
    }

    #[test]
    fn test_batch_zero_count() {
        let ids = block_on(generate_batch_display_ids(0, |_| async { Vec::<String>::new() }));
        assert!(ids.is_empty());
    }
}
