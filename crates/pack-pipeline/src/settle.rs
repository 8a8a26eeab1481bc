//! Settle-all: run a batch to completion and report per-item outcomes.
//!
//! The source-of-truth behavior here is that one item's failure must
//! not abort or mask its siblings: every future runs to completion and
//! the caller decides aggregate policy (continue vs. abort) from the
//! full outcome list.

use std::future::Future;

use futures_util::future::join_all;

/// Drive all futures to completion concurrently, preserving input
/// order, and return every item's outcome.
pub async fn settle_all<I, F, T, E>(items: I) -> Vec<Result<T, E>>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Result<T, E>>,
{
    join_all(items).await
}

/// Split outcomes into successes and failures, each preserving order.
pub fn partition<T, E>(outcomes: Vec<Result<T, E>>) -> (Vec<T>, Vec<E>) {
    let mut successes = Vec::new();
    let mut failures = Vec::new();
    for outcome in outcomes {
        match outcome {
            Ok(value) => successes.push(value),
            Err(error) => failures.push(error),
        }
    }
    (successes, failures)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_failures_do_not_abort_siblings() {
        let outcomes = settle_all((0..5).map(|i| async move {
            if i == 2 {
                Err(format!("item {i} failed"))
            } else {
                Ok(i)
            }
        }))
        .await;

        assert_eq!(outcomes.len(), 5);
        let (successes, failures) = partition(outcomes);
        assert_eq!(successes, vec![0, 1, 3, 4]);
        assert_eq!(failures, vec!["item 2 failed"]);
    }

    #[tokio::test]
    async fn test_order_preserved() {
        let outcomes: Vec<Result<i32, ()>> =
            settle_all([3, 1, 2].map(|i| async move { Ok(i) })).await;
        let (successes, _) = partition(outcomes);
        assert_eq!(successes, vec![3, 1, 2]);
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let futures: Vec<std::future::Ready<Result<i32, String>>> = Vec::new();
        let outcomes = settle_all(futures).await;
        assert!(outcomes.is_empty());
    }
}
