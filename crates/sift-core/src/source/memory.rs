use crate::source::{DataSource, QueryOp, ReadPlan, RowOrder};
use std::{cmp::Ordering, convert::Infallible, future::Future, sync::Arc};
use tracing::trace;

///
/// MemorySource
///
/// Reference data source over an immutable in-memory snapshot. Every sort
/// it performs is stable.
///

pub struct MemorySource<R> {
    rows: Arc<[R]>,
}

impl<R> MemorySource<R> {
    #[must_use]
    pub fn new(rows: impl Into<Arc<[R]>>) -> Self {
        Self { rows: rows.into() }
    }

    #[must_use]
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// Evaluate a plan into borrowed rows.
    #[must_use]
    pub fn run(&self, plan: &ReadPlan<R>) -> Vec<&R> {
        let mut rows: Vec<&R> = self.rows.iter().collect();
        let mut pending: Vec<&RowOrder<R>> = Vec::new();

        for op in plan.ops() {
            if !matches!(op, QueryOp::ThenBy(_)) {
                apply_ordering(&mut rows, &pending);
                pending.clear();
            }

            match op {
                QueryOp::Filter(filter) => rows.retain(|row| filter.matches(row)),
                QueryOp::OrderBy(order) | QueryOp::ThenBy(order) => pending.push(order),
                QueryOp::Skip(count) => {
                    let count = usize::try_from(*count).unwrap_or(usize::MAX).min(rows.len());
                    rows.drain(..count);
                }
                QueryOp::Take(count) => {
                    rows.truncate(usize::try_from(*count).unwrap_or(usize::MAX));
                }
            }
        }
        apply_ordering(&mut rows, &pending);

        trace!(scanned = self.rows.len(), kept = rows.len(), "memory plan evaluated");

        rows
    }
}

impl<R> Clone for MemorySource<R> {
    fn clone(&self) -> Self {
        Self {
            rows: Arc::clone(&self.rows),
        }
    }
}

// Lexicographic over the pending links with a stable sort, which matches
// applying each then-by as a stable refinement of the previous order.
fn apply_ordering<R>(rows: &mut Vec<&R>, links: &[&RowOrder<R>]) {
    if links.is_empty() {
        return;
    }

    let mut keyed: Vec<_> = rows
        .drain(..)
        .map(|row| {
            let keys: Vec<_> = links.iter().map(|link| link.sort_key(row)).collect();
            (keys, row)
        })
        .collect();

    keyed.sort_by(|(left, _), (right, _)| {
        links
            .iter()
            .zip(left.iter().zip(right))
            .map(|(link, (left, right))| link.key().compare(left, right))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    });

    rows.extend(keyed.into_iter().map(|(_, row)| row));
}

impl<R: Send + Sync> DataSource<R> for MemorySource<R> {
    type Error = Infallible;

    fn fetch<O, P>(
        &self,
        plan: &ReadPlan<R>,
        project: P,
    ) -> impl Future<Output = Result<Vec<O>, Self::Error>> + Send
    where
        O: Send,
        P: Fn(&R) -> O + Send + Sync,
    {
        async move { Ok(self.run(plan).into_iter().map(project).collect()) }
    }

    fn count(&self, plan: &ReadPlan<R>) -> impl Future<Output = Result<u64, Self::Error>> + Send {
        async move { Ok(self.run(plan).len() as u64) }
    }
}
