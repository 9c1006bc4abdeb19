//! The lazy pipeline interpreter.
//!
//! A [`Pipeline`] pairs a [`Source`] with an [`OperationList`]. Nothing runs
//! until [`Pipeline::run`] is awaited; each run starts the source afresh and
//! replays the operations in append order, so a pipeline can be run any
//! number of times and branches that share a prefix never observe each
//! other.

use std::sync::Arc;

use futures::future::BoxFuture;

use super::operation::{Erased, Operation, OperationList, Step};
use crate::control::Outcome;

type Resolved<F> = Arc<dyn Fn() -> Outcome<Erased, F> + Send + Sync>;
type Pending<F> = Arc<dyn Fn() -> BoxFuture<'static, Outcome<Erased, F>> + Send + Sync>;

/// Where a pipeline's initial value comes from.
pub(crate) enum Source<F> {
    /// An already concrete value, reproduced for every run.
    Resolved(Resolved<F>),
    /// A computation started on every run and awaited.
    Pending(Pending<F>),
}

impl<F> Source<F> {
    /// Creates a source that yields a copy of `factory`'s value.
    pub(crate) fn resolved<G>(factory: G) -> Self
    where
        G: Fn() -> Outcome<Erased, F> + Send + Sync + 'static,
    {
        Self::Resolved(Arc::new(factory))
    }

    /// Creates a source that starts `factory`'s future on every run.
    pub(crate) fn pending<G>(factory: G) -> Self
    where
        G: Fn() -> BoxFuture<'static, Outcome<Erased, F>> + Send + Sync + 'static,
    {
        Self::Pending(Arc::new(factory))
    }

    const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }

    fn start(&self) -> Step<Outcome<Erased, F>> {
        match self {
            Self::Resolved(factory) => Step::Ready(factory()),
            Self::Pending(factory) => Step::Pending(factory()),
        }
    }
}

impl<F> Clone for Source<F> {
    fn clone(&self) -> Self {
        match self {
            Self::Resolved(factory) => Self::Resolved(Arc::clone(factory)),
            Self::Pending(factory) => Self::Pending(Arc::clone(factory)),
        }
    }
}

/// A source plus the operations to replay over it.
pub(crate) struct Pipeline<F> {
    source: Source<F>,
    operations: OperationList<F>,
}

impl<F> Clone for Pipeline<F> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            operations: self.operations.clone(),
        }
    }
}

impl<F: Send + 'static> Pipeline<F> {
    /// Creates a pipeline with no operations.
    pub(crate) const fn new(source: Source<F>) -> Self {
        Self {
            source,
            operations: OperationList::new(),
        }
    }

    /// Returns a new pipeline with `operation` appended.
    #[must_use]
    pub(crate) fn then(&self, operation: Operation<F>) -> Self {
        Self {
            source: self.source.clone(),
            operations: self.operations.push(operation),
        }
    }

    /// Returns the number of queued operations.
    pub(crate) const fn len(&self) -> usize {
        self.operations.len()
    }

    /// Returns `true` if the source is a pending computation.
    pub(crate) const fn is_pending(&self) -> bool {
        self.source.is_pending()
    }

    /// Resolves the source and replays every operation in order.
    ///
    /// A panic raised while resolving the source or a pending function
    /// result propagates through the returned future unchanged.
    pub(crate) async fn run(&self) -> Outcome<Erased, F> {
        let operations = self.operations.ordered();
        tracing::trace!(
            operations = operations.len(),
            pending_source = self.source.is_pending(),
            "collecting lazy pipeline"
        );

        let mut current = self.source.start().resolve().await;
        for (index, operation) in operations.into_iter().enumerate() {
            tracing::trace!(
                index,
                kind = operation.kind(),
                applied = operation.applies_to(&current),
                "replaying pipeline operation"
            );
            current = operation.apply(current).await;
        }

        tracing::trace!(success = current.is_ok(), "lazy pipeline collected");
        current
    }
}
