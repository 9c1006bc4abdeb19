//! Deferred operation model for lazy pipelines.
//!
//! A lazy pipeline stores its steps as a closed set of [`Operation`]
//! descriptors instead of composed closures, so the interpreter in
//! `pipeline.rs` is a single exhaustive match and building a pipeline never
//! runs anything.
//!
//! # Design
//!
//! Values flowing through a pipeline change type from step to step, so
//! payloads travel type-erased as [`Erased`]. The typed builders
//! (`LazyOutcome`, `LazyMaybe`) wrap every user function in an adapter that
//! reveals its input and erases its output, which guarantees that every
//! downcast in the interpreter succeeds.
//!
//! Every adapter returns a [`Step`]: either a ready value or a pending
//! future. The interpreter routes every step through [`Step::resolve`], so a
//! synchronous and an asynchronous function produce the same descriptor.
//!
//! # Invariants
//!
//! - **Append order**: [`OperationList::ordered`] yields operations in the
//!   order they were pushed.
//! - **Structural sharing**: [`OperationList::push`] never mutates the list
//!   it is called on; lists branching from a common prefix share its nodes.

use std::any::{Any, type_name};
use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use smallvec::SmallVec;

use crate::control::Outcome;

/// A type-erased pipeline payload.
pub(crate) type Erased = Box<dyn Any + Send>;

/// A function from `A` to a possibly pending `B`.
pub(crate) type Transform<A, B> = Arc<dyn Fn(A) -> Step<B> + Send + Sync>;

/// A side-effecting function observing an `A`.
pub(crate) type Effect<A> = Arc<dyn Fn(&A) -> Step<()> + Send + Sync>;

/// Erases a payload.
#[inline]
pub(crate) fn erase<A: Send + 'static>(value: A) -> Erased {
    Box::new(value)
}

/// Erases both sides of an outcome.
#[inline]
pub(crate) fn erase_outcome<T, E>(outcome: Outcome<T, E>) -> Outcome<Erased, Erased>
where
    T: Send + 'static,
    E: Send + 'static,
{
    outcome.map(erase).map_err(erase)
}

/// Recovers a payload erased with [`erase`].
///
/// # Panics
///
/// Panics if the payload is not an `A`, which means a typed builder paired
/// mismatched adapters.
#[inline]
pub(crate) fn reveal<A: 'static>(erased: Erased) -> A {
    match erased.downcast::<A>() {
        Ok(value) => *value,
        Err(_) => unreachable!("pipeline payload is not a {}", type_name::<A>()),
    }
}

/// Borrows a payload erased with [`erase`].
///
/// # Panics
///
/// Panics if the payload is not an `A`.
#[inline]
pub(crate) fn reveal_ref<A: 'static>(erased: &Erased) -> &A {
    match erased.downcast_ref::<A>() {
        Some(value) => value,
        None => unreachable!("pipeline payload is not a {}", type_name::<A>()),
    }
}

/// The result of calling a pipeline function: ready now, or pending.
pub(crate) enum Step<A> {
    /// A value produced synchronously.
    Ready(A),
    /// A computation that must be awaited.
    Pending(BoxFuture<'static, A>),
}

impl<A> Step<A> {
    /// Wraps a future as a pending step.
    #[inline]
    pub(crate) fn pending<Fut>(future: Fut) -> Self
    where
        Fut: Future<Output = A> + Send + 'static,
    {
        Self::Pending(future.boxed())
    }

    /// Returns `true` if this step must be awaited.
    #[inline]
    pub(crate) const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }

    /// Awaits the step if it is pending, otherwise passes the value through.
    ///
    /// This is the only suspension point of a pipeline.
    pub(crate) async fn resolve(self) -> A {
        match self {
            Self::Ready(value) => value,
            Self::Pending(future) => future.await,
        }
    }
}

/// A deferred pipeline step.
///
/// `F` is the failure payload: [`Erased`] for outcome pipelines and `()` for
/// maybe pipelines.
pub(crate) enum Operation<F> {
    /// Transforms a success value.
    Map(Transform<Erased, Erased>),
    /// Transforms a failure value.
    MapErr(Transform<F, F>),
    /// Replaces a success with the function's outcome.
    AndThen(Transform<Erased, Outcome<Erased, F>>),
    /// Replaces a failure with the function's outcome.
    OrElse(Transform<F, Outcome<Erased, F>>),
    /// Observes a success.
    Tee(Effect<Erased>),
    /// Observes a failure.
    InspectErr(Effect<F>),
    /// Unwraps a success that holds a nested outcome.
    Flatten(Arc<dyn Fn(Erased) -> Outcome<Erased, F> + Send + Sync>),
}

impl<F> Clone for Operation<F> {
    fn clone(&self) -> Self {
        match self {
            Self::Map(function) => Self::Map(Arc::clone(function)),
            Self::MapErr(function) => Self::MapErr(Arc::clone(function)),
            Self::AndThen(function) => Self::AndThen(Arc::clone(function)),
            Self::OrElse(function) => Self::OrElse(Arc::clone(function)),
            Self::Tee(function) => Self::Tee(Arc::clone(function)),
            Self::InspectErr(function) => Self::InspectErr(Arc::clone(function)),
            Self::Flatten(function) => Self::Flatten(Arc::clone(function)),
        }
    }
}

impl<F: Send + 'static> Operation<F> {
    /// Short name used in trace events.
    pub(crate) const fn kind(&self) -> &'static str {
        match self {
            Self::Map(_) => "map",
            Self::MapErr(_) => "map_err",
            Self::AndThen(_) => "and_then",
            Self::OrElse(_) => "or_else",
            Self::Tee(_) => "tee",
            Self::InspectErr(_) => "inspect_err",
            Self::Flatten(_) => "flatten",
        }
    }

    /// Returns `true` if this operation acts on `current`'s variant.
    pub(crate) const fn applies_to(&self, current: &Outcome<Erased, F>) -> bool {
        match self {
            Self::Map(_) | Self::AndThen(_) | Self::Tee(_) | Self::Flatten(_) => current.is_ok(),
            Self::MapErr(_) | Self::OrElse(_) | Self::InspectErr(_) => current.is_err(),
        }
    }

    /// Applies this operation to the current state.
    ///
    /// Operations that do not act on `current`'s variant return it unchanged.
    pub(crate) async fn apply(&self, current: Outcome<Erased, F>) -> Outcome<Erased, F> {
        match self {
            Self::Map(function) => match current {
                Outcome::Ok(value) => Outcome::Ok(function(value).resolve().await),
                failure @ Outcome::Err(_) => failure,
            },
            Self::MapErr(function) => match current {
                Outcome::Err(error) => Outcome::Err(function(error).resolve().await),
                success @ Outcome::Ok(_) => success,
            },
            Self::AndThen(function) => match current {
                Outcome::Ok(value) => function(value).resolve().await,
                failure @ Outcome::Err(_) => failure,
            },
            Self::OrElse(function) => match current {
                Outcome::Err(error) => function(error).resolve().await,
                success @ Outcome::Ok(_) => success,
            },
            Self::Tee(function) => {
                let effect = match &current {
                    Outcome::Ok(value) => Some(function(value)),
                    Outcome::Err(_) => None,
                };
                if let Some(step) = effect {
                    step.resolve().await;
                }
                current
            }
            Self::InspectErr(function) => {
                let effect = match &current {
                    Outcome::Err(error) => Some(function(error)),
                    Outcome::Ok(_) => None,
                };
                if let Some(step) = effect {
                    step.resolve().await;
                }
                current
            }
            Self::Flatten(function) => match current {
                Outcome::Ok(value) => function(value),
                failure @ Outcome::Err(_) => failure,
            },
        }
    }
}

struct Node<F> {
    operation: Operation<F>,
    previous: Option<Arc<Self>>,
}

/// An immutable, append-only list of operations.
///
/// Stored as a chain of `Arc` nodes from the newest operation back to the
/// oldest, so appending is O(1) and never copies the existing prefix.
pub(crate) struct OperationList<F> {
    last: Option<Arc<Node<F>>>,
    length: usize,
}

impl<F> OperationList<F> {
    /// Creates an empty list.
    #[inline]
    pub(crate) const fn new() -> Self {
        Self {
            last: None,
            length: 0,
        }
    }

    /// Returns the number of operations.
    #[inline]
    pub(crate) const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if no operation has been pushed.
    #[inline]
    pub(crate) const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns a new list with `operation` appended. `self` is unchanged.
    #[must_use]
    pub(crate) fn push(&self, operation: Operation<F>) -> Self {
        Self {
            last: Some(Arc::new(Node {
                operation,
                previous: self.last.clone(),
            })),
            length: self.length + 1,
        }
    }

    /// Returns the operations in append order.
    pub(crate) fn ordered(&self) -> SmallVec<[&Operation<F>; 8]> {
        let mut operations = SmallVec::with_capacity(self.length);
        let mut cursor = self.last.as_deref();
        while let Some(node) = cursor {
            operations.push(&node.operation);
            cursor = node.previous.as_deref();
        }
        operations.reverse();
        operations
    }
}

impl<F> Clone for OperationList<F> {
    fn clone(&self) -> Self {
        Self {
            last: self.last.clone(),
            length: self.length,
        }
    }
}

impl<F> Default for OperationList<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F> Drop for OperationList<F> {
    // Unlinks uniquely owned nodes iteratively so long chains do not
    // overflow the stack through recursive `Arc` drops.
    fn drop(&mut self) {
        let mut cursor = self.last.take();
        while let Some(node) = cursor {
            match Arc::try_unwrap(node) {
                Ok(mut node) => cursor = node.previous.take(),
                Err(_) => break,
            }
        }
    }
}
