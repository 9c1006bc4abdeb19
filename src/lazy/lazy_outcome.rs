//! `LazyOutcome` - a deferred chain of `Outcome` transformations.
//!
//! A `LazyOutcome<T, E>` describes where an `Outcome<T, E>` comes from and
//! what should happen to it, without doing any of it. Nothing runs until
//! [`LazyOutcome::collect`] is awaited, and every collection starts over from
//! the source.
//!
//! # Examples
//!
//! ```rust,ignore
//! use railway::control::Outcome;
//! use railway::lazy::LazyOutcome;
//!
//! #[tokio::main]
//! async fn main() {
//!     let pipeline = LazyOutcome::<i32, String>::ok(5)
//!         .map(|value| value + 1)
//!         .map_async(|value| async move { value * 2 })
//!         .map(|value| value.to_string());
//!
//!     assert_eq!(pipeline.collect().await, Outcome::Ok("12".to_string()));
//! }
//! ```
//!
//! # Branching
//!
//! Chain methods take `&self` and return a new pipeline, so a pipeline can be
//! extended in several directions and each branch collected independently.
//!
//! ```rust,ignore
//! use railway::control::Outcome;
//! use railway::lazy::LazyOutcome;
//!
//! #[tokio::main]
//! async fn main() {
//!     let base = LazyOutcome::<i32, String>::ok(1).map(|value| value + 1);
//!     let doubled = base.map(|value| value * 2);
//!     let failed = base.and_then(|_| Outcome::Err("rejected".to_string()));
//!
//!     assert_eq!(doubled.collect().await, Outcome::Ok(4));
//!     assert_eq!(failed.collect().await, Outcome::Err("rejected".to_string()));
//!     assert_eq!(base.collect().await, Outcome::Ok(2));
//! }
//! ```

use std::fmt;
use std::future::{Future, IntoFuture};
use std::marker::PhantomData;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;

use super::operation::{Erased, Operation, Step, erase, erase_outcome, reveal, reveal_ref};
use super::pipeline::{Pipeline, Source};
use crate::control::Outcome;

/// A deferred `Outcome<T, E>` pipeline.
///
/// `LazyOutcome` is `Clone + Send + Sync` whenever it can be built at all;
/// cloning shares the source and the recorded operations.
pub struct LazyOutcome<T, E> {
    pipeline: Pipeline<Erased>,
    _types: PhantomData<fn() -> (T, E)>,
}

impl<T, E> Clone for LazyOutcome<T, E> {
    fn clone(&self) -> Self {
        Self {
            pipeline: self.pipeline.clone(),
            _types: PhantomData,
        }
    }
}

impl<T, E> fmt::Debug for LazyOutcome<T, E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("LazyOutcome")
            .field("pending_source", &self.pipeline.is_pending())
            .field("operations", &self.pipeline.len())
            .finish()
    }
}

// =============================================================================
// Construction
// =============================================================================

impl<T, E> LazyOutcome<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    /// Creates a pipeline over an existing outcome.
    ///
    /// Every collection starts from its own clone of `outcome`.
    #[must_use]
    pub fn from_outcome(outcome: Outcome<T, E>) -> Self {
        Self::from_source(Source::resolved(move || erase_outcome(outcome.clone())))
    }

    /// Creates a pipeline that starts from `Ok(value)`.
    #[must_use]
    pub fn ok(value: T) -> Self {
        Self::from_outcome(Outcome::Ok(value))
    }

    /// Creates a pipeline that starts from `Err(error)`.
    #[must_use]
    pub fn err(error: E) -> Self {
        Self::from_outcome(Outcome::Err(error))
    }

    /// Creates a pipeline whose source is a pending computation.
    ///
    /// The future is polled on the first collection only; its output is
    /// shared by every later collection, of this pipeline and of every
    /// pipeline derived from it. If it panics, the panic surfaces from
    /// `collect`.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use railway::control::Outcome;
    /// use railway::lazy::LazyOutcome;
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let pipeline = LazyOutcome::from_future(async { Outcome::<i32, String>::Ok(20) })
    ///         .map(|value| value + 1);
    ///     assert_eq!(pipeline.collect().await, Outcome::Ok(21));
    /// }
    /// ```
    #[must_use]
    pub fn from_future<Fut>(future: Fut) -> Self
    where
        Fut: Future<Output = Outcome<T, E>> + Send + 'static,
    {
        let shared = future.boxed().shared();
        Self::from_source(Source::pending(move || {
            let shared = shared.clone();
            async move { erase_outcome(shared.await) }.boxed()
        }))
    }
}

impl<T, E> LazyOutcome<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    /// Creates a pipeline whose source is produced by `factory`.
    ///
    /// `factory` is invoked afresh on every collection, so each collection
    /// performs its own computation. Unlike the other constructors this one
    /// puts no `Clone` bound on the payloads.
    #[must_use]
    pub fn from_fn<G, Fut>(factory: G) -> Self
    where
        G: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Outcome<T, E>> + Send + 'static,
    {
        Self::from_source(Source::pending(move || {
            let future = factory();
            async move { erase_outcome(future.await) }.boxed()
        }))
    }

    const fn from_source(source: Source<Erased>) -> Self {
        Self {
            pipeline: Pipeline::new(source),
            _types: PhantomData,
        }
    }

    fn then<U, G>(&self, operation: Operation<Erased>) -> LazyOutcome<U, G> {
        LazyOutcome {
            pipeline: self.pipeline.then(operation),
            _types: PhantomData,
        }
    }

    /// Returns the number of operations recorded so far.
    #[must_use]
    pub const fn operation_count(&self) -> usize {
        self.pipeline.len()
    }

    // =========================================================================
    // Success-side operations
    // =========================================================================

    /// Records a transformation of the success value.
    #[must_use]
    pub fn map<U, F>(&self, function: F) -> LazyOutcome<U, E>
    where
        F: Fn(T) -> U + Send + Sync + 'static,
        U: Send + 'static,
    {
        self.then(Operation::Map(Arc::new(move |value: Erased| {
            Step::Ready(erase(function(reveal::<T>(value))))
        })))
    }

    /// Records an asynchronous transformation of the success value.
    #[must_use]
    pub fn map_async<U, F, Fut>(&self, function: F) -> LazyOutcome<U, E>
    where
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = U> + Send + 'static,
        U: Send + 'static,
    {
        self.then(Operation::Map(Arc::new(move |value: Erased| {
            let future = function(reveal::<T>(value));
            Step::pending(async move { erase(future.await) })
        })))
    }

    /// Records a bind: on success, the function's outcome replaces the
    /// current one.
    #[must_use]
    pub fn and_then<U, F>(&self, function: F) -> LazyOutcome<U, E>
    where
        F: Fn(T) -> Outcome<U, E> + Send + Sync + 'static,
        U: Send + 'static,
    {
        self.then(Operation::AndThen(Arc::new(move |value: Erased| {
            Step::Ready(erase_outcome(function(reveal::<T>(value))))
        })))
    }

    /// Records an asynchronous bind.
    #[must_use]
    pub fn and_then_async<U, F, Fut>(&self, function: F) -> LazyOutcome<U, E>
    where
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Outcome<U, E>> + Send + 'static,
        U: Send + 'static,
    {
        self.then(Operation::AndThen(Arc::new(move |value: Erased| {
            let future = function(reveal::<T>(value));
            Step::pending(async move { erase_outcome(future.await) })
        })))
    }

    /// Records a side effect on the success value. The outcome is unchanged.
    #[must_use]
    pub fn tee<F>(&self, function: F) -> Self
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.then(Operation::Tee(Arc::new(move |value: &Erased| {
            function(reveal_ref::<T>(value));
            Step::Ready(())
        })))
    }

    /// Alias of [`LazyOutcome::tee`].
    #[must_use]
    pub fn inspect<F>(&self, function: F) -> Self
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.tee(function)
    }

    /// Records an asynchronous side effect on the success value.
    ///
    /// The function receives a clone of the value, so the returned future
    /// may own it.
    #[must_use]
    pub fn tee_async<F, Fut>(&self, function: F) -> Self
    where
        T: Clone,
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.then(Operation::Tee(Arc::new(move |value: &Erased| {
            Step::pending(function(reveal_ref::<T>(value).clone()))
        })))
    }

    // =========================================================================
    // Failure-side operations
    // =========================================================================

    /// Records a transformation of the error value.
    #[must_use]
    pub fn map_err<G, F>(&self, function: F) -> LazyOutcome<T, G>
    where
        F: Fn(E) -> G + Send + Sync + 'static,
        G: Send + 'static,
    {
        self.then(Operation::MapErr(Arc::new(move |error: Erased| {
            Step::Ready(erase(function(reveal::<E>(error))))
        })))
    }

    /// Records an asynchronous transformation of the error value.
    #[must_use]
    pub fn map_err_async<G, F, Fut>(&self, function: F) -> LazyOutcome<T, G>
    where
        F: Fn(E) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = G> + Send + 'static,
        G: Send + 'static,
    {
        self.then(Operation::MapErr(Arc::new(move |error: Erased| {
            let future = function(reveal::<E>(error));
            Step::pending(async move { erase(future.await) })
        })))
    }

    /// Records a recovery: on failure, the function's outcome replaces the
    /// current one.
    #[must_use]
    pub fn or_else<G, F>(&self, function: F) -> LazyOutcome<T, G>
    where
        F: Fn(E) -> Outcome<T, G> + Send + Sync + 'static,
        G: Send + 'static,
    {
        self.then(Operation::OrElse(Arc::new(move |error: Erased| {
            Step::Ready(erase_outcome(function(reveal::<E>(error))))
        })))
    }

    /// Records an asynchronous recovery.
    #[must_use]
    pub fn or_else_async<G, F, Fut>(&self, function: F) -> LazyOutcome<T, G>
    where
        F: Fn(E) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Outcome<T, G>> + Send + 'static,
        G: Send + 'static,
    {
        self.then(Operation::OrElse(Arc::new(move |error: Erased| {
            let future = function(reveal::<E>(error));
            Step::pending(async move { erase_outcome(future.await) })
        })))
    }

    /// Records a side effect on the error value. The outcome is unchanged.
    #[must_use]
    pub fn inspect_err<F>(&self, function: F) -> Self
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        self.then(Operation::InspectErr(Arc::new(move |error: &Erased| {
            function(reveal_ref::<E>(error));
            Step::Ready(())
        })))
    }

    /// Records an asynchronous side effect on the error value.
    ///
    /// The function receives a clone of the error.
    #[must_use]
    pub fn inspect_err_async<F, Fut>(&self, function: F) -> Self
    where
        E: Clone,
        F: Fn(E) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.then(Operation::InspectErr(Arc::new(move |error: &Erased| {
            Step::pending(function(reveal_ref::<E>(error).clone()))
        })))
    }

    // =========================================================================
    // Execution
    // =========================================================================

    /// Resolves the source and replays every recorded operation in order.
    ///
    /// This is the only place a pipeline does any work. Collecting does not
    /// consume the pipeline; collecting again starts from the source again.
    pub async fn collect(&self) -> Outcome<T, E> {
        self.pipeline.run().await.map(reveal::<T>).map_err(reveal::<E>)
    }
}

impl<U, E> LazyOutcome<Outcome<U, E>, E>
where
    U: Send + 'static,
    E: Send + 'static,
{
    /// Records the removal of one level of nesting.
    ///
    /// An outer `Err` stays as it is; an inner outcome replaces the outer
    /// success.
    #[must_use]
    pub fn flatten(&self) -> LazyOutcome<U, E> {
        self.then(Operation::Flatten(Arc::new(|value: Erased| {
            erase_outcome(reveal::<Outcome<U, E>>(value))
        })))
    }
}

impl<T, E> IntoFuture for LazyOutcome<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    type Output = Outcome<T, E>;
    type IntoFuture = BoxFuture<'static, Outcome<T, E>>;

    fn into_future(self) -> Self::IntoFuture {
        async move { self.collect().await }.boxed()
    }
}

impl<T, E> Outcome<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    /// Lifts this outcome into a [`LazyOutcome`].
    #[must_use]
    pub fn lazy(self) -> LazyOutcome<T, E> {
        LazyOutcome::from_outcome(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[rstest]
    #[tokio::test]
    async fn test_mixed_sync_and_async_map() {
        let pipeline = LazyOutcome::<i32, String>::ok(5)
            .map(|value| value + 1)
            .map_async(|value| async move { value * 2 })
            .map(|value| value.to_string());

        assert_eq!(pipeline.collect().await, Outcome::Ok("12".to_string()));
    }

    #[rstest]
    #[tokio::test]
    async fn test_map_err_changes_error_type() {
        let pipeline = LazyOutcome::<i32, &str>::err("boom").map_err(str::len);
        assert_eq!(pipeline.collect().await, Outcome::Err(4));
    }

    #[rstest]
    #[tokio::test]
    async fn test_or_else_recovers() {
        let pipeline = LazyOutcome::<i32, String>::err("missing".to_string())
            .or_else(|error| Outcome::<i32, usize>::Ok(error.len() as i32));
        assert_eq!(pipeline.collect().await, Outcome::Ok(7));
    }

    #[rstest]
    #[tokio::test]
    async fn test_flatten_removes_one_level() {
        let nested: LazyOutcome<Outcome<Outcome<i32, String>, String>, String> =
            LazyOutcome::ok(Outcome::Ok(Outcome::Ok(5)));
        assert_eq!(nested.flatten().collect().await, Outcome::Ok(Outcome::Ok(5)));
    }

    #[rstest]
    #[tokio::test]
    async fn test_tee_does_not_change_value() {
        let seen = Arc::new(AtomicUsize::new(0));
        let observer = Arc::clone(&seen);
        let pipeline = LazyOutcome::<usize, String>::ok(3).tee(move |value| {
            observer.fetch_add(*value, Ordering::SeqCst);
        });

        assert_eq!(seen.load(Ordering::SeqCst), 0);
        assert_eq!(pipeline.collect().await, Outcome::Ok(3));
        assert_eq!(seen.load(Ordering::SeqCst), 3);
    }

    #[rstest]
    #[tokio::test]
    async fn test_into_future_collects() {
        let pipeline = Outcome::<i32, String>::Ok(2).lazy().map(|value| value * 21);
        assert_eq!(pipeline.operation_count(), 1);
        assert_eq!(pipeline.await, Outcome::Ok(42));
    }
}
