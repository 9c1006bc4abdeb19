//! `LazyMaybe` - a deferred chain of `Maybe` transformations.
//!
//! The presence/absence counterpart of [`LazyOutcome`](super::LazyOutcome).
//! Internally a `Nothing` is a failure that carries no payload, so the same
//! interpreter drives both pipelines.
//!
//! # Examples
//!
//! ```rust,ignore
//! use railway::control::Maybe;
//! use railway::lazy::LazyMaybe;
//!
//! #[tokio::main]
//! async fn main() {
//!     let pipeline = LazyMaybe::some(4)
//!         .filter(|value| value % 2 == 0)
//!         .map_async(|value| async move { value * 10 });
//!     assert_eq!(pipeline.collect().await, Maybe::Some(40));
//!
//!     let recovered = LazyMaybe::<i32>::nothing().or_else(|| Maybe::Some(0));
//!     assert_eq!(recovered.collect().await, Maybe::Some(0));
//! }
//! ```

use std::fmt;
use std::future::{Future, IntoFuture};
use std::marker::PhantomData;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;

use super::operation::{Erased, Operation, Step, erase, reveal, reveal_ref};
use super::pipeline::{Pipeline, Source};
use crate::control::{Maybe, Outcome};

type State = Outcome<Erased, ()>;

fn into_state<T: Send + 'static>(maybe: Maybe<T>) -> State {
    maybe.ok_or(()).map(erase)
}

fn from_state<T: 'static>(state: State) -> Maybe<T> {
    state.ok().map(reveal::<T>)
}

/// A deferred `Maybe<T>` pipeline.
pub struct LazyMaybe<T> {
    pipeline: Pipeline<()>,
    _type: PhantomData<fn() -> T>,
}

impl<T> Clone for LazyMaybe<T> {
    fn clone(&self) -> Self {
        Self {
            pipeline: self.pipeline.clone(),
            _type: PhantomData,
        }
    }
}

impl<T> fmt::Debug for LazyMaybe<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("LazyMaybe")
            .field("pending_source", &self.pipeline.is_pending())
            .field("operations", &self.pipeline.len())
            .finish()
    }
}

impl<T> LazyMaybe<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Creates a pipeline over an existing maybe.
    #[must_use]
    pub fn from_maybe(maybe: Maybe<T>) -> Self {
        Self::from_source(Source::resolved(move || into_state(maybe.clone())))
    }

    /// Creates a pipeline that starts from `Some(value)`.
    #[must_use]
    pub fn some(value: T) -> Self {
        Self::from_maybe(Maybe::Some(value))
    }

    /// Creates a pipeline whose source is a pending computation.
    ///
    /// The future runs at most once; its output is shared by every
    /// collection.
    #[must_use]
    pub fn from_future<Fut>(future: Fut) -> Self
    where
        Fut: Future<Output = Maybe<T>> + Send + 'static,
    {
        let shared = future.boxed().shared();
        Self::from_source(Source::pending(move || {
            let shared = shared.clone();
            async move { into_state(shared.await) }.boxed()
        }))
    }
}

impl<T> LazyMaybe<T>
where
    T: Send + 'static,
{
    /// Creates a pipeline that starts from `Nothing`.
    #[must_use]
    pub fn nothing() -> Self {
        Self::from_source(Source::resolved(|| Outcome::Err(())))
    }

    /// Creates a pipeline whose source is produced by `factory` on every
    /// collection.
    #[must_use]
    pub fn from_fn<G, Fut>(factory: G) -> Self
    where
        G: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Maybe<T>> + Send + 'static,
    {
        Self::from_source(Source::pending(move || {
            let future = factory();
            async move { into_state(future.await) }.boxed()
        }))
    }

    const fn from_source(source: Source<()>) -> Self {
        Self {
            pipeline: Pipeline::new(source),
            _type: PhantomData,
        }
    }

    fn then<U>(&self, operation: Operation<()>) -> LazyMaybe<U> {
        LazyMaybe {
            pipeline: self.pipeline.then(operation),
            _type: PhantomData,
        }
    }

    /// Returns the number of operations recorded so far.
    #[must_use]
    pub const fn operation_count(&self) -> usize {
        self.pipeline.len()
    }

    /// Records a transformation of the present value.
    #[must_use]
    pub fn map<U, F>(&self, function: F) -> LazyMaybe<U>
    where
        F: Fn(T) -> U + Send + Sync + 'static,
        U: Send + 'static,
    {
        self.then(Operation::Map(Arc::new(move |value: Erased| {
            Step::Ready(erase(function(reveal::<T>(value))))
        })))
    }

    /// Records an asynchronous transformation of the present value.
    #[must_use]
    pub fn map_async<U, F, Fut>(&self, function: F) -> LazyMaybe<U>
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

    /// Records a bind on the present value.
    #[must_use]
    pub fn and_then<U, F>(&self, function: F) -> LazyMaybe<U>
    where
        F: Fn(T) -> Maybe<U> + Send + Sync + 'static,
        U: Send + 'static,
    {
        self.then(Operation::AndThen(Arc::new(move |value: Erased| {
            Step::Ready(into_state(function(reveal::<T>(value))))
        })))
    }

    /// Records an asynchronous bind.
    #[must_use]
    pub fn and_then_async<U, F, Fut>(&self, function: F) -> LazyMaybe<U>
    where
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Maybe<U>> + Send + 'static,
        U: Send + 'static,
    {
        self.then(Operation::AndThen(Arc::new(move |value: Erased| {
            let future = function(reveal::<T>(value));
            Step::pending(async move { into_state(future.await) })
        })))
    }

    /// Records a recovery from absence.
    #[must_use]
    pub fn or_else<F>(&self, function: F) -> Self
    where
        F: Fn() -> Maybe<T> + Send + Sync + 'static,
    {
        self.then(Operation::OrElse(Arc::new(move |(): ()| {
            Step::Ready(into_state(function()))
        })))
    }

    /// Records an asynchronous recovery from absence.
    #[must_use]
    pub fn or_else_async<F, Fut>(&self, function: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Maybe<T>> + Send + 'static,
    {
        self.then(Operation::OrElse(Arc::new(move |(): ()| {
            let future = function();
            Step::pending(async move { into_state(future.await) })
        })))
    }

    /// Records a filter: a present value failing `predicate` becomes
    /// `Nothing`.
    ///
    /// Recorded as a bind, so it shows up as `and_then` in trace events.
    #[must_use]
    pub fn filter<P>(&self, predicate: P) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.then(Operation::AndThen(Arc::new(move |value: Erased| {
            let keep = predicate(reveal_ref::<T>(&value));
            Step::Ready(if keep { Outcome::Ok(value) } else { Outcome::Err(()) })
        })))
    }

    /// Records an asynchronous filter. The predicate receives a clone of
    /// the value.
    #[must_use]
    pub fn filter_async<P, Fut>(&self, predicate: P) -> Self
    where
        T: Clone,
        P: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = bool> + Send + 'static,
    {
        self.then(Operation::AndThen(Arc::new(move |value: Erased| {
            let decision = predicate(reveal_ref::<T>(&value).clone());
            Step::pending(async move {
                if decision.await { Outcome::Ok(value) } else { Outcome::Err(()) }
            })
        })))
    }

    /// Records a side effect on the present value.
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

    /// Alias of [`LazyMaybe::tee`].
    #[must_use]
    pub fn inspect<F>(&self, function: F) -> Self
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.tee(function)
    }

    /// Records an asynchronous side effect on a clone of the present value.
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

    /// Records a side effect that runs when the value is absent.
    #[must_use]
    pub fn inspect_nothing<F>(&self, function: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.then(Operation::InspectErr(Arc::new(move |_: &()| {
            function();
            Step::Ready(())
        })))
    }

    /// Records an asynchronous side effect that runs when the value is
    /// absent.
    #[must_use]
    pub fn inspect_nothing_async<F, Fut>(&self, function: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.then(Operation::InspectErr(Arc::new(move |_: &()| {
            Step::pending(function())
        })))
    }

    /// Resolves the source and replays every recorded operation in order.
    pub async fn collect(&self) -> Maybe<T> {
        from_state(self.pipeline.run().await)
    }
}

impl<U> LazyMaybe<Maybe<U>>
where
    U: Send + 'static,
{
    /// Records the removal of one level of nesting.
    #[must_use]
    pub fn flatten(&self) -> LazyMaybe<U> {
        self.then(Operation::Flatten(Arc::new(|value: Erased| {
            into_state(reveal::<Maybe<U>>(value))
        })))
    }
}

impl<T: Send + 'static> IntoFuture for LazyMaybe<T> {
    type Output = Maybe<T>;
    type IntoFuture = BoxFuture<'static, Maybe<T>>;

    fn into_future(self) -> Self::IntoFuture {
        async move { self.collect().await }.boxed()
    }
}

impl<T> Maybe<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Lifts this maybe into a [`LazyMaybe`].
    #[must_use]
    pub fn lazy(self) -> LazyMaybe<T> {
        LazyMaybe::from_maybe(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[rstest]
    #[case(4, Maybe::Some(4))]
    #[case(3, Maybe::Nothing)]
    #[tokio::test]
    async fn test_filter_keeps_matching_values(#[case] input: i32, #[case] expected: Maybe<i32>) {
        let pipeline = LazyMaybe::some(input).filter(|value| value % 2 == 0);
        assert_eq!(pipeline.collect().await, expected);
    }

    #[rstest]
    #[tokio::test]
    async fn test_filter_async() {
        let pipeline = LazyMaybe::some(10).filter_async(|value| async move { value > 5 });
        assert_eq!(pipeline.collect().await, Maybe::Some(10));
    }

    #[rstest]
    #[tokio::test]
    async fn test_inspect_nothing_runs_only_on_absence() {
        let called = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&called);
        let present = LazyMaybe::some(1).inspect_nothing(move || flag.store(true, Ordering::SeqCst));

        assert_eq!(present.collect().await, Maybe::Some(1));
        assert!(!called.load(Ordering::SeqCst));

        let flag = Arc::clone(&called);
        let absent = LazyMaybe::<i32>::nothing().inspect_nothing(move || flag.store(true, Ordering::SeqCst));
        assert_eq!(absent.collect().await, Maybe::Nothing);
        assert!(called.load(Ordering::SeqCst));
    }

    #[rstest]
    #[tokio::test]
    async fn test_flatten_and_or_else() {
        let nested = LazyMaybe::some(Maybe::<i32>::Nothing).flatten().or_else(|| Maybe::Some(9));
        assert_eq!(nested.collect().await, Maybe::Some(9));
    }

    #[rstest]
    #[tokio::test]
    async fn test_some_holding_unit_is_present() {
        assert_eq!(Maybe::Some(()).lazy().await, Maybe::Some(()));
    }
}
