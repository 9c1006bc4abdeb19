//! Outcome type - the result of an operation that can succeed or fail.
//!
//! `Outcome<T, E>` is either `Ok(T)` carrying a success value or `Err(E)`
//! carrying an error value. Failures are ordinary data: every combinator
//! either branches on the variant explicitly or passes the failure through
//! untouched.
//!
//! # Examples
//!
//! ```rust
//! use railway::control::Outcome;
//!
//! fn divide(numerator: i32, denominator: i32) -> Outcome<i32, String> {
//!     if denominator == 0 {
//!         Outcome::Err("division by zero".to_string())
//!     } else {
//!         Outcome::Ok(numerator / denominator)
//!     }
//! }
//!
//! let result = divide(10, 2)
//!     .map(|x| x * 3)
//!     .and_then(|x| divide(x, 5));
//! assert_eq!(result, Outcome::Ok(3));
//!
//! let failed = divide(1, 0).map(|x| x * 3);
//! assert_eq!(failed, Outcome::Err("division by zero".to_string()));
//! ```

use std::fmt;
use std::future::Future;

use super::chained::{Cause, ChainedError};
use super::error::UnwrapError;
use super::maybe::Maybe;

/// A value that is either a success (`Ok`) or a failure (`Err`).
///
/// # Type Parameters
///
/// * `T` - The type of the success value
/// * `E` - The type of the error value
///
/// # Examples
///
/// ```rust
/// use railway::control::Outcome;
///
/// let success: Outcome<i32, String> = Outcome::Ok(21);
/// assert_eq!(success.map(|x| x * 2), Outcome::Ok(42));
///
/// let failure: Outcome<i32, &str> = Outcome::Err("boom");
/// assert_eq!(failure.map(|x| x * 2), Outcome::Err("boom"));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Outcome<T, E> {
    /// The success variant.
    Ok(T),
    /// The failure variant.
    Err(E),
}

impl<T, E> Outcome<T, E> {
    // =========================================================================
    // Type Checking
    // =========================================================================

    /// Returns `true` if this is an `Ok` value.
    #[inline]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    /// Returns `true` if this is an `Err` value.
    #[inline]
    pub const fn is_err(&self) -> bool {
        matches!(self, Self::Err(_))
    }

    /// Returns `true` if this is `Ok` and the value satisfies `predicate`.
    #[inline]
    pub fn is_ok_and<P>(self, predicate: P) -> bool
    where
        P: FnOnce(T) -> bool,
    {
        match self {
            Self::Ok(value) => predicate(value),
            Self::Err(_) => false,
        }
    }

    /// Returns `true` if this is `Err` and the error satisfies `predicate`.
    #[inline]
    pub fn is_err_and<P>(self, predicate: P) -> bool
    where
        P: FnOnce(E) -> bool,
    {
        match self {
            Self::Ok(_) => false,
            Self::Err(error) => predicate(error),
        }
    }

    /// Converts `&Outcome<T, E>` into `Outcome<&T, &E>`.
    #[inline]
    pub const fn as_ref(&self) -> Outcome<&T, &E> {
        match self {
            Self::Ok(value) => Outcome::Ok(value),
            Self::Err(error) => Outcome::Err(error),
        }
    }

    // =========================================================================
    // Value Extraction
    // =========================================================================

    /// Returns the success value, or an [`UnwrapError`] carrying the error.
    ///
    /// # Errors
    ///
    /// Returns `UnwrapError` if this is an `Err`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use railway::control::Outcome;
    ///
    /// let ok: Outcome<i32, &str> = Outcome::Ok(5);
    /// assert_eq!(ok.try_unwrap(), Ok(5));
    ///
    /// let err: Outcome<i32, &str> = Outcome::Err("fail");
    /// assert_eq!(err.try_unwrap().unwrap_err().value, "fail");
    /// ```
    pub fn try_unwrap(self) -> Result<T, UnwrapError<E>> {
        match self {
            Self::Ok(value) => Ok(value),
            Self::Err(error) => Err(UnwrapError::new("called unwrap on Err", error)),
        }
    }

    /// Returns the error value, or an [`UnwrapError`] carrying the success value.
    ///
    /// # Errors
    ///
    /// Returns `UnwrapError` if this is an `Ok`.
    pub fn try_unwrap_err(self) -> Result<E, UnwrapError<T>> {
        match self {
            Self::Ok(value) => Err(UnwrapError::new("called unwrap_err on Ok", value)),
            Self::Err(error) => Ok(error),
        }
    }

    /// Returns the success value or `default`.
    #[inline]
    pub fn unwrap_or(self, default: T) -> T {
        match self {
            Self::Ok(value) => value,
            Self::Err(_) => default,
        }
    }

    /// Returns the success value or computes one from the error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use railway::control::Outcome;
    ///
    /// let err: Outcome<usize, &str> = Outcome::Err("fail");
    /// assert_eq!(err.unwrap_or_else(str::len), 4);
    /// ```
    #[inline]
    pub fn unwrap_or_else<F>(self, function: F) -> T
    where
        F: FnOnce(E) -> T,
    {
        match self {
            Self::Ok(value) => value,
            Self::Err(error) => function(error),
        }
    }

    /// Returns the success value, or converts the error into a native
    /// `std::result::Result` failure.
    ///
    /// Intended for the boundary where this crate meets code that expects
    /// `?`-propagation, such as web framework handlers.
    ///
    /// # Errors
    ///
    /// Returns `Err(function(error))` if this is an `Err`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use railway::control::Outcome;
    ///
    /// fn handler(outcome: Outcome<u32, &str>) -> Result<u32, std::io::Error> {
    ///     let value = outcome.unwrap_or_raise(std::io::Error::other)?;
    ///     Ok(value + 1)
    /// }
    ///
    /// assert_eq!(handler(Outcome::Ok(1)).unwrap(), 2);
    /// assert!(handler(Outcome::Err("bad")).is_err());
    /// ```
    pub fn unwrap_or_raise<X, F>(self, function: F) -> Result<T, X>
    where
        F: FnOnce(E) -> X,
    {
        match self {
            Self::Ok(value) => Ok(value),
            Self::Err(error) => Err(function(error)),
        }
    }

    /// Converts into a `Maybe` of the success value.
    ///
    /// A success holding a "null-like" payload such as `None` or `()` is
    /// still `Maybe::Some`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use railway::control::{Maybe, Outcome};
    ///
    /// let ok: Outcome<Option<i32>, &str> = Outcome::Ok(None);
    /// assert_eq!(ok.ok(), Maybe::Some(None));
    /// ```
    #[inline]
    pub fn ok(self) -> Maybe<T> {
        match self {
            Self::Ok(value) => Maybe::Some(value),
            Self::Err(_) => Maybe::Nothing,
        }
    }

    /// Converts into a `Maybe` of the error value.
    #[inline]
    pub fn err(self) -> Maybe<E> {
        match self {
            Self::Ok(_) => Maybe::Nothing,
            Self::Err(error) => Maybe::Some(error),
        }
    }

    /// Decomposes into a `(value, error)` pair, exactly one of which is set.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use railway::control::Outcome;
    ///
    /// let (value, error) = Outcome::<i32, &str>::Ok(5).split();
    /// assert_eq!((value, error), (Some(5), None));
    /// ```
    #[inline]
    pub fn split(self) -> (Option<T>, Option<E>) {
        match self {
            Self::Ok(value) => (Some(value), None),
            Self::Err(error) => (None, Some(error)),
        }
    }

    /// Converts into a standard library `Result`.
    #[inline]
    pub fn into_result(self) -> Result<T, E> {
        self.into()
    }

    // =========================================================================
    // Mapping Operations
    // =========================================================================

    /// Applies `function` to the success value, passing an error through.
    #[inline]
    pub fn map<U, F>(self, function: F) -> Outcome<U, E>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Ok(value) => Outcome::Ok(function(value)),
            Self::Err(error) => Outcome::Err(error),
        }
    }

    /// Applies `function` to the error value, passing a success through.
    #[inline]
    pub fn map_err<G, F>(self, function: F) -> Outcome<T, G>
    where
        F: FnOnce(E) -> G,
    {
        match self {
            Self::Ok(value) => Outcome::Ok(value),
            Self::Err(error) => Outcome::Err(function(error)),
        }
    }

    /// Applies `function` to the success value, or returns `default`.
    #[inline]
    pub fn map_or<U, F>(self, default: U, function: F) -> U
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Ok(value) => function(value),
            Self::Err(_) => default,
        }
    }

    /// Applies `on_ok` to the success value or `on_err` to the error value.
    #[inline]
    pub fn map_or_else<U, D, F>(self, on_err: D, on_ok: F) -> U
    where
        D: FnOnce(E) -> U,
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Ok(value) => on_ok(value),
            Self::Err(error) => on_err(error),
        }
    }

    // =========================================================================
    // Chaining Operations
    // =========================================================================

    /// Chains an `Outcome`-returning function on success.
    ///
    /// Short-circuits on `Err`: `function` is not called.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use railway::control::Outcome;
    ///
    /// fn positive(x: i32) -> Outcome<i32, &'static str> {
    ///     if x > 0 { Outcome::Ok(x) } else { Outcome::Err("must be positive") }
    /// }
    ///
    /// assert_eq!(Outcome::Ok(5).and_then(positive), Outcome::Ok(5));
    /// assert_eq!(Outcome::Ok(-1).and_then(positive), Outcome::Err("must be positive"));
    /// ```
    #[inline]
    pub fn and_then<U, F>(self, function: F) -> Outcome<U, E>
    where
        F: FnOnce(T) -> Outcome<U, E>,
    {
        match self {
            Self::Ok(value) => function(value),
            Self::Err(error) => Outcome::Err(error),
        }
    }

    /// Recovers from an error with an `Outcome`-returning function.
    ///
    /// Short-circuits on `Ok`: `function` is not called.
    #[inline]
    pub fn or_else<G, F>(self, function: F) -> Outcome<T, G>
    where
        F: FnOnce(E) -> Outcome<T, G>,
    {
        match self {
            Self::Ok(value) => Outcome::Ok(value),
            Self::Err(error) => function(error),
        }
    }

    /// Calls `function` with the success value for its side effect.
    ///
    /// Returns `self` unchanged. A panic inside `function` is not caught.
    #[inline]
    #[must_use]
    pub fn tee<F>(self, function: F) -> Self
    where
        F: FnOnce(&T),
    {
        if let Self::Ok(value) = &self {
            function(value);
        }
        self
    }

    /// Alias for [`tee`](Self::tee).
    #[inline]
    #[must_use]
    pub fn inspect<F>(self, function: F) -> Self
    where
        F: FnOnce(&T),
    {
        self.tee(function)
    }

    /// Calls `function` with the error value for its side effect.
    ///
    /// Returns `self` unchanged.
    #[inline]
    #[must_use]
    pub fn inspect_err<F>(self, function: F) -> Self
    where
        F: FnOnce(&E),
    {
        if let Self::Err(error) = &self {
            function(error);
        }
        self
    }

    /// Turns a success that fails `predicate` into `Err(error)`.
    ///
    /// The error value is built eagerly; see
    /// [`filter_or_else`](Self::filter_or_else) for a lazily computed one.
    #[inline]
    #[must_use]
    pub fn filter<P>(self, predicate: P, error: E) -> Self
    where
        P: FnOnce(&T) -> bool,
    {
        match self {
            Self::Ok(value) => {
                if predicate(&value) {
                    Self::Ok(value)
                } else {
                    Self::Err(error)
                }
            }
            Self::Err(existing) => Self::Err(existing),
        }
    }

    /// Like [`filter`](Self::filter), computing the error from the rejected value.
    #[inline]
    #[must_use]
    pub fn filter_or_else<P, F>(self, predicate: P, function: F) -> Self
    where
        P: FnOnce(&T) -> bool,
        F: FnOnce(&T) -> E,
    {
        match self {
            Self::Ok(value) => {
                if predicate(&value) {
                    Self::Ok(value)
                } else {
                    Self::Err(function(&value))
                }
            }
            Self::Err(existing) => Self::Err(existing),
        }
    }

    /// Pairs two successes. If both are errors, `self`'s error wins.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use railway::control::Outcome;
    ///
    /// let first: Outcome<i32, &str> = Outcome::Err("first");
    /// let second: Outcome<i32, &str> = Outcome::Err("second");
    /// assert_eq!(first.zip(second), Outcome::Err("first"));
    /// ```
    #[inline]
    pub fn zip<U>(self, other: Outcome<U, E>) -> Outcome<(T, U), E> {
        self.zip_with(other, |left, right| (left, right))
    }

    /// Combines two successes with `function`. If both are errors, `self`'s
    /// error wins.
    #[inline]
    pub fn zip_with<U, R, F>(self, other: Outcome<U, E>, function: F) -> Outcome<R, E>
    where
        F: FnOnce(T, U) -> R,
    {
        match (self, other) {
            (Self::Ok(left), Outcome::Ok(right)) => Outcome::Ok(function(left, right)),
            (Self::Err(error), _) | (Self::Ok(_), Outcome::Err(error)) => Outcome::Err(error),
        }
    }

    // =========================================================================
    // Error Context
    // =========================================================================

    /// Wraps the error in a [`ChainedError`] labelled `label`.
    ///
    /// If the error already is a `ChainedError`, the label is pushed on top.
    /// A success passes through unchanged.
    pub fn context(self, label: impl Into<String>) -> Outcome<T, ChainedError>
    where
        E: Cause,
    {
        match self {
            Self::Ok(value) => Outcome::Ok(value),
            Self::Err(error) => Outcome::Err(ChainedError::new(label, error)),
        }
    }

    /// Like [`context`](Self::context), computing the label only on `Err`.
    pub fn with_context<L, F>(self, function: F) -> Outcome<T, ChainedError>
    where
        E: Cause,
        L: Into<String>,
        F: FnOnce() -> L,
    {
        match self {
            Self::Ok(value) => Outcome::Ok(value),
            Self::Err(error) => Outcome::Err(ChainedError::new(function(), error)),
        }
    }

    // =========================================================================
    // Async Operations
    // =========================================================================

    /// Applies an async `function` to the success value.
    pub async fn map_async<U, F, Fut>(self, function: F) -> Outcome<U, E>
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = U>,
    {
        match self {
            Self::Ok(value) => Outcome::Ok(function(value).await),
            Self::Err(error) => Outcome::Err(error),
        }
    }

    /// Applies an async `function` to the error value.
    pub async fn map_err_async<G, F, Fut>(self, function: F) -> Outcome<T, G>
    where
        F: FnOnce(E) -> Fut,
        Fut: Future<Output = G>,
    {
        match self {
            Self::Ok(value) => Outcome::Ok(value),
            Self::Err(error) => Outcome::Err(function(error).await),
        }
    }

    /// Chains an async `Outcome`-returning function on success.
    pub async fn and_then_async<U, F, Fut>(self, function: F) -> Outcome<U, E>
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = Outcome<U, E>>,
    {
        match self {
            Self::Ok(value) => function(value).await,
            Self::Err(error) => Outcome::Err(error),
        }
    }

    /// Recovers from an error with an async `Outcome`-returning function.
    pub async fn or_else_async<G, F, Fut>(self, function: F) -> Outcome<T, G>
    where
        F: FnOnce(E) -> Fut,
        Fut: Future<Output = Outcome<T, G>>,
    {
        match self {
            Self::Ok(value) => Outcome::Ok(value),
            Self::Err(error) => function(error).await,
        }
    }
}

// =============================================================================
// Panicking Accessors
// =============================================================================

impl<T, E: fmt::Debug> Outcome<T, E> {
    /// Returns the success value.
    ///
    /// # Panics
    ///
    /// Panics if this is an `Err`, with the error's `Debug` output in the
    /// message.
    #[track_caller]
    pub fn unwrap(self) -> T {
        match self.try_unwrap() {
            Ok(value) => value,
            Err(error) => panic!("{}: {:?}", error.message, error.value),
        }
    }

    /// Returns the success value.
    ///
    /// # Panics
    ///
    /// Panics with `"{message}: {error:?}"` if this is an `Err`.
    #[track_caller]
    pub fn expect(self, message: &str) -> T {
        match self {
            Self::Ok(value) => value,
            Self::Err(error) => panic!("{message}: {error:?}"),
        }
    }
}

impl<T: fmt::Debug, E> Outcome<T, E> {
    /// Returns the error value.
    ///
    /// # Panics
    ///
    /// Panics if this is an `Ok`, with the value's `Debug` output in the
    /// message.
    #[track_caller]
    pub fn unwrap_err(self) -> E {
        match self.try_unwrap_err() {
            Ok(error) => error,
            Err(error) => panic!("{}: {:?}", error.message, error.value),
        }
    }

    /// Returns the error value.
    ///
    /// # Panics
    ///
    /// Panics with `"{message}: {value:?}"` if this is an `Ok`.
    #[track_caller]
    pub fn expect_err(self, message: &str) -> E {
        match self {
            Self::Ok(value) => panic!("{message}: {value:?}"),
            Self::Err(error) => error,
        }
    }
}

impl<T: Default, E> Outcome<T, E> {
    /// Returns the success value or `T::default()`.
    #[inline]
    pub fn unwrap_or_default(self) -> T {
        match self {
            Self::Ok(value) => value,
            Self::Err(_) => T::default(),
        }
    }
}

impl<T, E> Outcome<Outcome<T, E>, E> {
    /// Removes one level of nesting.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use railway::control::Outcome;
    ///
    /// let nested: Outcome<Outcome<Outcome<i32, &str>, &str>, &str> =
    ///     Outcome::Ok(Outcome::Ok(Outcome::Ok(5)));
    /// assert_eq!(nested.flatten(), Outcome::Ok(Outcome::Ok(5)));
    /// ```
    #[inline]
    pub fn flatten(self) -> Outcome<T, E> {
        match self {
            Self::Ok(inner) => inner,
            Self::Err(error) => Outcome::Err(error),
        }
    }
}

/// Returns `true` if `outcome` is `Ok`.
#[inline]
pub const fn is_ok<T, E>(outcome: &Outcome<T, E>) -> bool {
    outcome.is_ok()
}

/// Returns `true` if `outcome` is `Err`.
#[inline]
pub const fn is_err<T, E>(outcome: &Outcome<T, E>) -> bool {
    outcome.is_err()
}

impl<T: fmt::Debug, E: fmt::Debug> fmt::Debug for Outcome<T, E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok(value) => formatter.debug_tuple("Ok").field(value).finish(),
            Self::Err(error) => formatter.debug_tuple("Err").field(error).finish(),
        }
    }
}

impl<T, E> From<Result<T, E>> for Outcome<T, E> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Ok(value),
            Err(error) => Self::Err(error),
        }
    }
}

impl<T, E> From<Outcome<T, E>> for Result<T, E> {
    fn from(outcome: Outcome<T, E>) -> Self {
        match outcome {
            Outcome::Ok(value) => Ok(value),
            Outcome::Err(error) => Err(error),
        }
    }
}
