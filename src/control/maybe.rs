//! Maybe type - a value that may be absent.
//!
//! `Maybe<T>` is either `Some(T)` or `Nothing`. Presence is structural: a
//! `Some` holding `0`, `""`, `false`, `()` or even `None` is still present.
//! `Nothing` carries no payload, so every absence is the same value; the
//! canonical instance is [`Maybe::NOTHING`].
//!
//! # Examples
//!
//! ```rust
//! use railway::control::{Maybe, from_nullable};
//!
//! let configured: Option<&str> = None;
//! let port = from_nullable(configured)
//!     .and_then(|raw| from_nullable(raw.parse::<u16>().ok()))
//!     .filter(|port| *port != 0)
//!     .unwrap_or(8080);
//! assert_eq!(port, 8080);
//!
//! assert_eq!(Maybe::Some(2).zip_with(Maybe::Some(3), |a, b| a + b), Maybe::Some(5));
//! assert!(Maybe::Some(1).xor(Maybe::Some(2)).is_nothing());
//! ```

use std::fmt;
use std::future::Future;

use super::error::UnwrapError;
use super::outcome::Outcome;

/// A value that is either present (`Some`) or absent (`Nothing`).
///
/// Usable as a `HashMap`/`HashSet` key whenever `T` is.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Maybe<T> {
    /// A present value.
    Some(T),
    /// The absence marker.
    Nothing,
}

/// Returns the canonical absence.
#[inline]
pub const fn nothing<T>() -> Maybe<T> {
    Maybe::Nothing
}

/// Converts a standard `Option` into a `Maybe`.
///
/// Every `Some` becomes `Maybe::Some`, including zero, empty strings and
/// `false`.
///
/// # Examples
///
/// ```rust
/// use railway::control::{Maybe, from_nullable};
///
/// assert_eq!(from_nullable(Some(0)), Maybe::Some(0));
/// assert_eq!(from_nullable(Some("")), Maybe::Some(""));
/// assert_eq!(from_nullable(Some(false)), Maybe::Some(false));
/// assert_eq!(from_nullable::<i32>(None), Maybe::Nothing);
/// ```
#[inline]
pub fn from_nullable<T>(value: Option<T>) -> Maybe<T> {
    value.into()
}

/// Returns `true` if `maybe` is `Some`.
#[inline]
pub const fn is_some<T>(maybe: &Maybe<T>) -> bool {
    maybe.is_some()
}

/// Returns `true` if `maybe` is `Nothing`.
#[inline]
pub const fn is_nothing<T>(maybe: &Maybe<T>) -> bool {
    maybe.is_nothing()
}

impl<T> Maybe<T> {
    /// The canonical absence.
    pub const NOTHING: Self = Self::Nothing;

    // =========================================================================
    // Type Checking
    // =========================================================================

    /// Returns `true` if a value is present.
    #[inline]
    pub const fn is_some(&self) -> bool {
        matches!(self, Self::Some(_))
    }

    /// Returns `true` if no value is present.
    #[inline]
    pub const fn is_nothing(&self) -> bool {
        matches!(self, Self::Nothing)
    }

    /// Converts `&Maybe<T>` into `Maybe<&T>`.
    #[inline]
    pub const fn as_ref(&self) -> Maybe<&T> {
        match self {
            Self::Some(value) => Maybe::Some(value),
            Self::Nothing => Maybe::Nothing,
        }
    }

    // =========================================================================
    // Value Extraction
    // =========================================================================

    /// Returns the value, or an [`UnwrapError`] if absent.
    ///
    /// # Errors
    ///
    /// Returns `UnwrapError` if this is `Nothing`.
    pub fn try_unwrap(self) -> Result<T, UnwrapError<()>> {
        match self {
            Self::Some(value) => Ok(value),
            Self::Nothing => Err(UnwrapError::new("called unwrap on Nothing", ())),
        }
    }

    /// Returns the value.
    ///
    /// # Panics
    ///
    /// Panics if this is `Nothing`.
    #[track_caller]
    pub fn unwrap(self) -> T {
        match self {
            Self::Some(value) => value,
            Self::Nothing => panic!("called unwrap on Nothing"),
        }
    }

    /// Returns the value.
    ///
    /// # Panics
    ///
    /// Panics with `message` if this is `Nothing`.
    #[track_caller]
    pub fn expect(self, message: &str) -> T {
        match self {
            Self::Some(value) => value,
            Self::Nothing => panic!("{message}"),
        }
    }

    /// Returns the value or `default`.
    #[inline]
    pub fn unwrap_or(self, default: T) -> T {
        match self {
            Self::Some(value) => value,
            Self::Nothing => default,
        }
    }

    /// Returns the value or computes a default.
    #[inline]
    pub fn unwrap_or_else<F>(self, function: F) -> T
    where
        F: FnOnce() -> T,
    {
        match self {
            Self::Some(value) => value,
            Self::Nothing => function(),
        }
    }

    /// Returns the value, or a native `std::result::Result` failure built by
    /// `function`.
    ///
    /// # Errors
    ///
    /// Returns `Err(function())` if this is `Nothing`.
    pub fn unwrap_or_raise<X, F>(self, function: F) -> Result<T, X>
    where
        F: FnOnce() -> X,
    {
        match self {
            Self::Some(value) => Ok(value),
            Self::Nothing => Err(function()),
        }
    }

    /// Converts into a one-element tuple of a standard `Option`.
    #[inline]
    pub fn to_tuple(self) -> (Option<T>,) {
        (self.into(),)
    }

    /// Converts into a standard `Option`.
    #[inline]
    pub fn into_option(self) -> Option<T> {
        self.into()
    }

    // =========================================================================
    // Mapping Operations
    // =========================================================================

    /// Applies `function` to a present value.
    #[inline]
    pub fn map<U, F>(self, function: F) -> Maybe<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Some(value) => Maybe::Some(function(value)),
            Self::Nothing => Maybe::Nothing,
        }
    }

    /// Applies `function` to a present value, or returns `default`.
    #[inline]
    pub fn map_or<U, F>(self, default: U, function: F) -> U
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Some(value) => function(value),
            Self::Nothing => default,
        }
    }

    /// Applies `on_some` to a present value, or calls `on_nothing`.
    #[inline]
    pub fn map_or_else<U, D, F>(self, on_nothing: D, on_some: F) -> U
    where
        D: FnOnce() -> U,
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Some(value) => on_some(value),
            Self::Nothing => on_nothing(),
        }
    }

    // =========================================================================
    // Chaining Operations
    // =========================================================================

    /// Chains a `Maybe`-returning function on a present value.
    #[inline]
    pub fn and_then<U, F>(self, function: F) -> Maybe<U>
    where
        F: FnOnce(T) -> Maybe<U>,
    {
        match self {
            Self::Some(value) => function(value),
            Self::Nothing => Maybe::Nothing,
        }
    }

    /// Replaces an absence with the result of `function`.
    #[inline]
    #[must_use]
    pub fn or_else<F>(self, function: F) -> Self
    where
        F: FnOnce() -> Self,
    {
        match self {
            Self::Some(value) => Self::Some(value),
            Self::Nothing => function(),
        }
    }

    /// Keeps a present value only if it satisfies `predicate`.
    #[inline]
    #[must_use]
    pub fn filter<P>(self, predicate: P) -> Self
    where
        P: FnOnce(&T) -> bool,
    {
        match self {
            Self::Some(value) => {
                if predicate(&value) {
                    Self::Some(value)
                } else {
                    Self::Nothing
                }
            }
            Self::Nothing => Self::Nothing,
        }
    }

    /// Calls `function` with a present value for its side effect.
    #[inline]
    #[must_use]
    pub fn tee<F>(self, function: F) -> Self
    where
        F: FnOnce(&T),
    {
        if let Self::Some(value) = &self {
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

    /// Calls `function` for its side effect if the value is absent.
    #[inline]
    #[must_use]
    pub fn inspect_nothing<F>(self, function: F) -> Self
    where
        F: FnOnce(),
    {
        if self.is_nothing() {
            function();
        }
        self
    }

    /// Pairs two present values.
    #[inline]
    pub fn zip<U>(self, other: Maybe<U>) -> Maybe<(T, U)> {
        self.zip_with(other, |left, right| (left, right))
    }

    /// Combines two present values with `function`.
    #[inline]
    pub fn zip_with<U, R, F>(self, other: Maybe<U>, function: F) -> Maybe<R>
    where
        F: FnOnce(T, U) -> R,
    {
        match (self, other) {
            (Self::Some(left), Maybe::Some(right)) => Maybe::Some(function(left, right)),
            _ => Maybe::Nothing,
        }
    }

    /// Returns the present side if exactly one side is present.
    #[inline]
    #[must_use]
    pub fn xor(self, other: Self) -> Self {
        match (self, other) {
            (Self::Some(value), Self::Nothing) | (Self::Nothing, Self::Some(value)) => {
                Self::Some(value)
            }
            _ => Self::Nothing,
        }
    }

    /// Promotes to an `Outcome`, using `error` for an absence.
    #[inline]
    pub fn ok_or<E>(self, error: E) -> Outcome<T, E> {
        match self {
            Self::Some(value) => Outcome::Ok(value),
            Self::Nothing => Outcome::Err(error),
        }
    }

    /// Promotes to an `Outcome`, computing the error only for an absence.
    #[inline]
    pub fn ok_or_else<E, F>(self, function: F) -> Outcome<T, E>
    where
        F: FnOnce() -> E,
    {
        match self {
            Self::Some(value) => Outcome::Ok(value),
            Self::Nothing => Outcome::Err(function()),
        }
    }

    // =========================================================================
    // Async Operations
    // =========================================================================

    /// Applies an async `function` to a present value.
    pub async fn map_async<U, F, Fut>(self, function: F) -> Maybe<U>
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = U>,
    {
        match self {
            Self::Some(value) => Maybe::Some(function(value).await),
            Self::Nothing => Maybe::Nothing,
        }
    }

    /// Chains an async `Maybe`-returning function on a present value.
    pub async fn and_then_async<U, F, Fut>(self, function: F) -> Maybe<U>
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = Maybe<U>>,
    {
        match self {
            Self::Some(value) => function(value).await,
            Self::Nothing => Maybe::Nothing,
        }
    }

    /// Replaces an absence with the result of an async `function`.
    pub async fn or_else_async<F, Fut>(self, function: F) -> Self
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Self>,
    {
        match self {
            Self::Some(value) => Self::Some(value),
            Self::Nothing => function().await,
        }
    }
}

impl<T: fmt::Debug> Maybe<T> {
    /// Asserts absence.
    ///
    /// # Panics
    ///
    /// Panics with `"{message}: {value:?}"` if a value is present.
    #[track_caller]
    pub fn expect_nothing(self, message: &str) {
        if let Self::Some(value) = self {
            panic!("{message}: {value:?}");
        }
    }
}

impl<T: Default> Maybe<T> {
    /// Returns the value or `T::default()`.
    #[inline]
    pub fn unwrap_or_default(self) -> T {
        self.unwrap_or_else(T::default)
    }
}

impl<T> Maybe<Maybe<T>> {
    /// Removes one level of nesting.
    #[inline]
    pub fn flatten(self) -> Maybe<T> {
        match self {
            Self::Some(inner) => inner,
            Self::Nothing => Maybe::Nothing,
        }
    }
}

impl<T> Default for Maybe<T> {
    fn default() -> Self {
        Self::Nothing
    }
}

impl<T: fmt::Debug> fmt::Debug for Maybe<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Some(value) => formatter.debug_tuple("Some").field(value).finish(),
            Self::Nothing => formatter.write_str("Nothing"),
        }
    }
}

impl<T> From<Option<T>> for Maybe<T> {
    fn from(option: Option<T>) -> Self {
        match option {
            Some(value) => Self::Some(value),
            None => Self::Nothing,
        }
    }
}

impl<T> From<Maybe<T>> for Option<T> {
    fn from(maybe: Maybe<T>) -> Self {
        match maybe {
            Maybe::Some(value) => Some(value),
            Maybe::Nothing => None,
        }
    }
}
