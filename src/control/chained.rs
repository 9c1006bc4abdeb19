//! Error context chaining.
//!
//! [`ChainedError`] wraps an error with a stack of textual context labels
//! while keeping the original error reachable as the root cause. Labels are
//! stored as a cons list: the outermost label owns a link to the previous
//! layer, which is either another `ChainedError` or the root cause itself.
//!
//! # Examples
//!
//! ```rust
//! use railway::control::Outcome;
//!
//! let outcome: Outcome<i32, &str> = Outcome::Err("root");
//! let error = outcome
//!     .context("level1")
//!     .context("level2")
//!     .unwrap_err();
//!
//! assert_eq!(error.to_string(), "level2: level1: root");
//! assert_eq!(error.chain(), vec!["level2", "level1"]);
//! assert_eq!(error.root_cause_as::<&str>(), Some(&"root"));
//! ```

use std::any::Any;
use std::fmt;

const SEPARATOR: &str = ": ";

/// Any value that can sit at the bottom of a [`ChainedError`].
///
/// Implemented for every `Display + Debug + Send + Sync + 'static` type,
/// including plain strings, so roots do not need to implement
/// [`std::error::Error`].
pub trait Cause: fmt::Display + fmt::Debug + Send + Sync + 'static {
    /// Returns `self` as [`Any`] for downcasting.
    fn as_any(&self) -> &(dyn Any + Send + Sync);

    /// Converts the boxed cause into a boxed [`Any`].
    fn into_any(self: Box<Self>) -> Box<dyn Any + Send + Sync>;
}

impl<E> Cause for E
where
    E: fmt::Display + fmt::Debug + Send + Sync + 'static,
{
    fn as_any(&self) -> &(dyn Any + Send + Sync) {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any + Send + Sync> {
        self
    }
}

#[derive(Debug)]
enum Link {
    Root(Box<dyn Cause>),
    Chained(Box<ChainedError>),
}

/// An error annotated with an ordered stack of context labels.
///
/// # Invariants
///
/// - [`root_cause`](Self::root_cause) is never itself a `ChainedError`:
///   wrapping a `ChainedError` pushes a label instead of nesting.
/// - [`chain`](Self::chain) lists labels from outermost to innermost.
#[derive(Debug)]
pub struct ChainedError {
    context: String,
    inner: Link,
}

impl ChainedError {
    /// Wraps `cause` with a context label.
    ///
    /// If `cause` already is a `ChainedError`, the label is pushed on top of
    /// its stack, so the root cause stays the original error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use railway::control::ChainedError;
    ///
    /// let inner = ChainedError::new("reading config", "file not found");
    /// let outer = ChainedError::new("starting server", inner);
    ///
    /// assert_eq!(outer.chain(), vec!["starting server", "reading config"]);
    /// assert_eq!(outer.root_cause().to_string(), "file not found");
    /// ```
    pub fn new<E: Cause>(context: impl Into<String>, cause: E) -> Self {
        let context = context.into();
        let cause: Box<dyn Cause> = Box::new(cause);
        if Cause::as_any(&*cause).is::<Self>() {
            return match Cause::into_any(cause).downcast::<Self>() {
                Ok(chained) => (*chained).context(context),
                Err(_) => unreachable!("cause was checked to be a ChainedError"),
            };
        }
        Self {
            context,
            inner: Link::Root(cause),
        }
    }

    /// Pushes another label on top of this error.
    #[must_use]
    pub fn context(self, context: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            inner: Link::Chained(Box::new(self)),
        }
    }

    /// Returns the outermost context label.
    pub fn label(&self) -> &str {
        &self.context
    }

    /// Returns the innermost, non-chained error.
    pub fn root_cause(&self) -> &dyn Cause {
        let mut current = self;
        loop {
            match &current.inner {
                Link::Root(cause) => return &**cause,
                Link::Chained(inner) => current = inner,
            }
        }
    }

    /// Returns the root cause if it has type `E`.
    pub fn root_cause_as<E: Cause>(&self) -> Option<&E> {
        Cause::as_any(self.root_cause()).downcast_ref::<E>()
    }

    /// Returns the context labels, outermost first.
    pub fn chain(&self) -> Vec<&str> {
        let mut labels = vec![self.context.as_str()];
        let mut current = self;
        while let Link::Chained(inner) = &current.inner {
            labels.push(inner.context.as_str());
            current = inner;
        }
        labels
    }

    /// Returns the number of context labels.
    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut current = self;
        while let Link::Chained(inner) = &current.inner {
            depth += 1;
            current = inner;
        }
        depth
    }
}

impl fmt::Display for ChainedError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        for label in self.chain() {
            write!(formatter, "{label}{SEPARATOR}")?;
        }
        write!(formatter, "{}", self.root_cause())
    }
}

impl std::error::Error for ChainedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.inner {
            Link::Chained(inner) => Some(&**inner),
            Link::Root(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_single_label_display() {
        let error = ChainedError::new("loading user", "not found");
        assert_eq!(error.to_string(), "loading user: not found");
        assert_eq!(error.depth(), 1);
    }

    #[rstest]
    fn test_nesting_a_chained_error_pushes_instead() {
        let inner = ChainedError::new("level1", "root");
        let outer = ChainedError::new("level2", inner);

        assert_eq!(outer.depth(), 2);
        assert_eq!(outer.label(), "level2");
        assert_eq!(outer.root_cause_as::<&str>(), Some(&"root"));
        assert!(outer.root_cause_as::<ChainedError>().is_none());
    }

    #[rstest]
    fn test_root_cause_downcast_with_wrong_type() {
        let error = ChainedError::new("parsing", String::from("bad digit"));
        assert_eq!(error.root_cause_as::<String>().map(String::as_str), Some("bad digit"));
        assert!(error.root_cause_as::<&str>().is_none());
    }

    #[rstest]
    fn test_source_walks_chain() {
        use std::error::Error;

        let error = ChainedError::new("a", "root").context("b");
        let source = error.source().map(ToString::to_string);
        assert_eq!(source, Some("a: root".to_string()));
        assert!(error.source().and_then(Error::source).is_none());
    }
}
