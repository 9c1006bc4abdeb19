//! Fail-fast batch combinators.
//!
//! These fold many `Outcome`/`Maybe` values into one, stopping at the first
//! failure. Iterators are consumed lazily: nothing after the first `Err` or
//! `Nothing` is pulled from the source.
//!
//! # Examples
//!
//! ```rust
//! use railway::control::{Outcome, sequence_outcomes, traverse_outcomes};
//!
//! let all: Outcome<Vec<i32>, &str> = sequence_outcomes(vec![Outcome::Ok(1), Outcome::Ok(2)]);
//! assert_eq!(all, Outcome::Ok(vec![1, 2]));
//!
//! let parsed = traverse_outcomes(["1", "x", "3"], |raw| {
//!     Outcome::from(raw.parse::<i32>().map_err(|_| format!("invalid: {raw}")))
//! });
//! assert_eq!(parsed, Outcome::Err("invalid: x".to_string()));
//! ```

use super::maybe::Maybe;
use super::outcome::Outcome;

/// Collects an iterable of outcomes into an outcome of a `Vec`.
///
/// Returns the first `Err` encountered without advancing the iterator any
/// further. An empty input yields `Ok(vec![])`.
pub fn sequence_outcomes<T, E, I>(outcomes: I) -> Outcome<Vec<T>, E>
where
    I: IntoIterator<Item = Outcome<T, E>>,
{
    let iterator = outcomes.into_iter();
    let mut values = Vec::with_capacity(iterator.size_hint().0);
    for outcome in iterator {
        match outcome {
            Outcome::Ok(value) => values.push(value),
            Outcome::Err(error) => return Outcome::Err(error),
        }
    }
    Outcome::Ok(values)
}

/// Applies `function` to each item and collects the outcomes.
///
/// `function` is never called on items after the first failure.
pub fn traverse_outcomes<A, T, E, I, F>(items: I, function: F) -> Outcome<Vec<T>, E>
where
    I: IntoIterator<Item = A>,
    F: FnMut(A) -> Outcome<T, E>,
{
    sequence_outcomes(items.into_iter().map(function))
}

/// Collects an iterable of maybes into a maybe of a `Vec`.
///
/// Returns `Nothing` at the first absence. An empty input yields
/// `Some(vec![])`.
pub fn sequence_maybes<T, I>(maybes: I) -> Maybe<Vec<T>>
where
    I: IntoIterator<Item = Maybe<T>>,
{
    let iterator = maybes.into_iter();
    let mut values = Vec::with_capacity(iterator.size_hint().0);
    for maybe in iterator {
        match maybe {
            Maybe::Some(value) => values.push(value),
            Maybe::Nothing => return Maybe::Nothing,
        }
    }
    Maybe::Some(values)
}

/// Applies `function` to each item and collects the maybes.
pub fn traverse_maybes<A, T, I, F>(items: I, function: F) -> Maybe<Vec<T>>
where
    I: IntoIterator<Item = A>,
    F: FnMut(A) -> Maybe<T>,
{
    sequence_maybes(items.into_iter().map(function))
}

/// Collects into any `FromIterator` container, failing fast on `Err`.
///
/// # Examples
///
/// ```rust
/// use railway::control::Outcome;
/// use std::collections::BTreeSet;
///
/// let collected: Outcome<BTreeSet<i32>, &str> =
///     vec![Outcome::Ok(2), Outcome::Ok(1)].into_iter().collect();
/// assert_eq!(collected, Outcome::Ok(BTreeSet::from([1, 2])));
/// ```
impl<A, E, V> FromIterator<Outcome<A, E>> for Outcome<V, E>
where
    V: FromIterator<A>,
{
    fn from_iter<I: IntoIterator<Item = Outcome<A, E>>>(iterator: I) -> Self {
        let mut failure = None;
        let collected = iterator
            .into_iter()
            .map_while(|outcome| match outcome {
                Outcome::Ok(value) => Some(value),
                Outcome::Err(error) => {
                    failure = Some(error);
                    None
                }
            })
            .collect();
        match failure {
            Some(error) => Self::Err(error),
            None => Self::Ok(collected),
        }
    }
}

/// Collects into any `FromIterator` container, failing fast on `Nothing`.
impl<A, V> FromIterator<Maybe<A>> for Maybe<V>
where
    V: FromIterator<A>,
{
    fn from_iter<I: IntoIterator<Item = Maybe<A>>>(iterator: I) -> Self {
        let mut absent = false;
        let collected = iterator
            .into_iter()
            .map_while(|maybe| match maybe {
                Maybe::Some(value) => Some(value),
                Maybe::Nothing => {
                    absent = true;
                    None
                }
            })
            .collect();
        if absent { Self::Nothing } else { Self::Some(collected) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::cell::Cell;

    #[rstest]
    fn test_sequence_outcomes_returns_first_err() {
        let result = sequence_outcomes(vec![Outcome::Ok(1), Outcome::Err("e1"), Outcome::Err("e2")]);
        assert_eq!(result, Outcome::Err("e1"));
    }

    #[rstest]
    fn test_sequence_outcomes_empty() {
        let result: Outcome<Vec<i32>, &str> = sequence_outcomes(Vec::new());
        assert_eq!(result, Outcome::Ok(vec![]));
    }

    #[rstest]
    fn test_sequence_outcomes_stops_pulling_after_err() {
        let pulled = Cell::new(0);
        let source = (0..10).map(|index| {
            pulled.set(pulled.get() + 1);
            if index == 2 { Outcome::Err(index) } else { Outcome::Ok(index) }
        });
        assert_eq!(sequence_outcomes(source), Outcome::Err(2));
        assert_eq!(pulled.get(), 3);
    }

    #[rstest]
    fn test_traverse_maybes_skips_function_after_nothing() {
        let calls = Cell::new(0);
        let result = traverse_maybes([1, -1, 2, 3], |value| {
            calls.set(calls.get() + 1);
            if value > 0 { Maybe::Some(value) } else { Maybe::Nothing }
        });
        assert_eq!(result, Maybe::Nothing);
        assert_eq!(calls.get(), 2);
    }

    #[rstest]
    fn test_sequence_maybes_empty() {
        let result: Maybe<Vec<i32>> = sequence_maybes(Vec::new());
        assert_eq!(result, Maybe::Some(vec![]));
    }

    #[rstest]
    fn test_from_iterator_outcome_fails_fast() {
        let pulled = Cell::new(0);
        let collected: Outcome<Vec<i32>, &str> = [Outcome::Ok(1), Outcome::Err("stop"), Outcome::Ok(3)]
            .into_iter()
            .inspect(|_| pulled.set(pulled.get() + 1))
            .collect();
        assert_eq!(collected, Outcome::Err("stop"));
        assert_eq!(pulled.get(), 2);
    }

    #[rstest]
    fn test_from_iterator_maybe() {
        let collected: Maybe<Vec<i32>> = vec![Maybe::Some(1), Maybe::Some(2)].into_iter().collect();
        assert_eq!(collected, Maybe::Some(vec![1, 2]));
    }
}
