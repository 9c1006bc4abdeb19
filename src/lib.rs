//! # railway
//!
//! Railway-oriented programming for Rust: explicit success/failure and
//! presence/absence values, and lazy pipelines that chain synchronous and
//! asynchronous steps over them.
//!
//! ## Overview
//!
//! - **Values**: [`Outcome`](control::Outcome) and [`Maybe`](control::Maybe)
//!   with a full combinator surface, plus fail-fast batch combinators
//! - **Error context**: [`ChainedError`](control::ChainedError) stacks
//!   context labels over a root cause
//! - **Lazy pipelines**: `LazyOutcome` and `LazyMaybe` record operations and
//!   run them only when collected
//! - **Codec**: a tagged JSON representation of `Outcome` and `Maybe`
//!
//! ## Feature Flags
//!
//! - `async`: Lazy pipelines (enabled by default)
//! - `serde`: Tagged JSON codec
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use railway::prelude::*;
//!
//! let total: Outcome<i32, String> = ["1", "2", "3"]
//!     .into_iter()
//!     .map(|raw| Outcome::from(raw.parse::<i32>().map_err(|error| error.to_string())))
//!     .collect::<Outcome<Vec<i32>, String>>()
//!     .map(|values| values.into_iter().sum());
//!
//! assert_eq!(total, Outcome::Ok(6));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use railway::prelude::*;
/// ```
pub mod prelude {
    pub use crate::control::*;

    #[cfg(feature = "async")]
    pub use crate::lazy::*;
}

pub mod control;

#[cfg(feature = "async")]
pub mod lazy;

#[cfg(feature = "serde")]
pub mod codec;
