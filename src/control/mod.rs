//! Success/failure and presence/absence values.
//!
//! This module provides the eager building blocks of the crate:
//!
//! - [`Outcome`]: a success (`Ok`) or a failure (`Err`)
//! - [`Maybe`]: a present value (`Some`) or an absence (`Nothing`)
//! - [`ChainedError`]: an error annotated with a stack of context labels
//! - batch combinators that fold many values into one, failing fast
//!
//! # Examples
//!
//! ```rust
//! use railway::control::{Maybe, Outcome};
//!
//! fn parse_port(raw: &str) -> Outcome<u16, String> {
//!     Outcome::from(raw.parse::<u16>().map_err(|error| error.to_string()))
//! }
//!
//! let port = parse_port("8080")
//!     .filter(|port| *port >= 1024, "privileged port".to_string())
//!     .map(|port| port + 1);
//! assert_eq!(port, Outcome::Ok(8081));
//!
//! let missing: Maybe<u16> = parse_port("http").ok();
//! assert!(missing.is_nothing());
//! ```
//!
//! ## Adding context
//!
//! ```rust
//! use railway::control::Outcome;
//!
//! let failed: Outcome<(), &str> = Outcome::Err("connection refused");
//! let annotated = failed.context("connecting to cache").context("loading session");
//!
//! let error = annotated.unwrap_err();
//! assert_eq!(error.to_string(), "loading session: connecting to cache: connection refused");
//! assert_eq!(error.chain(), vec!["loading session", "connecting to cache"]);
//! ```

mod batch;
mod chained;
mod error;
mod maybe;
mod outcome;

pub use batch::{sequence_maybes, sequence_outcomes, traverse_maybes, traverse_outcomes};
pub use chained::{Cause, ChainedError};
pub use error::UnwrapError;
pub use maybe::{Maybe, from_nullable, is_nothing, is_some, nothing};
pub use outcome::{Outcome, is_err, is_ok};
