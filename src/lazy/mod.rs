//! Deferred pipelines over `Outcome` and `Maybe`.
//!
//! A lazy pipeline records a source and a sequence of operations and runs
//! nothing until it is collected:
//!
//! - [`LazyOutcome`]: a deferred `Outcome<T, E>`
//! - [`LazyMaybe`]: a deferred `Maybe<T>`
//!
//! Every chain method has a synchronous form (`map`) and an asynchronous
//! form (`map_async`). Both record the same kind of operation, and the
//! interpreter awaits only the steps that are actually pending, so sync
//! and async steps mix freely in one pipeline.
//!
//! Collection is strictly sequential: step N+1 never starts before step N
//! has resolved, and no step is cancelled once started.
//!
//! # Examples
//!
//! ```rust,ignore
//! use railway::control::Outcome;
//! use railway::lazy::LazyOutcome;
//!
//! #[tokio::main]
//! async fn main() {
//!     let lookup = LazyOutcome::from_fn(|| async { Outcome::<u32, String>::Ok(7) })
//!         .and_then(|id| if id > 0 { Outcome::Ok(id) } else { Outcome::Err("invalid id".into()) })
//!         .map_async(|id| async move { format!("user-{id}") })
//!         .inspect_err(|error| eprintln!("lookup failed: {error}"));
//!
//!     assert_eq!(lookup.collect().await, Outcome::Ok("user-7".to_string()));
//! }
//! ```

mod lazy_maybe;
mod lazy_outcome;
mod operation;
mod pipeline;

pub use lazy_maybe::LazyMaybe;
pub use lazy_outcome::LazyOutcome;

static_assertions::assert_impl_all!(LazyOutcome<i32, String>: Send, Sync, Clone);
static_assertions::assert_impl_all!(LazyMaybe<String>: Send, Sync, Clone);
