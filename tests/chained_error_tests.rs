//! Integration tests for `ChainedError` and `Outcome::context`.

use railway::control::{ChainedError, Outcome};
use rstest::rstest;
use std::cell::Cell;
use std::fmt;

#[derive(Debug, PartialEq)]
enum StoreError {
    Timeout { after_ms: u64 },
}

impl fmt::Display for StoreError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout { after_ms } => write!(formatter, "timed out after {after_ms}ms"),
        }
    }
}

#[rstest]
fn test_context_chain_renders_outermost_first() {
    let error = Outcome::<(), &str>::Err("root")
        .context("level1")
        .context("level2")
        .unwrap_err();

    assert_eq!(error.to_string(), "level2: level1: root");
    assert_eq!(error.chain(), vec!["level2", "level1"]);
    assert_eq!(error.root_cause().to_string(), "root");
    assert_eq!(error.root_cause_as::<&str>(), Some(&"root"));
}

#[rstest]
fn test_context_on_ok_is_noop() {
    let outcome = Outcome::<i32, &str>::Ok(1).context("unused");
    assert!(matches!(outcome, Outcome::Ok(1)));
}

#[rstest]
fn test_with_context_label_is_lazy() {
    let calls = Cell::new(0);
    let label = || {
        calls.set(calls.get() + 1);
        format!("attempt {}", calls.get())
    };

    let ok = Outcome::<i32, &str>::Ok(1).with_context(label);
    assert!(ok.is_ok());
    assert_eq!(calls.get(), 0);

    let failed = Outcome::<i32, &str>::Err("refused").with_context(|| "connecting");
    assert_eq!(failed.unwrap_err().to_string(), "connecting: refused");
}

#[rstest]
fn test_typed_root_cause_survives_chaining() {
    let error = Outcome::<(), StoreError>::Err(StoreError::Timeout { after_ms: 250 })
        .context("reading balance")
        .with_context(|| format!("handling request {}", 42))
        .unwrap_err();

    assert_eq!(
        error.to_string(),
        "handling request 42: reading balance: timed out after 250ms"
    );
    assert_eq!(
        error.root_cause_as::<StoreError>(),
        Some(&StoreError::Timeout { after_ms: 250 })
    );
    assert_eq!(error.depth(), 2);
}

#[rstest]
fn test_wrapping_chained_error_does_not_nest_roots() {
    let inner = ChainedError::new("level1", "root");
    let outer = ChainedError::new("level2", inner);

    assert!(outer.root_cause_as::<ChainedError>().is_none());
    assert_eq!(outer.to_string(), "level2: level1: root");
}

#[rstest]
fn test_chained_error_is_std_error() {
    fn boundary() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Outcome::<(), &str>::Err("disk full")
            .context("writing snapshot")
            .into_result()?;
        Ok(())
    }

    let error = boundary().unwrap_err();
    assert_eq!(error.to_string(), "writing snapshot: disk full");
}
