//! Tagged JSON encoding for `Outcome` and `Maybe`.
//!
//! Every value is written as an object whose `"__railway_type__"` field names
//! the variant. Non-empty variants carry their payload in `"value"` (`Ok`,
//! `Some`) or `"error"` (`Err`); `Nothing` carries no payload.
//!
//! ```json
//! {"__railway_type__": "Ok", "value": 42}
//! {"__railway_type__": "Err", "error": "not found"}
//! {"__railway_type__": "Some", "value": null}
//! {"__railway_type__": "Nothing"}
//! ```
//!
//! Two ways to decode are offered:
//!
//! - typed, through the `Deserialize` impls and [`from_str`]
//! - dynamic, through [`decode`], which rebuilds every tagged object found
//!   anywhere in a JSON document and leaves all other data as it is
//!
//! Lazy pipelines cannot be encoded; collect them first.
//!
//! # Examples
//!
//! ```rust
//! use railway::codec;
//! use railway::control::{Maybe, Outcome};
//!
//! let original: Outcome<Maybe<i32>, String> = Outcome::Ok(Maybe::Nothing);
//! let text = codec::to_string(&original).unwrap();
//! assert_eq!(
//!     text,
//!     r#"{"__railway_type__":"Ok","value":{"__railway_type__":"Nothing"}}"#
//! );
//!
//! let decoded: Outcome<Maybe<i32>, String> = codec::from_str(&text).unwrap();
//! assert_eq!(decoded, original);
//! ```

mod decoded;
mod tagged;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub use decoded::{Decoded, decode};

/// The discriminator field naming the variant.
pub const TYPE_KEY: &str = "__railway_type__";
/// The payload field of `Ok` and `Some`.
pub const VALUE_KEY: &str = "value";
/// The payload field of `Err`.
pub const ERROR_KEY: &str = "error";

const OK: &str = "Ok";
const ERR: &str = "Err";
const SOME: &str = "Some";
const NOTHING: &str = "Nothing";

/// Errors produced by the codec functions.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The value could not be encoded, for example an uncollected pipeline.
    #[error("failed to encode value: {0}")]
    Encode(#[source] serde_json::Error),
    /// The input was not valid JSON or did not match the requested type.
    #[error("failed to decode value: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Encodes `value` as compact JSON.
///
/// # Errors
///
/// Returns [`CodecError::Encode`] if `value` refuses to serialize.
pub fn to_string<T: Serialize + ?Sized>(value: &T) -> Result<String, CodecError> {
    serde_json::to_string(value).map_err(CodecError::Encode)
}

/// Encodes `value` as indented JSON.
///
/// # Errors
///
/// Returns [`CodecError::Encode`] if `value` refuses to serialize.
pub fn to_string_pretty<T: Serialize + ?Sized>(value: &T) -> Result<String, CodecError> {
    serde_json::to_string_pretty(value).map_err(CodecError::Encode)
}

/// Decodes a typed value from JSON text.
///
/// # Errors
///
/// Returns [`CodecError::Decode`] if `text` is not valid JSON or does not
/// describe a `T`, including an `Outcome` or `Maybe` with an unknown tag.
pub fn from_str<T: DeserializeOwned>(text: &str) -> Result<T, CodecError> {
    serde_json::from_str(text).map_err(CodecError::Decode)
}

/// Parses JSON text and decodes it dynamically with [`decode`].
///
/// # Errors
///
/// Returns [`CodecError::Decode`] if `text` is not valid JSON.
///
/// # Examples
///
/// ```rust
/// use railway::codec::{self, Decoded};
///
/// let decoded = codec::decode_str(r#"[{"__railway_type__": "Err", "error": "gone"}, 3]"#).unwrap();
/// assert!(matches!(decoded, Decoded::Array(ref items) if items.len() == 2));
/// ```
pub fn decode_str(text: &str) -> Result<Decoded, CodecError> {
    serde_json::from_str(text).map(decode).map_err(CodecError::Decode)
}
