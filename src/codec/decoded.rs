//! Dynamic decoding of tagged JSON documents.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use super::{ERR, ERROR_KEY, NOTHING, OK, SOME, TYPE_KEY, VALUE_KEY};
use crate::control::{Maybe, Outcome};

/// A JSON document with every recognised tagged object rebuilt.
///
/// Objects tagged `Ok`, `Err`, `Some` or `Nothing` that carry exactly their
/// payload become [`Decoded::Outcome`] or [`Decoded::Maybe`]. Any other
/// object, including one with an unrecognised tag, a missing payload or
/// extra fields, stays an [`Decoded::Object`] with every field kept.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    /// A tagged `Ok`/`Err` object.
    Outcome(Outcome<Box<Self>, Box<Self>>),
    /// A tagged `Some`/`Nothing` object.
    Maybe(Maybe<Box<Self>>),
    /// A JSON array.
    Array(Vec<Self>),
    /// A JSON object that is not a recognised tagged value.
    Object(BTreeMap<String, Self>),
    /// A scalar: null, a boolean, a number or a string.
    Data(Value),
}

impl Decoded {
    /// Rebuilds the JSON document this value was decoded from.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use railway::codec::decode;
    /// use serde_json::json;
    ///
    /// let document = json!({
    ///     "user": {"__railway_type__": "Some", "value": "ada"},
    ///     "custom": {"__railway_type__": "Pending", "id": 7},
    /// });
    /// assert_eq!(decode(document.clone()).encode(), document);
    /// ```
    #[must_use]
    pub fn encode(&self) -> Value {
        match self {
            Self::Outcome(Outcome::Ok(value)) => tagged(OK, Some((VALUE_KEY, value.encode()))),
            Self::Outcome(Outcome::Err(error)) => tagged(ERR, Some((ERROR_KEY, error.encode()))),
            Self::Maybe(Maybe::Some(value)) => tagged(SOME, Some((VALUE_KEY, value.encode()))),
            Self::Maybe(Maybe::Nothing) => tagged(NOTHING, None),
            Self::Array(items) => Value::Array(items.iter().map(Self::encode).collect()),
            Self::Object(fields) => Value::Object(
                fields
                    .iter()
                    .map(|(name, field)| (name.clone(), field.encode()))
                    .collect(),
            ),
            Self::Data(value) => value.clone(),
        }
    }

    /// Returns `true` for a rebuilt `Outcome` or `Maybe`.
    #[must_use]
    pub const fn is_tagged(&self) -> bool {
        matches!(self, Self::Outcome(_) | Self::Maybe(_))
    }
}

impl From<Decoded> for Value {
    fn from(decoded: Decoded) -> Self {
        decoded.encode()
    }
}

fn tagged(tag: &str, payload: Option<(&str, Value)>) -> Value {
    let mut fields = Map::new();
    fields.insert(TYPE_KEY.to_owned(), Value::String(tag.to_owned()));
    if let Some((name, value)) = payload {
        fields.insert(name.to_owned(), value);
    }
    Value::Object(fields)
}

/// Decodes every tagged object in `value`, at any depth.
///
/// Payloads of tagged objects and elements of arrays and plain objects are
/// decoded recursively. An object is rebuilt only when it holds exactly the
/// tag and that variant's payload field (just the tag for `Nothing`).
/// Untagged data, unrecognised tags and tagged objects with missing, foreign
/// or extra fields pass through unchanged, so [`Decoded::encode`] always
/// reproduces the input.
///
/// # Examples
///
/// ```rust
/// use railway::codec::{Decoded, decode};
/// use railway::control::Outcome;
/// use serde_json::json;
///
/// let decoded = decode(json!({"__railway_type__": "Ok", "value": 42}));
/// assert_eq!(decoded, Decoded::Outcome(Outcome::Ok(Box::new(Decoded::Data(json!(42))))));
/// ```
#[must_use]
pub fn decode(value: Value) -> Decoded {
    match value {
        Value::Array(items) => Decoded::Array(items.into_iter().map(decode).collect()),
        Value::Object(fields) => decode_object(fields),
        scalar => Decoded::Data(scalar),
    }
}

fn decode_object(mut fields: Map<String, Value>) -> Decoded {
    let Some(tag) = fields.get(TYPE_KEY).and_then(Value::as_str).map(str::to_owned) else {
        return plain_object(fields);
    };
    let payload_key = match tag.as_str() {
        OK | SOME => VALUE_KEY,
        ERR => ERROR_KEY,
        NOTHING if fields.len() == 1 => return Decoded::Maybe(Maybe::Nothing),
        _ => return plain_object(fields),
    };
    // Exactly the tag and its own payload; anything else is kept verbatim.
    if fields.len() != 2 {
        return plain_object(fields);
    }
    let Some(payload) = fields.remove(payload_key) else {
        return plain_object(fields);
    };

    let payload = Box::new(decode(payload));
    match tag.as_str() {
        OK => Decoded::Outcome(Outcome::Ok(payload)),
        ERR => Decoded::Outcome(Outcome::Err(payload)),
        _ => Decoded::Maybe(Maybe::Some(payload)),
    }
}

fn plain_object(fields: Map<String, Value>) -> Decoded {
    Decoded::Object(
        fields
            .into_iter()
            .map(|(name, field)| (name, decode(field)))
            .collect(),
    )
}
