//! `Serialize` and `Deserialize` for the tagged representation.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, Deserialize, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::ser::{self, Serialize, SerializeMap, Serializer};

use super::{ERR, ERROR_KEY, NOTHING, OK, SOME, TYPE_KEY, VALUE_KEY};
use crate::control::{Maybe, Outcome};

// =============================================================================
// Serialization
// =============================================================================

impl<T: Serialize, E: Serialize> Serialize for Outcome<T, E> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(2))?;
        match self {
            Self::Ok(value) => {
                map.serialize_entry(TYPE_KEY, OK)?;
                map.serialize_entry(VALUE_KEY, value)?;
            }
            Self::Err(error) => {
                map.serialize_entry(TYPE_KEY, ERR)?;
                map.serialize_entry(ERROR_KEY, error)?;
            }
        }
        map.end()
    }
}

impl<T: Serialize> Serialize for Maybe<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Some(value) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry(TYPE_KEY, SOME)?;
                map.serialize_entry(VALUE_KEY, value)?;
                map.end()
            }
            Self::Nothing => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(TYPE_KEY, NOTHING)?;
                map.end()
            }
        }
    }
}

fn reject_uncollected<X: ser::Error>(type_name: &str) -> X {
    tracing::debug!(type_name, "refusing to serialize an uncollected pipeline");
    X::custom(format!(
        "cannot serialize {type_name}: call .collect() first and serialize the resulting value"
    ))
}

#[cfg(feature = "async")]
impl<T, E> Serialize for crate::lazy::LazyOutcome<T, E> {
    fn serialize<S>(&self, _serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        Err(reject_uncollected("LazyOutcome"))
    }
}

#[cfg(feature = "async")]
impl<T> Serialize for crate::lazy::LazyMaybe<T> {
    fn serialize<S>(&self, _serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        Err(reject_uncollected("LazyMaybe"))
    }
}

// =============================================================================
// Deserialization
// =============================================================================

enum Field {
    Tag,
    Value,
    Error,
    Other,
}

impl<'de> Deserialize<'de> for Field {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct FieldVisitor;

        impl Visitor<'_> for FieldVisitor {
            type Value = Field;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a field name")
            }

            fn visit_str<X: de::Error>(self, name: &str) -> Result<Field, X> {
                Ok(match name {
                    TYPE_KEY => Field::Tag,
                    VALUE_KEY => Field::Value,
                    ERROR_KEY => Field::Error,
                    _ => Field::Other,
                })
            }
        }

        deserializer.deserialize_identifier(FieldVisitor)
    }
}

fn fill<'de, A, V>(slot: &mut Option<V>, map: &mut A, name: &'static str) -> Result<(), A::Error>
where
    A: MapAccess<'de>,
    V: Deserialize<'de>,
{
    if slot.is_some() {
        return Err(de::Error::duplicate_field(name));
    }
    *slot = Some(map.next_value()?);
    Ok(())
}

const OK_WITH_ERROR: &str = "an Ok carries no error";
const ERR_WITH_VALUE: &str = "an Err carries no value";

struct OutcomeVisitor<T, E> {
    marker: PhantomData<(T, E)>,
}

impl<'de, T, E> Visitor<'de> for OutcomeVisitor<T, E>
where
    T: Deserialize<'de>,
    E: Deserialize<'de>,
{
    type Value = Outcome<T, E>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an object tagged Ok or Err")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut tag: Option<String> = None;
        let mut value: Option<T> = None;
        let mut error: Option<E> = None;
        while let Some(field) = map.next_key()? {
            match field {
                Field::Tag => fill(&mut tag, &mut map, TYPE_KEY)?,
                Field::Value if tag.as_deref() == Some(ERR) => {
                    return Err(de::Error::custom(ERR_WITH_VALUE));
                }
                Field::Error if tag.as_deref() == Some(OK) => {
                    return Err(de::Error::custom(OK_WITH_ERROR));
                }
                Field::Value => fill(&mut value, &mut map, VALUE_KEY)?,
                Field::Error => fill(&mut error, &mut map, ERROR_KEY)?,
                Field::Other => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }

        match (tag.as_deref(), value, error) {
            (Some(OK), Some(value), None) => Ok(Outcome::Ok(value)),
            (Some(ERR), None, Some(error)) => Ok(Outcome::Err(error)),
            (Some(OK), None, _) => Err(de::Error::missing_field(VALUE_KEY)),
            (Some(ERR), _, None) => Err(de::Error::missing_field(ERROR_KEY)),
            (Some(OK), Some(_), Some(_)) => Err(de::Error::custom(OK_WITH_ERROR)),
            (Some(ERR), Some(_), Some(_)) => Err(de::Error::custom(ERR_WITH_VALUE)),
            (Some(other), ..) => Err(de::Error::unknown_variant(other, &[OK, ERR])),
            (None, ..) => Err(de::Error::missing_field(TYPE_KEY)),
        }
    }
}

impl<'de, T, E> Deserialize<'de> for Outcome<T, E>
where
    T: Deserialize<'de>,
    E: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(OutcomeVisitor {
            marker: PhantomData,
        })
    }
}

struct MaybeVisitor<T> {
    marker: PhantomData<T>,
}

impl<'de, T> Visitor<'de> for MaybeVisitor<T>
where
    T: Deserialize<'de>,
{
    type Value = Maybe<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an object tagged Some or Nothing")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut tag: Option<String> = None;
        let mut value: Option<T> = None;
        while let Some(field) = map.next_key()? {
            match field {
                Field::Tag => fill(&mut tag, &mut map, TYPE_KEY)?,
                Field::Value => fill(&mut value, &mut map, VALUE_KEY)?,
                Field::Error | Field::Other => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }

        match (tag.as_deref(), value) {
            (Some(SOME), Some(value)) => Ok(Maybe::Some(value)),
            (Some(SOME), None) => Err(de::Error::missing_field(VALUE_KEY)),
            (Some(NOTHING), None) => Ok(Maybe::Nothing),
            (Some(NOTHING), Some(_)) => Err(de::Error::custom("a Nothing carries no value")),
            (Some(other), _) => Err(de::Error::unknown_variant(other, &[SOME, NOTHING])),
            (None, _) => Err(de::Error::missing_field(TYPE_KEY)),
        }
    }
}

impl<'de, T> Deserialize<'de> for Maybe<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(MaybeVisitor {
            marker: PhantomData,
        })
    }
}
