#![cfg(feature = "serde")]
//! Integration tests for the tagged JSON codec.
//!
//! Covers:
//! - typed round-trips of nested `Outcome` and `Maybe` values
//! - the distinction between `Ok(None)`, `Some(None)` and `Nothing`
//! - dynamic decoding of whole documents
//! - rejection of uncollected lazy pipelines

use railway::codec::{self, CodecError, Decoded, decode, decode_str};
use railway::control::{Maybe, Outcome};
use rstest::rstest;
use serde_json::{Value, json};
use std::collections::BTreeMap;

// =============================================================================
// Typed Encoding
// =============================================================================

#[rstest]
#[case(Outcome::Ok(1), json!({"__railway_type__": "Ok", "value": 1}))]
#[case(Outcome::Err("no".to_string()), json!({"__railway_type__": "Err", "error": "no"}))]
fn test_outcome_wire_shape(#[case] outcome: Outcome<i32, String>, #[case] expected: Value) {
    assert_eq!(serde_json::to_value(&outcome).unwrap(), expected);
}

#[rstest]
fn test_ok_none_is_distinct_from_nothing() {
    let ok_none = codec::to_string(&Outcome::<Option<i32>, String>::Ok(None)).unwrap();
    let some_none = codec::to_string(&Maybe::Some(Option::<i32>::None)).unwrap();
    let nothing = codec::to_string(&Maybe::<Option<i32>>::Nothing).unwrap();

    assert_eq!(ok_none, r#"{"__railway_type__":"Ok","value":null}"#);
    assert_eq!(some_none, r#"{"__railway_type__":"Some","value":null}"#);
    assert_eq!(nothing, r#"{"__railway_type__":"Nothing"}"#);

    let restored: Maybe<Option<i32>> = codec::from_str(&some_none).unwrap();
    assert_eq!(restored, Maybe::Some(None));
}

#[rstest]
fn test_nested_round_trip() {
    let values: Vec<Maybe<Outcome<Vec<u8>, String>>> = vec![
        Maybe::Some(Outcome::Ok(vec![1, 2])),
        Maybe::Some(Outcome::Err("checksum mismatch".to_string())),
        Maybe::Nothing,
    ];

    let text = codec::to_string(&values).unwrap();
    let restored: Vec<Maybe<Outcome<Vec<u8>, String>>> = codec::from_str(&text).unwrap();
    assert_eq!(restored, values);
}

#[rstest]
fn test_tag_may_follow_payload() {
    let restored: Outcome<i32, String> =
        codec::from_str(r#"{"error": "late", "__railway_type__": "Err", "trace": [1]}"#).unwrap();
    assert_eq!(restored, Outcome::Err("late".to_string()));
}

#[rstest]
#[case(r#"{"__railway_type__": "Pending", "value": 1}"#)]
#[case(r#"{"__railway_type__": "Ok"}"#)]
#[case(r#"{"value": 1}"#)]
#[case(r#"[1]"#)]
fn test_typed_decode_rejects_malformed(#[case] text: &str) {
    let result: Result<Outcome<i32, String>, CodecError> = codec::from_str(text);
    assert!(matches!(result, Err(CodecError::Decode(_))));
}

#[rstest]
#[case(r#"{"__railway_type__": "Err", "error": "x", "value": "n/a"}"#, "an Err carries no value")]
#[case(r#"{"__railway_type__": "Ok", "value": 1, "error": 2}"#, "an Ok carries no error")]
#[case(r#"{"value": 1, "error": "x", "__railway_type__": "Ok"}"#, "an Ok carries no error")]
fn test_payload_of_other_variant_is_rejected(#[case] text: &str, #[case] message: &str) {
    let result: Result<Outcome<i32, String>, CodecError> = codec::from_str(text);
    let error = result.unwrap_err();
    assert!(matches!(error, CodecError::Decode(_)));
    assert!(error.to_string().contains(message), "{error}");
}

// =============================================================================
// Dynamic Decoding
// =============================================================================

#[rstest]
fn test_decode_str_rebuilds_lists() {
    let decoded = decode_str(
        r#"[{"__railway_type__": "Ok", "value": 1}, {"__railway_type__": "Nothing"}, "plain"]"#,
    )
    .unwrap();

    assert_eq!(
        decoded,
        Decoded::Array(vec![
            Decoded::Outcome(Outcome::Ok(Box::new(Decoded::Data(json!(1))))),
            Decoded::Maybe(Maybe::Nothing),
            Decoded::Data(json!("plain")),
        ])
    );
}

#[rstest]
fn test_decode_str_rebuilds_dict_fields() {
    let decoded = decode_str(
        r#"{"user": {"__railway_type__": "Some", "value": "ada"}, "retries": 2}"#,
    )
    .unwrap();

    let expected = Decoded::Object(BTreeMap::from([
        (
            "retries".to_string(),
            Decoded::Data(json!(2)),
        ),
        (
            "user".to_string(),
            Decoded::Maybe(Maybe::Some(Box::new(Decoded::Data(json!("ada"))))),
        ),
    ]));
    assert_eq!(decoded, expected);
    assert!(!decoded.is_tagged());
}

#[rstest]
fn test_unknown_tag_passes_through_untouched() {
    let document = json!({
        "__railway_type__": "Deferred",
        "value": {"__railway_type__": "Ok", "value": 5}
    });
    let decoded = decode(document.clone());

    let Decoded::Object(fields) = &decoded else {
        panic!("expected an object, got {decoded:?}");
    };
    assert!(fields["value"].is_tagged());
    assert_eq!(decoded.encode(), document);
}

#[rstest]
fn test_tagged_object_with_extra_fields_is_kept_whole() {
    let document = json!({"__railway_type__": "Ok", "value": 1, "request_id": "abc"});
    let decoded = decode(document.clone());

    assert!(matches!(decoded, Decoded::Object(_)));
    assert_eq!(decoded.encode(), document);
}

#[rstest]
fn test_nothing_with_value_agrees_with_typed_decoder() {
    let text = r#"{"__railway_type__": "Nothing", "value": 1}"#;

    let typed: Result<Maybe<i32>, CodecError> = codec::from_str(text);
    assert!(typed.is_err());

    let decoded = decode_str(text).unwrap();
    assert!(!decoded.is_tagged());
    assert_eq!(decoded.encode(), serde_json::from_str::<Value>(text).unwrap());
}

#[rstest]
fn test_typed_output_decodes_dynamically() {
    let original: Outcome<Maybe<String>, i32> = Outcome::Ok(Maybe::Some("x".to_string()));
    let decoded = decode_str(&codec::to_string(&original).unwrap()).unwrap();

    assert_eq!(
        decoded,
        Decoded::Outcome(Outcome::Ok(Box::new(Decoded::Maybe(Maybe::Some(Box::new(
            Decoded::Data(json!("x"))
        ))))))
    );
}

// =============================================================================
// Lazy Pipelines
// =============================================================================

#[cfg(feature = "async")]
mod lazy {
    use super::*;
    use railway::lazy::{LazyMaybe, LazyOutcome};

    #[rstest]
    fn test_uncollected_outcome_pipeline_is_rejected() {
        let pipeline = LazyOutcome::<i32, String>::ok(1).map(|value| value + 1);
        let error = codec::to_string(&pipeline).unwrap_err();

        assert!(matches!(error, CodecError::Encode(_)));
        assert!(error.to_string().contains("LazyOutcome"));
        assert!(error.to_string().contains(".collect()"));
    }

    #[rstest]
    fn test_uncollected_maybe_pipeline_is_rejected() {
        let error = codec::to_string(&LazyMaybe::<i32>::nothing()).unwrap_err();
        assert!(error.to_string().contains("LazyMaybe"));
    }

    #[rstest]
    #[tokio::test]
    async fn test_collected_pipeline_serializes() {
        let collected = LazyMaybe::some(4).map(|value| value * 10).collect().await;
        assert_eq!(
            codec::to_string(&collected).unwrap(),
            r#"{"__railway_type__":"Some","value":40}"#
        );
    }
}
