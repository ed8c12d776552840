#![expect(missing_docs)]

use jsonsift::{ErrorKind, StreamingValidator, TokenKind, validate};

fn feed_all(chunks: &[&str]) -> Result<StreamingValidator, jsonsift::ValidationError> {
    let mut validator = StreamingValidator::default();
    for chunk in chunks {
        validator.feed(chunk)?;
    }
    Ok(validator)
}

#[test]
fn single_complete_values() {
    for value in ["[]", "{}", "1", "true", "false", "null", "\"foo\""] {
        let mut validator = StreamingValidator::default();
        validator.feed(value).unwrap();
        validator.finish().unwrap();
    }
}

#[test]
fn values_without_reset_on_one_validator() {
    let mut validator = StreamingValidator::default();
    for value in ["[]", "{}", "1", "true", "false", "null", "\"foo\""] {
        validator.feed(value).unwrap();
    }
}

#[test]
fn invalid_documents() {
    for input in ["}", "]", "[1a", "truthy"] {
        let mut validator = StreamingValidator::default();
        let err = validator.feed(input).unwrap_err();
        assert!(
            matches!(err.kind, ErrorKind::UnexpectedCharacter { .. }),
            "{input:?}: {err}"
        );
    }
}

#[test]
fn split_documents() {
    feed_all(&["[", "]"]).unwrap().finish().unwrap();
    feed_all(&["{", "}"]).unwrap().finish().unwrap();
    feed_all(&["\"foo", "bar\""]).unwrap().finish().unwrap();
    feed_all(&["[123", "456]"]).unwrap().finish().unwrap();
    validate("\"foobar\"").unwrap();
    validate("[123456]").unwrap();
}

#[test]
fn every_two_way_split_matches_whole() {
    let documents = [
        r#"{"name": "jsonsift", "tags": ["aé", "𠮷"], "n": -1.5e-3}"#,
        r#"[true, false, null, {"": []}]"#,
        r#"{"a": [1, 2,]}"#,
        r#"["\uDC00"]"#,
        "[01]",
    ];
    for document in documents {
        let whole = validate(document).map_err(|err| (err.kind, err.offset));
        for split in 0..=document.len() {
            let (head, tail) = document.as_bytes().split_at(split);
            let mut validator = StreamingValidator::default();
            let split_outcome = validator
                .feed(head)
                .and_then(|()| validator.feed(tail))
                .and_then(|()| validator.finish())
                .map_err(|err| (err.kind, err.offset));
            assert_eq!(split_outcome, whole, "{document:?} split at {split}");
        }
    }
}

#[test]
fn illegal_state_until_reset() {
    let mut validator = StreamingValidator::default();
    validator.feed("[1a").unwrap_err();

    let err = validator.feed("[]").unwrap_err();
    assert_eq!(err.kind, ErrorKind::IllegalState);
    assert_eq!(validator.feed("").unwrap_err().kind, ErrorKind::IllegalState);

    validator.reset();
    validator.feed("[]").unwrap();
    validator.finish().unwrap();
}

#[test]
fn escape_sequences() {
    validate(r#""\b \/ \" \\""#).unwrap();
    validate(r#""\u3042\u3044\u3046""#).unwrap();
    validate(r#""\uD842\uDFB7\u3042\u3044""#).unwrap();
}

#[test]
fn next_root_after_completed_value() {
    let mut validator = feed_all(&["{\"a\": [1]}"]).unwrap();
    validator.feed("[2]").unwrap();
    validator.feed(" \"three\"").unwrap();
    validator.finish().unwrap();
}

#[test]
fn reset_is_idempotent() {
    let mut fresh = StreamingValidator::default();
    fresh.reset();
    fresh.reset();
    fresh.feed("[]").unwrap();

    let mut used = feed_all(&["{\"a\": [1, \"unfinished"]).unwrap();
    used.reset();
    used.reset();
    used.finish().unwrap();
    used.feed("[]").unwrap();
}

#[test]
fn empty_and_whitespace_streams_finish_cleanly() {
    StreamingValidator::default().finish().unwrap();
    validate("").unwrap();
    validate("  \n\t").unwrap();

    let mut validator = feed_all(&["{", "}", "  "]).unwrap();
    validator.finish().unwrap();
    assert_eq!(
        feed_all(&["{", " "]).unwrap().finish().unwrap_err().kind,
        ErrorKind::IncompleteToken(TokenKind::Document)
    );
}

#[test]
fn unterminated_string_is_only_flagged_by_finish() {
    let mut validator = feed_all(&["[\"never closed"]).unwrap();
    let err = validator.finish().unwrap_err();
    assert_eq!(err.kind, ErrorKind::IncompleteToken(TokenKind::String));
    assert_eq!(err.offset, 14);
}
