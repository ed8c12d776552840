use alloc::vec::Vec;

use rstest::rstest;

use super::chunk_helpers::{outcome, produce_chunks};
use crate::{StreamingValidator, SurrogatePolicy, ValidatorOptions};

#[rstest]
#[case::empty_array("[]")]
#[case::empty_object("{}")]
#[case::integer("1")]
#[case::true_literal("true")]
#[case::false_literal("false")]
#[case::null_literal("null")]
#[case::string(r#""foo""#)]
#[case::empty_string(r#""""#)]
#[case::negative_zero("-0")]
#[case::fraction("-0.125")]
#[case::exponent("6.02e23")]
#[case::signed_exponent("1E-7")]
#[case::plus_exponent("2e+10")]
#[case::zero_exponent("0e0")]
#[case::padded(" \t\r\n[ 1 , 2 ]\n")]
#[case::nested(r#"{"a": [1, {"b": null}], "c": {"d": [true, false, []]}}"#)]
#[case::deep_arrays("[[[[[[[[[[]]]]]]]]]]")]
#[case::empty_key(r#"{"": 0}"#)]
#[case::duplicate_keys(r#"{"a": 1, "a": 2}"#)]
#[case::simple_escapes(r#""\" \\ \/ \b \f \n \r \t""#)]
#[case::unicode_escape(r#""\u00e9\u00E9\u3042""#)]
#[case::surrogate_pair(r#""\uD83D\uDE00""#)]
#[case::nul_escape(r#""\u0000""#)]
#[case::delete_character("\"\x7F\"")]
#[case::utf8_content(r#"["é", "あ", "😀", "éé"]"#)]
#[case::utf8_key(r#"{"ключ": "значение"}"#)]
#[case::big_number("123456789012345678901234567890e999999")]
#[case::whitespace_separated_roots("1 2 [3] {\"4\": 5}")]
#[case::adjacent_roots("[]{}\"a\"null")]
#[case::empty_stream("")]
#[case::whitespace_only(" \t\r\n")]
fn accepts_text(#[case] input: &str) {
    assert_eq!(outcome(&[input]), Ok(()), "whole: {input:?}");
    let bytes: Vec<&[u8]> = input.as_bytes().iter().map(core::slice::from_ref).collect();
    assert_eq!(outcome(&bytes), Ok(()), "bytewise: {input:?}");
    for parts in 2..=4 {
        assert_eq!(
            outcome(&produce_chunks(input.as_bytes(), parts)),
            Ok(()),
            "{parts} parts: {input:?}"
        );
    }
}

#[rstest]
#[case::lone_high(r#""\uD800""#)]
#[case::lone_low(r#"["\uDFFF"]"#)]
#[case::reversed_pair(r#""\uDE00\uD83D""#)]
#[case::high_then_text(r#"{"k\uDBFFey": 1}"#)]
#[case::high_then_escape(r#""\uD800\t""#)]
fn accepts_unpaired_surrogates_when_allowed(#[case] input: &str) {
    let mut validator = StreamingValidator::new(ValidatorOptions {
        surrogates: SurrogatePolicy::Allow,
        ..Default::default()
    });
    validator.feed(input).unwrap();
    validator.finish().unwrap();
    assert!(crate::validate(input).is_err());
}

#[test]
fn accepts_depth_at_limit() {
    let depth = crate::DEFAULT_MAX_DEPTH;
    let input = "[".repeat(depth) + &"]".repeat(depth);
    assert_eq!(outcome(&[input.as_bytes()]), Ok(()));
}
