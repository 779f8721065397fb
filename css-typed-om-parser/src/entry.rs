//! Property-aware value parser entry point (§4.G): dispatches a property name
//! and its textual value to the transform parser or the math/keyword
//! expression parser, with the strict/lenient fallback policy from §7.
//!
//! Mirrors the shape of the teacher's top-level `parse_css_property` dispatch
//! in `azul-css-parser/src/css_parser.rs`, which also routes a property name
//! to one of several per-grammar sub-parsers and falls back to a string value
//! on failure for properties it doesn't recognize.

use css_typed_om::error::{ParseFailure, StyleValueError};
use css_typed_om::value::{StyleValue, UnparsedValue};

use crate::expr::{parse_math, DEFAULT_MAX_DEPTH};
use crate::transform::parse_transform;

/// Properties whose value must parse to a typed tree; a parse failure that
/// isn't masked by an embedded `var(` propagates rather than degrading to an
/// `UnparsedValue` (§4.G, §7, GLOSSARY "Strict property").
pub const STRICT_PROPERTIES: &[&str] = &[
    "width",
    "height",
    "min-width",
    "min-height",
    "max-width",
    "max-height",
    "top",
    "left",
    "right",
    "bottom",
    "margin",
    "padding",
    "font-size",
    "transform",
    "rotate",
    "scale",
    "translate",
    "opacity",
    "z-index",
    "flex-grow",
    "flex-shrink",
    "order",
];

fn is_strict(property: &str) -> bool {
    STRICT_PROPERTIES.contains(&property)
}

/// Parses a single CSS value for `property` (§4.G).
///
/// 1. Trims `text`; empty input fails outright (not masked by the fallback
///    policy, since there is no original text worth preserving verbatim).
/// 2. `transform` goes through the transform-function-list parser.
/// 3. Everything else goes through the math/keyword expression parser.
///
/// A `ParseFailure` from either path degrades to `UnparsedValue([text])`
/// unless `property` is in [`STRICT_PROPERTIES`] and `text` contains no
/// `var(`, in which case it is re-raised.
pub fn parse(property: &str, text: &str) -> Result<StyleValue, StyleValueError> {
    parse_with_max_depth(property, text, DEFAULT_MAX_DEPTH)
}

/// As [`parse`], with an explicit recursion-depth cap (§5, §2.1).
pub fn parse_with_max_depth(property: &str, text: &str, max_depth: usize) -> Result<StyleValue, StyleValueError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ParseFailure::EmptyInput.into());
    }

    let result = if property.eq_ignore_ascii_case("transform") {
        parse_transform(trimmed, max_depth).map(StyleValue::Transform)
    } else {
        parse_math(trimmed, max_depth)
    };

    match result {
        Ok(value) => Ok(value),
        Err(err) => downgrade_or_raise(err, property, trimmed),
    }
}

/// Splits `text` at top-level commas (ignoring commas inside balanced
/// parentheses and inside single/double-quoted string literals) and parses
/// each segment via [`parse`]; a failure on one segment falls back to
/// `UnparsedValue` under the same strict/lenient policy as `parse` (§4.G).
pub fn parse_all(property: &str, text: &str) -> Result<Vec<StyleValue>, StyleValueError> {
    parse_all_with_max_depth(property, text, DEFAULT_MAX_DEPTH)
}

/// As [`parse_all`], with an explicit recursion-depth cap.
pub fn parse_all_with_max_depth(
    property: &str,
    text: &str,
    max_depth: usize,
) -> Result<Vec<StyleValue>, StyleValueError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ParseFailure::EmptyInput.into());
    }
    split_top_level_commas(trimmed)
        .into_iter()
        .map(|segment| parse_with_max_depth(property, segment.trim(), max_depth))
        .collect()
}

/// Degrades a [`StyleValueError`] to `UnparsedValue([text])` per the
/// strict/lenient fallback policy (§7), re-raising when the property is
/// strict and the text has no `var(` escape hatch.
fn downgrade_or_raise(err: StyleValueError, property: &str, text: &str) -> Result<StyleValue, StyleValueError> {
    if err.as_parse_failure().is_none() {
        return Err(err);
    }
    if is_strict(property) && !text.contains("var(") {
        return Err(err);
    }
    Ok(StyleValue::Unparsed(UnparsedValue::from_text(text)))
}

/// Splits `text` on top-level (depth-0, outside-of-string) commas (§4.G, §8).
fn split_top_level_commas(text: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut depth = 0i32;
    let mut quote: Option<char> = None;
    let mut segment_start = 0usize;

    for (byte_pos, c) in text.char_indices() {
        match quote {
            Some(q) => {
                if c == q {
                    quote = None;
                }
            }
            None => match c {
                '"' | '\'' => quote = Some(c),
                '(' => depth += 1,
                ')' => depth -= 1,
                ',' if depth == 0 => {
                    segments.push(&text[segment_start..byte_pos]);
                    segment_start = byte_pos + c.len_utf8();
                }
                _ => {}
            },
        }
    }
    segments.push(&text[segment_start..]);
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use css_typed_om::error::TypeMismatch;
    use css_typed_om::value::{KeywordValue, UnitValue};

    #[test]
    fn parses_calc_sum_for_a_non_strict_lookalike_and_a_strict_property_alike() {
        let v = parse("width", "calc(10px + 5px)").unwrap();
        assert_eq!(v, StyleValue::Unit(UnitValue::new(15.0, css_typed_om::units::Unit::Px).unwrap()));
    }

    #[test]
    fn strict_property_parse_failure_without_var_propagates() {
        let err = parse("width", "not a value (").unwrap_err();
        assert!(matches!(err, StyleValueError::ParseFailure(_)));
    }

    #[test]
    fn strict_property_parse_failure_with_var_degrades_to_unparsed() {
        let v = parse("width", "var(--w) extra tokens(").unwrap();
        assert!(matches!(v, StyleValue::Unparsed(_)));
    }

    #[test]
    fn non_strict_property_parse_failure_degrades_to_unparsed() {
        let v = parse("color", "not a value (").unwrap();
        match v {
            StyleValue::Unparsed(u) => assert_eq!(u.to_string(), "not a value ("),
            other => panic!("expected UnparsedValue, got {:?}", other),
        }
    }

    #[test]
    fn empty_input_always_fails() {
        let err = parse("width", "   ").unwrap_err();
        assert!(matches!(err, StyleValueError::ParseFailure(ParseFailure::EmptyInput)));
    }

    #[test]
    fn transform_property_routes_through_the_transform_parser() {
        let v = parse("transform", "translate(10px, 50%) rotate(45deg)").unwrap();
        match v {
            StyleValue::Transform(t) => assert_eq!(t.len(), 2),
            other => panic!("expected a TransformValue, got {:?}", other),
        }
    }

    #[test]
    fn comma_inside_parentheses_is_not_a_top_level_split() {
        let segments = split_top_level_commas("rgb(1, 2, 3), blue");
        assert_eq!(segments, vec!["rgb(1, 2, 3)", " blue"]);
    }

    #[test]
    fn comma_inside_string_literal_is_not_a_top_level_split() {
        let segments = split_top_level_commas("\"a, b\", sans-serif");
        assert_eq!(segments, vec!["\"a, b\"", " sans-serif"]);
    }

    #[test]
    fn parse_all_font_family_splits_quoted_and_keyword_segments() {
        let values = parse_all("font-family", "\"Arial\", sans-serif").unwrap();
        assert_eq!(values.len(), 2);
        match &values[0] {
            StyleValue::Unparsed(u) => assert_eq!(u.to_string(), "\"Arial\""),
            other => panic!("expected UnparsedValue, got {:?}", other),
        }
        assert_eq!(values[1], StyleValue::Keyword(KeywordValue::new("sans-serif")));
    }

    #[test]
    fn division_by_zero_is_not_masked_by_the_fallback_policy() {
        let err = parse("width", "calc(10px / 0)").unwrap_err();
        assert!(matches!(err, StyleValueError::RangeViolation(_)));
    }

    #[test]
    fn wrong_arity_type_mismatch_is_not_a_parse_failure_so_it_always_propagates() {
        let err = parse("color", "clamp(1px, 2px)").unwrap_err();
        assert!(matches!(err, StyleValueError::TypeMismatch(TypeMismatch::WrongArity { .. })));
    }
}
