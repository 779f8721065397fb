//! Integration tests exercising the §8 "Concrete scenarios" end to end:
//! textual CSS value in, typed tree and round-tripped text out, through the
//! full lexer -> expression/transform parser -> simplifier pipeline.

use css_typed_om::units::Unit;
use css_typed_om::value::{KeywordValue, StyleValue, UnitValue, UnparsedValue};
use css_typed_om_parser::{parse, parse_all};

#[test]
fn scenario_1_simple_px_sum_folds_and_round_trips() {
    let value = parse("width", "calc(10px + 5px)").unwrap();
    assert_eq!(value, StyleValue::Unit(UnitValue::new(15.0, Unit::Px).unwrap()));
    assert_eq!(value.to_string(), "15px");
}

#[test]
fn scenario_2_percent_minus_px_stays_a_sum_with_both_dimensions() {
    let value = parse("width", "calc((100% - 20px) / 2)").unwrap();
    match &value {
        StyleValue::Sum(sum) => {
            assert_eq!(sum.values.len(), 2);
            assert_eq!(sum.values[0], StyleValue::Unit(UnitValue::new(50.0, Unit::Percent).unwrap()));
            assert_eq!(sum.values[1], StyleValue::Unit(UnitValue::new(-10.0, Unit::Px).unwrap()));
        }
        other => panic!("expected a MathSum, got {:?}", other),
    }
    assert_eq!(value.to_string(), "calc(50% + -10px)");
}

#[test]
fn scenario_3_product_of_literal_and_scalar_folds() {
    let value = parse("width", "calc(10px * 2)").unwrap();
    assert_eq!(value, StyleValue::Unit(UnitValue::new(20.0, Unit::Px).unwrap()));
    assert_eq!(value.to_string(), "20px");
}

#[test]
fn scenario_4_var_with_fallback_round_trips_verbatim() {
    let value = parse("width", "var(--w, 100px)").unwrap();
    match &value {
        StyleValue::VariableReference(v) => {
            assert_eq!(v.name, "--w");
            assert_eq!(v.fallback.as_deref(), Some(&UnparsedValue::from_text("100px")));
        }
        other => panic!("expected a VariableReferenceValue, got {:?}", other),
    }
    assert_eq!(value.to_string(), "var(--w, 100px)");
}

#[test]
fn scenario_5_transform_function_list_parses_into_typed_components() {
    let value = parse("transform", "translate(10px, 50%) rotate(45deg)").unwrap();
    let transform = match value {
        StyleValue::Transform(t) => t,
        other => panic!("expected a TransformValue, got {:?}", other),
    };
    assert_eq!(transform.len(), 2);
    assert!(matches!(transform.components[0], css_typed_om::transform::TransformComponent::Translate { .. }));
    assert!(matches!(transform.components[1], css_typed_om::transform::TransformComponent::Rotate3dSimple(_)));
    assert_eq!(transform.into_iter().collect::<Vec<_>>().len(), 2);
}

#[test]
fn scenario_6_font_family_list_splits_quoted_and_bare_segments() {
    let values = parse_all("font-family", "\"Arial\", sans-serif").unwrap();
    assert_eq!(values.len(), 2);
    assert_eq!(values[0], StyleValue::Unparsed(UnparsedValue::from_text("\"Arial\"")));
    assert_eq!(values[1], StyleValue::Keyword(KeywordValue::new("sans-serif")));
}

#[test]
fn division_by_zero_is_a_range_violation_regardless_of_spelling() {
    assert!(parse("width", "calc(10px / 0)").is_err());
    assert!(parse("width", "calc(10px * (1 / 0))").is_err());
}

#[test]
fn number_plus_length_is_rejected_by_the_simplifier() {
    let err = parse("width", "calc(0 + 10px)").unwrap_err();
    assert!(matches!(err, css_typed_om::error::StyleValueError::TypeMismatch(_)));
}

#[test]
fn deeply_nested_calc_past_the_default_cap_does_not_overflow_the_stack() {
    let mut input = String::new();
    for _ in 0..1100 {
        input.push_str("calc(");
    }
    input.push_str("1px");
    for _ in 0..1100 {
        input.push(')');
    }
    assert!(parse("width", &input).is_err());
}
