//! Dispatcher over the `transform` property's function vocabulary (§4.F),
//! producing a `TransformValue` from a sequence of `FUNC`-terminated groups.
//! Built over the same `expr::Parser` cursor the math sublanguage uses, since
//! every argument inside a transform function is itself a math expression.

use css_typed_om::error::{ParseFailure, StyleValueError, TypeMismatch};
use css_typed_om::transform::{Angle, LengthPercentage, TransformComponent, TransformValue};
use css_typed_om::units::{Unit, UnitCategory};
use css_typed_om::value::{StyleValue, UnitValue};

use crate::expr::Parser;
use crate::lexer::TokenKind;

/// Parses a full `transform` property value: zero or more space-separated
/// transform function calls.
pub fn parse_transform(input: &str, max_depth: usize) -> Result<TransformValue, StyleValueError> {
    let mut parser = Parser::new(input, max_depth)?;
    let mut components = Vec::new();
    loop {
        match parser.peek().clone() {
            TokenKind::Eof => break,
            TokenKind::Func(name) => {
                parser.advance();
                let args = parser.comma_separated_exprs()?;
                components.push(build_component(&name, args)?);
            }
            other => {
                return Err(ParseFailure::UnexpectedToken {
                    found: format!("{:?}", other),
                    position: parser.peek_position(),
                }
                .into())
            }
        }
    }
    Ok(TransformValue::new(components))
}

fn build_component(name: &str, args: Vec<StyleValue>) -> Result<TransformComponent, StyleValueError> {
    match name {
        "translate" | "translate3d" => translate(name, args),
        "translatex" => one_length(args, name).map(|x| {
            TransformComponent::Translate { x, y: zero_length(), z: None }
        }),
        "translatey" => one_length(args, name).map(|y| {
            TransformComponent::Translate { x: zero_length(), y, z: None }
        }),
        "translatez" => one_length(args, name).map(|z| {
            TransformComponent::Translate { x: zero_length(), y: zero_length(), z: Some(z) }
        }),
        "rotate" | "rotate3d" => rotate(name, args),
        "rotatex" => one_angle(args, name).map(|a| TransformComponent::Rotate { x: 1.0, y: 0.0, z: 0.0, angle: a }),
        "rotatey" => one_angle(args, name).map(|a| TransformComponent::Rotate { x: 0.0, y: 1.0, z: 0.0, angle: a }),
        "rotatez" => one_angle(args, name).map(|a| TransformComponent::Rotate3dSimple(a)),
        "scale" | "scale3d" => scale(name, args),
        "scalex" => one_number(args, name).map(|x| TransformComponent::Scale { x, y: 1.0, z: 1.0 }),
        "scaley" => one_number(args, name).map(|y| TransformComponent::Scale { x: 1.0, y, z: 1.0 }),
        "scalez" => one_number(args, name).map(|z| TransformComponent::Scale { x: 1.0, y: 1.0, z }),
        "skew" => skew(args),
        "skewx" => one_angle(args, name).map(TransformComponent::SkewX),
        "skewy" => one_angle(args, name).map(TransformComponent::SkewY),
        "perspective" => one_length(args, name).map(TransformComponent::Perspective),
        "matrix" => matrix2d(args),
        "matrix3d" => matrix3d(args),
        other => Err(ParseFailure::UnknownTransformFunction { name: other.to_string() }.into()),
    }
}

fn zero_length() -> LengthPercentage {
    LengthPercentage(StyleValue::Unit(UnitValue { value: 0.0, unit: Unit::Px }))
}

fn zero_angle() -> Angle {
    Angle(StyleValue::Unit(UnitValue { value: 0.0, unit: Unit::Deg }))
}

fn translate(name: &str, args: Vec<StyleValue>) -> Result<TransformComponent, StyleValueError> {
    if args.is_empty() || args.len() > 3 {
        return Err(arity_error(name, "1-3", args.len()));
    }
    let is_3d = name == "translate3d" || args.len() == 3;
    let mut iter = args.into_iter();
    let x = require_length(iter.next().unwrap(), name)?;
    let y = match iter.next() {
        Some(v) => require_length(v, name)?,
        None => zero_length(),
    };
    let z = match iter.next() {
        Some(v) => Some(require_length(v, name)?),
        None if is_3d => Some(zero_length()),
        None => None,
    };
    Ok(TransformComponent::Translate { x, y, z })
}

fn rotate(name: &str, args: Vec<StyleValue>) -> Result<TransformComponent, StyleValueError> {
    match (name, args.len()) {
        ("rotate", 1) => {
            let angle = require_angle(args.into_iter().next().unwrap(), name)?;
            Ok(TransformComponent::Rotate3dSimple(angle))
        }
        ("rotate3d", 4) => {
            let mut iter = args.into_iter();
            let x = require_number(iter.next().unwrap(), name)?;
            let y = require_number(iter.next().unwrap(), name)?;
            let z = require_number(iter.next().unwrap(), name)?;
            let angle = require_angle(iter.next().unwrap(), name)?;
            Ok(TransformComponent::Rotate { x, y, z, angle })
        }
        (_, got) => Err(arity_error(name, if name == "rotate" { "1" } else { "4" }, got)),
    }
}

fn scale(name: &str, args: Vec<StyleValue>) -> Result<TransformComponent, StyleValueError> {
    if args.is_empty() || args.len() > 3 {
        return Err(arity_error(name, "1-3", args.len()));
    }
    let is_3d = name == "scale3d" || args.len() == 3;
    let mut iter = args.into_iter();
    let x = require_number(iter.next().unwrap(), name)?;
    let y = match iter.next() {
        Some(v) => require_number(v, name)?,
        None => x,
    };
    let z = match iter.next() {
        Some(v) => require_number(v, name)?,
        None if is_3d => 1.0,
        None => 1.0,
    };
    Ok(TransformComponent::Scale { x, y, z })
}

fn skew(args: Vec<StyleValue>) -> Result<TransformComponent, StyleValueError> {
    if args.is_empty() || args.len() > 2 {
        return Err(arity_error("skew", "1-2", args.len()));
    }
    let mut iter = args.into_iter();
    let x = require_angle(iter.next().unwrap(), "skew")?;
    let y = match iter.next() {
        Some(v) => require_angle(v, "skew")?,
        None => zero_angle(),
    };
    Ok(TransformComponent::Skew { x, y })
}

fn matrix2d(args: Vec<StyleValue>) -> Result<TransformComponent, StyleValueError> {
    if args.len() != 6 {
        return Err(arity_error("matrix", "6", args.len()));
    }
    let mut numbers = [0.0; 6];
    for (slot, value) in numbers.iter_mut().zip(args) {
        *slot = require_number(value, "matrix")?;
    }
    let [a, b, c, d, e, f] = numbers;
    let mut entries = [0.0; 16];
    entries[0] = a;
    entries[1] = b;
    entries[4] = c;
    entries[5] = d;
    entries[10] = 1.0;
    entries[12] = e;
    entries[13] = f;
    entries[15] = 1.0;
    Ok(TransformComponent::Matrix { entries, is_2d: true })
}

fn matrix3d(args: Vec<StyleValue>) -> Result<TransformComponent, StyleValueError> {
    if args.len() != 16 {
        return Err(arity_error("matrix3d", "16", args.len()));
    }
    let mut entries = [0.0; 16];
    for (slot, value) in entries.iter_mut().zip(args) {
        *slot = require_number(value, "matrix3d")?;
    }
    Ok(TransformComponent::Matrix { entries, is_2d: false })
}

fn arity_error(function: &str, expected: &'static str, got: usize) -> StyleValueError {
    TypeMismatch::WrongArity { function: function.to_string(), expected, got }.into()
}

fn one_length(mut args: Vec<StyleValue>, name: &str) -> Result<LengthPercentage, StyleValueError> {
    if args.len() != 1 {
        return Err(arity_error(name, "1", args.len()));
    }
    require_length(args.pop().unwrap(), name)
}

fn one_angle(mut args: Vec<StyleValue>, name: &str) -> Result<Angle, StyleValueError> {
    if args.len() != 1 {
        return Err(arity_error(name, "1", args.len()));
    }
    require_angle(args.pop().unwrap(), name)
}

fn one_number(mut args: Vec<StyleValue>, name: &str) -> Result<f64, StyleValueError> {
    if args.len() != 1 {
        return Err(arity_error(name, "1", args.len()));
    }
    require_number(args.pop().unwrap(), name)
}

fn require_length(value: StyleValue, function: &str) -> Result<LengthPercentage, StyleValueError> {
    match &value {
        StyleValue::Unit(u) if u.unit.category() == UnitCategory::Length || u.unit.category() == UnitCategory::Percent => {
            Ok(LengthPercentage(value))
        }
        StyleValue::Unit(u) if u.unit == Unit::Number && u.value == 0.0 => Ok(zero_length()),
        _ => Err(TypeMismatch::NonNumericOperand {
            found: format!("a non-length argument to {}()", function),
        }
        .into()),
    }
}

fn require_angle(value: StyleValue, function: &str) -> Result<Angle, StyleValueError> {
    match &value {
        StyleValue::Unit(u) if u.unit.category() == UnitCategory::Angle => Ok(Angle(value)),
        StyleValue::Unit(u) if u.unit == Unit::Number && u.value == 0.0 => Ok(zero_angle()),
        _ => Err(TypeMismatch::NonNumericOperand {
            found: format!("a non-angle argument to {}()", function),
        }
        .into()),
    }
}

fn require_number(value: StyleValue, function: &str) -> Result<f64, StyleValueError> {
    match value {
        StyleValue::Unit(u) if u.unit == Unit::Number => Ok(u.value),
        _ => Err(TypeMismatch::NonNumericOperand {
            found: format!("a non-numeric argument to {}()", function),
        }
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::DEFAULT_MAX_DEPTH;

    fn parse(input: &str) -> TransformValue {
        parse_transform(input, DEFAULT_MAX_DEPTH).unwrap()
    }

    #[test]
    fn parses_translate_and_rotate_sequence() {
        let v = parse("translate(10px, 50%) rotate(45deg)");
        assert_eq!(v.len(), 2);
        assert!(matches!(v.components[0], TransformComponent::Translate { .. }));
        assert!(matches!(v.components[1], TransformComponent::Rotate3dSimple(_)));
        assert_eq!(v.to_string(), "translate(10px, 50%) rotate(45deg)");
    }

    #[test]
    fn translate_defaults_missing_y_to_zero_px() {
        let v = parse("translateX(10px)");
        match &v.components[0] {
            TransformComponent::Translate { y, .. } => assert_eq!(y.to_string(), "0px"),
            other => panic!("expected Translate, got {:?}", other),
        }
    }

    #[test]
    fn translate3d_is_not_2d() {
        let v = parse("translate3d(1px, 2px, 3px)");
        assert!(!v.is_2d());
    }

    #[test]
    fn scale_defaults_missing_y_to_x() {
        let v = parse("scale(2)");
        match &v.components[0] {
            TransformComponent::Scale { x, y, z } => {
                assert_eq!(*x, 2.0);
                assert_eq!(*y, 2.0);
                assert_eq!(*z, 1.0);
            }
            other => panic!("expected Scale, got {:?}", other),
        }
    }

    #[test]
    fn matrix_requires_exactly_six_numbers() {
        let err = parse_transform("matrix(1, 0, 0, 1, 0)", DEFAULT_MAX_DEPTH).unwrap_err();
        assert!(matches!(err, StyleValueError::TypeMismatch(TypeMismatch::WrongArity { .. })));
    }

    #[test]
    fn unknown_transform_function_fails() {
        let err = parse_transform("wobble(1px)", DEFAULT_MAX_DEPTH).unwrap_err();
        assert!(matches!(err, StyleValueError::ParseFailure(ParseFailure::UnknownTransformFunction { .. })));
    }

    #[test]
    fn unitless_zero_is_accepted_as_an_angle() {
        let v = parse("rotate(0)");
        match &v.components[0] {
            TransformComponent::Rotate3dSimple(angle) => assert_eq!(angle.to_string(), "0deg"),
            other => panic!("expected Rotate3dSimple, got {:?}", other),
        }
    }

    #[test]
    fn is_2d_is_conjunction_of_components() {
        let v = parse("translate(1px, 2px) perspective(10px)");
        assert!(!v.is_2d());
    }
}
