//! Smart builders for the math node tree (§4.D).
//!
//! These are the only sanctioned way to build a `MathSum`/`MathProduct`/
//! `MathNegate`/`MathInvert`/`MathMin`/`MathMax`/`MathClamp`: each function
//! flattens, folds and dimension-checks its operands before deciding whether
//! the result collapses to a single child or needs the wrapper node at all.
//! The parser (and any other caller) should never construct those structs
//! directly.

use crate::error::{MissingOperand, RangeViolation, StyleValueError, TypeMismatch};
use crate::units::Unit;
use crate::value::{
    merge_additive, style_value_kind, MathClamp, MathInvert, MathMax, MathMin, MathNegate,
    MathProduct, MathSum, StyleValue, UnitValue,
};

/// `a + b + ...`. Flattens nested sums, folds same-unit constants, and skips
/// type-checking entirely once an unresolved `var()` reference is present
/// (§4.D step 3: such a sum is returned verbatim).
pub fn sum(operands: Vec<StyleValue>) -> Result<StyleValue, StyleValueError> {
    if operands.is_empty() {
        return Err(MissingOperand.into());
    }
    let mut flat = Vec::with_capacity(operands.len());
    for v in operands {
        match v {
            StyleValue::Sum(s) => flat.extend(s.values),
            other => flat.push(other),
        }
    }
    if flat.len() == 1 {
        return Ok(flat.into_iter().next().unwrap());
    }
    validate_numeric_operands(&flat)?;
    if flat.iter().any(StyleValue::is_variable_reference) {
        return Ok(StyleValue::Sum(MathSum { values: flat }));
    }
    check_additive_compatible(&flat, "calc")?;
    let folded = fold_same_unit_terms(flat);
    if folded.len() == 1 {
        Ok(folded.into_iter().next().unwrap())
    } else {
        Ok(StyleValue::Sum(MathSum { values: folded }))
    }
}

/// `a * b * ...`. Scalar (`<number>`) factors fold into a single aggregate
/// multiplier, which then either folds into a lone `UnitValue`, distributes
/// across a lone `MathSum`, or stays as the leading factor of an unresolved
/// `MathProduct`. At most one remaining factor may carry a nonzero dimension.
pub fn product(operands: Vec<StyleValue>) -> Result<StyleValue, StyleValueError> {
    if operands.is_empty() {
        return Err(MissingOperand.into());
    }
    let mut flat = Vec::with_capacity(operands.len());
    for v in operands {
        match v {
            StyleValue::Product(p) => flat.extend(p.values),
            other => flat.push(other),
        }
    }
    if flat.len() == 1 {
        return Ok(flat.into_iter().next().unwrap());
    }
    validate_numeric_operands(&flat)?;
    if flat.iter().any(StyleValue::is_variable_reference) {
        return Ok(StyleValue::Product(MathProduct { values: flat }));
    }

    let mut scalar = 1.0_f64;
    let mut rest: Vec<StyleValue> = Vec::new();
    for v in flat {
        match v {
            StyleValue::Unit(u) if u.unit == Unit::Number => scalar *= u.value,
            other => rest.push(other),
        }
    }

    let dimensioned_count = rest
        .iter()
        .filter(|v| !matches!(v.type_of(), Some(t) if t.is_zero()))
        .count();
    if dimensioned_count > 1 {
        return Err(TypeMismatch::IncompatibleDimensions {
            message: "calc() product may have at most one dimensioned operand".to_string(),
        }
        .into());
    }

    match rest.len() {
        0 => Ok(StyleValue::Unit(UnitValue { value: scalar, unit: Unit::Number })),
        1 => Ok(distribute_scalar(scalar, rest.into_iter().next().unwrap())),
        _ => {
            if scalar != 1.0 {
                rest.insert(0, StyleValue::Unit(UnitValue { value: scalar, unit: Unit::Number }));
            }
            Ok(StyleValue::Product(MathProduct { values: rest }))
        }
    }
}

/// Multiplies a resolved scalar into `value`, folding directly into a
/// `UnitValue` or distributing over a `MathSum`'s children; any other node
/// shape is wrapped in a two-term `MathProduct`.
fn distribute_scalar(scalar: f64, value: StyleValue) -> StyleValue {
    if scalar == 1.0 {
        return value;
    }
    match value {
        StyleValue::Unit(u) => StyleValue::Unit(UnitValue { value: u.value * scalar, unit: u.unit }),
        StyleValue::Sum(s) => {
            let distributed: Vec<StyleValue> =
                s.values.into_iter().map(|term| distribute_scalar(scalar, term)).collect();
            match sum(distributed) {
                Ok(v) => v,
                Err(_) => unreachable!("scaling every addend preserves additive compatibility"),
            }
        }
        other => {
            let scalar_term = StyleValue::Unit(UnitValue { value: scalar, unit: Unit::Number });
            StyleValue::Product(MathProduct { values: vec![scalar_term, other] })
        }
    }
}

/// `-x`. `negate(negate(x)) == x`; negating a `UnitValue` flips its sign in
/// place rather than allocating a wrapper (§4.D, §9 constructor-folding note).
pub fn negate(operand: StyleValue) -> StyleValue {
    match operand {
        StyleValue::Unit(u) => StyleValue::Unit(UnitValue { value: -u.value, unit: u.unit }),
        StyleValue::Negate(n) => *n.operand,
        other => StyleValue::Negate(MathNegate { operand: Box::new(other) }),
    }
}

/// `1 / x`. `invert(invert(x)) == x`; inverting a dimensionless `UnitValue`
/// folds to its numeric reciprocal. Inverting zero is a [`RangeViolation`].
pub fn invert(operand: StyleValue) -> Result<StyleValue, StyleValueError> {
    match operand {
        StyleValue::Unit(u) if u.value == 0.0 => Err(RangeViolation::InversionOfZero.into()),
        StyleValue::Unit(u) if u.unit == Unit::Number => {
            Ok(StyleValue::Unit(UnitValue { value: 1.0 / u.value, unit: Unit::Number }))
        }
        StyleValue::Invert(n) => Ok(*n.operand),
        other => Ok(StyleValue::Invert(MathInvert { operand: Box::new(other) })),
    }
}

/// `min(a, b, ...)`: folds to a single `UnitValue` when every operand shares
/// the same unit, otherwise stays an unresolved `MathMin`.
pub fn min_of(operands: Vec<StyleValue>) -> Result<StyleValue, StyleValueError> {
    extremum(operands, "min", f64::min, |values| StyleValue::Min(MathMin { values }))
}

/// `max(a, b, ...)`, the `min_of` counterpart.
pub fn max_of(operands: Vec<StyleValue>) -> Result<StyleValue, StyleValueError> {
    extremum(operands, "max", f64::max, |values| StyleValue::Max(MathMax { values }))
}

fn extremum(
    operands: Vec<StyleValue>,
    function_name: &'static str,
    pick: fn(f64, f64) -> f64,
    wrap: fn(Vec<StyleValue>) -> StyleValue,
) -> Result<StyleValue, StyleValueError> {
    if operands.is_empty() {
        return Err(MissingOperand.into());
    }
    validate_numeric_operands(&operands)?;
    if operands.len() == 1 {
        return Ok(operands.into_iter().next().unwrap());
    }
    if operands.iter().any(StyleValue::is_variable_reference) {
        return Ok(wrap(operands));
    }
    check_additive_compatible(&operands, function_name)?;
    match fold_same_unit_extremum(&operands, pick) {
        Some(folded) => Ok(folded),
        None => Ok(wrap(operands)),
    }
}

fn fold_same_unit_extremum(operands: &[StyleValue], pick: fn(f64, f64) -> f64) -> Option<StyleValue> {
    let mut iter = operands.iter();
    let first = match iter.next()? {
        StyleValue::Unit(u) => *u,
        _ => return None,
    };
    let mut acc = first.value;
    for v in iter {
        match v {
            StyleValue::Unit(u) if u.unit == first.unit => acc = pick(acc, u.value),
            _ => return None,
        }
    }
    Some(StyleValue::Unit(UnitValue { value: acc, unit: first.unit }))
}

/// `clamp(lower, value, upper)`: folds to a `UnitValue` when all three share
/// a unit, otherwise stays an unresolved `MathClamp`.
pub fn clamp(lower: StyleValue, value: StyleValue, upper: StyleValue) -> Result<StyleValue, StyleValueError> {
    let operands = vec![lower, value, upper];
    validate_numeric_operands(&operands)?;
    if operands.iter().any(StyleValue::is_variable_reference) {
        return Ok(wrap_clamp(operands));
    }
    check_additive_compatible(&operands, "clamp")?;
    if let (StyleValue::Unit(l), StyleValue::Unit(v), StyleValue::Unit(u)) =
        (&operands[0], &operands[1], &operands[2])
    {
        if l.unit == v.unit && v.unit == u.unit {
            let clamped = v.value.max(l.value).min(u.value);
            return Ok(StyleValue::Unit(UnitValue { value: clamped, unit: l.unit }));
        }
    }
    Ok(wrap_clamp(operands))
}

fn wrap_clamp(mut operands: Vec<StyleValue>) -> StyleValue {
    let upper = operands.pop().unwrap();
    let value = operands.pop().unwrap();
    let lower = operands.pop().unwrap();
    StyleValue::Clamp(MathClamp {
        lower: Box::new(lower),
        value: Box::new(value),
        upper: Box::new(upper),
    })
}

/// Groups `UnitValue` operands by exact unit and sums within each group,
/// preserving the position of first appearance; every other operand passes
/// through untouched.
fn fold_same_unit_terms(values: Vec<StyleValue>) -> Vec<StyleValue> {
    let mut out: Vec<StyleValue> = Vec::new();
    for v in values {
        if let StyleValue::Unit(u) = &v {
            if let Some(existing) = out.iter_mut().find_map(|o| match o {
                StyleValue::Unit(eu) if eu.unit == u.unit => Some(eu),
                _ => None,
            }) {
                existing.value += u.value;
                continue;
            }
        }
        out.push(v);
    }
    out
}

/// Rejects keyword/unparsed/transform operands outright; only numeric-context
/// nodes (units, math nodes, variable references) may reach the folding logic.
fn validate_numeric_operands(values: &[StyleValue]) -> Result<(), StyleValueError> {
    for v in values {
        if !v.is_numeric_context() {
            return Err(TypeMismatch::NonNumericOperand { found: style_value_kind(v).to_string() }.into());
        }
    }
    Ok(())
}

/// Dimension-checks `values` under the additive-compatibility rule (§4.A).
/// Operands whose type is indeterminate (e.g. a nested node containing an
/// unresolved `var()`) are conservatively passed through uncheck — there is
/// nothing concrete to contradict.
fn check_additive_compatible(values: &[StyleValue], function_name: &'static str) -> Result<(), StyleValueError> {
    let types: Option<Vec<_>> = values.iter().map(StyleValue::type_of).collect();
    let types = match types {
        Some(t) => t,
        None => return Ok(()),
    };
    if merge_additive(types.into_iter().map(Some)).is_none() {
        return Err(TypeMismatch::IncompatibleDimensions {
            message: format!("{}() operands do not share a compatible dimension", function_name),
        }
        .into());
    }
    Ok(())
}
