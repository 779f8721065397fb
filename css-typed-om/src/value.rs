//! The value node model (§3, §4.C): a tagged tree of numeric, math, keyword,
//! unparsed, variable-reference and transform nodes. Every node serializes
//! deterministically via its `Display` impl (the spec's `toString()`), and
//! [`StyleValue::type_of`] reports the dimension-type vector of numeric nodes.
//!
//! Nodes are built exclusively through the smart builders in `crate::math`
//! (see the "constructor return replacement" design note) rather than through
//! these structs' plain field literals, so that e.g. `MathNegate(UnitValue(5,
//! px))` always folds down to `UnitValue(-5, px)` before a caller can observe
//! the unfolded shape.

use std::fmt;

use crate::error::TypeMismatch;
use crate::transform::TransformValue;
use crate::units::{DimensionType, Unit};

/// The CSS Typed OM sum type. See the module doc for construction guidance.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    Unit(UnitValue),
    Keyword(KeywordValue),
    Unparsed(UnparsedValue),
    VariableReference(VariableReferenceValue),
    Sum(MathSum),
    Product(MathProduct),
    Negate(MathNegate),
    Invert(MathInvert),
    Min(MathMin),
    Max(MathMax),
    Clamp(MathClamp),
    Transform(TransformValue),
}

impl StyleValue {
    /// `true` for the variants the simplifier treats as numeric-or-var
    /// operands (everything except `Keyword`, `Unparsed` and `Transform`).
    pub fn is_numeric_context(&self) -> bool {
        !matches!(
            self,
            StyleValue::Keyword(_) | StyleValue::Unparsed(_) | StyleValue::Transform(_)
        )
    }

    pub fn is_variable_reference(&self) -> bool {
        matches!(self, StyleValue::VariableReference(_))
    }

    /// The dimension-type vector of a numeric node (§4.C). `None` for
    /// keyword/unparsed/transform nodes and for math nodes whose operands
    /// include an unresolved `var()` reference (indeterminate type).
    pub fn type_of(&self) -> Option<DimensionType> {
        match self {
            StyleValue::Unit(u) => Some(u.unit.type_vector()),
            StyleValue::Keyword(_) | StyleValue::Unparsed(_) | StyleValue::Transform(_) => None,
            StyleValue::VariableReference(_) => None,
            StyleValue::Sum(s) => merge_additive(s.values.iter().map(StyleValue::type_of)),
            StyleValue::Min(m) => merge_additive(m.values.iter().map(StyleValue::type_of)),
            StyleValue::Max(m) => merge_additive(m.values.iter().map(StyleValue::type_of)),
            StyleValue::Clamp(c) => merge_additive(
                [c.lower.type_of(), c.value.type_of(), c.upper.type_of()].into_iter(),
            ),
            // Negate preserves its operand's dimension: -10px is still a length.
            StyleValue::Negate(n) => n.operand.type_of(),
            StyleValue::Invert(n) => {
                if n.operand.is_variable_reference() {
                    Some(DimensionType::ZERO)
                } else {
                    n.operand.type_of().map(|v| v.negate())
                }
            }
            StyleValue::Product(p) => {
                let mut acc = DimensionType::ZERO;
                for child in &p.values {
                    if let StyleValue::Invert(inv) = child {
                        if inv.operand.is_variable_reference() {
                            continue;
                        }
                        match inv.operand.type_of() {
                            Some(v) => acc = acc.add(&v.negate()),
                            None => return None,
                        }
                    } else {
                        match child.type_of() {
                            Some(v) => acc = acc.add(&v),
                            None => return None,
                        }
                    }
                }
                Some(acc)
            }
        }
    }
}

/// Merges a sequence of child dimension types under the additive-compatibility
/// rule (§4.A): `None` if any child is indeterminate, otherwise the pairwise
/// additive merge (equal outside `length`/`percent`, OR'd within them).
pub(crate) fn merge_additive<I: Iterator<Item = Option<DimensionType>>>(mut iter: I) -> Option<DimensionType> {
    let mut acc = iter.next()??;
    for next in iter {
        let next = next?;
        if !acc.additively_compatible_with(&next) {
            return None;
        }
        acc.length = acc.length.max(next.length);
        acc.percent = acc.percent.max(next.percent);
    }
    Some(acc)
}

/// A leaf numeric value: a finite real paired with a canonical unit token.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitValue {
    pub value: f64,
    pub unit: Unit,
}

impl UnitValue {
    /// Fails with `TypeMismatch::NonFiniteValue` if `value` is not finite (§3 invariant).
    pub fn new(value: f64, unit: Unit) -> Result<UnitValue, TypeMismatch> {
        if !value.is_finite() {
            return Err(TypeMismatch::NonFiniteValue { value });
        }
        Ok(UnitValue { value, unit })
    }

    /// Re-checks finiteness, per §5 ("the only observably mutable field").
    pub fn set_value(&mut self, value: f64) -> Result<(), TypeMismatch> {
        if !value.is_finite() {
            return Err(TypeMismatch::NonFiniteValue { value });
        }
        self.value = value;
        Ok(())
    }
}

impl fmt::Display for UnitValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", format_number(self.value), unit_suffix(self.unit))
    }
}

/// Renders a unit's serialized suffix: `%` for percent, empty for number,
/// the lowercase token otherwise.
fn unit_suffix(unit: Unit) -> String {
    match unit {
        Unit::Percent => "%".to_string(),
        Unit::Number => String::new(),
        other => other.to_string(),
    }
}

/// Formats a value with up to six decimal digits, trailing zeros trimmed (§4.C, §9).
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let rounded = format!("{:.6}", value);
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() || trimmed == "-" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// A CSS identifier token used as a standalone value (`auto`, `inherit`, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordValue {
    pub identifier: String,
}

impl KeywordValue {
    pub fn new(identifier: impl Into<String>) -> KeywordValue {
        KeywordValue { identifier: identifier.into() }
    }
}

impl fmt::Display for KeywordValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.identifier)
    }
}

/// A fragment of an [`UnparsedValue`]: either verbatim text or an embedded
/// `var()` reference.
#[derive(Debug, Clone, PartialEq)]
pub enum UnparsedMember {
    Text(String),
    VariableReference(VariableReferenceValue),
}

impl fmt::Display for UnparsedMember {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            UnparsedMember::Text(t) => write!(f, "{}", t),
            UnparsedMember::VariableReference(v) => write!(f, "{}", v),
        }
    }
}

/// Verbatim fallback: a sequence of text fragments and variable references,
/// used whenever a substring cannot be reduced to a typed node.
#[derive(Debug, Clone, PartialEq)]
pub struct UnparsedValue {
    pub members: Vec<UnparsedMember>,
}

impl UnparsedValue {
    pub fn from_text(text: impl Into<String>) -> UnparsedValue {
        UnparsedValue { members: vec![UnparsedMember::Text(text.into())] }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn item(&self, index: usize) -> Option<&UnparsedMember> {
        self.members.get(index)
    }
}

impl fmt::Display for UnparsedValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for member in &self.members {
            write!(f, "{}", member)?;
        }
        Ok(())
    }
}

/// `UnparsedValue` is "iterable, supports `length`/`item`" (§3).
impl<'a> IntoIterator for &'a UnparsedValue {
    type Item = &'a UnparsedMember;
    type IntoIter = std::slice::Iter<'a, UnparsedMember>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

/// A `var(--name[, fallback])` reference. Participates in math contexts
/// without itself being numeric; the fallback is never evaluated (§1 non-goals).
#[derive(Debug, Clone, PartialEq)]
pub struct VariableReferenceValue {
    pub name: String,
    pub fallback: Option<Box<UnparsedValue>>,
}

impl VariableReferenceValue {
    pub fn new(name: impl Into<String>, fallback: Option<UnparsedValue>) -> VariableReferenceValue {
        VariableReferenceValue { name: name.into(), fallback: fallback.map(Box::new) }
    }
}

impl fmt::Display for VariableReferenceValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.fallback {
            Some(fallback) => write!(f, "var({}, {})", self.name, fallback),
            None => write!(f, "var({})", self.name),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MathSum {
    pub values: Vec<StyleValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MathProduct {
    pub values: Vec<StyleValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MathNegate {
    pub operand: Box<StyleValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MathInvert {
    pub operand: Box<StyleValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MathMin {
    pub values: Vec<StyleValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MathMax {
    pub values: Vec<StyleValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MathClamp {
    pub lower: Box<StyleValue>,
    pub value: Box<StyleValue>,
    pub upper: Box<StyleValue>,
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StyleValue::Unit(u) => write!(f, "{}", u),
            StyleValue::Keyword(k) => write!(f, "{}", k),
            StyleValue::Unparsed(u) => write!(f, "{}", u),
            StyleValue::VariableReference(v) => write!(f, "{}", v),
            StyleValue::Transform(t) => write!(f, "{}", t),
            StyleValue::Sum(_) | StyleValue::Product(_) | StyleValue::Negate(_) | StyleValue::Invert(_) => {
                write!(f, "calc({})", inner_repr(self))
            }
            StyleValue::Min(_) | StyleValue::Max(_) | StyleValue::Clamp(_) => {
                write!(f, "{}", inner_repr(self))
            }
        }
    }
}

/// Serializes `v` the way it would appear *inside* an enclosing `calc(...)`,
/// `min(...)`/`max(...)`/`clamp(...)` argument list, or product term — i.e.
/// without re-wrapping math nodes in their own outer function syntax (§4.C:
/// "inner calc(...) wrappers on operands are elided").
pub(crate) fn inner_repr(v: &StyleValue) -> String {
    match v {
        StyleValue::Unit(u) => u.to_string(),
        StyleValue::Keyword(k) => k.to_string(),
        StyleValue::Unparsed(u) => u.to_string(),
        StyleValue::VariableReference(r) => r.to_string(),
        StyleValue::Transform(t) => t.to_string(),
        StyleValue::Sum(s) => join_sum(&s.values),
        StyleValue::Product(p) => join_product(&p.values),
        StyleValue::Negate(n) => format!("-1 * {}", paren_if_sum_or_negate(&n.operand)),
        StyleValue::Invert(n) => format!("1 / {}", paren_if_sum_or_negate(&n.operand)),
        StyleValue::Min(m) => format!("min({})", join_commas(&m.values)),
        StyleValue::Max(m) => format!("max({})", join_commas(&m.values)),
        StyleValue::Clamp(c) => format!(
            "clamp({}, {}, {})",
            inner_repr(&c.lower),
            inner_repr(&c.value),
            inner_repr(&c.upper)
        ),
    }
}

fn join_sum(values: &[StyleValue]) -> String {
    let mut out = String::new();
    for (i, v) in values.iter().enumerate() {
        if i == 0 {
            out.push_str(&inner_repr(v));
            continue;
        }
        if let StyleValue::Negate(n) = v {
            out.push_str(" - ");
            out.push_str(&inner_repr(&n.operand));
        } else {
            out.push_str(" + ");
            out.push_str(&inner_repr(v));
        }
    }
    out
}

fn join_product(values: &[StyleValue]) -> String {
    let mut numerator = Vec::new();
    let mut denominator = Vec::new();
    for v in values {
        if let StyleValue::Invert(inv) = v {
            denominator.push(paren_if_sum_or_negate(&inv.operand));
        } else {
            numerator.push(inner_repr(v));
        }
    }
    let numerator = if numerator.is_empty() { "1".to_string() } else { numerator.join(" * ") };
    match denominator.len() {
        0 => numerator,
        1 => format!("{} / {}", numerator, denominator[0]),
        _ => format!("{} / ({})", numerator, denominator.join(" * ")),
    }
}

fn join_commas(values: &[StyleValue]) -> String {
    values.iter().map(inner_repr).collect::<Vec<_>>().join(", ")
}

fn paren_if_sum_or_negate(v: &StyleValue) -> String {
    match v {
        StyleValue::Sum(_) | StyleValue::Negate(_) => format!("({})", inner_repr(v)),
        _ => inner_repr(v),
    }
}

/// A short human-readable description of a value's kind, used in
/// [`TypeMismatch::NonNumericOperand`] messages.
pub(crate) fn style_value_kind(v: &StyleValue) -> &'static str {
    match v {
        StyleValue::Unit(_) => "a differently-dimensioned unit value",
        StyleValue::Keyword(_) => "a keyword",
        StyleValue::Unparsed(_) => "an unparsed value",
        StyleValue::VariableReference(_) => "a variable reference",
        StyleValue::Sum(_) => "an unresolved sum",
        StyleValue::Product(_) => "an unresolved product",
        StyleValue::Negate(_) => "an unresolved negation",
        StyleValue::Invert(_) => "an unresolved inversion",
        StyleValue::Min(_) => "an unresolved min()",
        StyleValue::Max(_) => "an unresolved max()",
        StyleValue::Clamp(_) => "an unresolved clamp()",
        StyleValue::Transform(_) => "a transform value",
    }
}
