//! Common datatypes for a CSS Typed Object Model (§1-§3): dimension-typed
//! numeric values, the `calc()`/`min()`/`max()`/`clamp()` math node tree,
//! keyword and unparsed fallback values, and the `transform` function list.
//!
//! This crate holds the value model and the algebraic simplifier; tokenizing
//! and parsing CSS value text into these types lives in the sibling
//! `css-typed-om-parser` crate, mirroring how the teacher project splits its
//! property types from its CSS-text parser.

#[macro_use]
mod macros;

pub mod error;
pub mod math;
pub mod transform;
pub mod units;
pub mod value;

pub use error::{MissingOperand, ParseFailure, RangeViolation, StyleValueError, TypeMismatch};
pub use transform::{Angle, HostMatrix, LengthPercentage, TransformComponent, TransformValue};
pub use units::{DimensionType, Unit, UnitCategory};
pub use value::{
    format_number, KeywordValue, MathClamp, MathInvert, MathMax, MathMin, MathNegate, MathProduct,
    MathSum, StyleValue, UnitValue, UnparsedMember, UnparsedValue, VariableReferenceValue,
};
