//! Parser-crate error kinds (§7). These are the lexer/expression/transform
//! failures that funnel into the core crate's `StyleValueError` at the
//! boundary, the same way the teacher's `ParenthesisParseError`/
//! `CssPixelValueParseError` feed into its top-level `CssParsingError`.

use css_typed_om::error::{ParseFailure, StyleValueError, TypeMismatch};

#[derive(Clone, PartialEq)]
pub enum LexError {
    UnexpectedCharacter { found: char, position: usize },
    InvalidNumber { text: String },
    UnknownUnit { ident: String },
}

impl_debug_as_display!(LexError);
impl_display! { LexError, {
    UnexpectedCharacter { found, position } =>
        format!("unexpected character '{}' at position {}", found, position),
    InvalidNumber { text } => format!("invalid number: \"{}\"", text),
    UnknownUnit { ident } => format!("unknown unit \"{}\"", ident),
}}

impl std::error::Error for LexError {}

impl From<LexError> for StyleValueError {
    fn from(e: LexError) -> Self {
        match e {
            LexError::UnexpectedCharacter { found, position } => {
                StyleValueError::ParseFailure(ParseFailure::UnexpectedToken {
                    found: found.to_string(),
                    position,
                })
            }
            LexError::InvalidNumber { text } => {
                StyleValueError::ParseFailure(ParseFailure::InvalidNumber { text })
            }
            LexError::UnknownUnit { ident } => {
                StyleValueError::TypeMismatch(TypeMismatch::UnknownUnit { ident })
            }
        }
    }
}
