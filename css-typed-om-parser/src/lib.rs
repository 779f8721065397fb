//! Lexer, recursive-descent expression/transform parser, property-map
//! adapter and unit-factory installation surface for [`css_typed_om`] (§4.B,
//! §4.E-§4.I).
//!
//! This crate is the text-facing half of the split; the value model and the
//! algebraic simplifier live in the sibling `css-typed-om` crate, mirroring
//! how the teacher project keeps its property *types* (`azul-css`) separate
//! from its CSS-text *parser* (`azul-css-parser`).

#[macro_use]
mod macros;

pub mod entry;
pub mod error;
pub mod expr;
pub mod lexer;
pub mod property;
pub mod transform;
pub mod units_install;

pub use entry::{parse, parse_all, parse_all_with_max_depth, parse_with_max_depth, STRICT_PROPERTIES};
pub use error::LexError;
pub use expr::DEFAULT_MAX_DEPTH;
pub use property::{
    Entries, InlineStyle, Keys, StylePropertyMap, Values, COMMA_LIST_PROPERTIES, DEFAULT_CACHE_CAPACITY,
};
pub use units_install::{all_unit_factories, install, AttributeStyleMapRegistry, InstallTarget, UnitFactory};
