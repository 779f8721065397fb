//! Unit factories and installation surface (§4.I).
//!
//! In a browser host this step mutates a global `CSS` namespace and an
//! `HTMLElement.prototype` accessor; there is no such ambient global object
//! in a Rust program, so per the §9 design note this crate exposes an
//! explicit `install(target: &mut dyn InstallTarget)` entry point the
//! embedder calls once, plus the bare factory functions themselves for
//! embedders that don't need the indirection at all.

use std::collections::HashMap;
use std::hash::Hash;

use css_typed_om::error::TypeMismatch;
use css_typed_om::units::Unit;
use css_typed_om::value::UnitValue;

use crate::property::{InlineStyle, StylePropertyMap};

/// `CSS.<unit>(n)` / `CSS.number(n)` factory signature (§4.I, §6).
pub type UnitFactory = fn(f64) -> Result<UnitValue, TypeMismatch>;

macro_rules! unit_factory {
    ($name:ident, $unit:expr) => {
        /// Constructs a `UnitValue` in this unit, failing if `value` is not finite.
        pub fn $name(value: f64) -> Result<UnitValue, TypeMismatch> {
            UnitValue::new(value, $unit)
        }
    };
}

unit_factory!(px, Unit::Px);
unit_factory!(cm, Unit::Cm);
unit_factory!(mm, Unit::Mm);
unit_factory!(in_, Unit::In);
unit_factory!(pt, Unit::Pt);
unit_factory!(pc, Unit::Pc);
unit_factory!(em, Unit::Em);
unit_factory!(rem, Unit::Rem);
unit_factory!(vw, Unit::Vw);
unit_factory!(vh, Unit::Vh);
unit_factory!(vmin, Unit::Vmin);
unit_factory!(vmax, Unit::Vmax);
unit_factory!(ch, Unit::Ch);
unit_factory!(ex, Unit::Ex);
unit_factory!(q, Unit::Q);
unit_factory!(vi, Unit::Vi);
unit_factory!(vb, Unit::Vb);
unit_factory!(deg, Unit::Deg);
unit_factory!(rad, Unit::Rad);
unit_factory!(grad, Unit::Grad);
unit_factory!(turn, Unit::Turn);
unit_factory!(s, Unit::S);
unit_factory!(ms, Unit::Ms);
unit_factory!(hz, Unit::Hz);
unit_factory!(khz, Unit::Khz);
unit_factory!(dpi, Unit::Dpi);
unit_factory!(dpcm, Unit::Dpcm);
unit_factory!(dppx, Unit::Dppx);
unit_factory!(fr, Unit::Fr);
/// The factory registered under the name `percent` for the `%` unit (§4.I).
unit_factory!(percent, Unit::Percent);
/// `CSS.number(v)` (§4.I, §6).
unit_factory!(number, Unit::Number);

/// Returns the factory for every unit in the table (§4.I: "a factory per
/// unit in the table"), paired with the name it is installed under.
pub fn all_unit_factories() -> Vec<(&'static str, UnitFactory)> {
    vec![
        ("px", px), ("cm", cm), ("mm", mm), ("in", in_), ("pt", pt), ("pc", pc),
        ("em", em), ("rem", rem), ("vw", vw), ("vh", vh), ("vmin", vmin), ("vmax", vmax),
        ("ch", ch), ("ex", ex), ("q", q), ("vi", vi), ("vb", vb),
        ("deg", deg), ("rad", rad), ("grad", grad), ("turn", turn),
        ("s", s), ("ms", ms), ("hz", hz), ("khz", khz),
        ("dpi", dpi), ("dpcm", dpcm), ("dppx", dppx), ("fr", fr),
        ("percent", percent), ("number", number),
    ]
}

/// The embedder-provided installation surface (§4.I, §9 design note): a
/// struct holding the function-pointer slots a real `CSS` namespace would
/// expose, plus a way to tell whether a native implementation already
/// occupies them.
pub trait InstallTarget {
    /// `true` if the host already provides a native CSS Typed OM (detected,
    /// per §4.I, by the presence of a native numeric-value type *and* a
    /// native `number` factory) — `install` no-ops when this is `true`.
    fn has_native_implementation(&self) -> bool;

    /// Registers the factory for `unit_name` (one of the names yielded by
    /// [`all_unit_factories`]).
    fn register_unit_factory(&mut self, unit_name: &str, factory: UnitFactory);
}

/// Installs every unit factory plus `CSS.number` into `target`, unless the
/// host already has a native implementation (§4.I, §5: "defers installation
/// if a native implementation is already present"). Returns `true` if
/// installation ran, `false` if it was skipped.
pub fn install(target: &mut dyn InstallTarget) -> bool {
    if target.has_native_implementation() {
        return false;
    }
    for (name, factory) in all_unit_factories() {
        target.register_unit_factory(name, factory);
    }
    true
}

/// Backs `HTMLElement.prototype.attributeStyleMap` (§4.I, §9): memoizes one
/// [`StylePropertyMap`] per host element key so repeated accessor reads
/// return the same adapter instance instead of re-wrapping the host style
/// object every time. The spec's host uses a *weak* map so entries are
/// collected when the element is garbage-collected; a Rust host owns its
/// elements directly and so owns eviction too — callers that remove an
/// element should call [`AttributeStyleMapRegistry::forget`].
pub struct AttributeStyleMapRegistry<K: Eq + Hash, S: InlineStyle> {
    maps: HashMap<K, StylePropertyMap<S>>,
}

impl<K: Eq + Hash, S: InlineStyle> Default for AttributeStyleMapRegistry<K, S> {
    fn default() -> Self {
        AttributeStyleMapRegistry { maps: HashMap::new() }
    }
}

impl<K: Eq + Hash, S: InlineStyle> AttributeStyleMapRegistry<K, S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the memoized map for `key`, constructing one via `make_host`
    /// on first access.
    pub fn get_or_create(&mut self, key: K, make_host: impl FnOnce() -> S) -> &mut StylePropertyMap<S> {
        self.maps.entry(key).or_insert_with(|| StylePropertyMap::new(make_host()))
    }

    pub fn get(&self, key: &K) -> Option<&StylePropertyMap<S>> {
        self.maps.get(key)
    }

    /// Evicts `key`'s memoized map (the Rust stand-in for the host's weak-map
    /// entry disappearing once the element is collected).
    pub fn forget(&mut self, key: &K) {
        self.maps.remove(key);
    }

    pub fn len(&self) -> usize {
        self.maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }
}
