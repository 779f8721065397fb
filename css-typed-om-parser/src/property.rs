//! Property map adapter (§4.H): wraps a host element's inline-style interface
//! and converts between typed `StyleValue` trees and the textual CSS the host
//! actually persists. Parse failures are swallowed here and logged (§7,
//! §2.1), never surfaced to the caller — the map always hands back *some*
//! value, falling back to an `UnparsedValue` of the raw text.
//!
//! Grounded on the teacher's `CssDeclaration`/property-map-shaped accessors in
//! `azul-css-parser/src/css_parser.rs`, generalized to an explicit host trait
//! (`InlineStyle`) per §6 rather than assuming a concrete DOM binding.

use std::cell::RefCell;

use css_typed_om::error::{MissingOperand, StyleValueError};
use css_typed_om::value::{StyleValue, UnparsedValue};
use lru::LruCache;

use crate::entry::parse_all_with_max_depth;

/// Bounded kebab-case cache capacity (§4.H, §2.1): at most this many
/// recently-seen property-name translations are retained.
pub const DEFAULT_CACHE_CAPACITY: usize = 500;

/// Properties whose textual value is a top-level comma-separated list of
/// independently parsed segments (§4.H).
pub const COMMA_LIST_PROPERTIES: &[&str] = &[
    "transition",
    "animation",
    "box-shadow",
    "text-shadow",
    "background",
    "background-image",
    "font-family",
    "stroke-dasharray",
];

fn is_comma_list(property: &str) -> bool {
    COMMA_LIST_PROPERTIES.contains(&property)
}

/// The host element's inline-style interface (§6, "Host style interface
/// (consumed)"): a real DOM binding, a headless test double, or a native
/// GUI's style struct can all implement this.
pub trait InlineStyle {
    /// `""` when the property has no declared value.
    fn get_property_value(&self, kebab_name: &str) -> String;
    fn set_property(&mut self, kebab_name: &str, value: &str);
    fn remove_property(&mut self, kebab_name: &str);
    /// Number of longhand declarations currently stored.
    fn length(&self) -> usize;
    /// The kebab-case name of the declaration at `index`, or `None` past the end.
    fn property_name_at(&self, index: usize) -> Option<String>;
    /// Clears every stored declaration (`cssText = ""`).
    fn clear(&mut self);
}

/// Adapter over a host's inline style object (§4.H). Holds the host by value;
/// embedders that need shared ownership wrap `S` themselves (§5: this crate
/// makes no multi-threading claim, so the kebab-case cache is a plain
/// `RefCell`, not a `Mutex`).
pub struct StylePropertyMap<S: InlineStyle> {
    host: S,
    kebab_cache: RefCell<LruCache<String, String>>,
    max_depth: usize,
}

impl<S: InlineStyle> StylePropertyMap<S> {
    pub fn new(host: S) -> StylePropertyMap<S> {
        StylePropertyMap::with_cache_capacity(host, DEFAULT_CACHE_CAPACITY)
    }

    /// As [`StylePropertyMap::new`], with an explicit kebab-case LRU cache
    /// capacity (§2.1 configuration knob).
    pub fn with_cache_capacity(host: S, cache_capacity: usize) -> StylePropertyMap<S> {
        let capacity = std::num::NonZeroUsize::new(cache_capacity.max(1)).unwrap();
        StylePropertyMap { host, kebab_cache: RefCell::new(LruCache::new(capacity)), max_depth: crate::expr::DEFAULT_MAX_DEPTH }
    }

    pub fn host(&self) -> &S {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut S {
        &mut self.host
    }

    /// Kebab-cases `name` through the bounded LRU cache (§4.H).
    fn kebab(&self, name: &str) -> String {
        let mut cache = self.kebab_cache.borrow_mut();
        if let Some(hit) = cache.get(name) {
            return hit.clone();
        }
        let kebab = to_kebab_case(name);
        cache.put(name.to_string(), kebab.clone());
        kebab
    }

    /// `get(name)` (§4.H): `None` if the host has no value; otherwise the
    /// parsed tree, with any parse failure downgraded to `UnparsedValue` and
    /// logged as a diagnostic (§7).
    pub fn get(&self, name: &str) -> Option<StyleValue> {
        let property = self.kebab(name);
        let text = self.host.get_property_value(&property);
        if text.is_empty() {
            return None;
        }
        Some(self.parse_or_log(&property, &text))
    }

    /// `getAll(name)` (§4.H): splits on top-level commas for the fixed
    /// comma-list properties, otherwise returns a single-element list from
    /// [`StylePropertyMap::get`].
    pub fn get_all(&self, name: &str) -> Vec<StyleValue> {
        let property = self.kebab(name);
        let text = self.host.get_property_value(&property);
        if text.is_empty() {
            return Vec::new();
        }
        if is_comma_list(&property) {
            match parse_all_with_max_depth(&property, &text, self.max_depth) {
                Ok(values) => values,
                Err(err) => {
                    log_downgrade(&property, &err);
                    vec![StyleValue::Unparsed(UnparsedValue::from_text(text))]
                }
            }
        } else {
            vec![self.parse_or_log(&property, &text)]
        }
    }

    fn parse_or_log(&self, property: &str, text: &str) -> StyleValue {
        match crate::entry::parse_with_max_depth(property, text, self.max_depth) {
            Ok(value) => value,
            Err(err) => {
                log_downgrade(property, &err);
                StyleValue::Unparsed(UnparsedValue::from_text(text))
            }
        }
    }

    /// `set(name, ...values)` (§4.H): serializes each value via `Display` and
    /// joins with a single space before writing to the host. Requires at
    /// least one value (`MissingOperand`).
    pub fn set(&mut self, name: &str, values: &[StyleValue]) -> Result<(), StyleValueError> {
        if values.is_empty() {
            return Err(MissingOperand.into());
        }
        let property = self.kebab(name);
        let text = join_values(values, " ");
        self.host.set_property(&property, &text);
        Ok(())
    }

    /// `append(name, ...values)` (§4.H): joins the new text with the
    /// property's current value using `, ` for comma-list properties and a
    /// single space otherwise; a currently-empty property behaves like `set`.
    pub fn append(&mut self, name: &str, values: &[StyleValue]) -> Result<(), StyleValueError> {
        if values.is_empty() {
            return Err(MissingOperand.into());
        }
        let property = self.kebab(name);
        let new_text = join_values(values, " ");
        let existing = self.host.get_property_value(&property);
        let combined = if existing.is_empty() {
            new_text
        } else {
            let separator = if is_comma_list(&property) { ", " } else { " " };
            format!("{}{}{}", existing, separator, new_text)
        };
        self.host.set_property(&property, &combined);
        Ok(())
    }

    pub fn delete(&mut self, name: &str) {
        let property = self.kebab(name);
        self.host.remove_property(&property);
    }

    pub fn clear(&mut self) {
        self.host.clear();
    }

    pub fn has(&self, name: &str) -> bool {
        let property = self.kebab(name);
        !self.host.get_property_value(&property).is_empty()
    }

    pub fn size(&self) -> usize {
        self.host.length()
    }

    /// `entries()` (§4.H, §9): parses each of the host's longhand
    /// declarations on demand, in host-iteration order.
    pub fn entries(&self) -> Entries<'_, S> {
        Entries { map: self, index: 0 }
    }

    pub fn keys(&self) -> Keys<'_, S> {
        Keys { map: self, index: 0 }
    }

    pub fn values(&self) -> Values<'_, S> {
        Values { map: self, index: 0 }
    }

    /// `forEach(f)` (§4.H): invokes `f(name, value)` for every entry, in host
    /// order.
    pub fn for_each<F: FnMut(&str, StyleValue)>(&self, mut f: F) {
        for (name, value) in self.entries() {
            f(&name, value);
        }
    }
}

impl<'a, S: InlineStyle> IntoIterator for &'a StylePropertyMap<S> {
    type Item = (String, StyleValue);
    type IntoIter = Entries<'a, S>;

    fn into_iter(self) -> Entries<'a, S> {
        self.entries()
    }
}

/// Default iterator form (§9: "default iterator equivalent to entries").
pub struct Entries<'a, S: InlineStyle> {
    map: &'a StylePropertyMap<S>,
    index: usize,
}

impl<'a, S: InlineStyle> Iterator for Entries<'a, S> {
    type Item = (String, StyleValue);

    fn next(&mut self) -> Option<Self::Item> {
        let name = self.map.host.property_name_at(self.index)?;
        self.index += 1;
        let text = self.map.host.get_property_value(&name);
        let value = self.map.parse_or_log(&name, &text);
        Some((name, value))
    }
}

pub struct Keys<'a, S: InlineStyle> {
    map: &'a StylePropertyMap<S>,
    index: usize,
}

impl<'a, S: InlineStyle> Iterator for Keys<'a, S> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        let name = self.map.host.property_name_at(self.index)?;
        self.index += 1;
        Some(name)
    }
}

pub struct Values<'a, S: InlineStyle> {
    map: &'a StylePropertyMap<S>,
    index: usize,
}

impl<'a, S: InlineStyle> Iterator for Values<'a, S> {
    type Item = StyleValue;

    fn next(&mut self) -> Option<Self::Item> {
        let name = self.map.host.property_name_at(self.index)?;
        self.index += 1;
        let text = self.map.host.get_property_value(&name);
        Some(self.map.parse_or_log(&name, &text))
    }
}

fn join_values(values: &[StyleValue], separator: &str) -> String {
    values.iter().map(StyleValue::to_string).collect::<Vec<_>>().join(separator)
}

#[cfg(feature = "logging")]
fn log_downgrade(property: &str, err: &StyleValueError) {
    log::warn!("css-typed-om-parser: {}: downgrading to UnparsedValue ({})", property, err);
}

#[cfg(not(feature = "logging"))]
fn log_downgrade(_property: &str, _err: &StyleValueError) {}

/// Lowercases `name` and rewrites camelCase word boundaries and `_` runs to
/// `-`, e.g. `"backgroundColor"` -> `"background-color"`. A name that is
/// already kebab-case (the overwhelming majority of real CSSOM callers) is
/// returned unchanged apart from lowercasing.
fn to_kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_lower_or_digit = false;
    for c in name.chars() {
        if c == '_' {
            if !out.ends_with('-') && !out.is_empty() {
                out.push('-');
            }
            prev_lower_or_digit = false;
            continue;
        }
        if c.is_ascii_uppercase() {
            if prev_lower_or_digit {
                out.push('-');
            }
            out.push(c.to_ascii_lowercase());
            prev_lower_or_digit = false;
        } else {
            out.push(c);
            prev_lower_or_digit = c.is_ascii_alphanumeric();
        }
    }
    out
}
