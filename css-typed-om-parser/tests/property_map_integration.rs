//! Integration tests for the §4.H property-map adapter against a hand-rolled
//! host style double, exercising the full get/getAll/set/append/iterate
//! surface the way a real CSSOM caller would.

use std::collections::BTreeMap;

use css_typed_om::units::Unit;
use css_typed_om::value::{KeywordValue, StyleValue, UnitValue};
use css_typed_om_parser::{InlineStyle, StylePropertyMap};

/// An in-memory stand-in for a host `CSSStyleDeclaration`, preserving
/// declaration order the way a real inline style object does.
#[derive(Default)]
struct TestStyle {
    order: Vec<String>,
    values: BTreeMap<String, String>,
}

impl InlineStyle for TestStyle {
    fn get_property_value(&self, kebab_name: &str) -> String {
        self.values.get(kebab_name).cloned().unwrap_or_default()
    }

    fn set_property(&mut self, kebab_name: &str, value: &str) {
        if !self.values.contains_key(kebab_name) {
            self.order.push(kebab_name.to_string());
        }
        self.values.insert(kebab_name.to_string(), value.to_string());
    }

    fn remove_property(&mut self, kebab_name: &str) {
        self.values.remove(kebab_name);
        self.order.retain(|k| k != kebab_name);
    }

    fn length(&self) -> usize {
        self.order.len()
    }

    fn property_name_at(&self, index: usize) -> Option<String> {
        self.order.get(index).cloned()
    }

    fn clear(&mut self) {
        self.values.clear();
        self.order.clear();
    }
}

fn px(v: f64) -> StyleValue {
    StyleValue::Unit(UnitValue::new(v, Unit::Px).unwrap())
}

#[test]
fn set_get_and_delete_round_trip_a_simple_length() {
    let mut map = StylePropertyMap::new(TestStyle::default());
    map.set("width", &[px(200.0)]).unwrap();
    assert_eq!(map.get("width"), Some(px(200.0)));
    assert!(map.has("width"));

    map.delete("width");
    assert_eq!(map.get("width"), None);
    assert!(!map.has("width"));
}

#[test]
fn camel_case_callers_are_normalized_to_the_same_kebab_property() {
    let mut map = StylePropertyMap::new(TestStyle::default());
    map.set("backgroundColor", &[StyleValue::Keyword(KeywordValue::new("red"))]).unwrap();
    assert_eq!(map.get("background-color"), Some(StyleValue::Keyword(KeywordValue::new("red"))));
}

#[test]
fn get_all_on_a_comma_list_property_parses_every_segment() {
    let mut map = StylePropertyMap::new(TestStyle::default());
    map.host_mut().set_property("font-family", "Georgia, \"Times New Roman\", serif");
    let all = map.get_all("font-family");
    assert_eq!(all.len(), 3);
    assert_eq!(all[0], StyleValue::Keyword(KeywordValue::new("georgia")));
}

#[test]
fn append_to_a_fresh_comma_list_property_behaves_like_set() {
    let mut map = StylePropertyMap::new(TestStyle::default());
    map.append("font-family", &[StyleValue::Keyword(KeywordValue::new("serif"))]).unwrap();
    assert_eq!(map.host().get_property_value("font-family"), "serif");
}

#[test]
fn iteration_forms_agree_on_count_and_order() {
    let mut map = StylePropertyMap::new(TestStyle::default());
    map.set("width", &[px(10.0)]).unwrap();
    map.set("height", &[px(20.0)]).unwrap();
    map.set("opacity", &[StyleValue::Unit(UnitValue::new(0.5, Unit::Number).unwrap())]).unwrap();

    assert_eq!(map.size(), 3);
    assert_eq!(map.keys().count(), 3);
    assert_eq!(map.values().count(), 3);

    let mut visited = Vec::new();
    map.for_each(|name, _value| visited.push(name.to_string()));
    assert_eq!(visited, vec!["width".to_string(), "height".to_string(), "opacity".to_string()]);

    let via_into_iter: Vec<(String, StyleValue)> = (&map).into_iter().collect();
    assert_eq!(via_into_iter.len(), 3);
}

#[test]
fn a_malformed_strict_property_value_downgrades_rather_than_panicking() {
    let mut map = StylePropertyMap::new(TestStyle::default());
    map.host_mut().set_property("width", "not(a(valid");
    match map.get("width") {
        Some(StyleValue::Unparsed(u)) => assert_eq!(u.to_string(), "not(a(valid"),
        other => panic!("expected a downgraded UnparsedValue, got {:?}", other),
    }
}

#[test]
fn clear_empties_every_stored_declaration() {
    let mut map = StylePropertyMap::new(TestStyle::default());
    map.set("width", &[px(1.0)]).unwrap();
    map.set("height", &[px(2.0)]).unwrap();
    map.clear();
    assert_eq!(map.size(), 0);
    assert_eq!(map.get("width"), None);
}
