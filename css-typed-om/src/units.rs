//! The fixed unit table and the dimension-type vector algebra built on top of it.
//!
//! Every numeric leaf in the value tree (`UnitValue`) carries one of the
//! [`Unit`] variants below. [`DimensionType`] is the vector-over-base-dimensions
//! representation used by the simplifier (`crate::math`) to decide whether two
//! numeric values may be added, and by `StyleValue::type_of` to report a
//! value's dimension.

use std::fmt;
use std::str::FromStr;

use strum_macros::{Display as StrumDisplay, EnumString};

/// One of the seven base physical dimensions a CSS numeric value can carry,
/// plus the dimensionless `Number` category.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum UnitCategory {
    Number,
    Length,
    Angle,
    Time,
    Frequency,
    Resolution,
    Flex,
    Percent,
}

/// Canonical unit token. Lexing lowercases and normalizes `%` to `Percent`
/// and the empty unit to `Number` before a value ever reaches this type.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, EnumString, StrumDisplay)]
#[strum(ascii_case_insensitive)]
pub enum Unit {
    #[strum(serialize = "px")]
    Px,
    #[strum(serialize = "cm")]
    Cm,
    #[strum(serialize = "mm")]
    Mm,
    #[strum(serialize = "in")]
    In,
    #[strum(serialize = "pt")]
    Pt,
    #[strum(serialize = "pc")]
    Pc,
    #[strum(serialize = "em")]
    Em,
    #[strum(serialize = "rem")]
    Rem,
    #[strum(serialize = "vw")]
    Vw,
    #[strum(serialize = "vh")]
    Vh,
    #[strum(serialize = "vmin")]
    Vmin,
    #[strum(serialize = "vmax")]
    Vmax,
    #[strum(serialize = "ch")]
    Ch,
    #[strum(serialize = "ex")]
    Ex,
    #[strum(serialize = "q")]
    Q,
    #[strum(serialize = "vi")]
    Vi,
    #[strum(serialize = "vb")]
    Vb,

    #[strum(serialize = "deg")]
    Deg,
    #[strum(serialize = "rad")]
    Rad,
    #[strum(serialize = "grad")]
    Grad,
    #[strum(serialize = "turn")]
    Turn,

    #[strum(serialize = "s")]
    S,
    #[strum(serialize = "ms")]
    Ms,

    #[strum(serialize = "hz")]
    Hz,
    #[strum(serialize = "khz")]
    Khz,

    #[strum(serialize = "dpi")]
    Dpi,
    #[strum(serialize = "dpcm")]
    Dpcm,
    #[strum(serialize = "dppx")]
    Dppx,

    #[strum(serialize = "fr")]
    Fr,

    /// Not reachable through `FromStr` (`%` is not an identifier); constructed
    /// directly by the lexer when it sees a trailing `%`.
    #[strum(disabled)]
    Percent,
    /// Not reachable through `FromStr` either; the unit of a bare `NUM` token.
    #[strum(disabled)]
    Number,
}

impl Unit {
    /// Parses a lowercased identifier into a unit, per the fixed table in §3.
    /// Callers are expected to have already lowercased `ident` (the lexer does this).
    pub fn from_ident(ident: &str) -> Option<Unit> {
        Unit::from_str(ident).ok()
    }

    pub fn category(self) -> UnitCategory {
        use Unit::*;
        match self {
            Px | Cm | Mm | In | Pt | Pc | Em | Rem | Vw | Vh | Vmin | Vmax | Ch | Ex | Q | Vi
            | Vb => UnitCategory::Length,
            Deg | Rad | Grad | Turn => UnitCategory::Angle,
            S | Ms => UnitCategory::Time,
            Hz | Khz => UnitCategory::Frequency,
            Dpi | Dpcm | Dppx => UnitCategory::Resolution,
            Fr => UnitCategory::Flex,
            Percent => UnitCategory::Percent,
            Number => UnitCategory::Number,
        }
    }

    /// The dimension-type vector for this unit (§3): all-zero for `Number`,
    /// a single `1` in this unit's category slot otherwise.
    pub fn type_vector(self) -> DimensionType {
        DimensionType::of_category(self.category())
    }
}

impl fmt::Display for DimensionType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "DimensionType {{ length: {}, angle: {}, time: {}, frequency: {}, resolution: {}, flex: {}, percent: {} }}",
            self.length, self.angle, self.time, self.frequency, self.resolution, self.flex, self.percent
        )
    }
}

/// Integer-valued vector over the seven base dimensions (§3). All-zero means
/// "dimensionless number".
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct DimensionType {
    pub length: i32,
    pub angle: i32,
    pub time: i32,
    pub frequency: i32,
    pub resolution: i32,
    pub flex: i32,
    pub percent: i32,
}

impl DimensionType {
    pub const ZERO: DimensionType = DimensionType {
        length: 0,
        angle: 0,
        time: 0,
        frequency: 0,
        resolution: 0,
        flex: 0,
        percent: 0,
    };

    pub fn of_category(category: UnitCategory) -> DimensionType {
        let mut v = DimensionType::ZERO;
        match category {
            UnitCategory::Number => {}
            UnitCategory::Length => v.length = 1,
            UnitCategory::Angle => v.angle = 1,
            UnitCategory::Time => v.time = 1,
            UnitCategory::Frequency => v.frequency = 1,
            UnitCategory::Resolution => v.resolution = 1,
            UnitCategory::Flex => v.flex = 1,
            UnitCategory::Percent => v.percent = 1,
        }
        v
    }

    pub fn is_zero(&self) -> bool {
        *self == DimensionType::ZERO
    }

    pub fn negate(&self) -> DimensionType {
        DimensionType {
            length: -self.length,
            angle: -self.angle,
            time: -self.time,
            frequency: -self.frequency,
            resolution: -self.resolution,
            flex: -self.flex,
            percent: -self.percent,
        }
    }

    pub fn add(&self, other: &DimensionType) -> DimensionType {
        DimensionType {
            length: self.length + other.length,
            angle: self.angle + other.angle,
            time: self.time + other.time,
            frequency: self.frequency + other.frequency,
            resolution: self.resolution + other.resolution,
            flex: self.flex + other.flex,
            percent: self.percent + other.percent,
        }
    }

    /// Additive compatibility (§4.A): equal, or differing only in the
    /// `length`/`percent` slots (each 0 or 1 on both sides). Pure numeric
    /// (all-zero) is incompatible with any non-zero vector even though the
    /// length/percent clause below would otherwise tolerate it.
    pub fn additively_compatible_with(&self, other: &DimensionType) -> bool {
        if self == other {
            return true;
        }
        if self.is_zero() != other.is_zero() {
            return false;
        }
        let same_rest = self.angle == other.angle
            && self.time == other.time
            && self.frequency == other.frequency
            && self.resolution == other.resolution
            && self.flex == other.flex;
        if !same_rest {
            return false;
        }
        let lp_ok = |v: i32| v == 0 || v == 1;
        lp_ok(self.length)
            && lp_ok(other.length)
            && lp_ok(self.percent)
            && lp_ok(other.percent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_units_case_insensitively() {
        assert_eq!(Unit::from_ident("px"), Some(Unit::Px));
        assert_eq!(Unit::from_ident("PX"), Some(Unit::Px));
        assert_eq!(Unit::from_ident("Deg"), Some(Unit::Deg));
        assert_eq!(Unit::from_ident("dPpX"), Some(Unit::Dppx));
    }

    #[test]
    fn rejects_unknown_units() {
        assert_eq!(Unit::from_ident("parsecs"), None);
    }

    #[test]
    fn number_is_the_zero_vector() {
        assert!(Unit::Number.type_vector().is_zero());
    }

    #[test]
    fn length_and_percent_are_additively_compatible() {
        let length = Unit::Px.type_vector();
        let percent = Unit::Percent.type_vector();
        assert!(length.additively_compatible_with(&percent));
    }

    #[test]
    fn number_is_incompatible_with_any_dimension() {
        let number = Unit::Number.type_vector();
        let length = Unit::Px.type_vector();
        assert!(!number.additively_compatible_with(&length));
    }

    #[test]
    fn distinct_non_length_dimensions_are_incompatible() {
        let angle = Unit::Deg.type_vector();
        let time = Unit::S.type_vector();
        assert!(!angle.additively_compatible_with(&time));
    }
}
