//! Transform function list values (§4.F, §6): the typed counterpart of the
//! `transform` property's value grammar (`translate()`, `rotate()`, `scale()`,
//! `skew()`, `matrix()`, and their 3D variants).
//!
//! Folding a [`TransformValue`] down to a 4x4 matrix is delegated to the host
//! through the [`HostMatrix`] trait, the way the teacher's transform code
//! stays agnostic of any particular matrix/layout representation and leaves
//! concrete application to its caller.

use std::fmt;

use crate::error::TypeMismatch;
use crate::value::{inner_repr, StyleValue};

/// A length-or-percentage used as a translation component.
#[derive(Debug, Clone, PartialEq)]
pub struct LengthPercentage(pub StyleValue);

impl fmt::Display for LengthPercentage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", inner_repr(&self.0))
    }
}

/// An angle used as a rotation/skew component.
#[derive(Debug, Clone, PartialEq)]
pub struct Angle(pub StyleValue);

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", inner_repr(&self.0))
    }
}

/// One function call in a `transform` value's function list.
#[derive(Debug, Clone, PartialEq)]
pub enum TransformComponent {
    Translate { x: LengthPercentage, y: LengthPercentage, z: Option<LengthPercentage> },
    Rotate { x: f64, y: f64, z: f64, angle: Angle },
    Rotate3dSimple(Angle),
    Scale { x: f64, y: f64, z: f64 },
    Skew { x: Angle, y: Angle },
    SkewX(Angle),
    SkewY(Angle),
    Perspective(LengthPercentage),
    /// `matrix()` / `matrix3d()`: always normalized to the full 16-entry 4x4
    /// form internally, `is_2d` remembers which surface form to re-serialize as.
    Matrix { entries: [f64; 16], is_2d: bool },
}

impl TransformComponent {
    pub fn is_2d(&self) -> bool {
        match self {
            TransformComponent::Translate { z, .. } => z.is_none(),
            TransformComponent::Rotate { x, y, .. } => *x == 0.0 && *y == 0.0,
            TransformComponent::Rotate3dSimple(_) => true,
            TransformComponent::Scale { z, .. } => *z == 1.0,
            TransformComponent::Skew { .. } | TransformComponent::SkewX(_) | TransformComponent::SkewY(_) => true,
            TransformComponent::Perspective(_) => false,
            TransformComponent::Matrix { is_2d, .. } => *is_2d,
        }
    }
}

impl fmt::Display for TransformComponent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TransformComponent::Translate { x, y, z: None } => write!(f, "translate({}, {})", x, y),
            TransformComponent::Translate { x, y, z: Some(z) } => {
                write!(f, "translate3d({}, {}, {})", x, y, z)
            }
            TransformComponent::Rotate { x, y, z, angle } if *x == 0.0 && *y == 0.0 && *z == 1.0 => {
                write!(f, "rotate({})", angle)
            }
            TransformComponent::Rotate { x, y, z, angle } => {
                write!(f, "rotate3d({}, {}, {}, {})", x, y, z, angle)
            }
            TransformComponent::Rotate3dSimple(angle) => write!(f, "rotate({})", angle),
            TransformComponent::Scale { x, y, z } if *z == 1.0 => write!(f, "scale({}, {})", x, y),
            TransformComponent::Scale { x, y, z } => write!(f, "scale3d({}, {}, {})", x, y, z),
            TransformComponent::Skew { x, y } => write!(f, "skew({}, {})", x, y),
            TransformComponent::SkewX(x) => write!(f, "skewX({})", x),
            TransformComponent::SkewY(y) => write!(f, "skewY({})", y),
            TransformComponent::Perspective(len) => write!(f, "perspective({})", len),
            TransformComponent::Matrix { entries, is_2d: true } => {
                write!(f, "matrix({}, {}, {}, {}, {}, {})", entries[0], entries[1], entries[4], entries[5], entries[12], entries[13])
            }
            TransformComponent::Matrix { entries, is_2d: false } => {
                let parts: Vec<String> = entries.iter().map(|v| v.to_string()).collect();
                write!(f, "matrix3d({})", parts.join(", "))
            }
        }
    }
}

/// An ordered list of transform functions, the typed counterpart of the
/// `transform` property's value (§4.F).
#[derive(Debug, Clone, PartialEq)]
pub struct TransformValue {
    pub components: Vec<TransformComponent>,
}

impl TransformValue {
    pub fn new(components: Vec<TransformComponent>) -> TransformValue {
        TransformValue { components }
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// `true` only if every component in the list is itself 2D (§4.F).
    pub fn is_2d(&self) -> bool {
        self.components.iter().all(TransformComponent::is_2d)
    }

    /// Folds this transform list into a concrete matrix via the host's
    /// representation (§4.F): "seed with identity; for each component
    /// multiply by `HostMatrix(component.toString())`". Each component is
    /// serialized to its own transform-function text and handed to the host
    /// matrix constructor verbatim; this crate never computes the matrix
    /// itself (§1, §6: matrix computation is an external collaborator).
    pub fn to_matrix<M: HostMatrix>(&self) -> Result<M, TypeMismatch> {
        let mut acc = M::identity();
        for component in &self.components {
            let text = component.to_string();
            let next = M::from_transform_str(&text)
                .ok_or_else(|| TypeMismatch::HostMatrixConstructionFailed { component: text })?;
            acc = acc.multiply(&next);
        }
        Ok(acc)
    }
}

impl fmt::Display for TransformValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let parts: Vec<String> = self.components.iter().map(TransformComponent::to_string).collect();
        write!(f, "{}", parts.join(" "))
    }
}

/// `TransformValue` is "array-like and iterable" (§3): indexing and
/// iteration both go straight to the underlying component list.
impl std::ops::Index<usize> for TransformValue {
    type Output = TransformComponent;

    fn index(&self, index: usize) -> &TransformComponent {
        &self.components[index]
    }
}

impl IntoIterator for TransformValue {
    type Item = TransformComponent;
    type IntoIter = std::vec::IntoIter<TransformComponent>;

    fn into_iter(self) -> Self::IntoIter {
        self.components.into_iter()
    }
}

impl<'a> IntoIterator for &'a TransformValue {
    type Item = &'a TransformComponent;
    type IntoIter = std::slice::Iter<'a, TransformComponent>;

    fn into_iter(self) -> Self::IntoIter {
        self.components.iter()
    }
}

/// A host-supplied 4x4 matrix type (§4.F, §6: "a constructor taking a CSS
/// transform string and producing a matrix with a `multiply(other) -> matrix`
/// method"). Keeps this crate from depending on any particular
/// linear-algebra library, or from computing the matrix itself — that
/// computation is the host's (mirrors how the simplifier stays agnostic of
/// any particular layout engine).
pub trait HostMatrix: Sized {
    /// The identity matrix, the seed `to_matrix` folds every component into.
    fn identity() -> Self;
    /// Parses a single transform-function string (e.g. `"translate(10px, 50%)"`)
    /// into a matrix; `None` if the host cannot construct one (§6: "absence
    /// causes `toMatrix()` to fail").
    fn from_transform_str(text: &str) -> Option<Self>;
    fn multiply(&self, other: &Self) -> Self;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::Unit;
    use crate::value::UnitValue;

    #[derive(Debug, PartialEq)]
    struct TestMatrix(Vec<String>);

    impl HostMatrix for TestMatrix {
        fn identity() -> Self {
            TestMatrix(vec!["identity".to_string()])
        }
        fn from_transform_str(text: &str) -> Option<Self> {
            Some(TestMatrix(vec![text.to_string()]))
        }
        fn multiply(&self, other: &Self) -> Self {
            let mut joined = self.0.clone();
            joined.extend(other.0.clone());
            TestMatrix(joined)
        }
    }

    fn px(v: f64) -> LengthPercentage {
        LengthPercentage(StyleValue::Unit(UnitValue::new(v, Unit::Px).unwrap()))
    }

    #[test]
    fn translate_serializes_without_z_when_2d() {
        let t = TransformComponent::Translate { x: px(10.0), y: px(20.0), z: None };
        assert_eq!(t.to_string(), "translate(10px, 20px)");
        assert!(t.is_2d());
    }

    #[test]
    fn translate3d_serializes_with_z() {
        let t = TransformComponent::Translate { x: px(1.0), y: px(2.0), z: Some(px(3.0)) };
        assert_eq!(t.to_string(), "translate3d(1px, 2px, 3px)");
        assert!(!t.is_2d());
    }

    #[test]
    fn transform_value_is_2d_requires_every_component_2d() {
        let v = TransformValue::new(vec![
            TransformComponent::Translate { x: px(1.0), y: px(2.0), z: None },
            TransformComponent::Translate { x: px(1.0), y: px(2.0), z: Some(px(3.0)) },
        ]);
        assert!(!v.is_2d());
    }

    #[test]
    fn to_matrix_folds_components_in_order() {
        let v = TransformValue::new(vec![
            TransformComponent::Translate { x: px(1.0), y: px(2.0), z: None },
            TransformComponent::Scale { x: 2.0, y: 2.0, z: 1.0 },
        ]);
        let m: TestMatrix = v.to_matrix().unwrap();
        assert_eq!(m.0, vec!["identity", "translate(1px, 2px)", "scale(2, 2)"]);
    }
}
