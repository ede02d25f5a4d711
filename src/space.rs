use crate::{Point2D, Point3D, Scalar};

use core::fmt::Debug;

/// The small amount of point and vector algebra the subdivision engine
/// needs, abstracted over the dimensionality of the coordinate space.
///
/// Implemented for `euclid`'s 2D and 3D points. The only operation whose
/// shape genuinely differs between the two is [`deviation`]: the cross
/// product is a scalar in 2D and a vector in 3D, but in both cases its
/// magnitude against a unit chord measures the perpendicular distance
/// from the chord line.
///
/// [`deviation`]: Coordinates::deviation
pub trait Coordinates: Copy + PartialEq + Debug {
    type Scalar: Scalar;
    type Vector: Copy;

    fn origin() -> Self;

    /// The exact arithmetic mean of two points, component-wise.
    fn midpoint(self, other: Self) -> Self;

    /// The vector from `self` to `other`.
    fn vector_to(self, other: Self) -> Self::Vector;

    fn distance_to(self, other: Self) -> Self::Scalar;

    fn dot(a: Self::Vector, b: Self::Vector) -> Self::Scalar;

    fn length(v: Self::Vector) -> Self::Scalar;

    fn normalize(v: Self::Vector) -> Self::Vector;

    /// Perpendicular distance of `v`'s tip from the line spanned by
    /// `unit_chord`, assuming `unit_chord` has length one.
    fn deviation(unit_chord: Self::Vector, v: Self::Vector) -> Self::Scalar;
}

impl<S: Scalar> Coordinates for Point2D<S> {
    type Scalar = S;
    type Vector = crate::Vector2D<S>;

    #[inline]
    fn origin() -> Self {
        Point2D::origin()
    }

    #[inline]
    fn midpoint(self, other: Self) -> Self {
        Point2D::new((self.x + other.x) * S::HALF, (self.y + other.y) * S::HALF)
    }

    #[inline]
    fn vector_to(self, other: Self) -> Self::Vector {
        other - self
    }

    #[inline]
    fn distance_to(self, other: Self) -> S {
        (other - self).length()
    }

    #[inline]
    fn dot(a: Self::Vector, b: Self::Vector) -> S {
        a.dot(b)
    }

    #[inline]
    fn length(v: Self::Vector) -> S {
        v.length()
    }

    #[inline]
    fn normalize(v: Self::Vector) -> Self::Vector {
        v.normalize()
    }

    #[inline]
    fn deviation(unit_chord: Self::Vector, v: Self::Vector) -> S {
        unit_chord.cross(v).abs()
    }
}

impl<S: Scalar> Coordinates for Point3D<S> {
    type Scalar = S;
    type Vector = crate::Vector3D<S>;

    #[inline]
    fn origin() -> Self {
        Point3D::origin()
    }

    #[inline]
    fn midpoint(self, other: Self) -> Self {
        Point3D::new(
            (self.x + other.x) * S::HALF,
            (self.y + other.y) * S::HALF,
            (self.z + other.z) * S::HALF,
        )
    }

    #[inline]
    fn vector_to(self, other: Self) -> Self::Vector {
        other - self
    }

    #[inline]
    fn distance_to(self, other: Self) -> S {
        (other - self).length()
    }

    #[inline]
    fn dot(a: Self::Vector, b: Self::Vector) -> S {
        a.dot(b)
    }

    #[inline]
    fn length(v: Self::Vector) -> S {
        v.length()
    }

    #[inline]
    fn normalize(v: Self::Vector) -> Self::Vector {
        v.normalize()
    }

    #[inline]
    fn deviation(unit_chord: Self::Vector, v: Self::Vector) -> S {
        unit_chord.cross(v).length()
    }
}
