#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::many_single_char_names)]

//! Adaptive flattening and subdivision iterators for 2D and 3D bézier paths.
//!
//! # Overview
//!
//! This crate refines paths made of line segments and quadratic or cubic
//! bézier curves by splitting curve segments in half, recursively, until
//! every piece satisfies a termination criterion:
//!
//! - [`Flattened`] splits until each piece deviates from its chord by no
//!   more than a *flatness* threshold,
//! - [`Subdivided`] splits while a caller-provided condition over the
//!   control points says to keep going.
//!
//! Both operate lazily on any `Iterator<Item = PathEvent<P>>` and produce
//! the same kind of iterator, so they can be chained with other path
//! adapters without allocating intermediate paths. Unlike a traditional
//! flattener, the segments they produce keep their type: a cubic segment
//! is refined into smaller cubic segments, not degraded to line segments.
//! This matters when the output is fed to a transform that is not affine,
//! where a chord is a poor stand-in for the curve it approximates.
//!
//! The flatness threshold is the maximum allowed distance between a curve
//! and the straight line joining its endpoints. The smaller the threshold,
//! the more segments are generated. Subdivision is bounded by a recursion
//! limit (10 by default) so that pathological inputs cannot produce an
//! unbounded number of segments; each increment of the limit can double
//! the worst-case segment count.
//!
//! # Example
//!
//! ```
//! use path_flattening::iterator::PathIterator;
//! use path_flattening::path::Path;
//! use path_flattening::{point2, PathEvent};
//!
//! let mut builder = Path::builder();
//! builder.move_to(point2(0.0f64, 0.0));
//! builder.cubic_bezier_to(point2(3.0, 5.0), point2(7.0, 5.0), point2(10.0, 0.0));
//! builder.close();
//! let path = builder.build();
//!
//! for event in path.iter().flattened(0.1) {
//!     match event {
//!         PathEvent::MoveTo(to) => println!("move to {:?}", to),
//!         PathEvent::CubicTo(_ctrl1, _ctrl2, to) => {
//!             println!("small cubic piece ending at {:?}", to)
//!         }
//!         PathEvent::LineTo(to) => println!("line to {:?}", to),
//!         _ => unreachable!(),
//!     }
//! }
//! ```

// Reexport dependencies.
pub use arrayvec;
pub use euclid;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

mod events;
pub mod flatten;
pub mod iterator;
pub mod path;
mod space;

#[doc(inline)]
pub use crate::events::PathEvent;
#[doc(inline)]
pub use crate::flatten::{Flattened, InvalidFlatness, Subdivided, DEFAULT_RECURSION_LIMIT};
#[doc(inline)]
pub use crate::iterator::{FromSegment, Transformed};
#[doc(inline)]
pub use crate::path::{Path, Path2D, Path3D};
#[doc(inline)]
pub use crate::space::Coordinates;

pub use crate::scalar::Scalar;

mod scalar {
    pub(crate) use euclid::Trig;
    pub(crate) use num_traits::{Float, NumCast};

    use core::fmt::{Debug, Display};
    use core::ops::{AddAssign, DivAssign, MulAssign, SubAssign};

    pub trait Scalar:
        Float
        + NumCast
        + Sized
        + Display
        + Debug
        + Trig
        + AddAssign
        + SubAssign
        + MulAssign
        + DivAssign
    {
        const HALF: Self;
        const ZERO: Self;
        const ONE: Self;
        const TWO: Self;

        const EPSILON: Self;

        fn value(v: f32) -> Self;
    }

    impl Scalar for f32 {
        const HALF: Self = 0.5;
        const ZERO: Self = 0.0;
        const ONE: Self = 1.0;
        const TWO: Self = 2.0;

        const EPSILON: Self = 1e-4;

        #[inline]
        fn value(v: f32) -> Self {
            v
        }
    }

    impl Scalar for f64 {
        const HALF: Self = 0.5;
        const ZERO: Self = 0.0;
        const ONE: Self = 1.0;
        const TWO: Self = 2.0;

        const EPSILON: Self = 1e-8;

        #[inline]
        fn value(v: f32) -> Self {
            v as f64
        }
    }
}

/// Alias for `euclid::default::Point2D`.
pub use euclid::default::Point2D;

/// Alias for `euclid::default::Vector2D`.
pub use euclid::default::Vector2D;

/// Alias for `euclid::default::Point3D`.
pub use euclid::default::Point3D;

/// Alias for `euclid::default::Vector3D`.
pub use euclid::default::Vector3D;

/// Alias for `euclid::default::Transform2D`
pub type Transform2D<S> = euclid::default::Transform2D<S>;

/// Alias for `euclid::default::Transform3D`
pub type Transform3D<S> = euclid::default::Transform3D<S>;

/// Alias for `euclid::default::Rotation2D`
pub type Rotation2D<S> = euclid::default::Rotation2D<S>;

/// Alias for `euclid::default::Translation2D`
pub type Translation2D<S> = euclid::Translation2D<S, euclid::UnknownUnit, euclid::UnknownUnit>;

/// Alias for `euclid::default::Translation3D`
pub type Translation3D<S> = euclid::Translation3D<S, euclid::UnknownUnit, euclid::UnknownUnit>;

/// Alias for `euclid::default::Scale`
pub use euclid::default::Scale;

/// Shorthand for `Point2D::new(x, y)`.
#[inline]
pub fn point2<S>(x: S, y: S) -> Point2D<S> {
    Point2D::new(x, y)
}

/// Shorthand for `Point3D::new(x, y, z)`.
#[inline]
pub fn point3<S>(x: S, y: S, z: S) -> Point3D<S> {
    Point3D::new(x, y, z)
}

/// Shorthand for `Vector2D::new(x, y)`.
#[inline]
pub fn vector2<S>(x: S, y: S) -> Vector2D<S> {
    Vector2D::new(x, y)
}

/// Shorthand for `Vector3D::new(x, y, z)`.
#[inline]
pub fn vector3<S>(x: S, y: S, z: S) -> Vector3D<S> {
    Vector3D::new(x, y, z)
}

pub mod traits {
    //! Traits at the crate's seams: coordinate spaces and point transforms.

    pub use crate::space::Coordinates;

    use crate::{
        Point2D, Point3D, Rotation2D, Scalar, Scale, Transform2D, Transform3D, Translation2D,
        Translation3D,
    };

    /// A mapping from points to points, with a flag telling whether it is
    /// affine.
    ///
    /// Affine transforms preserve straight lines, so a flattener driving
    /// its output through one does not need to split line segments. A
    /// transform reporting `is_affine() == false` triggers an additional
    /// midpoint-deviation test on every segment, lines included.
    pub trait Transformation<P> {
        fn transform_point(&self, p: P) -> P;
        fn is_affine(&self) -> bool;
    }

    impl<S: Scalar> Transformation<Point2D<S>> for Transform2D<S> {
        fn transform_point(&self, p: Point2D<S>) -> Point2D<S> {
            self.transform_point(p)
        }

        fn is_affine(&self) -> bool {
            true
        }
    }

    impl<S: Scalar> Transformation<Point2D<S>> for Rotation2D<S> {
        fn transform_point(&self, p: Point2D<S>) -> Point2D<S> {
            self.transform_point(p)
        }

        fn is_affine(&self) -> bool {
            true
        }
    }

    impl<S: Scalar> Transformation<Point2D<S>> for Translation2D<S> {
        fn transform_point(&self, p: Point2D<S>) -> Point2D<S> {
            self.transform_point(p)
        }

        fn is_affine(&self) -> bool {
            true
        }
    }

    impl<S: Scalar> Transformation<Point2D<S>> for Scale<S> {
        fn transform_point(&self, p: Point2D<S>) -> Point2D<S> {
            (*self).transform_point(p)
        }

        fn is_affine(&self) -> bool {
            true
        }
    }

    impl<S: Scalar> Transformation<Point3D<S>> for Transform3D<S> {
        fn transform_point(&self, p: Point3D<S>) -> Point3D<S> {
            let x = p.x * self.m11 + p.y * self.m21 + p.z * self.m31 + self.m41;
            let y = p.x * self.m12 + p.y * self.m22 + p.z * self.m32 + self.m42;
            let z = p.x * self.m13 + p.y * self.m23 + p.z * self.m33 + self.m43;
            let w = p.x * self.m14 + p.y * self.m24 + p.z * self.m34 + self.m44;
            Point3D::new(x / w, y / w, z / w)
        }

        fn is_affine(&self) -> bool {
            self.m14 == S::ZERO && self.m24 == S::ZERO && self.m34 == S::ZERO && self.m44 == S::ONE
        }
    }

    impl<S: Scalar> Transformation<Point3D<S>> for Translation3D<S> {
        fn transform_point(&self, p: Point3D<S>) -> Point3D<S> {
            Point3D::new(p.x + self.x, p.y + self.y, p.z + self.z)
        }

        fn is_affine(&self) -> bool {
            true
        }
    }

    // Automatically implement Transformation for all &Transformation.
    impl<'l, P, T: Transformation<P> + ?Sized> Transformation<P> for &'l T {
        #[inline]
        fn transform_point(&self, p: P) -> P {
            (*self).transform_point(p)
        }

        #[inline]
        fn is_affine(&self) -> bool {
            (*self).is_affine()
        }
    }
}
