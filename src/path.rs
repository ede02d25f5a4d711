//! A simple path data structure for 2D and 3D paths.
//!
//! [`Path`] stores verbs and points in two parallel buffers and iterates
//! as [`PathEvent`]s. It is deliberately minimal: enough to build paths,
//! hand them to the refinement iterators in [`flatten`](crate::flatten)
//! and get refined event streams back. Anything implementing
//! `Iterator<Item = PathEvent<P>>` works just as well.
//!
//! # Example
//!
//! ```
//! use path_flattening::path::Path;
//! use path_flattening::point2;
//!
//! let mut builder = Path::builder();
//! builder.move_to(point2(0.0f64, 0.0));
//! builder.line_to(point2(1.0, 2.0));
//! builder.quadratic_bezier_to(point2(2.0, 3.0), point2(3.0, 2.0));
//! builder.close();
//! let path = builder.build();
//!
//! for event in path.iter() {
//!     println!("{:?}", event);
//! }
//! ```

use crate::events::{PathEvent, Verb};
use crate::{Point2D, Point3D};

/// A 2D path.
pub type Path2D<S> = Path<Point2D<S>>;

/// A 3D path.
pub type Path3D<S> = Path<Point3D<S>>;

/// A path made of sub-paths of line segments and quadratic or cubic
/// bézier curves, generic over the point type.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Path<P> {
    points: Box<[P]>,
    verbs: Box<[Verb]>,
}

impl<P: Copy> Path<P> {
    /// Creates a [`Builder`] to create a path.
    pub fn builder() -> Builder<P> {
        Builder::new()
    }

    /// An iterator over the path's events.
    pub fn iter(&self) -> Iter<P> {
        Iter {
            points: self.points.iter(),
            verbs: self.verbs.iter(),
        }
    }

    /// Whether the path contains no events.
    pub fn is_empty(&self) -> bool {
        self.verbs.is_empty()
    }
}

impl<'l, P: Copy> IntoIterator for &'l Path<P> {
    type Item = PathEvent<P>;
    type IntoIter = Iter<'l, P>;

    fn into_iter(self) -> Iter<'l, P> {
        self.iter()
    }
}

/// Builds a [`Path`] one command at a time.
///
/// Sub-paths begin with [`move_to`](Builder::move_to); issuing a drawing
/// command before any `move_to` is a programming error, checked in debug
/// builds only.
pub struct Builder<P> {
    points: Vec<P>,
    verbs: Vec<Verb>,
    in_subpath: bool,
}

impl<P: Copy> Builder<P> {
    pub fn new() -> Self {
        Builder {
            points: Vec::new(),
            verbs: Vec::new(),
            in_subpath: false,
        }
    }

    pub fn with_capacity(points: usize, verbs: usize) -> Self {
        Builder {
            points: Vec::with_capacity(points),
            verbs: Vec::with_capacity(verbs),
            in_subpath: false,
        }
    }

    pub fn move_to(&mut self, to: P) {
        self.in_subpath = true;
        self.points.push(to);
        self.verbs.push(Verb::MoveTo);
    }

    pub fn line_to(&mut self, to: P) {
        debug_assert!(self.in_subpath, "line_to before move_to");
        self.points.push(to);
        self.verbs.push(Verb::LineTo);
    }

    pub fn quadratic_bezier_to(&mut self, ctrl: P, to: P) {
        debug_assert!(self.in_subpath, "quadratic_bezier_to before move_to");
        self.points.push(ctrl);
        self.points.push(to);
        self.verbs.push(Verb::QuadraticTo);
    }

    pub fn cubic_bezier_to(&mut self, ctrl1: P, ctrl2: P, to: P) {
        debug_assert!(self.in_subpath, "cubic_bezier_to before move_to");
        self.points.push(ctrl1);
        self.points.push(ctrl2);
        self.points.push(to);
        self.verbs.push(Verb::CubicTo);
    }

    pub fn close(&mut self) {
        debug_assert!(self.in_subpath, "close before move_to");
        self.in_subpath = false;
        self.verbs.push(Verb::Close);
    }

    pub fn build(self) -> Path<P> {
        Path {
            points: self.points.into_boxed_slice(),
            verbs: self.verbs.into_boxed_slice(),
        }
    }
}

impl<P: Copy> Default for Builder<P> {
    fn default() -> Self {
        Builder::new()
    }
}

/// An iterator over the events of a [`Path`].
#[derive(Clone)]
pub struct Iter<'l, P> {
    points: core::slice::Iter<'l, P>,
    verbs: core::slice::Iter<'l, Verb>,
}

impl<'l, P: Copy> Iterator for Iter<'l, P> {
    type Item = PathEvent<P>;

    fn next(&mut self) -> Option<PathEvent<P>> {
        match self.verbs.next()? {
            Verb::MoveTo => Some(PathEvent::MoveTo(*self.points.next()?)),
            Verb::LineTo => Some(PathEvent::LineTo(*self.points.next()?)),
            Verb::QuadraticTo => {
                let ctrl = *self.points.next()?;
                let to = *self.points.next()?;
                Some(PathEvent::QuadraticTo(ctrl, to))
            }
            Verb::CubicTo => {
                let ctrl1 = *self.points.next()?;
                let ctrl2 = *self.points.next()?;
                let to = *self.points.next()?;
                Some(PathEvent::CubicTo(ctrl1, ctrl2, to))
            }
            Verb::Close => Some(PathEvent::Close),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.verbs.len();
        (n, Some(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{point2, point3};

    #[test]
    fn build_and_iterate() {
        let mut builder = Path::builder();
        builder.move_to(point2(0.0f64, 0.0));
        builder.line_to(point2(1.0, 0.0));
        builder.quadratic_bezier_to(point2(2.0, 1.0), point2(3.0, 0.0));
        builder.cubic_bezier_to(point2(4.0, 1.0), point2(5.0, -1.0), point2(6.0, 0.0));
        builder.close();
        let path = builder.build();

        let events: Vec<_> = path.iter().collect();
        assert_eq!(
            events,
            vec![
                PathEvent::MoveTo(point2(0.0, 0.0)),
                PathEvent::LineTo(point2(1.0, 0.0)),
                PathEvent::QuadraticTo(point2(2.0, 1.0), point2(3.0, 0.0)),
                PathEvent::CubicTo(point2(4.0, 1.0), point2(5.0, -1.0), point2(6.0, 0.0)),
                PathEvent::Close,
            ]
        );
    }

    #[test]
    fn empty_path() {
        let path: Path2D<f32> = Path::builder().build();
        assert!(path.is_empty());
        assert_eq!(path.iter().next(), None);
    }

    #[test]
    fn three_dimensional_paths() {
        let mut builder = Path::builder();
        builder.move_to(point3(0.0f32, 0.0, 0.0));
        builder.line_to(point3(1.0, 1.0, 1.0));
        let path = builder.build();
        assert_eq!(path.iter().count(), 2);
    }

    #[test]
    fn multiple_subpaths() {
        let mut builder = Path::builder();
        builder.move_to(point2(0.0f64, 0.0));
        builder.line_to(point2(1.0, 0.0));
        builder.close();
        builder.move_to(point2(5.0, 5.0));
        builder.line_to(point2(6.0, 5.0));
        builder.close();
        let path = builder.build();

        let moves = path
            .iter()
            .filter(|e| matches!(e, PathEvent::MoveTo(_)))
            .count();
        let closes = path.iter().filter(|e| matches!(e, PathEvent::Close)).count();
        assert_eq!(moves, 2);
        assert_eq!(closes, 2);
    }
}
