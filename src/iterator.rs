//! Tools to iterate over paths.
//!
//! This module provides an extension trait over `Iterator<Item = PathEvent>`
//! so that refinement and transformation adapters can be chained lazily,
//! without allocating intermediate paths:
//!
//! ```
//! use path_flattening::iterator::PathIterator;
//! use path_flattening::path::Path;
//! use path_flattening::{point2, Rotation2D};
//! use path_flattening::euclid::Angle;
//!
//! let mut builder = Path::builder();
//! builder.move_to(point2(1.0f64, 1.0));
//! builder.quadratic_bezier_to(point2(2.0, 2.0), point2(3.0, 1.0));
//! builder.close();
//! let path = builder.build();
//!
//! let rotation = Rotation2D::new(Angle::radians(1.0));
//!
//! for _event in path.iter().transformed(&rotation).flattened(0.01) {
//!     // ...
//! }
//! ```

use crate::events::PathEvent;
use crate::flatten::{Flattened, Subdivided};
use crate::space::Coordinates;
use crate::traits::Transformation;

/// An extension trait for `PathEvent` iterators.
pub trait PathIterator<P: Coordinates>: Iterator<Item = PathEvent<P>> + Sized {
    /// Returns an iterator that refines curve segments until they deviate
    /// from their chord by no more than `flatness`.
    fn flattened(self, flatness: P::Scalar) -> Flattened<'static, P, Self> {
        Flattened::new(flatness, self)
    }

    /// Returns an iterator that refines curve segments while `condition`
    /// asks for more, given the candidate's control points.
    fn subdivided<C>(self, condition: C) -> Subdivided<'static, P, Self, C>
    where
        C: FnMut(&[P]) -> bool,
    {
        Subdivided::new(condition, self)
    }

    /// Returns an iterator applying a transformation to all of its events.
    fn transformed<T: Transformation<P>>(self, transform: &T) -> Transformed<Self, T> {
        Transformed::new(transform, self)
    }
}

impl<P: Coordinates, Iter> PathIterator<P> for Iter where Iter: Iterator<Item = PathEvent<P>> {}

/// Applies a transformation to a path iterator and yields the resulting
/// path iterator.
pub struct Transformed<'l, I, T> {
    it: I,
    transform: &'l T,
}

impl<'l, I, T> Transformed<'l, I, T> {
    /// Creates a new transformed path iterator from a path iterator.
    #[inline]
    pub fn new(transform: &'l T, it: I) -> Transformed<'l, I, T> {
        Transformed { it, transform }
    }
}

impl<'l, P, I, T> Iterator for Transformed<'l, I, T>
where
    P: Copy,
    I: Iterator<Item = PathEvent<P>>,
    T: Transformation<P>,
{
    type Item = PathEvent<P>;

    fn next(&mut self) -> Option<PathEvent<P>> {
        self.it.next().map(|event| event.transformed(self.transform))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

/// A one-shot segment source: yields a synthetic `MoveTo` to the start
/// point, then the given event, then nothing.
///
/// This lets a single bare segment be refined without building a path
/// first:
///
/// ```
/// use path_flattening::iterator::{FromSegment, PathIterator};
/// use path_flattening::{point2, PathEvent};
///
/// let segment = FromSegment::new(
///     point2(0.0f64, 0.0),
///     PathEvent::QuadraticTo(point2(1.0, 2.0), point2(2.0, 0.0)),
/// );
/// let pieces: Vec<_> = segment.flattened(0.1).collect();
/// ```
///
/// When the event is itself a `MoveTo`, the start point is ignored and
/// only the event is emitted.
pub struct FromSegment<P> {
    from: P,
    event: PathEvent<P>,
    index: u8,
}

impl<P: Copy> FromSegment<P> {
    pub fn new(from: P, event: PathEvent<P>) -> Self {
        let index = if matches!(event, PathEvent::MoveTo(_)) {
            1
        } else {
            0
        };
        FromSegment { from, event, index }
    }
}

impl<P: Copy> Iterator for FromSegment<P> {
    type Item = PathEvent<P>;

    fn next(&mut self) -> Option<PathEvent<P>> {
        match self.index {
            0 => {
                self.index = 1;
                Some(PathEvent::MoveTo(self.from))
            }
            1 => {
                self.index = 2;
                Some(self.event)
            }
            _ => None,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = 2usize.saturating_sub(self.index as usize);
        (remaining, Some(remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{point2, Translation2D};

    #[test]
    fn from_segment_emits_move_then_segment() {
        let mut it = FromSegment::new(
            point2(1.0f64, 2.0),
            PathEvent::LineTo(point2(3.0, 4.0)),
        );
        assert_eq!(it.next(), Some(PathEvent::MoveTo(point2(1.0, 2.0))));
        assert_eq!(it.next(), Some(PathEvent::LineTo(point2(3.0, 4.0))));
        assert_eq!(it.next(), None);
    }

    #[test]
    fn from_segment_move_to_is_emitted_alone() {
        let mut it = FromSegment::new(
            point2(1.0f64, 2.0),
            PathEvent::MoveTo(point2(5.0, 6.0)),
        );
        assert_eq!(it.next(), Some(PathEvent::MoveTo(point2(5.0, 6.0))));
        assert_eq!(it.next(), None);
    }

    #[test]
    fn transformed_maps_every_point() {
        let translation: Translation2D<f64> = Translation2D::new(10.0, 0.0);
        let it = FromSegment::new(
            point2(0.0f64, 0.0),
            PathEvent::QuadraticTo(point2(1.0, 1.0), point2(2.0, 0.0)),
        );
        let events: Vec<_> = it.transformed(&translation).collect();
        assert_eq!(
            events,
            vec![
                PathEvent::MoveTo(point2(10.0, 0.0)),
                PathEvent::QuadraticTo(point2(11.0, 1.0), point2(12.0, 0.0)),
            ]
        );
    }

    #[test]
    fn adapters_chain() {
        let it = FromSegment::new(
            point2(0.0f64, 0.0),
            PathEvent::QuadraticTo(point2(5.0, 5.0), point2(10.0, 0.0)),
        );
        let translation: Translation2D<f64> = Translation2D::new(-5.0, 0.0);
        let count = it
            .transformed(&translation)
            .flattened(0.1)
            .filter(|e| matches!(e, PathEvent::QuadraticTo(..)))
            .count();
        assert!(count > 1);
    }
}
