use crate::traits::Transformation;

/// A path command with an implicit current point.
///
/// Each event's start point is the previous event's endpoint; `Close`
/// carries no coordinates and its endpoint is the most recent `MoveTo`
/// point. The point type is generic so that the same event stream shape
/// serves 2D and 3D paths.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum PathEvent<P> {
    MoveTo(P),
    LineTo(P),
    QuadraticTo(P, P),
    CubicTo(P, P, P),
    Close,
}

/// Tag identifying the kind of a path event.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub(crate) enum Verb {
    MoveTo,
    LineTo,
    QuadraticTo,
    CubicTo,
    Close,
}

impl Verb {
    /// Number of points in a workspace frame for this verb, start point
    /// included. `Close` frames hold the synthetic closing line.
    pub(crate) fn points_per_frame(self) -> usize {
        match self {
            Verb::MoveTo | Verb::LineTo | Verb::Close => 2,
            Verb::QuadraticTo => 3,
            Verb::CubicTo => 4,
        }
    }
}

impl<P: Copy> PathEvent<P> {
    /// The endpoint of this event, if it carries one.
    pub fn destination(&self) -> Option<P> {
        match *self {
            PathEvent::MoveTo(to) => Some(to),
            PathEvent::LineTo(to) => Some(to),
            PathEvent::QuadraticTo(_, to) => Some(to),
            PathEvent::CubicTo(_, _, to) => Some(to),
            PathEvent::Close => None,
        }
    }

    /// Applies a transformation to all of this event's points.
    pub fn transformed<T: Transformation<P>>(&self, mat: &T) -> Self {
        match *self {
            PathEvent::MoveTo(to) => PathEvent::MoveTo(mat.transform_point(to)),
            PathEvent::LineTo(to) => PathEvent::LineTo(mat.transform_point(to)),
            PathEvent::QuadraticTo(ctrl, to) => {
                PathEvent::QuadraticTo(mat.transform_point(ctrl), mat.transform_point(to))
            }
            PathEvent::CubicTo(ctrl1, ctrl2, to) => PathEvent::CubicTo(
                mat.transform_point(ctrl1),
                mat.transform_point(ctrl2),
                mat.transform_point(to),
            ),
            PathEvent::Close => PathEvent::Close,
        }
    }

    pub(crate) fn verb(&self) -> Verb {
        match *self {
            PathEvent::MoveTo(..) => Verb::MoveTo,
            PathEvent::LineTo(..) => Verb::LineTo,
            PathEvent::QuadraticTo(..) => Verb::QuadraticTo,
            PathEvent::CubicTo(..) => Verb::CubicTo,
            PathEvent::Close => Verb::Close,
        }
    }
}
