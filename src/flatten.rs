//! Adaptive refinement of path event streams.
//!
//! The two iterators in this module, [`Flattened`] and [`Subdivided`],
//! wrap a path event stream and split its quadratic and cubic bézier
//! segments in half, recursively, until every emitted piece satisfies a
//! termination criterion. They differ only in the criterion: `Flattened`
//! uses a numeric flatness threshold, `Subdivided` asks a caller-provided
//! condition. Both keep the segment type of what they split: a cubic is
//! refined into smaller cubics, never degraded to line segments. `Close`
//! events are rewritten as a line segment back to the start of the
//! sub-path, so the output stream never contains a `Close`.
//!
//! Splitting is the classic de Casteljau bisection at the curve midpoint,
//! driven without recursion: a flat workspace of `limit + 1` control-point
//! frames, indexed by recursion depth, holds the pending halves of every
//! split. The first half of a split always lands one frame deeper and is
//! refined next; the second half stays behind in the current frame and is
//! visited on the way back up, which makes the iterator an in-order
//! traversal of the bisection tree with memory fixed at construction
//! time. A per-depth split counter caps the number of splits along any
//! root-to-leaf chain at the recursion limit, so one input segment can
//! never produce more than `2^limit` pieces.

use crate::events::{PathEvent, Verb};
use crate::space::Coordinates;
use crate::traits::Transformation;
use crate::Scalar;

use arrayvec::ArrayVec;
use thiserror::Error;

/// Default bound on how many times a single segment may be bisected along
/// one root-to-leaf chain. Each extra unit can double the worst-case
/// number of emitted segments.
pub const DEFAULT_RECURSION_LIMIT: u32 = 10;

/// Error returned by the fallible constructors when the flatness
/// parameter is unusable.
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvalidFlatness {
    #[error("flatness must not be negative")]
    Negative,
    #[error("flatness must be a finite number")]
    NotFinite,
}

fn check_flatness<S: Scalar>(flatness: S) -> Result<S, InvalidFlatness> {
    if !flatness.is_finite() {
        return Err(InvalidFlatness::NotFinite);
    }
    if flatness < S::ZERO {
        return Err(InvalidFlatness::Negative);
    }
    Ok(flatness)
}

/// The recursion state shared by both refinement policies: the
/// depth-indexed workspace, the per-depth split counters and the pull
/// protocol that interleaves upstream events with pending halves.
struct SubdivisionState<'l, P: Coordinates> {
    transform: Option<&'l dyn Transformation<P>>,
    limit: u32,
    mode: Option<Verb>,
    done: bool,
    depth: usize,
    workspace: Box<[P]>,
    split_count: Box<[u32]>,
    last_move_to: P,
}

impl<'l, P: Coordinates> SubdivisionState<'l, P> {
    fn new(limit: u32, transform: Option<&'l dyn Transformation<P>>) -> Self {
        let frames = limit as usize + 1;
        SubdivisionState {
            transform,
            limit,
            mode: None,
            done: false,
            depth: 0,
            workspace: vec![P::origin(); 4 * frames].into_boxed_slice(),
            split_count: vec![0; frames].into_boxed_slice(),
            last_move_to: P::origin(),
        }
    }

    fn verb(&self) -> Verb {
        match self.mode {
            Some(verb) => verb,
            None => unreachable!("no segment is active"),
        }
    }

    /// The control points of the segment at the current depth, start
    /// point first.
    fn frame(&self) -> &[P] {
        let n = self.verb().points_per_frame();
        let base = self.depth * n;
        &self.workspace[base..base + n]
    }

    fn transformed_frame(&self) -> ArrayVec<P, 4> {
        let mut points: ArrayVec<P, 4> = self.frame().iter().copied().collect();
        if let Some(transform) = self.transform {
            for p in &mut points {
                *p = transform.transform_point(*p);
            }
        }
        points
    }

    fn non_affine(&self) -> bool {
        self.transform.map_or(false, |t| !t.is_affine())
    }

    /// How far the transform moves the segment's chord midpoint away from
    /// the midpoint of the transformed endpoints. Zero for affine
    /// transforms by definition; for anything else this measures the
    /// curvature the transform itself introduces.
    fn midpoint_shift(&self) -> P::Scalar {
        let transform = match self.transform {
            Some(t) => t,
            None => return P::Scalar::ZERO,
        };
        let frame = self.frame();
        let from = frame[0];
        let to = frame[frame.len() - 1];
        let curve_mid = transform.transform_point(from.midpoint(to));
        let chord_mid = transform
            .transform_point(from)
            .midpoint(transform.transform_point(to));
        curve_mid.distance_to(chord_mid)
    }

    /// Bisect the segment at the current depth at t = 1/2.
    ///
    /// The first half goes one frame deeper, where refinement continues;
    /// the second half overwrites the current frame and is visited when
    /// the traversal pops back to this depth. The new frame inherits the
    /// incremented split count, capping the total number of splits along
    /// any single root-to-leaf chain.
    fn split(&mut self, verb: Verb) {
        let n = verb.points_per_frame();
        let base = self.depth * n;

        // De Casteljau triangle; row 0 is the current control polygon and
        // each row averages adjacent points of the row above.
        let mut rows = [[self.workspace[base]; 4]; 4];
        rows[0][..n].copy_from_slice(&self.workspace[base..base + n]);
        for i in 1..n {
            for j in 0..n - i {
                rows[i][j] = rows[i - 1][j].midpoint(rows[i - 1][j + 1]);
            }
        }

        let deeper = base + n;
        for j in 0..n {
            // Left edge of the triangle: first half. Right edge, read
            // from the apex down: second half.
            self.workspace[deeper + j] = rows[j][0];
            self.workspace[base + j] = rows[n - 1 - j][j];
        }

        let count = self.split_count[self.depth] + 1;
        self.split_count[self.depth] = count;
        self.depth += 1;
        self.split_count[self.depth] = count;
    }

    /// Keep splitting the segment at the current depth while the policy
    /// asks for it, within the recursion limit.
    ///
    /// When arriving at a frame from above (popping back to a deferred
    /// second half), a frame that already reached the limit is emitted
    /// as-is: both halves of a capped split are treated the same, which
    /// avoids uneven segment density around the recursion ceiling.
    fn partition<F>(&mut self, upwards: bool, must_split: &mut F)
    where
        F: FnMut(&Self) -> bool,
    {
        if upwards && self.split_count[self.depth] >= self.limit {
            return;
        }
        let verb = self.verb();
        while self.split_count[self.depth] < self.limit && must_split(self) {
            self.split(verb);
        }
    }

    /// Frame 0's endpoint becomes the start point of the next raw
    /// segment.
    fn shift_start(&mut self) {
        let n = self.verb().points_per_frame();
        self.workspace[0] = self.workspace[n - 1];
    }

    /// Write a freshly pulled raw event into frame 0 and refine it.
    fn load<F>(&mut self, event: PathEvent<P>, splits_lines: bool, must_split: &mut F)
    where
        F: FnMut(&Self) -> bool,
    {
        self.mode = Some(event.verb());
        match event {
            PathEvent::Close => {
                // A close is a synthetic line back to the sub-path start.
                self.workspace[1] = self.last_move_to;
                if splits_lines && self.workspace[1] != self.workspace[0] {
                    self.partition(false, must_split);
                }
            }
            PathEvent::MoveTo(to) => {
                self.last_move_to = to;
                self.workspace[1] = to;
            }
            PathEvent::LineTo(to) => {
                self.workspace[1] = to;
                if splits_lines {
                    self.partition(false, must_split);
                }
            }
            PathEvent::QuadraticTo(ctrl, to) => {
                self.workspace[1] = ctrl;
                self.workspace[2] = to;
                self.partition(false, must_split);
            }
            PathEvent::CubicTo(ctrl1, ctrl2, to) => {
                self.workspace[1] = ctrl1;
                self.workspace[2] = ctrl2;
                self.workspace[3] = to;
                self.partition(false, must_split);
            }
        }
    }

    /// The event for the segment at the current depth. `Close` frames are
    /// emitted as lines: the output stream never contains a `Close`.
    fn current_event(&self) -> PathEvent<P> {
        let frame = self.frame();
        match self.verb() {
            Verb::MoveTo => PathEvent::MoveTo(frame[1]),
            Verb::LineTo | Verb::Close => PathEvent::LineTo(frame[1]),
            Verb::QuadraticTo => PathEvent::QuadraticTo(frame[1], frame[2]),
            Verb::CubicTo => PathEvent::CubicTo(frame[1], frame[2], frame[3]),
        }
    }

    fn emit(&self, event: PathEvent<P>) -> PathEvent<P> {
        match self.transform {
            Some(transform) => event.transformed(&transform),
            None => event,
        }
    }

    fn advance<Iter, F>(
        &mut self,
        src: &mut Iter,
        splits_lines: bool,
        must_split: &mut F,
    ) -> Option<PathEvent<P>>
    where
        Iter: Iterator<Item = PathEvent<P>>,
        F: FnMut(&Self) -> bool,
    {
        if self.done {
            return None;
        }
        match self.mode {
            None => {
                // The first event of a well-formed stream is a MoveTo and
                // carries nothing to refine, so it goes out as-is. The
                // contract is assumed rather than enforced.
                let first = match src.next() {
                    Some(event) => event,
                    None => {
                        self.done = true;
                        return None;
                    }
                };
                debug_assert!(
                    matches!(first, PathEvent::MoveTo(_)),
                    "a path must start with MoveTo"
                );
                let to = first.destination().unwrap_or_else(P::origin);
                self.workspace[0] = to;
                self.workspace[1] = to;
                if let PathEvent::MoveTo(_) = first {
                    self.last_move_to = to;
                }
                self.mode = Some(first.verb());
                Some(self.emit(first))
            }
            Some(_) if self.depth == 0 => {
                self.shift_start();
                let event = match src.next() {
                    Some(event) => event,
                    None => {
                        self.done = true;
                        return None;
                    }
                };
                self.split_count[0] = 0;
                self.load(event, splits_lines, must_split);
                Some(self.emit(self.current_event()))
            }
            Some(_) => {
                self.depth -= 1;
                self.partition(true, must_split);
                Some(self.emit(self.current_event()))
            }
        }
    }
}

/// The fold-back test: a control point whose direction opposes the chord
/// or whose reach exceeds the chord defeats a perpendicular-distance
/// flatness metric, so such segments are always split further.
fn folds_back<P: Coordinates>(chord: P::Vector, lead: P::Vector) -> bool {
    P::dot(chord, lead) <= P::Scalar::ZERO || P::length(chord) < P::length(lead)
}

/// Detects S-shaped cubics whose interior polygon turns away from the
/// chord by more than about 60 degrees even though the perpendicular
/// deviation looks acceptable near the midpoint.
fn turns_sharply<P: Coordinates>(unit_chord: P::Vector, ctrl1: P, ctrl2: P) -> bool {
    P::dot(unit_chord, P::normalize(ctrl1.vector_to(ctrl2))) < P::Scalar::HALF
}

/// The flatness policy. A flatness of zero splits unconditionally, lines
/// included, until the recursion limit saturates.
fn must_flatten<P: Coordinates>(state: &SubdivisionState<P>, flatness: P::Scalar) -> bool {
    if flatness == P::Scalar::ZERO {
        return true;
    }
    match state.verb() {
        // A line is always flat; only a non-affine transform can bend it.
        Verb::LineTo | Verb::Close => state.non_affine() && state.midpoint_shift() > flatness,
        Verb::QuadraticTo => {
            let points = state.transformed_frame();
            let chord = points[0].vector_to(points[2]);
            let lead = points[0].vector_to(points[1]);
            if folds_back::<P>(chord, lead) {
                return true;
            }
            if P::deviation(P::normalize(chord), lead) > flatness {
                return true;
            }
            state.non_affine() && state.midpoint_shift() > flatness
        }
        Verb::CubicTo => {
            let points = state.transformed_frame();
            let chord = points[0].vector_to(points[3]);
            let lead1 = points[0].vector_to(points[1]);
            let lead2 = points[0].vector_to(points[2]);
            if folds_back::<P>(chord, lead1) || folds_back::<P>(chord, lead2) {
                return true;
            }
            let unit = P::normalize(chord);
            if P::deviation(unit, lead1) > flatness || P::deviation(unit, lead2) > flatness {
                return true;
            }
            if turns_sharply(unit, points[1], points[2]) {
                return true;
            }
            state.non_affine() && state.midpoint_shift() > flatness
        }
        Verb::MoveTo => false,
    }
}

/// The condition policy: degeneracy still forces splits, everything else
/// is delegated to the caller's condition over the (transformed) control
/// points, start point included. Lines are never split.
fn must_subdivide<P, C>(state: &SubdivisionState<P>, condition: &mut C) -> bool
where
    P: Coordinates,
    C: FnMut(&[P]) -> bool,
{
    match state.verb() {
        Verb::MoveTo | Verb::LineTo | Verb::Close => false,
        Verb::QuadraticTo => {
            let points = state.transformed_frame();
            let chord = points[0].vector_to(points[2]);
            if folds_back::<P>(chord, points[0].vector_to(points[1])) {
                return true;
            }
            condition(&points)
        }
        Verb::CubicTo => {
            let points = state.transformed_frame();
            let chord = points[0].vector_to(points[3]);
            if folds_back::<P>(chord, points[0].vector_to(points[1]))
                || folds_back::<P>(chord, points[0].vector_to(points[2]))
            {
                return true;
            }
            if turns_sharply(P::normalize(chord), points[1], points[2]) {
                return true;
            }
            condition(&points)
        }
    }
}

/// An iterator refining the curve segments of a path event stream until
/// every piece deviates from its chord by no more than a flatness
/// threshold.
///
/// Segment types are preserved: quadratic and cubic pieces come out as
/// (smaller) quadratics and cubics. `Close` events come out as `LineTo`
/// back to the sub-path start. With a flatness of zero every segment,
/// lines included, is split until the recursion limit saturates, which
/// turns one curve into exactly `2^limit` pieces.
///
/// When a [`Transformation`] is supplied, emitted points are transformed
/// and the flatness tests run on transformed control points. A transform
/// reporting itself non-affine additionally triggers a midpoint-deviation
/// test, the only test ever applied to line segments.
pub struct Flattened<'l, P: Coordinates, Iter> {
    src: Iter,
    state: SubdivisionState<'l, P>,
    flatness: P::Scalar,
}

impl<'l, P, Iter> Flattened<'l, P, Iter>
where
    P: Coordinates,
    Iter: Iterator<Item = PathEvent<P>>,
{
    /// Create the iterator with the default recursion limit.
    ///
    /// # Panics
    ///
    /// If `flatness` is negative or not finite.
    pub fn new(flatness: P::Scalar, it: Iter) -> Self {
        Self::with_limit(flatness, it, DEFAULT_RECURSION_LIMIT)
    }

    /// Create the iterator with an explicit recursion limit.
    ///
    /// # Panics
    ///
    /// If `flatness` is negative or not finite.
    pub fn with_limit(flatness: P::Scalar, it: Iter, limit: u32) -> Self {
        match Self::try_with_limit(flatness, it, limit) {
            Ok(flattened) => flattened,
            Err(e) => panic!("{}", e),
        }
    }

    /// Create the iterator with a transform applied to the output.
    ///
    /// The flatness tests run on transformed control points, so the
    /// output is flat *after* the transform, which is what matters when
    /// the transform is not affine.
    ///
    /// # Panics
    ///
    /// If `flatness` is negative or not finite.
    pub fn with_transform(
        flatness: P::Scalar,
        it: Iter,
        transform: &'l dyn Transformation<P>,
        limit: u32,
    ) -> Self {
        let mut flattened = Self::with_limit(flatness, it, limit);
        flattened.state.transform = Some(transform);
        flattened
    }

    /// Fallible variant of [`new`](Self::new).
    pub fn try_new(flatness: P::Scalar, it: Iter) -> Result<Self, InvalidFlatness> {
        Self::try_with_limit(flatness, it, DEFAULT_RECURSION_LIMIT)
    }

    /// Fallible variant of [`with_limit`](Self::with_limit).
    pub fn try_with_limit(
        flatness: P::Scalar,
        it: Iter,
        limit: u32,
    ) -> Result<Self, InvalidFlatness> {
        let flatness = check_flatness(flatness)?;
        Ok(Flattened {
            src: it,
            state: SubdivisionState::new(limit, None),
            flatness,
        })
    }

    pub fn flatness(&self) -> P::Scalar {
        self.flatness
    }

    pub fn recursion_limit(&self) -> u32 {
        self.state.limit
    }
}

impl<'l, P, Iter> Iterator for Flattened<'l, P, Iter>
where
    P: Coordinates,
    Iter: Iterator<Item = PathEvent<P>>,
{
    type Item = PathEvent<P>;

    fn next(&mut self) -> Option<PathEvent<P>> {
        let flatness = self.flatness;
        let splits_lines = flatness == P::Scalar::ZERO || self.state.non_affine();
        self.state.advance(
            &mut self.src,
            splits_lines,
            &mut |state: &SubdivisionState<P>| must_flatten(state, flatness),
        )
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // Refinement only ever adds events; no useful upper bound.
        (self.src.size_hint().0, None)
    }
}

/// An iterator refining the curve segments of a path event stream while a
/// caller-provided condition over the control points asks for more.
///
/// The condition receives the control points of the candidate segment,
/// start point included (three points for a quadratic, four for a cubic),
/// transformed if a transform is set, and returns `true` to split it
/// further. Fold-back degeneracies are split regardless of the condition;
/// line segments and closes are never split. The recursion limit bounds
/// the subdivision exactly as for [`Flattened`].
pub struct Subdivided<'l, P: Coordinates, Iter, C> {
    src: Iter,
    state: SubdivisionState<'l, P>,
    condition: C,
}

impl<'l, P, Iter, C> Subdivided<'l, P, Iter, C>
where
    P: Coordinates,
    Iter: Iterator<Item = PathEvent<P>>,
    C: FnMut(&[P]) -> bool,
{
    /// Create the iterator with the default recursion limit.
    pub fn new(condition: C, it: Iter) -> Self {
        Self::with_limit(condition, it, DEFAULT_RECURSION_LIMIT)
    }

    /// Create the iterator with an explicit recursion limit.
    pub fn with_limit(condition: C, it: Iter, limit: u32) -> Self {
        Subdivided {
            src: it,
            state: SubdivisionState::new(limit, None),
            condition,
        }
    }

    /// Create the iterator with a transform applied to the output. The
    /// condition sees transformed control points.
    pub fn with_transform(
        condition: C,
        it: Iter,
        transform: &'l dyn Transformation<P>,
        limit: u32,
    ) -> Self {
        let mut subdivided = Self::with_limit(condition, it, limit);
        subdivided.state.transform = Some(transform);
        subdivided
    }

    pub fn recursion_limit(&self) -> u32 {
        self.state.limit
    }
}

impl<'l, P, Iter, C> Iterator for Subdivided<'l, P, Iter, C>
where
    P: Coordinates,
    Iter: Iterator<Item = PathEvent<P>>,
    C: FnMut(&[P]) -> bool,
{
    type Item = PathEvent<P>;

    fn next(&mut self) -> Option<PathEvent<P>> {
        let condition = &mut self.condition;
        self.state.advance(
            &mut self.src,
            false,
            &mut |state: &SubdivisionState<P>| must_subdivide(state, &mut *condition),
        )
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.src.size_hint().0, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::iterator::FromSegment;
    use crate::{point2, point3, Point2D};

    fn cubic_arch() -> FromSegment<Point2D<f64>> {
        FromSegment::new(
            point2(0.0, 0.0),
            PathEvent::CubicTo(point2(3.0, 5.0), point2(7.0, 5.0), point2(10.0, 0.0)),
        )
    }

    fn leaves(events: impl Iterator<Item = PathEvent<Point2D<f64>>>) -> Vec<PathEvent<Point2D<f64>>> {
        events
            .filter(|e| !matches!(e, PathEvent::MoveTo(_)))
            .collect()
    }

    #[test]
    fn flatness_zero_saturates_the_limit() {
        let pieces = leaves(Flattened::with_limit(0.0, cubic_arch(), 3));
        assert_eq!(pieces.len(), 8);
        for piece in &pieces {
            assert!(matches!(piece, PathEvent::CubicTo(..)));
        }
    }

    #[test]
    fn termination_bound_holds() {
        for limit in 0..6 {
            let pieces = leaves(Flattened::with_limit(0.01, cubic_arch(), limit));
            assert!(pieces.len() <= 1 << limit);
            assert!(!pieces.is_empty());
        }
    }

    #[test]
    fn arch_flattens_to_tolerance() {
        let events: Vec<_> = Flattened::new(0.5, cubic_arch()).collect();
        assert_eq!(events[0], PathEvent::MoveTo(point2(0.0, 0.0)));
        let pieces = &events[1..];
        assert!(pieces.len() > 1);
        assert!(pieces.len() < 1024);

        let mut from = point2(0.0, 0.0);
        for piece in pieces {
            if let PathEvent::CubicTo(ctrl1, ctrl2, to) = *piece {
                let chord = from.vector_to(to);
                let unit = Point2D::normalize(chord);
                assert!(Point2D::deviation(unit, from.vector_to(ctrl1)) <= 0.5);
                assert!(Point2D::deviation(unit, from.vector_to(ctrl2)) <= 0.5);
                from = to;
            } else {
                panic!("expected only cubic pieces, got {:?}", piece);
            }
        }
        assert_eq!(from, point2(10.0, 0.0));
    }

    #[test]
    fn endpoints_are_preserved_exactly() {
        let events: Vec<_> = Flattened::new(0.25, cubic_arch()).collect();
        assert_eq!(events.first(), Some(&PathEvent::MoveTo(point2(0.0, 0.0))));
        assert_eq!(
            events.last().and_then(|e| e.destination()),
            Some(point2(10.0, 0.0))
        );
        // Each piece starts where the previous one ended by construction;
        // the boundary samples must be bit-exact, not just close.
    }

    #[test]
    fn refinement_is_monotone_in_the_limit() {
        let mut previous = f64::INFINITY;
        for limit in 0..8 {
            let mut worst: f64 = 0.0;
            let mut from = point2(0.0, 0.0);
            for piece in Flattened::with_limit(0.0, cubic_arch(), limit) {
                if let PathEvent::CubicTo(ctrl1, ctrl2, to) = piece {
                    let unit = Point2D::normalize(from.vector_to(to));
                    worst = worst
                        .max(Point2D::deviation(unit, from.vector_to(ctrl1)))
                        .max(Point2D::deviation(unit, from.vector_to(ctrl2)));
                    from = to;
                }
            }
            assert!(worst <= previous);
            previous = worst;
        }
    }

    #[test]
    fn fold_back_forces_splitting() {
        // Control points shoot past both endpoints; the perpendicular
        // deviation from the chord is zero everywhere, so only the
        // fold-back test can catch this one.
        let degenerate = FromSegment::new(
            point2(0.0, 0.0),
            PathEvent::CubicTo(point2(2.0, 0.0), point2(-1.0, 0.0), point2(1.0, 0.0)),
        );
        let pieces = leaves(Flattened::new(0.5, degenerate));
        assert!(pieces.len() > 1);
    }

    #[test]
    fn lines_pass_through_untouched() {
        let line = FromSegment::new(point2(1.0, 1.0), PathEvent::LineTo(point2(4.0, 5.0)));
        let events: Vec<_> = Flattened::new(0.1, line).collect();
        assert_eq!(
            events,
            vec![
                PathEvent::MoveTo(point2(1.0, 1.0)),
                PathEvent::LineTo(point2(4.0, 5.0)),
            ]
        );
    }

    #[test]
    fn flattens_in_three_dimensions() {
        let curve = FromSegment::new(
            point3(0.0, 0.0, 0.0),
            PathEvent::CubicTo(
                point3(1.0, 2.0, 0.0),
                point3(2.0, 2.0, 2.0),
                point3(3.0, 0.0, 3.0),
            ),
        );
        let mut from = point3(0.0, 0.0, 0.0);
        let mut count = 0;
        for piece in Flattened::new(0.05, curve) {
            match piece {
                PathEvent::MoveTo(to) => from = to,
                PathEvent::CubicTo(ctrl1, ctrl2, to) => {
                    let unit = crate::Point3D::normalize(from.vector_to(to));
                    assert!(crate::Point3D::deviation(unit, from.vector_to(ctrl1)) <= 0.05);
                    assert!(crate::Point3D::deviation(unit, from.vector_to(ctrl2)) <= 0.05);
                    from = to;
                    count += 1;
                }
                other => panic!("unexpected event {:?}", other),
            }
        }
        assert!(count > 1);
        assert_eq!(from, point3(3.0, 0.0, 3.0));
    }

    #[test]
    fn condition_policy_splits_until_satisfied() {
        // Split while any chord is longer than one unit.
        let subdivided = Subdivided::new(
            |points: &[Point2D<f64>]| {
                points[0].distance_to(points[points.len() - 1]) > 1.0
            },
            cubic_arch(),
        );
        let mut from = point2(0.0, 0.0);
        let mut count = 0;
        for piece in subdivided {
            match piece {
                PathEvent::MoveTo(to) => from = to,
                PathEvent::CubicTo(_, _, to) => {
                    assert!(from.distance_to(to) <= 1.0);
                    from = to;
                    count += 1;
                }
                other => panic!("unexpected event {:?}", other),
            }
        }
        assert!(count >= 10);
    }

    #[test]
    fn condition_policy_never_splits_lines() {
        let line = FromSegment::new(point2(0.0, 0.0), PathEvent::LineTo(point2(100.0, 0.0)));
        let events: Vec<_> = Subdivided::new(|_: &[Point2D<f64>]| true, line).collect();
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn split_counts_cap_chains_not_levels() {
        // At the limit, a curve that keeps asking for splits saturates to
        // exactly 2^limit pieces, meaning the counter tracks root-to-leaf
        // chains rather than total splits.
        let pieces = leaves(Subdivided::with_limit(
            |_: &[Point2D<f64>]| true,
            cubic_arch(),
            4,
        ));
        assert_eq!(pieces.len(), 16);
    }

    #[test]
    fn limit_zero_emits_raw_segments() {
        let pieces = leaves(Flattened::with_limit(0.0, cubic_arch(), 0));
        assert_eq!(pieces.len(), 1);
    }

    #[test]
    fn rejects_bad_flatness() {
        assert_eq!(
            Flattened::try_new(-1.0, cubic_arch()).err(),
            Some(InvalidFlatness::Negative)
        );
        assert_eq!(
            Flattened::try_new(f64::NAN, cubic_arch()).err(),
            Some(InvalidFlatness::NotFinite)
        );
        assert!(Flattened::try_new(0.0, cubic_arch()).is_ok());
    }

    #[test]
    #[should_panic]
    fn panics_on_negative_flatness() {
        let _ = Flattened::new(-0.5, cubic_arch());
    }
}
