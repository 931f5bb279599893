//! Marker lines and reference point recovery.
//!
//! Rendered symbol artwork carries its metadata as short colored line
//! segments. Every marker line starts (or ends) at the component's reference
//! point, so the reference point is recovered by a majority vote over all
//! marker endpoints: the point shared by the most endpoints wins.

use log::trace;
use thiserror::Error;

use crate::{
    color::Rgb,
    geometry::{Point, Tolerance},
};

/// Errors produced while recovering a reference point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReconcileError {
    #[error("no marker geometry to derive a reference point from")]
    NoGeometry,
}

/// One colored line segment found in rendered artwork.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerLine {
    start: Point,
    end: Point,
    color: Rgb,
}

impl MarkerLine {
    pub fn new(start: Point, end: Point, color: Rgb) -> Self {
        Self { start, end, color }
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    /// Returns the stroke color of the line.
    pub fn color(&self) -> Rgb {
        self.color
    }

    /// Returns the endpoint that is *not* at `reference`.
    ///
    /// Returns `None` when neither or both endpoints lie within `tolerance`
    /// of `reference`, in which case the line's orientation is ambiguous.
    ///
    /// # Examples
    ///
    /// ```
    /// # use symlib_core::{color::Rgb, geometry::{Point, Tolerance}, marker::MarkerLine};
    /// let line = MarkerLine::new(Point::new(5.0, 0.0), Point::new(5.0, 5.0), Rgb::default());
    /// let far = line.far_endpoint(Point::new(5.0, 5.0), Tolerance::default());
    /// assert_eq!(far, Some(Point::new(5.0, 0.0)));
    /// ```
    pub fn far_endpoint(&self, reference: Point, tolerance: Tolerance) -> Option<Point> {
        let start_at_reference = self.start.is_close(reference, tolerance);
        let end_at_reference = self.end.is_close(reference, tolerance);

        match (start_at_reference, end_at_reference) {
            (true, false) => Some(self.end),
            (false, true) => Some(self.start),
            _ => None,
        }
    }
}

/// Finds the dominant shared endpoint of `lines`.
///
/// Endpoints are visited in order (`start`, then `end`, line by line). Each
/// endpoint is counted against the first already-seen representative within
/// `tolerance`, or becomes a new representative. The representative with the
/// strictly greatest count is returned; ties go to the one seen first.
///
/// # Errors
///
/// Returns [`ReconcileError::NoGeometry`] if `lines` is empty.
///
/// # Examples
///
/// ```
/// # use symlib_core::{color::Rgb, geometry::{Point, Tolerance}, marker::{MarkerLine, find_reference_point}};
/// let origin = Point::new(0.0, 0.0);
/// let lines = [
///     MarkerLine::new(origin, Point::new(5.0, 0.0), Rgb::new(255, 0, 0)),
///     MarkerLine::new(origin, Point::new(0.0, 5.0), Rgb::new(0, 0, 255)),
/// ];
/// assert_eq!(find_reference_point(&lines, Tolerance::default()), Ok(origin));
/// ```
pub fn find_reference_point(
    lines: &[MarkerLine],
    tolerance: Tolerance,
) -> Result<Point, ReconcileError> {
    let mut votes: Vec<(Point, usize)> = Vec::new();

    for point in lines.iter().flat_map(|line| [line.start, line.end]) {
        match votes
            .iter_mut()
            .find(|(representative, _)| representative.is_close(point, tolerance))
        {
            Some((_, count)) => *count += 1,
            None => votes.push((point, 1)),
        }
    }

    let mut best: Option<(Point, usize)> = None;
    for &(point, count) in &votes {
        if best.is_none_or(|(_, best_count)| count > best_count) {
            best = Some((point, count));
        }
    }

    let (point, count) = best.ok_or(ReconcileError::NoGeometry)?;
    trace!(x = point.x(), y = point.y(), votes = count; "Reference point found");
    Ok(point)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(sx: f64, sy: f64, ex: f64, ey: f64) -> MarkerLine {
        MarkerLine::new(Point::new(sx, sy), Point::new(ex, ey), Rgb::default())
    }

    #[test]
    fn test_empty_input_fails() {
        assert_eq!(
            find_reference_point(&[], Tolerance::default()),
            Err(ReconcileError::NoGeometry)
        );
    }

    #[test]
    fn test_majority_point_wins() {
        let lines = [
            MarkerLine::new(Point::new(0.0, 0.0), Point::new(5.0, 0.0), Rgb::new(255, 0, 0)),
            MarkerLine::new(Point::new(0.0, 0.0), Point::new(0.0, 5.0), Rgb::new(0, 0, 255)),
            MarkerLine::new(Point::new(0.0, 0.0), Point::new(-5.0, 0.0), Rgb::new(0, 255, 0)),
        ];
        let point = find_reference_point(&lines, Tolerance::default()).unwrap();
        assert_eq!(point, Point::new(0.0, 0.0));
    }

    #[test]
    fn test_points_within_tolerance_cluster() {
        let lines = [
            line(1.0, 1.0, 9.0, 9.0),
            line(1.0000009, 0.9999991, 7.0, 7.0),
            line(8.0, 8.0, 1.0000005, 1.0),
        ];
        let point = find_reference_point(&lines, Tolerance::default()).unwrap();
        // the first-seen representative is reported, not an average
        assert_eq!(point, Point::new(1.0, 1.0));
    }

    #[test]
    fn test_points_beyond_tolerance_do_not_cluster() {
        let lines = [
            line(1.0, 1.0, 9.0, 9.0),
            line(1.000002, 1.0, 9.0, 9.0),
        ];
        let point = find_reference_point(&lines, Tolerance::default()).unwrap();
        assert_eq!(point, Point::new(9.0, 9.0));
    }

    #[test]
    fn test_tie_resolves_to_first_seen() {
        let lines = [line(3.0, 3.0, 4.0, 4.0), line(4.0, 4.0, 3.0, 3.0)];
        let point = find_reference_point(&lines, Tolerance::default()).unwrap();
        assert_eq!(point, Point::new(3.0, 3.0));
    }

    #[test]
    fn test_single_line_picks_start() {
        let lines = [line(2.0, 0.0, 0.0, 2.0)];
        let point = find_reference_point(&lines, Tolerance::default()).unwrap();
        assert_eq!(point, Point::new(2.0, 0.0));
    }

    #[test]
    fn test_custom_tolerance_widens_clusters() {
        let lines = [line(0.0, 0.0, 5.0, 5.0), line(0.1, 0.1, 6.0, 6.0)];

        let strict = find_reference_point(&lines, Tolerance::default()).unwrap();
        assert_eq!(strict, Point::new(0.0, 0.0));

        let loose = find_reference_point(&lines, Tolerance::new(0.2)).unwrap();
        assert_eq!(loose, Point::new(0.0, 0.0));
        let lines = [line(5.0, 5.0, 0.0, 0.0), line(0.1, 0.1, 6.0, 6.0)];
        let loose = find_reference_point(&lines, Tolerance::new(0.2)).unwrap();
        assert_eq!(loose, Point::new(0.0, 0.0));
    }

    #[test]
    fn test_far_endpoint_orientation() {
        let tolerance = Tolerance::default();
        let reference = Point::new(5.0, 5.0);

        let forward = line(5.0, 5.0, 10.0, 5.0);
        assert_eq!(forward.far_endpoint(reference, tolerance), Some(Point::new(10.0, 5.0)));

        let reversed = line(10.0, 5.0, 5.0, 5.0);
        assert_eq!(reversed.far_endpoint(reference, tolerance), Some(Point::new(10.0, 5.0)));
    }

    #[test]
    fn test_far_endpoint_ambiguous() {
        let tolerance = Tolerance::default();
        let reference = Point::new(5.0, 5.0);

        let detached = line(0.0, 0.0, 1.0, 1.0);
        assert_eq!(detached.far_endpoint(reference, tolerance), None);

        let degenerate = line(5.0, 5.0, 5.0, 5.0);
        assert_eq!(degenerate.far_endpoint(reference, tolerance), None);
    }
}
