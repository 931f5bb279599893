//! SVG path data and view-box parsing.
//!
//! Path data is parsed with `winnow` into raw commands and then resolved into
//! absolute [`Segment`]s, counting segments the way a path object does: a
//! move-to is a segment, every extra coordinate pair after a move-to is an
//! implicit line, every parameter group of a drawing command is a segment,
//! and a close-path is a segment back to the start of the subpath.

use winnow::{
    Parser as _,
    ascii::{float, multispace0},
    combinator::{opt, preceded, repeat},
    error::{ContextError, ErrMode},
    token::one_of,
};

use symlib_core::geometry::{Point, ViewBox};

use crate::error::ParseError;

type Input<'src> = &'src str;
type IResult<O> = std::result::Result<O, ErrMode<ContextError>>;

const COMMAND_LETTERS: &str = "MmLlHhVvCcSsQqTtAaZz";

/// The drawing command a segment was produced by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Move,
    Line,
    HorizontalLine,
    VerticalLine,
    CubicCurve,
    SmoothCubicCurve,
    QuadraticCurve,
    SmoothQuadraticCurve,
    Arc,
    Close,
}

/// One resolved path segment with absolute endpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    kind: SegmentKind,
    start: Point,
    end: Point,
}

impl Segment {
    pub fn kind(&self) -> SegmentKind {
        self.kind
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }
}

#[derive(Debug)]
struct RawCommand {
    letter: char,
    params: Vec<f64>,
}

/// Parse an optional comma surrounded by optional whitespace
fn separator(input: &mut Input<'_>) -> IResult<()> {
    (multispace0, opt(','), multispace0)
        .void()
        .parse_next(input)
}

/// Parse a number preceded by an optional separator
fn number(input: &mut Input<'_>) -> IResult<f64> {
    preceded(separator, float).parse_next(input)
}

/// Parse an arc flag; flags may be written without separators (`a1 1 0 011 1`)
fn flag(input: &mut Input<'_>) -> IResult<f64> {
    preceded(separator, one_of(['0', '1']))
        .map(|c: char| if c == '1' { 1.0 } else { 0.0 })
        .parse_next(input)
}

/// Parse one elliptical arc parameter group
fn arc_group(input: &mut Input<'_>) -> IResult<[f64; 7]> {
    let (rx, ry, rotation, large_arc, sweep, x, y) =
        (number, number, number, flag, flag, number, number).parse_next(input)?;
    Ok([rx, ry, rotation, large_arc, sweep, x, y])
}

fn command(input: &mut Input<'_>) -> IResult<RawCommand> {
    let letter = preceded(multispace0, one_of(|c: char| COMMAND_LETTERS.contains(c)))
        .parse_next(input)?;

    let params = if matches!(letter, 'A' | 'a') {
        let groups: Vec<[f64; 7]> = repeat(0.., arc_group).parse_next(input)?;
        groups.into_iter().flatten().collect()
    } else {
        repeat(0.., number).parse_next(input)?
    };

    Ok(RawCommand { letter, params })
}

fn commands(input: &mut Input<'_>) -> IResult<Vec<RawCommand>> {
    let commands = repeat(0.., command).parse_next(input)?;
    multispace0.parse_next(input)?;
    Ok(commands)
}

fn arity(letter: char) -> usize {
    match letter.to_ascii_uppercase() {
        'M' | 'L' | 'T' => 2,
        'H' | 'V' => 1,
        'S' | 'Q' => 4,
        'C' => 6,
        'A' => 7,
        _ => 0,
    }
}

/// Parses SVG path data into absolute segments.
///
/// # Errors
///
/// Returns [`ParseError::PathData`] if the data is not syntactically valid
/// and [`ParseError::PathArity`] if a command has an incomplete parameter
/// group.
///
/// # Examples
///
/// ```
/// # use symlib_core::geometry::Point;
/// # use symlib_parser::{SegmentKind, parse_path_data};
/// let segments = parse_path_data("M5 5l5 0").unwrap();
/// assert_eq!(segments.len(), 2);
/// assert_eq!(segments[1].kind(), SegmentKind::Line);
/// assert_eq!(segments[1].start(), Point::new(5.0, 5.0));
/// assert_eq!(segments[1].end(), Point::new(10.0, 5.0));
/// ```
pub fn parse_path_data(data: &str) -> Result<Vec<Segment>, ParseError> {
    let raw = commands.parse(data).map_err(|err| ParseError::PathData {
        data: data.to_string(),
        offset: err.offset(),
    })?;

    let mut segments = Vec::new();
    let mut current = Point::default();
    let mut subpath_start = Point::default();

    for RawCommand { letter, params } in raw {
        let upper = letter.to_ascii_uppercase();
        let relative = letter.is_ascii_lowercase();
        let arity = arity(letter);

        if upper == 'Z' {
            if !params.is_empty() {
                return Err(ParseError::PathArity {
                    command: letter,
                    arity,
                    found: params.len(),
                });
            }
            segments.push(Segment {
                kind: SegmentKind::Close,
                start: current,
                end: subpath_start,
            });
            current = subpath_start;
            continue;
        }

        if params.is_empty() || params.len() % arity != 0 {
            return Err(ParseError::PathArity {
                command: letter,
                arity,
                found: params.len(),
            });
        }

        for (group_index, group) in params.chunks(arity).enumerate() {
            let kind = match upper {
                'M' if group_index == 0 => SegmentKind::Move,
                'M' | 'L' => SegmentKind::Line,
                'H' => SegmentKind::HorizontalLine,
                'V' => SegmentKind::VerticalLine,
                'C' => SegmentKind::CubicCurve,
                'S' => SegmentKind::SmoothCubicCurve,
                'Q' => SegmentKind::QuadraticCurve,
                'T' => SegmentKind::SmoothQuadraticCurve,
                _ => SegmentKind::Arc,
            };

            let end = match kind {
                SegmentKind::HorizontalLine => {
                    let x = if relative { current.x() + group[0] } else { group[0] };
                    Point::new(x, current.y())
                }
                SegmentKind::VerticalLine => {
                    let y = if relative { current.y() + group[0] } else { group[0] };
                    Point::new(current.x(), y)
                }
                _ => {
                    let target = Point::new(group[arity - 2], group[arity - 1]);
                    if relative {
                        current.add_point(target)
                    } else {
                        target
                    }
                }
            };

            segments.push(Segment {
                kind,
                start: current,
                end,
            });
            current = end;
            if kind == SegmentKind::Move {
                subpath_start = end;
            }
        }
    }

    Ok(segments)
}

/// Parses a `viewBox` attribute value into a [`ViewBox`].
///
/// # Errors
///
/// Returns [`ParseError::ViewBox`] unless the value is exactly four numbers
/// separated by whitespace and/or commas.
pub fn parse_view_box(value: &str) -> Result<ViewBox, ParseError> {
    let (min_x, min_y, width, height, _) = (number, number, number, number, multispace0)
        .parse(value)
        .map_err(|_: winnow::error::ParseError<_, ContextError>| {
            ParseError::ViewBox(value.to_string())
        })?;
    Ok(ViewBox::new(min_x, min_y, width, height))
}


#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    fn coordinate() -> impl Strategy<Value = f64> {
        -1000.0..1000.0f64
    }

    fn polyline() -> impl Strategy<Value = Vec<(f64, f64)>> {
        prop::collection::vec((coordinate(), coordinate()), 1..8)
    }

    fn check_implicit_lines(points: &[(f64, f64)]) -> Result<(), TestCaseError> {
        let data = points
            .iter()
            .map(|(x, y)| format!("{x},{y}"))
            .collect::<Vec<_>>()
            .join(" ");
        let segments = parse_path_data(&format!("M{data}")).unwrap();

        prop_assert_eq!(segments.len(), points.len());
        prop_assert_eq!(segments[0].kind(), SegmentKind::Move);
        prop_assert!(segments[1..].iter().all(|s| s.kind() == SegmentKind::Line));

        let (x, y) = points[points.len() - 1];
        let end = segments[segments.len() - 1].end();
        prop_assert!(approx_eq!(f64, end.x(), x, ulps = 2));
        prop_assert!(approx_eq!(f64, end.y(), y, ulps = 2));
        Ok(())
    }

    fn check_segments_are_contiguous(points: &[(f64, f64)]) -> Result<(), TestCaseError> {
        let mut data = String::new();
        for (index, (x, y)) in points.iter().enumerate() {
            let command = if index == 0 { 'M' } else { 'L' };
            data.push_str(&format!("{command} {x} {y} "));
        }
        data.push('Z');
        let segments = parse_path_data(&data).unwrap();

        for pair in segments.windows(2) {
            prop_assert_eq!(pair[0].end(), pair[1].start());
        }
        let close = &segments[segments.len() - 1];
        prop_assert_eq!(close.kind(), SegmentKind::Close);
        prop_assert_eq!(close.end(), segments[0].end());
        Ok(())
    }

    proptest! {
        #[test]
        fn implicit_lines(points in polyline()) {
            check_implicit_lines(&points)?;
        }

        #[test]
        fn segments_are_contiguous(points in polyline()) {
            check_segments_are_contiguous(&points)?;
        }
    }
}
