//! Classification of artwork paths as marker lines.

use symlib_core::{color::Color, marker::MarkerLine};
use symlib_parser::{ArtworkElement, parse_path_data};

/// How an artwork element relates to marker geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum PathClass {
    /// Regular artwork; kept as symbol content.
    NotMetadata,
    /// A marker line; removed from the symbol content.
    Line(MarkerLine),
    /// A marker candidate that could not be read; kept as symbol content.
    Malformed(String),
}

/// Classifies one artwork element.
///
/// A marker line is an unfilled, stroked `<path>` whose data resolves to
/// exactly two segments. Its endpoints are those of the last segment, so
/// `M 5 5 L 10 5` yields the line `(5,5)-(10,5)`.
pub fn classify_path(element: &ArtworkElement) -> PathClass {
    if element.name() != "path" {
        return PathClass::NotMetadata;
    }

    let filled = element
        .attribute("fill")
        .is_some_and(|fill| !fill.is_empty() && fill != "none");
    if filled {
        return PathClass::NotMetadata;
    }

    let Some(stroke) = element
        .attribute("stroke")
        .filter(|stroke| !stroke.trim().is_empty() && *stroke != "none")
    else {
        return PathClass::NotMetadata;
    };
    let Some(data) = element.attribute("d") else {
        return PathClass::NotMetadata;
    };

    let segments = match parse_path_data(data) {
        Ok(segments) => segments,
        Err(err) => return PathClass::Malformed(err.to_string()),
    };
    let [_, last] = segments.as_slice() else {
        return PathClass::NotMetadata;
    };

    match Color::new(stroke) {
        Ok(color) => PathClass::Line(MarkerLine::new(last.start(), last.end(), color.to_rgb())),
        Err(err) => PathClass::Malformed(err),
    }
}

#[cfg(test)]
mod tests {
    use symlib_core::{color::Rgb, geometry::Point};

    use super::*;

    fn path(d: &str) -> ArtworkElement {
        ArtworkElement::new("path").with_attribute("d", d)
    }

    #[test]
    fn test_stroked_two_segment_path_is_a_line() {
        let element = path("M 5 5 L 10 5").with_attribute("stroke", "#f00");
        assert_eq!(
            classify_path(&element),
            PathClass::Line(MarkerLine::new(
                Point::new(5.0, 5.0),
                Point::new(10.0, 5.0),
                Rgb::new(255, 0, 0)
            ))
        );
    }

    #[test]
    fn test_fill_none_is_eligible() {
        let element = path("M0 0h3")
            .with_attribute("stroke", "#009999")
            .with_attribute("fill", "none");
        assert!(matches!(classify_path(&element), PathClass::Line(_)));

        let element = path("M0 0h3")
            .with_attribute("stroke", "#009999")
            .with_attribute("fill", "");
        assert!(matches!(classify_path(&element), PathClass::Line(_)));
    }

    #[test]
    fn test_filled_path_is_not_metadata() {
        let element = path("M0 0L1 1")
            .with_attribute("stroke", "#f00")
            .with_attribute("fill", "#000");
        assert_eq!(classify_path(&element), PathClass::NotMetadata);
    }

    #[test]
    fn test_unstroked_path_is_not_metadata() {
        assert_eq!(classify_path(&path("M0 0L1 1")), PathClass::NotMetadata);
        let element = path("M0 0L1 1").with_attribute("stroke", "none");
        assert_eq!(classify_path(&element), PathClass::NotMetadata);
    }

    #[test]
    fn test_segment_count_must_be_two() {
        let element = path("M0 0L1 1L2 2").with_attribute("stroke", "#000");
        assert_eq!(classify_path(&element), PathClass::NotMetadata);

        // an implicit line after the move-to counts as a segment
        let element = path("M0 0 1 1").with_attribute("stroke", "#000");
        assert!(matches!(classify_path(&element), PathClass::Line(_)));
    }

    #[test]
    fn test_other_elements_are_not_metadata() {
        let element = ArtworkElement::new("line").with_attribute("stroke", "#f00");
        assert_eq!(classify_path(&element), PathClass::NotMetadata);
    }

    #[test]
    fn test_malformed_candidates() {
        let element = path("M0 0L").with_attribute("stroke", "#000");
        assert!(matches!(classify_path(&element), PathClass::Malformed(_)));

        let element = path("M0 0L1 1").with_attribute("stroke", "bogus");
        assert!(matches!(classify_path(&element), PathClass::Malformed(_)));
    }
}
