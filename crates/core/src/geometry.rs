//! Diagram coordinate space, polygon geometry, and the two coordinate
//! transforms shared by the hotspot editor and the hotspot renderer.
//!
//! All stored hotspot geometry lives in the diagram's native pixel space
//! (`width_px × height_px`). The editor maps on-screen clicks *into* that
//! space with [`screen_to_diagram`]; the renderer never rescales geometry and
//! instead relies on a view box of the same size. [`diagram_to_screen`] is the
//! explicit inverse, used for hit testing and tooltip placement.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// A polygon needs at least this many vertices.
pub const MIN_POLYGON_POINTS: usize = 3;

/// Upper bound on the number of vertices accepted for a single hotspot.
pub const MAX_POLYGON_POINTS: usize = 500;

// ---------------------------------------------------------------------------
// Points
// ---------------------------------------------------------------------------

/// A vertex in diagram pixel space. Serialized as a `[x, y]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[i32; 2]", into = "[i32; 2]")]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Parse a `[x, y, ...]` JSON array. Extra elements are ignored and
    /// fractional values are rounded to the nearest pixel.
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        let arr = value.as_array()?;
        if arr.len() < 2 {
            return None;
        }
        let x = arr[0].as_f64().filter(|v| v.is_finite())?;
        let y = arr[1].as_f64().filter(|v| v.is_finite())?;
        Some(Self::new(round_px(x), round_px(y)))
    }
}

impl From<[i32; 2]> for Point {
    fn from([x, y]: [i32; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Point> for [i32; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

fn round_px(v: f64) -> i32 {
    v.round().clamp(i32::MIN as f64, i32::MAX as f64) as i32
}

/// Serialize vertices into the `"x,y x,y ..."` form used by SVG `points`.
pub fn points_attr(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lenient variant of [`points_attr`] for stored JSON geometry.
///
/// Non-array input yields an empty string; entries that are not at least two
/// numbers are skipped rather than producing a malformed shape.
pub fn points_attr_from_value(value: &serde_json::Value) -> String {
    let Some(arr) = value.as_array() else {
        return String::new();
    };
    let points: Vec<Point> = arr.iter().filter_map(Point::from_value).collect();
    points_attr(&points)
}

/// Parse submitted polygon geometry, rejecting anything that is not a list
/// of at least [`MIN_POLYGON_POINTS`] numeric pairs.
pub fn parse_polygon_points(value: Option<&serde_json::Value>) -> Result<Vec<Point>, CoreError> {
    let arr = value
        .and_then(|v| v.as_array())
        .filter(|a| a.len() >= MIN_POLYGON_POINTS)
        .ok_or_else(|| CoreError::Validation("polygon needs at least 3 points".to_string()))?;

    if arr.len() > MAX_POLYGON_POINTS {
        return Err(CoreError::Validation(format!(
            "polygon has {} points, maximum is {MAX_POLYGON_POINTS}",
            arr.len()
        )));
    }

    arr.iter()
        .enumerate()
        .map(|(i, item)| {
            Point::from_value(item).ok_or_else(|| {
                CoreError::Validation(format!("points[{i}] must be a pair of numbers"))
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Coordinate spaces
// ---------------------------------------------------------------------------

/// Native pixel dimensions of a diagram image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramSize {
    pub width_px: u32,
    pub height_px: u32,
}

impl DiagramSize {
    pub fn new(width_px: u32, height_px: u32) -> Result<Self, CoreError> {
        if width_px == 0 || height_px == 0 {
            return Err(CoreError::Validation(format!(
                "diagram dimensions must be positive, got {width_px}x{height_px}"
            )));
        }
        Ok(Self {
            width_px,
            height_px,
        })
    }

    /// Build from nullable stored dimensions, substituting `fallback_px` for
    /// any missing or non-positive side.
    pub fn or_fallback(width_px: Option<i32>, height_px: Option<i32>, fallback_px: u32) -> Self {
        let side = |v: Option<i32>| {
            v.and_then(|n| u32::try_from(n).ok())
                .filter(|n| *n > 0)
                .unwrap_or(fallback_px.max(1))
        };
        Self {
            width_px: side(width_px),
            height_px: side(height_px),
        }
    }

    /// SVG `viewBox` value covering exactly the native pixel space.
    pub fn view_box(&self) -> String {
        format!("0 0 {} {}", self.width_px, self.height_px)
    }
}

/// On-screen bounding rectangle of the displayed image, in layout pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ScreenRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    fn ensure_drawable(&self) -> Result<(), CoreError> {
        let ok = self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0;
        if ok {
            Ok(())
        } else {
            Err(CoreError::Validation(format!(
                "rendered image has no usable size ({}x{})",
                self.width, self.height
            )))
        }
    }
}

/// Map a pointer position (client coordinates) into diagram pixel space.
///
/// Scales by `diagram_dimension / rendered_dimension` on each axis and rounds
/// to the nearest whole pixel.
pub fn screen_to_diagram(
    client_x: f64,
    client_y: f64,
    rect: &ScreenRect,
    size: DiagramSize,
) -> Result<Point, CoreError> {
    rect.ensure_drawable()?;
    if !client_x.is_finite() || !client_y.is_finite() {
        return Err(CoreError::Validation(
            "pointer position must be finite".to_string(),
        ));
    }
    let x = (client_x - rect.left) / rect.width * f64::from(size.width_px);
    let y = (client_y - rect.top) / rect.height * f64::from(size.height_px);
    Ok(Point::new(round_px(x), round_px(y)))
}

/// Map a diagram-space point back onto the screen rectangle.
pub fn diagram_to_screen(
    point: Point,
    rect: &ScreenRect,
    size: DiagramSize,
) -> Result<(f64, f64), CoreError> {
    rect.ensure_drawable()?;
    let x = rect.left + f64::from(point.x) / f64::from(size.width_px) * rect.width;
    let y = rect.top + f64::from(point.y) / f64::from(size.height_px) * rect.height;
    Ok((x, y))
}

// ---------------------------------------------------------------------------
// Polygon
// ---------------------------------------------------------------------------

/// A closed polygon with at least [`MIN_POLYGON_POINTS`] vertices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Polygon(Vec<Point>);

impl Polygon {
    pub fn new(points: Vec<Point>) -> Result<Self, CoreError> {
        if points.len() < MIN_POLYGON_POINTS {
            return Err(CoreError::Validation(
                "polygon needs at least 3 points".to_string(),
            ));
        }
        Ok(Self(points))
    }

    pub fn points(&self) -> &[Point] {
        &self.0
    }

    pub fn into_points(self) -> Vec<Point> {
        self.0
    }

    pub fn to_points_attr(&self) -> String {
        points_attr(&self.0)
    }

    /// Even-odd ray-casting test. Points exactly on an edge may fall on
    /// either side.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let pts = &self.0;
        let mut inside = false;
        let mut j = pts.len() - 1;
        for i in 0..pts.len() {
            let (xi, yi) = (f64::from(pts[i].x), f64::from(pts[i].y));
            let (xj, yj) = (f64::from(pts[j].x), f64::from(pts[j].y));
            if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
                inside = !inside;
            }
            j = i;
        }
        inside
    }

    /// Absolute area via the shoelace formula.
    pub fn area(&self) -> f64 {
        let pts = &self.0;
        let mut twice = 0i64;
        for i in 0..pts.len() {
            let a = pts[i];
            let b = pts[(i + 1) % pts.len()];
            twice += i64::from(a.x) * i64::from(b.y) - i64::from(b.x) * i64::from(a.y);
        }
        (twice as f64 / 2.0).abs()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn square() -> Polygon {
        Polygon::new(vec![
            Point::new(0, 0),
            Point::new(10, 0),
            Point::new(10, 10),
            Point::new(0, 10),
        ])
        .unwrap()
    }

    // -- Point parsing ------------------------------------------------------

    #[test]
    fn point_serializes_as_pair() {
        assert_eq!(serde_json::to_value(Point::new(3, 4)).unwrap(), json!([3, 4]));
        let p: Point = serde_json::from_value(json!([7, 8])).unwrap();
        assert_eq!(p, Point::new(7, 8));
    }

    #[test]
    fn point_from_value_rounds_fractions() {
        assert_eq!(Point::from_value(&json!([1.4, 2.6])), Some(Point::new(1, 3)));
    }

    #[test]
    fn point_from_value_rejects_short_or_non_numeric() {
        assert_eq!(Point::from_value(&json!([1])), None);
        assert_eq!(Point::from_value(&json!(["a", 2])), None);
        assert_eq!(Point::from_value(&json!({"x": 1, "y": 2})), None);
    }

    // -- points_attr --------------------------------------------------------

    #[test]
    fn points_attr_joins_pairs() {
        let pts = [Point::new(0, 0), Point::new(10, 0), Point::new(10, 10)];
        assert_eq!(points_attr(&pts), "0,0 10,0 10,10");
    }

    #[test]
    fn points_attr_from_value_skips_malformed_entries() {
        let v = json!([[0, 0], [5], "x", [10, 0, 99], [10, 10]]);
        assert_eq!(points_attr_from_value(&v), "0,0 10,0 10,10");
    }

    #[test]
    fn points_attr_from_value_non_array_is_empty() {
        assert_eq!(points_attr_from_value(&json!(null)), "");
        assert_eq!(points_attr_from_value(&json!({"a": 1})), "");
    }

    // -- parse_polygon_points -----------------------------------------------

    #[test]
    fn parse_polygon_points_accepts_triangle() {
        let v = json!([[0, 0], [10, 0], [10, 10]]);
        let pts = parse_polygon_points(Some(&v)).unwrap();
        assert_eq!(pts.len(), 3);
    }

    #[test]
    fn parse_polygon_points_rejects_two_points() {
        let v = json!([[0, 0], [10, 0]]);
        let err = parse_polygon_points(Some(&v)).unwrap_err();
        assert!(err.to_string().contains("at least 3 points"));
    }

    #[test]
    fn parse_polygon_points_rejects_missing_and_non_array() {
        assert!(parse_polygon_points(None).is_err());
        assert!(parse_polygon_points(Some(&json!("0,0 1,1 2,2"))).is_err());
    }

    #[test]
    fn parse_polygon_points_rejects_malformed_entry() {
        let v = json!([[0, 0], [10, 0], [10]]);
        let err = parse_polygon_points(Some(&v)).unwrap_err();
        assert!(err.to_string().contains("points[2]"));
    }

    #[test]
    fn parse_polygon_points_rejects_too_many() {
        let items: Vec<serde_json::Value> =
            (0..=MAX_POLYGON_POINTS as i32).map(|i| json!([i, i])).collect();
        let v = serde_json::Value::Array(items);
        assert!(parse_polygon_points(Some(&v)).is_err());
    }

    // -- DiagramSize --------------------------------------------------------

    #[test]
    fn diagram_size_rejects_zero() {
        assert!(DiagramSize::new(0, 100).is_err());
        assert!(DiagramSize::new(100, 0).is_err());
    }

    #[test]
    fn diagram_size_fallback_fills_missing_sides() {
        let size = DiagramSize::or_fallback(Some(800), None, 1000);
        assert_eq!(size, DiagramSize { width_px: 800, height_px: 1000 });
        let size = DiagramSize::or_fallback(Some(-5), Some(0), 1000);
        assert_eq!(size, DiagramSize { width_px: 1000, height_px: 1000 });
    }

    #[test]
    fn view_box_matches_native_size() {
        assert_eq!(DiagramSize::new(1600, 900).unwrap().view_box(), "0 0 1600 900");
    }

    // -- Coordinate transforms ----------------------------------------------

    #[test]
    fn screen_to_diagram_scales_by_ratio() {
        let size = DiagramSize::new(2000, 1000).unwrap();
        // Image displayed at half size, offset on the page.
        let rect = ScreenRect::new(100.0, 50.0, 1000.0, 500.0);
        let p = screen_to_diagram(600.0, 300.0, &rect, size).unwrap();
        assert_eq!(p, Point::new(1000, 500));
    }

    #[test]
    fn screen_to_diagram_rounds_to_nearest_pixel() {
        let size = DiagramSize::new(1000, 1000).unwrap();
        let rect = ScreenRect::new(0.0, 0.0, 300.0, 300.0);
        let p = screen_to_diagram(100.0, 200.0, &rect, size).unwrap();
        assert_eq!(p, Point::new(333, 667));
    }

    #[test]
    fn screen_to_diagram_rejects_collapsed_rect() {
        let size = DiagramSize::new(1000, 1000).unwrap();
        let rect = ScreenRect::new(0.0, 0.0, 0.0, 300.0);
        assert!(screen_to_diagram(1.0, 1.0, &rect, size).is_err());
    }

    #[test]
    fn transforms_are_inverse_within_a_pixel() {
        let size = DiagramSize::new(1234, 777).unwrap();
        let rect = ScreenRect::new(13.0, 27.0, 617.0, 388.5);
        let original = Point::new(400, 250);
        let (sx, sy) = diagram_to_screen(original, &rect, size).unwrap();
        let back = screen_to_diagram(sx, sy, &rect, size).unwrap();
        assert_eq!(back, original);
    }

    // -- Polygon ------------------------------------------------------------

    #[test]
    fn polygon_requires_three_points() {
        let err = Polygon::new(vec![Point::new(0, 0), Point::new(1, 1)]).unwrap_err();
        assert!(err.to_string().contains("at least 3 points"));
    }

    #[test]
    fn polygon_contains_inside_and_outside() {
        let sq = square();
        assert!(sq.contains(5.0, 5.0));
        assert!(!sq.contains(15.0, 5.0));
        assert!(!sq.contains(-1.0, -1.0));
    }

    #[test]
    fn polygon_area_is_orientation_independent() {
        assert_eq!(square().area(), 100.0);
        let mut reversed = square().into_points();
        reversed.reverse();
        assert_eq!(Polygon::new(reversed).unwrap().area(), 100.0);
    }
}
