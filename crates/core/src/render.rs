//! Hotspot rendering: link resolution, the overlay model, SVG emission, and
//! the pointer hover model.
//!
//! The overlay is drawn in a vector layer whose view box is exactly the
//! diagram's native pixel space, so stored geometry is emitted unchanged and
//! the browser does the scaling. Rendering is a pure function of its inputs.

use serde::Serialize;

use crate::filter::{self, FilterExpression};
use crate::geometry::{points_attr, DiagramSize, Point, Polygon};
use crate::hotspot::{LinkType, ShapeType};
use crate::types::DbId;

/// Tooltip offset from the pointer, in screen pixels.
pub const TOOLTIP_OFFSET_PX: f64 = 12.0;

/// Tooltip text for hotspots with a blank label.
pub const FALLBACK_LABEL: &str = "Hotspot";

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// A stored hotspot joined with the slug of whatever it links to.
///
/// Slugs are `None` when the link column is empty, including when the target
/// was deleted after the hotspot was created.
#[derive(Debug, Clone, PartialEq)]
pub struct HotspotSource {
    pub id: DbId,
    pub label: String,
    pub shape_type: ShapeType,
    pub points: serde_json::Value,
    pub link_type: LinkType,
    pub part_slug: Option<String>,
    pub part_set_slug: Option<String>,
    pub category_slug: Option<String>,
    pub filter_json: Option<serde_json::Value>,
}

// ---------------------------------------------------------------------------
// Link resolution
// ---------------------------------------------------------------------------

/// Storefront path of a part detail page.
pub fn part_href(slug: &str) -> String {
    format!("/parts/{slug}")
}

/// Storefront path of a part-listing page filtered by `expr`.
pub fn filter_href(expr: &FilterExpression) -> String {
    format!("/parts?f={}", filter::encode(expr))
}

/// Resolve the navigation target of a hotspot, or `None` if the link cannot
/// be followed.
pub fn resolve_href(source: &HotspotSource) -> Option<String> {
    let non_empty = |s: &Option<String>| s.as_deref().filter(|s| !s.is_empty()).map(str::to_string);
    match source.link_type {
        LinkType::Part => non_empty(&source.part_slug).map(|s| part_href(&s)),
        LinkType::Set => non_empty(&source.part_set_slug).map(|s| format!("/sets/{s}")),
        LinkType::Category => {
            non_empty(&source.category_slug).map(|s| format!("/categories/{s}"))
        }
        LinkType::Filter => source
            .filter_json
            .as_ref()
            .and_then(FilterExpression::from_value)
            .map(|expr| filter_href(&expr)),
    }
}

// ---------------------------------------------------------------------------
// Overlay model
// ---------------------------------------------------------------------------

/// One drawable, possibly clickable, overlay region.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    pub id: DbId,
    pub label: String,
    /// SVG `points` attribute in diagram pixel space.
    pub points: String,
    pub href: Option<String>,
    pub interactive: bool,
    #[serde(skip)]
    vertices: Vec<Point>,
}

impl Region {
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }
}

/// Overlay for one diagram.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedDiagram {
    pub view_box: String,
    pub width: u32,
    pub height: u32,
    pub image_url: String,
    pub regions: Vec<Region>,
    /// Hotspots that produced no region (empty geometry or unsupported shape).
    #[serde(skip)]
    pub dropped: usize,
}

impl RenderedDiagram {
    /// Regions that render but have no navigation target.
    pub fn dangling(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter().filter(|r| !r.interactive)
    }

    /// Topmost region containing a diagram-space point. Later regions are
    /// drawn over earlier ones.
    pub fn hit_test(&self, x: f64, y: f64) -> Option<&Region> {
        self.regions.iter().rev().find(|r| {
            Polygon::new(r.vertices.clone())
                .map(|p| p.contains(x, y))
                .unwrap_or(false)
        })
    }
}

/// Render the overlay for a diagram and its hotspots, preserving input order.
///
/// Polygons whose geometry yields no usable vertex are dropped, as are
/// `RECT`/`CIRCLE` hotspots. Hotspots whose link cannot be resolved are kept
/// as non-interactive regions.
pub fn render_diagram(
    size: DiagramSize,
    image_url: impl Into<String>,
    hotspots: &[HotspotSource],
) -> RenderedDiagram {
    let mut regions = Vec::with_capacity(hotspots.len());
    let mut dropped = 0;

    for source in hotspots {
        if source.shape_type != ShapeType::Polygon {
            dropped += 1;
            continue;
        }
        let vertices: Vec<Point> = source
            .points
            .as_array()
            .map(|arr| arr.iter().filter_map(Point::from_value).collect())
            .unwrap_or_default();
        if vertices.is_empty() {
            dropped += 1;
            continue;
        }
        let href = resolve_href(source);
        regions.push(Region {
            id: source.id,
            label: source.label.clone(),
            points: points_attr(&vertices),
            interactive: href.is_some(),
            href,
            vertices,
        });
    }

    RenderedDiagram {
        view_box: size.view_box(),
        width: size.width_px,
        height: size.height_px,
        image_url: image_url.into(),
        regions,
        dropped,
    }
}

// ---------------------------------------------------------------------------
// SVG
// ---------------------------------------------------------------------------

/// Escape text for use in XML attribute values and character data.
pub fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Emit the SVG overlay. Linked regions are wrapped in `<a href>`.
pub fn render_svg(diagram: &RenderedDiagram) -> String {
    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{}" preserveAspectRatio="none">"#,
        diagram.view_box
    );
    for region in &diagram.regions {
        let label = xml_escape(&region.label);
        let polygon = format!(
            r#"<polygon data-hotspot-id="{}" points="{}" vector-effect="non-scaling-stroke" stroke-width="2"><title>{label}</title></polygon>"#,
            region.id, region.points
        );
        match &region.href {
            Some(href) => svg.push_str(&format!(
                r#"<a href="{}" aria-label="{label}">{polygon}</a>"#,
                xml_escape(href)
            )),
            None => svg.push_str(&polygon),
        }
    }
    svg.push_str("</svg>");
    svg
}

// ---------------------------------------------------------------------------
// Hover
// ---------------------------------------------------------------------------

/// Tooltip shown next to the pointer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tooltip {
    pub text: String,
    pub left: f64,
    pub top: f64,
}

/// Pointer hover state over the overlay. Presentational only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HoverState {
    hovered: Option<DbId>,
    tooltip: Option<Tooltip>,
}

impl HoverState {
    pub fn enter(&mut self, id: DbId, label: &str, client_x: f64, client_y: f64) {
        let text = if label.trim().is_empty() {
            FALLBACK_LABEL
        } else {
            label
        };
        self.hovered = Some(id);
        self.tooltip = Some(Tooltip {
            text: text.to_string(),
            left: client_x + TOOLTIP_OFFSET_PX,
            top: client_y + TOOLTIP_OFFSET_PX,
        });
    }

    /// Track the pointer. Has no effect unless a tooltip is showing.
    pub fn pointer_move(&mut self, client_x: f64, client_y: f64) {
        if let Some(tooltip) = self.tooltip.as_mut() {
            tooltip.left = client_x + TOOLTIP_OFFSET_PX;
            tooltip.top = client_y + TOOLTIP_OFFSET_PX;
        }
    }

    pub fn leave(&mut self) {
        self.hovered = None;
        self.tooltip = None;
    }

    pub fn hovered(&self) -> Option<DbId> {
        self.hovered
    }

    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.tooltip.as_ref()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
