//! Hotspot model: shape and link-type enums, the [`HotspotLink`] tagged
//! union, and validation of submitted hotspot payloads.
//!
//! Storage keeps four nullable link columns gated by a `link_type`
//! discriminator. At this boundary the link is a proper sum type, and
//! [`HotspotLink::into_columns`] is the only way the flat form gets built, so
//! at most one column is ever populated.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::filter::FilterExpression;
use crate::geometry::{parse_polygon_points, Point};
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Sort order applied when a request omits `sortOrder`.
pub const DEFAULT_SORT_ORDER: i32 = 0;

/// Maximum label length after trimming.
pub const MAX_LABEL_LENGTH: usize = 200;

// ---------------------------------------------------------------------------
// Shape type
// ---------------------------------------------------------------------------

/// Geometry kind of a hotspot.
///
/// Only `Polygon` has a geometry encoding. `Rect` and `Circle` are accepted
/// when reading stored rows but are never produced by ingestion and render
/// nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ShapeType {
    Polygon,
    Rect,
    Circle,
}

impl ShapeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Polygon => "POLYGON",
            Self::Rect => "RECT",
            Self::Circle => "CIRCLE",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "POLYGON" => Some(Self::Polygon),
            "RECT" => Some(Self::Rect),
            "CIRCLE" => Some(Self::Circle),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Link type
// ---------------------------------------------------------------------------

/// Discriminator for what a hotspot links to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LinkType {
    Part,
    Set,
    Category,
    Filter,
}

/// All valid link type strings.
const VALID_LINK_TYPES: &[&str] = &["PART", "SET", "CATEGORY", "FILTER"];

impl LinkType {
    pub const ALL: [LinkType; 4] = [Self::Part, Self::Set, Self::Category, Self::Filter];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Part => "PART",
            Self::Set => "SET",
            Self::Category => "CATEGORY",
            Self::Filter => "FILTER",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "PART" => Some(Self::Part),
            "SET" => Some(Self::Set),
            "CATEGORY" => Some(Self::Category),
            "FILTER" => Some(Self::Filter),
            _ => None,
        }
    }

    /// Name of the request field that must accompany this link type.
    pub fn companion_field(&self) -> &'static str {
        match self {
            Self::Part => "partId",
            Self::Set => "partSetId",
            Self::Category => "categoryId",
            Self::Filter => "filterJson",
        }
    }
}

// ---------------------------------------------------------------------------
// HotspotLink
// ---------------------------------------------------------------------------

/// What a hotspot navigates to. Exactly one target, by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HotspotLink {
    Part(DbId),
    Set(DbId),
    Category(DbId),
    Filter(FilterExpression),
}

/// Flat storage form of a [`HotspotLink`]: one populated column, the rest
/// explicitly `None`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LinkColumns {
    pub part_id: Option<DbId>,
    pub part_set_id: Option<DbId>,
    pub category_id: Option<DbId>,
    pub filter_json: Option<serde_json::Value>,
}

impl HotspotLink {
    pub fn link_type(&self) -> LinkType {
        match self {
            Self::Part(_) => LinkType::Part,
            Self::Set(_) => LinkType::Set,
            Self::Category(_) => LinkType::Category,
            Self::Filter(_) => LinkType::Filter,
        }
    }

    pub fn into_columns(self) -> LinkColumns {
        match self {
            Self::Part(id) => LinkColumns {
                part_id: Some(id),
                ..LinkColumns::default()
            },
            Self::Set(id) => LinkColumns {
                part_set_id: Some(id),
                ..LinkColumns::default()
            },
            Self::Category(id) => LinkColumns {
                category_id: Some(id),
                ..LinkColumns::default()
            },
            Self::Filter(expr) => LinkColumns {
                filter_json: Some(expr.to_json()),
                ..LinkColumns::default()
            },
        }
    }

    /// Rebuild a link from stored columns, reading only the column that
    /// matches `link_type`. Returns `None` when that column is empty, e.g.
    /// after the referenced record was deleted.
    pub fn from_columns(link_type: LinkType, columns: &LinkColumns) -> Option<Self> {
        match link_type {
            LinkType::Part => columns.part_id.map(Self::Part),
            LinkType::Set => columns.part_set_id.map(Self::Set),
            LinkType::Category => columns.category_id.map(Self::Category),
            LinkType::Filter => columns
                .filter_json
                .as_ref()
                .and_then(FilterExpression::from_value)
                .map(Self::Filter),
        }
    }
}

// ---------------------------------------------------------------------------
// Request validation
// ---------------------------------------------------------------------------

/// Hotspot create/update body as it arrives on the wire.
///
/// Every field is optional so that a missing one is reported by
/// [`validate_hotspot_request`] by name. `points` and `filterJson` stay raw
/// JSON for the same reason.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotspotRequest {
    pub label: Option<String>,
    pub points: Option<serde_json::Value>,
    pub sort_order: Option<i32>,
    pub link_type: Option<String>,
    pub part_id: Option<String>,
    pub part_set_id: Option<String>,
    pub category_id: Option<String>,
    pub filter_json: Option<serde_json::Value>,
}

/// A validated hotspot ready to persist.
#[derive(Debug, Clone, PartialEq)]
pub struct HotspotDraft {
    pub label: String,
    pub shape_type: ShapeType,
    pub points: Vec<Point>,
    pub sort_order: i32,
    pub link: HotspotLink,
}

/// Validate a submitted hotspot. Checks run in order: label, points,
/// link type, companion field. The first failure is returned.
pub fn validate_hotspot_request(req: &HotspotRequest) -> Result<HotspotDraft, CoreError> {
    let label = req
        .label
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| CoreError::Validation("missing label".to_string()))?;
    if label.chars().count() > MAX_LABEL_LENGTH {
        return Err(CoreError::Validation(format!(
            "label must be at most {MAX_LABEL_LENGTH} characters"
        )));
    }

    let points = parse_polygon_points(req.points.as_ref())?;

    let link_type = req
        .link_type
        .as_deref()
        .and_then(LinkType::parse)
        .ok_or_else(|| {
            CoreError::Validation(format!(
                "unknown linkType. Must be one of: {}",
                VALID_LINK_TYPES.join(", ")
            ))
        })?;

    let link = match link_type {
        LinkType::Part => HotspotLink::Part(require_id("partId", req.part_id.as_deref())?),
        LinkType::Set => HotspotLink::Set(require_id("partSetId", req.part_set_id.as_deref())?),
        LinkType::Category => {
            HotspotLink::Category(require_id("categoryId", req.category_id.as_deref())?)
        }
        LinkType::Filter => {
            let value = req
                .filter_json
                .as_ref()
                .filter(|v| !v.is_null())
                .ok_or_else(|| CoreError::Validation("missing filterJson".to_string()))?;
            let expr = FilterExpression::from_value(value).ok_or_else(|| {
                CoreError::Validation("filterJson must be an object".to_string())
            })?;
            HotspotLink::Filter(expr)
        }
    };

    Ok(HotspotDraft {
        label: label.to_string(),
        shape_type: ShapeType::Polygon,
        points,
        sort_order: req.sort_order.unwrap_or(DEFAULT_SORT_ORDER),
        link,
    })
}

fn require_id(field: &str, value: Option<&str>) -> Result<DbId, CoreError> {
    let raw = value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| CoreError::Validation(format!("missing {field}")))?;
    raw.parse::<DbId>()
        .map_err(|_| CoreError::Validation(format!("invalid {field} '{raw}'")))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    const PART: &str = "8a3c2d4e-1f00-4b7a-9c6d-0e1f2a3b4c5d";

    fn request(body: serde_json::Value) -> HotspotRequest {
        serde_json::from_value(body).unwrap()
    }

    fn err_message(body: serde_json::Value) -> String {
        validate_hotspot_request(&request(body))
            .unwrap_err()
            .to_string()
    }

    // -- enums --------------------------------------------------------------

    #[test]
    fn link_type_parse_round_trip() {
        for lt in LinkType::ALL {
            assert_eq!(LinkType::parse(lt.as_str()), Some(lt));
        }
        assert_eq!(LinkType::parse("part"), None);
    }

    #[test]
    fn shape_type_parse_round_trip() {
        assert_eq!(ShapeType::parse("POLYGON"), Some(ShapeType::Polygon));
        assert_eq!(ShapeType::parse("RECT"), Some(ShapeType::Rect));
        assert_eq!(ShapeType::parse("CIRCLE"), Some(ShapeType::Circle));
        assert_eq!(ShapeType::parse("ELLIPSE"), None);
    }

    // -- HotspotLink columns -------------------------------------------------

    #[test]
    fn into_columns_populates_exactly_one() {
        let id = DbId::new_v4();
        let cases = [
            HotspotLink::Part(id),
            HotspotLink::Set(id),
            HotspotLink::Category(id),
            HotspotLink::Filter(FilterExpression::default()),
        ];
        for link in cases {
            let lt = link.link_type();
            let cols = link.into_columns();
            let populated = [
                cols.part_id.is_some(),
                cols.part_set_id.is_some(),
                cols.category_id.is_some(),
                cols.filter_json.is_some(),
            ];
            assert_eq!(populated.iter().filter(|b| **b).count(), 1, "{lt:?}");
            assert_eq!(HotspotLink::from_columns(lt, &cols).map(|l| l.link_type()), Some(lt));
        }
    }

    #[test]
    fn from_columns_reads_only_the_matching_column() {
        let cols = LinkColumns {
            part_id: Some(DbId::new_v4()),
            ..Default::default()
        };
        assert_eq!(HotspotLink::from_columns(LinkType::Category, &cols), None);
    }

    // -- validate_hotspot_request -------------------------------------------

    #[test]
    fn valid_part_hotspot() {
        let draft = validate_hotspot_request(&request(json!({
            "label": "  Kimme ",
            "points": [[0, 0], [10, 0], [10, 10]],
            "linkType": "PART",
            "partId": PART
        })))
        .unwrap();
        assert_eq!(draft.label, "Kimme");
        assert_eq!(draft.shape_type, ShapeType::Polygon);
        assert_eq!(draft.sort_order, DEFAULT_SORT_ORDER);
        assert_matches!(draft.link, HotspotLink::Part(id) if id.to_string() == PART);
    }

    #[test]
    fn missing_label_rejected() {
        assert!(err_message(json!({"label": "   "})).contains("missing label"));
        assert!(err_message(json!({})).contains("missing label"));
    }

    #[test]
    fn two_points_rejected() {
        let msg = err_message(json!({
            "label": "x",
            "points": [[0, 0], [10, 0]],
            "linkType": "PART",
            "partId": PART
        }));
        assert!(msg.contains("polygon needs at least 3 points"));
    }

    #[test]
    fn unknown_link_type_rejected() {
        let msg = err_message(json!({
            "label": "x",
            "points": [[0, 0], [10, 0], [10, 10]],
            "linkType": "URL"
        }));
        assert!(msg.contains("unknown linkType"));
    }

    #[test]
    fn missing_companion_fields_name_the_field() {
        let base = |lt: &str| {
            json!({"label": "x", "points": [[0, 0], [10, 0], [10, 10]], "linkType": lt})
        };
        assert!(err_message(base("PART")).contains("missing partId"));
        assert!(err_message(base("SET")).contains("missing partSetId"));
        assert!(err_message(base("CATEGORY")).contains("missing categoryId"));
        assert!(err_message(base("FILTER")).contains("missing filterJson"));
    }

    #[test]
    fn null_filter_json_is_missing() {
        let msg = err_message(json!({
            "label": "x",
            "points": [[0, 0], [10, 0], [10, 10]],
            "linkType": "FILTER",
            "filterJson": null
        }));
        assert!(msg.contains("missing filterJson"));
    }

    #[test]
    fn non_object_filter_json_rejected() {
        let msg = err_message(json!({
            "label": "x",
            "points": [[0, 0], [10, 0], [10, 10]],
            "linkType": "FILTER",
            "filterJson": "categorySlug=visier"
        }));
        assert!(msg.contains("must be an object"));
    }

    #[test]
    fn invalid_uuid_rejected() {
        let msg = err_message(json!({
            "label": "x",
            "points": [[0, 0], [10, 0], [10, 10]],
            "linkType": "SET",
            "partSetId": "p1"
        }));
        assert!(msg.contains("invalid partSetId"));
    }

    #[test]
    fn other_companion_fields_are_discarded() {
        let draft = validate_hotspot_request(&request(json!({
            "label": "x",
            "points": [[0, 0], [10, 0], [10, 10]],
            "linkType": "CATEGORY",
            "partId": PART,
            "categoryId": PART,
            "filterJson": {"categorySlug": "visier"}
        })))
        .unwrap();
        let cols = draft.link.into_columns();
        assert!(cols.part_id.is_none());
        assert!(cols.filter_json.is_none());
        assert!(cols.category_id.is_some());
    }

    #[test]
    fn filter_link_keeps_only_whitelisted_keys() {
        let draft = validate_hotspot_request(&request(json!({
            "label": "Visierteile",
            "points": [[0, 0], [10, 0], [10, 10]],
            "sortOrder": 10,
            "linkType": "FILTER",
            "filterJson": {"categorySlug": "visier", "inStock": true, "raw": "x"}
        })))
        .unwrap();
        assert_eq!(draft.sort_order, 10);
        assert_eq!(
            draft.link.into_columns().filter_json,
            Some(json!({"categorySlug": "visier", "inStock": true}))
        );
    }

    #[test]
    fn label_length_capped() {
        let msg = err_message(json!({"label": "x".repeat(MAX_LABEL_LENGTH + 1)}));
        assert!(msg.contains("at most"));
    }
}
