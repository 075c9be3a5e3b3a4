//! Hotspot editor session: vertex capture, link-target selection, the FILTER
//! builder, and the single in-flight save.
//!
//! The editor owns no I/O. [`HotspotEditor::save`] hands back the payload to
//! submit and marks the session as saving; the host reports the outcome with
//! [`HotspotEditor::finish_save`].

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::filter::FilterExpression;
use crate::geometry::{points_attr, screen_to_diagram, DiagramSize, Point, ScreenRect, MIN_POLYGON_POINTS};
use crate::hotspot::LinkType;
use crate::types::DbId;

/// Label a new session starts with.
pub const DEFAULT_LABEL: &str = "Hotspot";

/// Sort order the editor submits for every hotspot it creates.
pub const EDITOR_SORT_ORDER: i32 = 10;

// ---------------------------------------------------------------------------
// Option feeds
// ---------------------------------------------------------------------------

/// One selectable link target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkOption {
    pub id: DbId,
    pub slug: String,
    pub label: String,
}

/// Candidate lists for the three id-based link types.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorOptions {
    pub parts: Vec<LinkOption>,
    pub sets: Vec<LinkOption>,
    pub categories: Vec<LinkOption>,
}

// ---------------------------------------------------------------------------
// Filter builder
// ---------------------------------------------------------------------------

/// Form fields for a FILTER link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterBuilder {
    pub category_slug: String,
    pub in_stock: bool,
    pub model_slug: String,
    pub variant_slug: String,
}

impl FilterBuilder {
    pub fn new(default_model_slug: Option<&str>) -> Self {
        Self {
            category_slug: String::new(),
            in_stock: true,
            model_slug: default_model_slug.unwrap_or_default().to_string(),
            variant_slug: String::new(),
        }
    }

    /// Assemble the expression. Slug fields are trimmed and omitted when
    /// blank; `inStock` is always written.
    pub fn build(&self) -> FilterExpression {
        let slug = |s: &str| Some(s.trim()).filter(|s| !s.is_empty()).map(str::to_string);
        FilterExpression {
            category_slug: slug(&self.category_slug),
            in_stock: Some(self.in_stock),
            model_slug: slug(&self.model_slug),
            variant_slug: slug(&self.variant_slug),
            ..FilterExpression::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Payload
// ---------------------------------------------------------------------------

/// Body posted to the hotspot ingestion endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HotspotPayload {
    pub label: String,
    pub points: Vec<Point>,
    pub sort_order: i32,
    pub link_type: LinkType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_id: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_set_id: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_json: Option<serde_json::Value>,
}

/// Why a save was refused locally.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SaveRejected {
    #[error("a save is already in progress")]
    Pending,

    #[error("polygon needs at least 3 points")]
    TooFewPoints,

    #[error("select a part (or create parts first)")]
    NoPart,

    #[error("select a part set (or create part sets first)")]
    NoSet,

    #[error("select a category (or create categories first)")]
    NoCategory,
}

// ---------------------------------------------------------------------------
// Editor
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorStatus {
    Drawing,
    Saving,
}

/// In-memory state of one editing session on one diagram.
#[derive(Debug, Clone)]
pub struct HotspotEditor {
    diagram_id: DbId,
    size: DiagramSize,
    options: EditorOptions,
    label: String,
    points: Vec<Point>,
    link_type: LinkType,
    part_id: Option<DbId>,
    set_id: Option<DbId>,
    category_id: Option<DbId>,
    filter: FilterBuilder,
    status: EditorStatus,
    message: Option<String>,
    last_saved: Option<DbId>,
}

impl HotspotEditor {
    pub fn new(
        diagram_id: DbId,
        size: DiagramSize,
        default_model_slug: Option<&str>,
        options: EditorOptions,
    ) -> Self {
        let first = |feed: &[LinkOption]| feed.first().map(|o| o.id);
        Self {
            diagram_id,
            size,
            part_id: first(&options.parts),
            set_id: first(&options.sets),
            category_id: first(&options.categories),
            options,
            label: DEFAULT_LABEL.to_string(),
            points: Vec::new(),
            link_type: LinkType::Part,
            filter: FilterBuilder::new(default_model_slug),
            status: EditorStatus::Drawing,
            message: None,
            last_saved: None,
        }
    }

    // -- drawing ------------------------------------------------------------

    /// Append the vertex under a click, mapped into diagram pixel space.
    ///
    /// Refused while a save is pending; the submitted outline is frozen
    /// until [`finish_save`](Self::finish_save).
    pub fn click(&mut self, client_x: f64, client_y: f64, rect: &ScreenRect) -> Result<Point, CoreError> {
        if self.status == EditorStatus::Saving {
            return Err(CoreError::Conflict(SaveRejected::Pending.to_string()));
        }
        let point = screen_to_diagram(client_x, client_y, rect, self.size)?;
        self.points.push(point);
        self.message = None;
        Ok(point)
    }

    /// Drop the last vertex. Ignored while saving.
    pub fn undo(&mut self) {
        if self.status == EditorStatus::Drawing {
            self.points.pop();
        }
    }

    /// Drop all vertices. Ignored while saving.
    pub fn reset(&mut self) {
        if self.status == EditorStatus::Drawing {
            self.points.clear();
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// In-progress outline for the preview polyline.
    pub fn points_attr(&self) -> String {
        points_attr(&self.points)
    }

    pub fn is_ready(&self) -> bool {
        self.points.len() >= MIN_POLYGON_POINTS
    }

    // -- fields -------------------------------------------------------------

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_link_type(&mut self, link_type: LinkType) {
        self.link_type = link_type;
    }

    pub fn link_type(&self) -> LinkType {
        self.link_type
    }

    /// Currently selected id for an id-based link type. Always `None` for
    /// FILTER.
    pub fn selection(&self, link_type: LinkType) -> Option<DbId> {
        match link_type {
            LinkType::Part => self.part_id,
            LinkType::Set => self.set_id,
            LinkType::Category => self.category_id,
            LinkType::Filter => None,
        }
    }

    /// Select a target from the matching feed.
    pub fn select(&mut self, link_type: LinkType, id: DbId) -> Result<(), CoreError> {
        let feed = match link_type {
            LinkType::Part => &self.options.parts,
            LinkType::Set => &self.options.sets,
            LinkType::Category => &self.options.categories,
            LinkType::Filter => {
                return Err(CoreError::Validation(
                    "FILTER links have no selectable target".to_string(),
                ))
            }
        };
        if !feed.iter().any(|o| o.id == id) {
            return Err(CoreError::Validation(format!(
                "{id} is not a {} option",
                link_type.as_str()
            )));
        }
        if let Some(slot) = self.selection_slot(link_type) {
            *slot = Some(id);
        }
        Ok(())
    }

    /// Replace a feed. An empty selection is preselected to the first entry;
    /// a selection no longer present in the feed is cleared first.
    pub fn set_options(&mut self, link_type: LinkType, feed: Vec<LinkOption>) {
        let first = feed.first().map(|o| o.id);
        let current = self.selection(link_type);
        let keep = current.filter(|id| feed.iter().any(|o| o.id == *id));
        match link_type {
            LinkType::Part => self.options.parts = feed,
            LinkType::Set => self.options.sets = feed,
            LinkType::Category => self.options.categories = feed,
            LinkType::Filter => return,
        }
        if let Some(slot) = self.selection_slot(link_type) {
            *slot = keep.or(first);
        }
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    pub fn filter(&self) -> &FilterBuilder {
        &self.filter
    }

    pub fn filter_mut(&mut self) -> &mut FilterBuilder {
        &mut self.filter
    }

    fn selection_slot(&mut self, link_type: LinkType) -> Option<&mut Option<DbId>> {
        match link_type {
            LinkType::Part => Some(&mut self.part_id),
            LinkType::Set => Some(&mut self.set_id),
            LinkType::Category => Some(&mut self.category_id),
            LinkType::Filter => None,
        }
    }

    // -- save ---------------------------------------------------------------

    pub fn status(&self) -> EditorStatus {
        self.status
    }

    pub fn diagram_id(&self) -> DbId {
        self.diagram_id
    }

    /// Message to show the admin, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Id of the most recently created hotspot in this session.
    pub fn last_saved(&self) -> Option<DbId> {
        self.last_saved
    }

    /// Build the payload and enter [`EditorStatus::Saving`].
    ///
    /// Checks run in order: a save already pending, vertex count, then the
    /// selection required by the link type. A rejection leaves all state
    /// untouched apart from the message.
    pub fn save(&mut self) -> Result<HotspotPayload, SaveRejected> {
        let result = self.build_payload();
        match &result {
            Ok(_) => {
                self.status = EditorStatus::Saving;
                self.message = None;
            }
            Err(SaveRejected::Pending) => {}
            Err(e) => self.message = Some(e.to_string()),
        }
        result
    }

    fn build_payload(&self) -> Result<HotspotPayload, SaveRejected> {
        if self.status == EditorStatus::Saving {
            return Err(SaveRejected::Pending);
        }
        if !self.is_ready() {
            return Err(SaveRejected::TooFewPoints);
        }

        let mut payload = HotspotPayload {
            label: self.label.clone(),
            points: self.points.clone(),
            sort_order: EDITOR_SORT_ORDER,
            link_type: self.link_type,
            part_id: None,
            part_set_id: None,
            category_id: None,
            filter_json: None,
        };
        match self.link_type {
            LinkType::Part => payload.part_id = Some(self.part_id.ok_or(SaveRejected::NoPart)?),
            LinkType::Set => payload.part_set_id = Some(self.set_id.ok_or(SaveRejected::NoSet)?),
            LinkType::Category => {
                payload.category_id = Some(self.category_id.ok_or(SaveRejected::NoCategory)?)
            }
            LinkType::Filter => payload.filter_json = Some(self.filter.build().to_json()),
        }
        Ok(payload)
    }

    /// Report the outcome of the submitted save.
    ///
    /// On success the vertices are cleared and the new id is surfaced. On
    /// failure everything is kept so the admin can retry without redrawing.
    pub fn finish_save(&mut self, outcome: Result<DbId, String>) {
        self.status = EditorStatus::Drawing;
        match outcome {
            Ok(id) => {
                self.last_saved = Some(id);
                self.message = Some(format!("Saved hotspot {id}"));
                self.points.clear();
            }
            Err(error) => {
                self.message = Some(format!("Save failed: {error}"));
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hotspot::{validate_hotspot_request, HotspotLink, HotspotRequest};
    use assert_matches::assert_matches;
    use serde_json::json;

    fn option(slug: &str) -> LinkOption {
        LinkOption {
            id: DbId::new_v4(),
            slug: slug.to_string(),
            label: slug.to_string(),
        }
    }

    fn editor(options: EditorOptions) -> HotspotEditor {
        HotspotEditor::new(
            DbId::new_v4(),
            DiagramSize::new(1000, 500).unwrap(),
            Some("k98k"),
            options,
        )
    }

    fn with_parts() -> HotspotEditor {
        editor(EditorOptions {
            parts: vec![option("kimme"), option("korn")],
            ..Default::default()
        })
    }

    /// Displayed at half size, offset by (100, 50).
    fn rect() -> ScreenRect {
        ScreenRect::new(100.0, 50.0, 500.0, 250.0)
    }

    fn draw_triangle(ed: &mut HotspotEditor) {
        ed.click(100.0, 50.0, &rect()).unwrap();
        ed.click(150.0, 50.0, &rect()).unwrap();
        ed.click(150.0, 100.0, &rect()).unwrap();
    }

    // -- initial state ------------------------------------------------------

    #[test]
    fn defaults_and_preselection() {
        let ed = with_parts();
        assert_eq!(ed.label(), DEFAULT_LABEL);
        assert_eq!(ed.link_type(), LinkType::Part);
        assert_eq!(ed.selection(LinkType::Part), Some(ed.options().parts[0].id));
        assert_eq!(ed.selection(LinkType::Set), None);
        assert_eq!(ed.status(), EditorStatus::Drawing);
        assert_eq!(ed.filter().model_slug, "k98k");
        assert!(ed.filter().in_stock);
    }

    #[test]
    fn late_options_preselect_first() {
        let mut ed = editor(EditorOptions::default());
        let sets = vec![option("a"), option("b")];
        let first = sets[0].id;
        ed.set_options(LinkType::Set, sets);
        assert_eq!(ed.selection(LinkType::Set), Some(first));
    }

    #[test]
    fn replacing_options_keeps_existing_selection() {
        let mut ed = with_parts();
        let second = ed.options().parts[1].id;
        ed.select(LinkType::Part, second).unwrap();
        let mut feed = ed.options().parts.clone();
        feed.push(option("abzug"));
        ed.set_options(LinkType::Part, feed);
        assert_eq!(ed.selection(LinkType::Part), Some(second));
    }

    #[test]
    fn select_rejects_unknown_id() {
        let mut ed = with_parts();
        assert!(ed.select(LinkType::Part, DbId::new_v4()).is_err());
        assert!(ed.select(LinkType::Filter, DbId::new_v4()).is_err());
    }

    // -- drawing ------------------------------------------------------------

    #[test]
    fn click_maps_to_diagram_space() {
        let mut ed = with_parts();
        draw_triangle(&mut ed);
        assert_eq!(
            ed.points(),
            &[Point::new(0, 0), Point::new(100, 0), Point::new(100, 100)]
        );
        assert_eq!(ed.points_attr(), "0,0 100,0 100,100");
        assert!(ed.is_ready());
    }

    #[test]
    fn click_on_collapsed_image_fails() {
        let mut ed = with_parts();
        let collapsed = ScreenRect::new(0.0, 0.0, 0.0, 0.0);
        assert!(ed.click(10.0, 10.0, &collapsed).is_err());
        assert!(ed.points().is_empty());
    }

    #[test]
    fn undo_and_reset() {
        let mut ed = with_parts();
        ed.undo();
        assert!(ed.points().is_empty());
        draw_triangle(&mut ed);
        ed.undo();
        assert_eq!(ed.points().len(), 2);
        ed.reset();
        assert!(ed.points().is_empty());
    }

    // -- save ---------------------------------------------------------------

    #[test]
    fn save_with_two_points_rejected_locally() {
        let mut ed = with_parts();
        ed.click(100.0, 50.0, &rect()).unwrap();
        ed.click(150.0, 50.0, &rect()).unwrap();
        assert_eq!(ed.save().unwrap_err(), SaveRejected::TooFewPoints);
        assert_eq!(ed.status(), EditorStatus::Drawing);
        assert_eq!(ed.message(), Some("polygon needs at least 3 points"));
        assert_eq!(ed.points().len(), 2);
    }

    #[test]
    fn save_without_selection_rejected() {
        let mut ed = editor(EditorOptions::default());
        draw_triangle(&mut ed);
        assert_eq!(ed.save().unwrap_err(), SaveRejected::NoPart);
        ed.set_link_type(LinkType::Set);
        assert_eq!(ed.save().unwrap_err(), SaveRejected::NoSet);
        ed.set_link_type(LinkType::Category);
        assert_eq!(ed.save().unwrap_err(), SaveRejected::NoCategory);
    }

    #[test]
    fn second_save_while_pending_is_refused() {
        let mut ed = with_parts();
        draw_triangle(&mut ed);
        ed.save().unwrap();
        assert_eq!(ed.status(), EditorStatus::Saving);
        assert_eq!(ed.save().unwrap_err(), SaveRejected::Pending);
    }

    #[test]
    fn drawing_is_frozen_while_saving() {
        let mut ed = with_parts();
        draw_triangle(&mut ed);
        ed.save().unwrap();

        assert_matches!(ed.click(20.0, 20.0, &rect()), Err(CoreError::Conflict(_)));
        ed.undo();
        ed.reset();
        assert_eq!(ed.points().len(), 3);
        assert_eq!(ed.save().unwrap_err(), SaveRejected::Pending);

        ed.finish_save(Err("network down".into()));
        ed.undo();
        assert_eq!(ed.points().len(), 2);
    }

    #[test]
    fn part_payload_shape() {
        let mut ed = with_parts();
        let part = ed.options().parts[0].id;
        ed.set_label("Kimme");
        draw_triangle(&mut ed);
        let payload = ed.save().unwrap();
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "label": "Kimme",
                "points": [[0, 0], [100, 0], [100, 100]],
                "sortOrder": 10,
                "linkType": "PART",
                "partId": part.to_string()
            })
        );
    }

    #[test]
    fn filter_payload_uses_builder() {
        let mut ed = with_parts();
        ed.set_link_type(LinkType::Filter);
        ed.filter_mut().category_slug = "  visier ".to_string();
        ed.filter_mut().variant_slug = "   ".to_string();
        draw_triangle(&mut ed);
        let payload = ed.save().unwrap();
        assert_eq!(payload.part_id, None);
        assert_eq!(
            payload.filter_json,
            Some(json!({"categorySlug": "visier", "inStock": true, "modelSlug": "k98k"}))
        );
    }

    #[test]
    fn builder_always_writes_in_stock() {
        let mut builder = FilterBuilder::new(None);
        builder.in_stock = false;
        assert_eq!(builder.build().to_json(), json!({"inStock": false}));
    }

    #[test]
    fn payload_passes_ingestion_validation() {
        let mut ed = with_parts();
        ed.set_link_type(LinkType::Filter);
        draw_triangle(&mut ed);
        let payload = ed.save().unwrap();
        let req: HotspotRequest =
            serde_json::from_value(serde_json::to_value(&payload).unwrap()).unwrap();
        let draft = validate_hotspot_request(&req).unwrap();
        assert_eq!(draft.sort_order, EDITOR_SORT_ORDER);
        assert_matches!(draft.link, HotspotLink::Filter(_));
    }

    #[test]
    fn successful_save_clears_vertices() {
        let mut ed = with_parts();
        draw_triangle(&mut ed);
        ed.save().unwrap();
        let id = DbId::new_v4();
        ed.finish_save(Ok(id));
        assert_eq!(ed.status(), EditorStatus::Drawing);
        assert!(ed.points().is_empty());
        assert_eq!(ed.last_saved(), Some(id));
        assert!(ed.message().unwrap().contains(&id.to_string()));
    }

    #[test]
    fn failed_save_keeps_state() {
        let mut ed = with_parts();
        ed.set_label("Korn");
        ed.set_link_type(LinkType::Part);
        draw_triangle(&mut ed);
        ed.save().unwrap();
        ed.finish_save(Err("connection reset".to_string()));
        assert_eq!(ed.status(), EditorStatus::Drawing);
        assert_eq!(ed.points().len(), 3);
        assert_eq!(ed.label(), "Korn");
        assert_eq!(ed.message(), Some("Save failed: connection reset"));
        assert!(ed.save().is_ok());
    }
}
