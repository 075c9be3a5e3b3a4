//! Filter expressions for the part listing and their URL transport token.
//!
//! A [`FilterExpression`] is a small allow-listed object that a FILTER
//! hotspot stores. The renderer encodes it into a URL-safe base64 token
//! ([`encode`]); the listing endpoint decodes the token ([`decode`]) and
//! projects the raw object onto a [`PartPredicate`] ([`project_to_predicate`]).
//!
//! The token is attacker-controlled. The projection reads each allowed key
//! explicitly and never deserializes the decoded object into a query type, so
//! unknown keys cannot reach the database layer.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::catalog::StockStatus;

/// URL-safe alphabet, no padding on encode, padding optional on decode.
const TOKEN_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Tokens longer than this are treated as malformed without decoding.
pub const MAX_TOKEN_LENGTH: usize = 4096;

// ---------------------------------------------------------------------------
// Whitelisted keys
// ---------------------------------------------------------------------------

pub mod keys {
    pub const CATEGORY_SLUG: &str = "categorySlug";
    pub const IN_STOCK: &str = "inStock";
    pub const STOCK_STATUS: &str = "stockStatus";
    pub const CONDITION: &str = "condition";
    pub const AUTHENTICITY: &str = "authenticity";
    pub const MODEL_SLUG: &str = "modelSlug";
    pub const VARIANT_SLUG: &str = "variantSlug";

    /// Every key a filter expression may carry.
    pub const ALL: &[&str] = &[
        CATEGORY_SLUG,
        IN_STOCK,
        STOCK_STATUS,
        CONDITION,
        AUTHENTICITY,
        MODEL_SLUG,
        VARIANT_SLUG,
    ];
}

// ---------------------------------------------------------------------------
// FilterExpression
// ---------------------------------------------------------------------------

/// Typed view of an allow-listed filter object. Absent fields are omitted
/// when serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterExpression {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_stock: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_status: Option<StockStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authenticity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant_slug: Option<String>,
}

impl FilterExpression {
    /// Read the allow-listed keys out of an arbitrary JSON object.
    ///
    /// Keys outside [`keys::ALL`] are dropped, as are values of the wrong
    /// type and `stockStatus` values that are not a known literal.
    pub fn from_object(obj: &Map<String, Value>) -> Self {
        let string = |key: &str| obj.get(key).and_then(Value::as_str).map(str::to_string);
        Self {
            category_slug: string(keys::CATEGORY_SLUG),
            in_stock: obj.get(keys::IN_STOCK).and_then(Value::as_bool),
            stock_status: obj
                .get(keys::STOCK_STATUS)
                .and_then(Value::as_str)
                .and_then(StockStatus::parse),
            condition: string(keys::CONDITION),
            authenticity: string(keys::AUTHENTICITY),
            model_slug: string(keys::MODEL_SLUG),
            variant_slug: string(keys::VARIANT_SLUG),
        }
    }

    /// Build from a JSON value, returning `None` unless it is an object.
    pub fn from_value(value: &Value) -> Option<Self> {
        value.as_object().map(Self::from_object)
    }

    /// Explicit allow-list serialization. Infallible, unlike `serde_json::to_value`.
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        let mut put_str = |key: &str, v: &Option<String>| {
            if let Some(s) = v {
                map.insert(key.to_string(), Value::String(s.clone()));
            }
        };
        put_str(keys::CATEGORY_SLUG, &self.category_slug);
        put_str(keys::CONDITION, &self.condition);
        put_str(keys::AUTHENTICITY, &self.authenticity);
        put_str(keys::MODEL_SLUG, &self.model_slug);
        put_str(keys::VARIANT_SLUG, &self.variant_slug);
        if let Some(b) = self.in_stock {
            map.insert(keys::IN_STOCK.to_string(), Value::Bool(b));
        }
        if let Some(s) = self.stock_status {
            map.insert(keys::STOCK_STATUS.to_string(), Value::String(s.as_str().to_string()));
        }
        Value::Object(map)
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

// ---------------------------------------------------------------------------
// Token codec
// ---------------------------------------------------------------------------

/// Encode a filter expression as a URL-safe, unpadded base64 token of its
/// compact JSON form.
pub fn encode(expr: &FilterExpression) -> String {
    TOKEN_ENGINE.encode(expr.to_json().to_string())
}

/// Decode a transport token into the raw JSON object it carries.
///
/// Returns `None` for anything malformed: bad base64, non-UTF-8 bytes,
/// invalid JSON, or JSON that is not an object. No whitelisting happens
/// here; see [`project_to_predicate`].
pub fn decode(token: &str) -> Option<Map<String, Value>> {
    let token = token.trim();
    if token.is_empty() || token.len() > MAX_TOKEN_LENGTH {
        return None;
    }
    let bytes = TOKEN_ENGINE.decode(token).ok()?;
    let text = String::from_utf8(bytes).ok()?;
    match serde_json::from_str::<Value>(&text).ok()? {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Predicate projection
// ---------------------------------------------------------------------------

/// Constraint on the part's fitment records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "slug", rename_all = "snake_case")]
pub enum FitmentConstraint {
    /// Some fitment's model has this slug.
    Model(String),
    /// Some fitment's variant has this slug.
    Variant(String),
}

/// Part-listing predicate. Every populated field is ANDed.
///
/// `fitment` is a single slot: when a filter names both a model and a
/// variant, the variant constraint replaces the model constraint. This
/// matches the listing behaviour the catalog has always had and is kept
/// until product decides whether both should apply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PartPredicate {
    pub category_slug: Option<String>,
    pub stock_status: Option<StockStatus>,
    pub condition: Option<String>,
    pub authenticity: Option<String>,
    pub fitment: Option<FitmentConstraint>,
}

impl PartPredicate {
    /// Base predicate from the listing page's own query parameters.
    pub fn base(in_stock_only: bool, category_slug: Option<&str>) -> Self {
        Self {
            category_slug: category_slug
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            stock_status: in_stock_only.then_some(StockStatus::InStock),
            ..Self::default()
        }
    }

    /// Overlay `other` onto `self`: fields set in `other` win.
    pub fn overlay(mut self, other: PartPredicate) -> Self {
        if other.category_slug.is_some() {
            self.category_slug = other.category_slug;
        }
        if other.stock_status.is_some() {
            self.stock_status = other.stock_status;
        }
        if other.condition.is_some() {
            self.condition = other.condition;
        }
        if other.authenticity.is_some() {
            self.authenticity = other.authenticity;
        }
        if other.fitment.is_some() {
            self.fitment = other.fitment;
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Project a decoded (possibly hostile) object onto a [`PartPredicate`].
///
/// - `categorySlug` (non-empty string): category slug equality.
/// - `inStock == true`: stock status `IN_STOCK`. `false` adds nothing.
/// - `stockStatus`: only the three known literals; applied after `inStock`,
///   so it wins when both are present.
/// - `condition`, `authenticity` (non-empty strings): equality, no enum check.
/// - `modelSlug`, then `variantSlug`: fitment existence; the later one wins.
///
/// Everything else is ignored.
pub fn project_to_predicate(raw: Option<&Map<String, Value>>) -> PartPredicate {
    let Some(obj) = raw else {
        return PartPredicate::default();
    };
    let non_empty = |key: &str| {
        obj.get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    let mut predicate = PartPredicate {
        category_slug: non_empty(keys::CATEGORY_SLUG),
        ..PartPredicate::default()
    };

    if obj.get(keys::IN_STOCK).and_then(Value::as_bool) == Some(true) {
        predicate.stock_status = Some(StockStatus::InStock);
    }
    if let Some(status) = obj
        .get(keys::STOCK_STATUS)
        .and_then(Value::as_str)
        .and_then(StockStatus::parse)
    {
        predicate.stock_status = Some(status);
    }

    predicate.condition = non_empty(keys::CONDITION);
    predicate.authenticity = non_empty(keys::AUTHENTICITY);

    if let Some(slug) = non_empty(keys::MODEL_SLUG) {
        predicate.fitment = Some(FitmentConstraint::Model(slug));
    }
    if let Some(slug) = non_empty(keys::VARIANT_SLUG) {
        predicate.fitment = Some(FitmentConstraint::Variant(slug));
    }

    predicate
}

/// Decode a token and project it in one step. Malformed tokens produce an
/// empty predicate, i.e. no filter.
pub fn predicate_from_token(token: Option<&str>) -> PartPredicate {
    let raw = token.and_then(decode);
    project_to_predicate(raw.as_ref())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
