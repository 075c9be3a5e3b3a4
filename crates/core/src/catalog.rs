//! Catalog constants, enums, and input normalization.
//!
//! Covers the plain data-entry records (categories, manufacturers, models,
//! variants, parts, part sets). None of these have behaviour beyond field
//! normalization and required-field checks.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Default part condition when none is supplied.
pub const DEFAULT_CONDITION: &str = "UNKNOWN";

/// Default part authenticity when none is supplied.
pub const DEFAULT_AUTHENTICITY: &str = "UNKNOWN";

/// Maximum length of a slug after normalization.
pub const MAX_SLUG_LENGTH: usize = 120;

// ---------------------------------------------------------------------------
// Stock status
// ---------------------------------------------------------------------------

/// Stock status of a part or part set, stored as TEXT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockStatus {
    InStock,
    OutOfStock,
    Discontinued,
}

/// All valid stock status strings.
const VALID_STOCK_STATUSES: &[&str] = &["IN_STOCK", "OUT_OF_STOCK", "DISCONTINUED"];

impl StockStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InStock => "IN_STOCK",
            Self::OutOfStock => "OUT_OF_STOCK",
            Self::Discontinued => "DISCONTINUED",
        }
    }

    /// Strict parse; anything outside the three literals is `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "IN_STOCK" => Some(Self::InStock),
            "OUT_OF_STOCK" => Some(Self::OutOfStock),
            "DISCONTINUED" => Some(Self::Discontinued),
            _ => None,
        }
    }

    /// Parse an optional user-supplied value, defaulting to `OUT_OF_STOCK`.
    pub fn from_input(s: Option<&str>) -> Result<Self, CoreError> {
        match s.map(str::trim).filter(|s| !s.is_empty()) {
            None => Ok(Self::OutOfStock),
            Some(v) => Self::parse(v).ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid stock status '{v}'. Must be one of: {}",
                    VALID_STOCK_STATUSES.join(", ")
                ))
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// ASCII slug: lowercase, every run of characters outside `[a-z0-9]` becomes
/// a single `-`, and leading/trailing dashes are dropped.
pub fn normalize_slug(s: &str) -> String {
    collapse_to_dashes(&s.trim().to_lowercase(), |c| {
        c.is_ascii_lowercase() || c.is_ascii_digit()
    })
}

/// Unicode-aware slug used for parts, where titles often carry umlauts.
/// Letters and digits of any script are kept.
pub fn slugify(s: &str) -> String {
    collapse_to_dashes(&s.trim().to_lowercase(), char::is_alphanumeric)
}

fn collapse_to_dashes(s: &str, keep: impl Fn(char) -> bool) -> String {
    let mut out = String::with_capacity(s.len());
    let mut pending_dash = false;
    for c in s.chars() {
        if keep(c) {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(c);
        } else {
            pending_dash = true;
        }
    }
    out
}

/// Manufacturer code: uppercase, only `[A-Z0-9_-]` retained.
pub fn normalize_code(s: &str) -> String {
    s.trim()
        .to_uppercase()
        .chars()
        .filter(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || *c == '_' || *c == '-')
        .collect()
}

/// Trim an optional string, mapping blank values to `None`.
pub fn trim_optional(s: Option<&str>) -> Option<String> {
    s.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}

/// Return the trimmed value or a `"{field} is required"` validation error.
pub fn require_non_empty(field: &str, value: &str) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

/// Validate a normalized slug.
pub fn validate_slug(field: &str, slug: &str) -> Result<(), CoreError> {
    if slug.is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    if slug.chars().count() > MAX_SLUG_LENGTH {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {MAX_SLUG_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate an optional production year range.
pub fn validate_year_range(year_from: Option<i32>, year_to: Option<i32>) -> Result<(), CoreError> {
    if let (Some(from), Some(to)) = (year_from, year_to) {
        if from > to {
            return Err(CoreError::Validation(format!(
                "year_from ({from}) must not be after year_to ({to})"
            )));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
