//! Admin maintenance of the plain catalog records: categories,
//! manufacturers, firearm models and variants, part sets, and fitments.
//!
//! Updates are full replacements using the create body.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use armory_core::catalog::{
    normalize_code, normalize_slug, require_non_empty, trim_optional, validate_slug,
    validate_year_range, StockStatus,
};
use armory_core::error::CoreError;
use armory_core::types::DbId;
use armory_db::models::category::CreateCategory;
use armory_db::models::firearm_model::CreateFirearmModel;
use armory_db::models::firearm_variant::CreateFirearmVariant;
use armory_db::models::fitment::CreatePartFitment;
use armory_db::models::manufacturer::CreateManufacturer;
use armory_db::models::part_set::CreatePartSet;
use armory_db::repositories::{
    CategoryRepo, FirearmModelRepo, FirearmVariantRepo, FitmentRepo, ManufacturerRepo,
    PartSetRepo,
};

use crate::error::{AppError, AppResult};
use crate::middleware::admin::AdminSession;
use crate::response::DataResponse;
use crate::state::AppState;

/// Rows returned by the part-set listing.
const PART_SET_LIST_LIMIT: i64 = 200;

fn not_found(entity: &'static str, id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity, id })
}

fn slug_field(value: &str) -> Result<String, CoreError> {
    let slug = normalize_slug(value);
    validate_slug("slug", &slug)?;
    Ok(slug)
}

/* --------------------------------------------------------------------------
Normalization
-------------------------------------------------------------------------- */

fn prepare_category(input: &CreateCategory) -> Result<CreateCategory, CoreError> {
    Ok(CreateCategory {
        slug: slug_field(&input.slug)?,
        name: require_non_empty("name", &input.name)?,
        parent_id: input.parent_id,
        description: trim_optional(input.description.as_deref()),
    })
}

fn prepare_manufacturer(input: &CreateManufacturer) -> Result<CreateManufacturer, CoreError> {
    let name = require_non_empty("name", &input.name)?;
    let code = normalize_code(&input.code);
    if code.is_empty() {
        return Err(CoreError::Validation("code is required".into()));
    }
    Ok(CreateManufacturer {
        name,
        code,
        country: trim_optional(input.country.as_deref()),
        notes: trim_optional(input.notes.as_deref()),
    })
}

fn prepare_model(input: &CreateFirearmModel) -> Result<CreateFirearmModel, CoreError> {
    Ok(CreateFirearmModel {
        name: require_non_empty("name", &input.name)?,
        slug: slug_field(&input.slug)?,
        description: trim_optional(input.description.as_deref()),
    })
}

fn prepare_variant(input: &CreateFirearmVariant) -> Result<CreateFirearmVariant, CoreError> {
    validate_year_range(input.year_from, input.year_to)?;
    Ok(CreateFirearmVariant {
        firearm_model_id: input.firearm_model_id,
        manufacturer_id: input.manufacturer_id,
        name: require_non_empty("name", &input.name)?,
        slug: slug_field(&input.slug)?,
        year_from: input.year_from,
        year_to: input.year_to,
        notes: trim_optional(input.notes.as_deref()),
    })
}

fn prepare_part_set(input: &CreatePartSet) -> Result<CreatePartSet, CoreError> {
    let stock_status = StockStatus::from_input(input.stock_status.as_deref())?;
    Ok(CreatePartSet {
        slug: slug_field(&input.slug)?,
        title: require_non_empty("title", &input.title)?,
        description: trim_optional(input.description.as_deref()),
        stock_status: Some(stock_status.as_str().to_string()),
    })
}

fn prepare_fitment(input: &CreatePartFitment) -> Result<CreatePartFitment, CoreError> {
    if input.firearm_model_id.is_none()
        && input.firearm_variant_id.is_none()
        && input.manufacturer_id.is_none()
    {
        return Err(CoreError::Validation(
            "fitment needs a model, variant, or manufacturer".into(),
        ));
    }
    Ok(CreatePartFitment {
        confidence: trim_optional(input.confidence.as_deref()),
        notes: trim_optional(input.notes.as_deref()),
        ..input.clone()
    })
}

/* --------------------------------------------------------------------------
Categories
-------------------------------------------------------------------------- */

/// GET /admin/categories
pub async fn list_categories(
    _admin: AdminSession,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let categories = CategoryRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: categories }))
}

/// POST /admin/categories
pub async fn create_category(
    _admin: AdminSession,
    State(state): State<AppState>,
    Json(input): Json<CreateCategory>,
) -> AppResult<impl IntoResponse> {
    let input = prepare_category(&input)?;
    let category = CategoryRepo::create(&state.pool, &input).await?;
    tracing::info!(category_id = %category.id, slug = %category.slug, "Category created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: category })))
}

/// GET /admin/categories/{id}
pub async fn get_category(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let category = CategoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Category", id))?;
    Ok(Json(DataResponse { data: category }))
}

/// PUT /admin/categories/{id}
pub async fn update_category(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CreateCategory>,
) -> AppResult<impl IntoResponse> {
    let input = prepare_category(&input)?;
    if input.parent_id == Some(id) {
        return Err(AppError::Core(CoreError::Validation(
            "category cannot be its own parent".into(),
        )));
    }
    let category = CategoryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("Category", id))?;
    tracing::info!(category_id = %id, "Category updated");
    Ok(Json(DataResponse { data: category }))
}

/// DELETE /admin/categories/{id}
pub async fn delete_category(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !CategoryRepo::delete(&state.pool, id).await? {
        return Err(not_found("Category", id));
    }
    tracing::info!(category_id = %id, "Category deleted");
    Ok(StatusCode::NO_CONTENT)
}

/* --------------------------------------------------------------------------
Manufacturers
-------------------------------------------------------------------------- */

/// GET /admin/manufacturers
pub async fn list_manufacturers(
    _admin: AdminSession,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let manufacturers = ManufacturerRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: manufacturers }))
}

/// POST /admin/manufacturers
pub async fn create_manufacturer(
    _admin: AdminSession,
    State(state): State<AppState>,
    Json(input): Json<CreateManufacturer>,
) -> AppResult<impl IntoResponse> {
    let input = prepare_manufacturer(&input)?;
    let manufacturer = ManufacturerRepo::create(&state.pool, &input).await?;
    tracing::info!(manufacturer_id = %manufacturer.id, code = %manufacturer.code, "Manufacturer created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: manufacturer })))
}

/// GET /admin/manufacturers/{id}
pub async fn get_manufacturer(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let manufacturer = ManufacturerRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Manufacturer", id))?;
    Ok(Json(DataResponse { data: manufacturer }))
}

/// PUT /admin/manufacturers/{id}
pub async fn update_manufacturer(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CreateManufacturer>,
) -> AppResult<impl IntoResponse> {
    let input = prepare_manufacturer(&input)?;
    let manufacturer = ManufacturerRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("Manufacturer", id))?;
    tracing::info!(manufacturer_id = %id, "Manufacturer updated");
    Ok(Json(DataResponse { data: manufacturer }))
}

/// DELETE /admin/manufacturers/{id}
pub async fn delete_manufacturer(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !ManufacturerRepo::delete(&state.pool, id).await? {
        return Err(not_found("Manufacturer", id));
    }
    tracing::info!(manufacturer_id = %id, "Manufacturer deleted");
    Ok(StatusCode::NO_CONTENT)
}

/* --------------------------------------------------------------------------
Firearm models
-------------------------------------------------------------------------- */

/// GET /admin/models
pub async fn list_models(
    _admin: AdminSession,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let models = FirearmModelRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: models }))
}

/// POST /admin/models
pub async fn create_model(
    _admin: AdminSession,
    State(state): State<AppState>,
    Json(input): Json<CreateFirearmModel>,
) -> AppResult<impl IntoResponse> {
    let input = prepare_model(&input)?;
    let model = FirearmModelRepo::create(&state.pool, &input).await?;
    tracing::info!(model_id = %model.id, slug = %model.slug, "Firearm model created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: model })))
}

/// GET /admin/models/{id}
pub async fn get_model(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let model = FirearmModelRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("FirearmModel", id))?;
    Ok(Json(DataResponse { data: model }))
}

/// PUT /admin/models/{id}
pub async fn update_model(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CreateFirearmModel>,
) -> AppResult<impl IntoResponse> {
    let input = prepare_model(&input)?;
    let model = FirearmModelRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("FirearmModel", id))?;
    tracing::info!(model_id = %id, "Firearm model updated");
    Ok(Json(DataResponse { data: model }))
}

/// DELETE /admin/models/{id}
pub async fn delete_model(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !FirearmModelRepo::delete(&state.pool, id).await? {
        return Err(not_found("FirearmModel", id));
    }
    tracing::info!(model_id = %id, "Firearm model deleted");
    Ok(StatusCode::NO_CONTENT)
}

/* --------------------------------------------------------------------------
Firearm variants
-------------------------------------------------------------------------- */

/// GET /admin/variants
pub async fn list_variants(
    _admin: AdminSession,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let variants = FirearmVariantRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: variants }))
}

/// POST /admin/variants
pub async fn create_variant(
    _admin: AdminSession,
    State(state): State<AppState>,
    Json(input): Json<CreateFirearmVariant>,
) -> AppResult<impl IntoResponse> {
    let input = prepare_variant(&input)?;
    let variant = FirearmVariantRepo::create(&state.pool, &input).await?;
    tracing::info!(
        variant_id = %variant.id,
        model_id = %variant.firearm_model_id,
        "Firearm variant created",
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: variant })))
}

/// GET /admin/variants/{id}
pub async fn get_variant(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let variant = FirearmVariantRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("FirearmVariant", id))?;
    Ok(Json(DataResponse { data: variant }))
}

/// PUT /admin/variants/{id}
pub async fn update_variant(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CreateFirearmVariant>,
) -> AppResult<impl IntoResponse> {
    let input = prepare_variant(&input)?;
    let variant = FirearmVariantRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("FirearmVariant", id))?;
    tracing::info!(variant_id = %id, "Firearm variant updated");
    Ok(Json(DataResponse { data: variant }))
}

/// DELETE /admin/variants/{id}
pub async fn delete_variant(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !FirearmVariantRepo::delete(&state.pool, id).await? {
        return Err(not_found("FirearmVariant", id));
    }
    tracing::info!(variant_id = %id, "Firearm variant deleted");
    Ok(StatusCode::NO_CONTENT)
}

/* --------------------------------------------------------------------------
Part sets
-------------------------------------------------------------------------- */

/// GET /admin/part-sets
pub async fn list_part_sets(
    _admin: AdminSession,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let sets = PartSetRepo::list(&state.pool, PART_SET_LIST_LIMIT).await?;
    Ok(Json(DataResponse { data: sets }))
}

/// POST /admin/part-sets
pub async fn create_part_set(
    _admin: AdminSession,
    State(state): State<AppState>,
    Json(input): Json<CreatePartSet>,
) -> AppResult<impl IntoResponse> {
    let input = prepare_part_set(&input)?;
    let set = PartSetRepo::create(&state.pool, &input).await?;
    tracing::info!(part_set_id = %set.id, slug = %set.slug, "Part set created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: set })))
}

/* --------------------------------------------------------------------------
Fitments
-------------------------------------------------------------------------- */

/// POST /admin/fitments
pub async fn create_fitment(
    _admin: AdminSession,
    State(state): State<AppState>,
    Json(input): Json<CreatePartFitment>,
) -> AppResult<impl IntoResponse> {
    let input = prepare_fitment(&input)?;
    let fitment = FitmentRepo::create(&state.pool, &input).await?;
    tracing::info!(fitment_id = %fitment.id, part_id = %fitment.part_id, "Fitment created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: fitment })))
}

/// DELETE /admin/fitments/{id}
pub async fn delete_fitment(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !FitmentRepo::delete(&state.pool, id).await? {
        return Err(not_found("PartFitment", id));
    }
    tracing::info!(fitment_id = %id, "Fitment deleted");
    Ok(StatusCode::NO_CONTENT)
}
