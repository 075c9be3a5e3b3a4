//! Integration tests for the predicate-driven part listing.

use armory_core::catalog::StockStatus;
use armory_core::filter::{FitmentConstraint, PartPredicate};
use armory_db::models::category::CreateCategory;
use armory_db::models::firearm_model::CreateFirearmModel;
use armory_db::models::firearm_variant::CreateFirearmVariant;
use armory_db::models::fitment::CreatePartFitment;
use armory_db::models::part::CreatePart;
use armory_db::repositories::{
    CategoryRepo, FirearmModelRepo, FirearmVariantRepo, FitmentRepo, PartRepo,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Fixture
// ---------------------------------------------------------------------------

fn part(title: &str, sku: Option<&str>, status: &str, category_id: Option<uuid::Uuid>) -> CreatePart {
    CreatePart {
        slug: None,
        sku: sku.map(str::to_string),
        title: title.to_string(),
        description: None,
        category_id,
        stock_status: Some(status.to_string()),
        condition: None,
        authenticity: None,
        quantity: None,
        notes: None,
    }
}

/// Three parts: an in-stock sight for the K98k (early variant), an
/// out-of-stock sight, and an in-stock stock part with no fitment.
async fn seed(pool: &PgPool) {
    let visier = CategoryRepo::create(
        pool,
        &CreateCategory {
            slug: "visier".to_string(),
            name: "Visier".to_string(),
            parent_id: None,
            description: None,
        },
    )
    .await
    .unwrap();
    let model = FirearmModelRepo::create(
        pool,
        &CreateFirearmModel {
            name: "K98k".to_string(),
            slug: "k98k".to_string(),
            description: None,
        },
    )
    .await
    .unwrap();
    let variant = FirearmVariantRepo::create(
        pool,
        &CreateFirearmVariant {
            firearm_model_id: model.id,
            manufacturer_id: None,
            name: "Early".to_string(),
            slug: "early".to_string(),
            year_from: Some(1935),
            year_to: Some(1940),
            notes: None,
        },
    )
    .await
    .unwrap();

    let kimme = PartRepo::create(pool, "kimme", &part("Kimme", Some("V-100"), "IN_STOCK", Some(visier.id)))
        .await
        .unwrap();
    PartRepo::create(pool, "korn", &part("Korn", Some("V-200"), "OUT_OF_STOCK", Some(visier.id)))
        .await
        .unwrap();
    PartRepo::create(pool, "schaft", &part("Schaft", None, "IN_STOCK", None))
        .await
        .unwrap();

    FitmentRepo::create(
        pool,
        &CreatePartFitment {
            part_id: kimme.id,
            firearm_model_id: Some(model.id),
            firearm_variant_id: Some(variant.id),
            manufacturer_id: None,
            confidence: None,
            notes: None,
        },
    )
    .await
    .unwrap();
}

async fn slugs(pool: &PgPool, predicate: &PartPredicate, search: Option<&str>) -> Vec<String> {
    let mut out: Vec<String> = PartRepo::list(pool, predicate, search, 50, 0)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.slug)
        .collect();
    out.sort();
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_empty_predicate_lists_everything(pool: PgPool) {
    seed(&pool).await;
    let all = slugs(&pool, &PartPredicate::default(), None).await;
    assert_eq!(all, vec!["kimme", "korn", "schaft"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_category_and_stock(pool: PgPool) {
    seed(&pool).await;
    let predicate = PartPredicate::base(true, Some("visier"));
    assert_eq!(slugs(&pool, &predicate, None).await, vec!["kimme"]);

    let predicate = PartPredicate::base(false, Some("visier"));
    assert_eq!(slugs(&pool, &predicate, None).await, vec!["kimme", "korn"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_fitment_constraints(pool: PgPool) {
    seed(&pool).await;
    let by_model = PartPredicate {
        fitment: Some(FitmentConstraint::Model("k98k".to_string())),
        ..Default::default()
    };
    assert_eq!(slugs(&pool, &by_model, None).await, vec!["kimme"]);

    let by_variant = PartPredicate {
        fitment: Some(FitmentConstraint::Variant("late".to_string())),
        ..Default::default()
    };
    assert!(slugs(&pool, &by_variant, None).await.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_search_is_case_insensitive_over_sku_and_title(pool: PgPool) {
    seed(&pool).await;
    let any = PartPredicate::default();
    assert_eq!(slugs(&pool, &any, Some("v-2")).await, vec!["korn"]);
    assert_eq!(slugs(&pool, &any, Some("SCHAFT")).await, vec!["schaft"]);
    assert!(slugs(&pool, &any, Some("%")).await.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_condition_predicate_binds_in_order(pool: PgPool) {
    seed(&pool).await;
    let predicate = PartPredicate {
        category_slug: Some("visier".to_string()),
        stock_status: Some(StockStatus::InStock),
        condition: Some("UNKNOWN".to_string()),
        authenticity: Some("UNKNOWN".to_string()),
        fitment: Some(FitmentConstraint::Variant("early".to_string())),
    };
    assert_eq!(slugs(&pool, &predicate, Some("kim")).await, vec!["kimme"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_limit_and_offset(pool: PgPool) {
    seed(&pool).await;
    let page = PartRepo::list(&pool, &PartPredicate::default(), None, 2, 0)
        .await
        .unwrap();
    assert_eq!(page.len(), 2);
    let rest = PartRepo::list(&pool, &PartPredicate::default(), None, 2, 2)
        .await
        .unwrap();
    assert_eq!(rest.len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_part_options_label(pool: PgPool) {
    seed(&pool).await;
    let options = PartRepo::list_options(&pool, 200).await.unwrap();
    let labels: Vec<_> = options.iter().map(|o| o.label.as_str()).collect();
    assert!(labels.contains(&"Kimme (V-100)"));
    assert!(labels.contains(&"Schaft"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_variants_ordered_by_year(pool: PgPool) {
    seed(&pool).await;
    let model = FirearmModelRepo::find_by_slug(&pool, "k98k").await.unwrap().unwrap();
    FirearmVariantRepo::create(
        &pool,
        &CreateFirearmVariant {
            firearm_model_id: model.id,
            manufacturer_id: None,
            name: "Prototype".to_string(),
            slug: "prototype".to_string(),
            year_from: Some(1934),
            year_to: None,
            notes: None,
        },
    )
    .await
    .unwrap();
    let variants = FirearmVariantRepo::list_by_model(&pool, model.id).await.unwrap();
    let names: Vec<_> = variants.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, vec!["Prototype", "Early"]);
}
