//! Integration tests for the admin gate and catalog maintenance.

mod common;

use axum::http::StatusCode;
use common::{
    admin_delete, admin_get, admin_post, admin_put, body_json, build_app_with_config,
    build_test_app, get, post_json, seed, ADMIN_SECRET,
};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn login_sets_cookie_and_returns_next(pool: PgPool) {
    let response = post_json(
        build_test_app(pool),
        "/api/v1/admin/login",
        json!({"secret": ADMIN_SECRET, "next": "/admin/diagrams"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response.headers()["set-cookie"].to_str().unwrap().to_string();
    assert!(cookie.starts_with(&format!("admin_secret={ADMIN_SECRET}")));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(!cookie.contains("Secure"));
    assert_eq!(body_json(response).await["data"]["next"], "/admin/diagrams");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn login_defaults_next_to_admin(pool: PgPool) {
    let response = post_json(
        build_test_app(pool),
        "/api/v1/admin/login",
        json!({"secret": ADMIN_SECRET}),
    )
    .await;
    assert_eq!(body_json(response).await["data"]["next"], "/admin");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn login_with_wrong_secret_is_401(pool: PgPool) {
    let response = post_json(
        build_test_app(pool),
        "/api/v1/admin/login",
        json!({"secret": "guess"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get("set-cookie").is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unset_secret_blocks_login_and_admin(pool: PgPool) {
    let mut config = common::test_config();
    config.admin_secret = None;

    let response = post_json(
        build_app_with_config(pool.clone(), config.clone()),
        "/api/v1/admin/login",
        json!({"secret": ADMIN_SECRET}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let response = admin_get(
        build_app_with_config(pool, config),
        "/api/v1/admin/categories",
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn logout_clears_cookie(pool: PgPool) {
    let response = post_json(build_test_app(pool), "/api/v1/admin/logout", json!({})).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let cookie = response.headers()["set-cookie"].to_str().unwrap();
    assert!(cookie.starts_with("admin_secret=;"));
    assert!(cookie.contains("Max-Age=0"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn admin_routes_reject_missing_cookie(pool: PgPool) {
    let response = get(build_test_app(pool), "/api/v1/admin/categories").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");
}

// ---------------------------------------------------------------------------
// Catalog CRUD
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn category_crud(pool: PgPool) {
    let response = admin_post(
        build_test_app(pool.clone()),
        "/api/v1/admin/categories",
        json!({"slug": " Bolt Parts ", "name": "Bolt parts"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["data"]["slug"], "bolt-parts");
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let response = admin_put(
        build_test_app(pool.clone()),
        &format!("/api/v1/admin/categories/{id}"),
        json!({"slug": "bolt", "name": "Bolt", "description": "Bolt components"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["description"], "Bolt components");

    let response = admin_get(build_test_app(pool.clone()), "/api/v1/admin/categories").await;
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 1);

    let uri = format!("/api/v1/admin/categories/{id}");
    let response = admin_delete(build_test_app(pool.clone()), &uri).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let response = admin_get(build_test_app(pool), &uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn duplicate_slug_is_conflict(pool: PgPool) {
    seed(
        &pool,
        "/api/v1/admin/models",
        json!({"name": "K98k", "slug": "k98k"}),
    )
    .await;

    let response = admin_post(
        build_test_app(pool),
        "/api/v1/admin/models",
        json!({"name": "Karabiner 98k", "slug": "K98K"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn blank_required_field_is_named(pool: PgPool) {
    let response = admin_post(
        build_test_app(pool),
        "/api/v1/admin/manufacturers",
        json!({"name": "  ", "code": "byf"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "name is required");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn variants_listed_on_model_page_in_year_order(pool: PgPool) {
    let model_id = seed(
        &pool,
        "/api/v1/admin/models",
        json!({"name": "K98k", "slug": "k98k"}),
    )
    .await;
    let maker_id = seed(
        &pool,
        "/api/v1/admin/manufacturers",
        json!({"name": "Mauser Oberndorf", "code": "byf", "country": "DE"}),
    )
    .await;
    for (name, slug, year) in [("Kriegsmodell", "kriegsmodell", 1944), ("Early", "early", 1937)] {
        seed(
            &pool,
            "/api/v1/admin/variants",
            json!({
                "firearm_model_id": model_id,
                "manufacturer_id": maker_id,
                "name": name,
                "slug": slug,
                "year_from": year,
            }),
        )
        .await;
    }

    let json = body_json(get(build_test_app(pool), "/api/v1/models/k98k").await).await;
    let variants = json["data"]["variants"].as_array().unwrap();
    assert_eq!(variants[0]["slug"], "early");
    assert_eq!(variants[1]["slug"], "kriegsmodell");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn part_slug_derived_from_title(pool: PgPool) {
    let response = admin_post(
        build_test_app(pool),
        "/api/v1/admin/parts",
        json!({"title": "Kimme für K98"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["slug"], "kimme-für-k98");
    assert_eq!(json["data"]["stock_status"], "OUT_OF_STOCK");
    assert_eq!(json["data"]["quantity"], 0);
}

// ---------------------------------------------------------------------------
// Editor host data
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn editor_data_carries_feeds_and_fallback_size(pool: PgPool) {
    let model_id = seed(
        &pool,
        "/api/v1/admin/models",
        json!({"name": "K98k", "slug": "k98k"}),
    )
    .await;
    let diagram_id = seed(
        &pool,
        "/api/v1/admin/diagrams",
        json!({
            "title": "Stock",
            "storage_reference": "diagrams/stock.png",
            "firearm_model_id": model_id,
        }),
    )
    .await;
    seed(
        &pool,
        "/api/v1/admin/parts",
        json!({"title": "Buttplate", "sku": "BP-1"}),
    )
    .await;
    seed(
        &pool,
        "/api/v1/admin/part-sets",
        json!({"slug": "bolt-set", "title": "Bolt set"}),
    )
    .await;

    let response = admin_get(
        build_test_app(pool),
        &format!("/api/v1/admin/diagrams/{diagram_id}/editor"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = body_json(response).await["data"].clone();

    assert_eq!(data["width"], 1000);
    assert_eq!(data["height"], 1000);
    assert_eq!(data["defaultModelSlug"], "k98k");
    assert_eq!(data["options"]["parts"][0]["label"], "Buttplate (BP-1)");
    assert_eq!(data["options"]["sets"][0]["label"], "Bolt set");
    assert_eq!(data["options"]["categories"], json!([]));
}
