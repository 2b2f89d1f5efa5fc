//! HTTP-level tests for the catalog resources, CMS content, bookings
//! listing and the SEO endpoint.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, patch_json_auth, post_json, post_json_auth};
use serde_json::json;
use shifa_core::roles::{ROLE_ADMIN, ROLE_EDITOR};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Input checks that reject before touching the database
// ---------------------------------------------------------------------------

#[tokio::test]
async fn negative_package_price_is_400() {
    let app = common::build_test_app(common::unreachable_pool());
    let token = common::token_for(1, ROLE_EDITOR);

    let response = post_json_auth(
        app,
        "/api/v1/packages",
        json!({ "slug": "cardiac-care", "name_en": "Cardiac", "name_ar": "القلب", "price": -5.0 }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn blank_arabic_title_is_400() {
    let app = common::build_test_app(common::unreachable_pool());
    let token = common::token_for(1, ROLE_EDITOR);

    let response = post_json_auth(
        app,
        "/api/v1/hospitals",
        json!({ "slug": "apollo-chennai", "name_en": "Apollo", "name_ar": "  ", "city": "Chennai" }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("name_ar"));
}

#[tokio::test]
async fn unknown_content_type_is_400() {
    let app = common::build_test_app(common::unreachable_pool());

    let response = get(app, "/api/v1/content?type=newsletter").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_booking_status_filter_is_400() {
    let app = common::build_test_app(common::unreachable_pool());
    let token = common::token_for(1, ROLE_ADMIN);

    let response = get_auth(app, "/api/v1/bookings?status=ARCHIVED", &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_seo_kind_is_400() {
    let app = common::build_test_app(common::unreachable_pool());

    let response = get(app, "/api/v1/seo/clinics/apollo").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn home_seo_document_needs_no_database() {
    let app = common::build_test_app(common::unreachable_pool());

    let response = get(app, "/api/v1/seo/home?locale=ar").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["metadata"]["canonical"], format!("{}/ar", common::TEST_SITE));
    assert_eq!(json["data"]["json_ld"][0]["@type"], "MedicalBusiness");
    assert_eq!(json["data"]["json_ld"][0]["url"], common::TEST_SITE);
}

// ---------------------------------------------------------------------------
// Database-backed flows
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn catalog_lists_only_published_rows_for_anonymous_callers(pool: PgPool) {
    let token = common::token_for(1, ROLE_EDITOR);
    let app = common::build_test_app(pool);

    for (slug, published) in [("ivf", true), ("knee-replacement", false)] {
        let response = post_json_auth(
            app.clone(),
            "/api/v1/treatments",
            json!({ "slug": slug, "title_en": slug, "title_ar": "علاج", "published": published }),
            &token,
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let anonymous = body_json(get(app.clone(), "/api/v1/treatments?published=false").await).await;
    assert_eq!(anonymous["meta"]["total"], 1);
    assert_eq!(anonymous["data"][0]["slug"], "ivf");

    let staff = body_json(get_auth(app.clone(), "/api/v1/treatments?limit=1", &token).await).await;
    assert_eq!(staff["meta"]["total"], 2);
    assert_eq!(staff["meta"]["limit"], 1);
    assert_eq!(staff["data"].as_array().unwrap().len(), 1);

    let drafts = body_json(get_auth(app, "/api/v1/treatments?published=false", &token).await).await;
    assert_eq!(drafts["meta"]["total"], 1);
    assert_eq!(drafts["data"][0]["slug"], "knee-replacement");
}

#[sqlx::test(migrations = "../db/migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn publishing_content_stamps_published_at_once(pool: PgPool) {
    let token = common::token_for(1, ROLE_EDITOR);
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app.clone(),
        "/api/v1/content",
        json!({ "slug": "ivf-costs", "type": "blog", "title_en": "IVF Costs", "title_ar": "تكاليف" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert!(body_json(response).await["data"]["published_at"].is_null());

    let published = body_json(
        patch_json_auth(
            app.clone(),
            "/api/v1/content/ivf-costs",
            json!({ "published": true }),
            &token,
        )
        .await,
    )
    .await;
    let stamp = published["data"]["published_at"].clone();
    assert!(stamp.is_string());

    let edited = body_json(
        patch_json_auth(
            app.clone(),
            "/api/v1/content/ivf-costs",
            json!({ "published": true, "excerpt_en": "Updated" }),
            &token,
        )
        .await,
    )
    .await;
    assert_eq!(edited["data"]["published_at"], stamp);

    let pages = body_json(get(app.clone(), "/api/v1/content").await).await;
    assert_eq!(pages["meta"]["total"], 0);
    let blog = body_json(get(app, "/api/v1/content?type=blog").await).await;
    assert_eq!(blog["meta"]["total"], 1);
}

#[tokio::test]
async fn title_without_slug_characters_is_400() {
    let app = common::build_test_app(common::unreachable_pool());
    let token = common::token_for(1, ROLE_EDITOR);

    let response = post_json_auth(
        app,
        "/api/v1/content",
        json!({ "type": "blog", "title_en": "!!!", "title_ar": "مدونة" }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("Invalid slug"));
}

#[sqlx::test(migrations = "../db/migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn missing_slug_is_derived_from_english_title(pool: PgPool) {
    let token = common::token_for(1, ROLE_EDITOR);
    let app = common::build_test_app(pool);

    let treatment = post_json_auth(
        app.clone(),
        "/api/v1/treatments",
        json!({ "title_en": "Knee Replacement", "title_ar": "استبدال الركبة" }),
        &token,
    )
    .await;
    assert_eq!(treatment.status(), StatusCode::CREATED);
    assert_eq!(body_json(treatment).await["data"]["slug"], "knee-replacement");

    let page = post_json_auth(
        app,
        "/api/v1/content",
        json!({ "slug": "", "type": "blog", "title_en": "IVF Costs: 2025 Guide", "title_ar": "تكاليف" }),
        &token,
    )
    .await;
    assert_eq!(page.status(), StatusCode::CREATED);
    assert_eq!(body_json(page).await["data"]["slug"], "ivf-costs-2025-guide");
}

#[sqlx::test(migrations = "../db/migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn soft_deleted_treatment_disappears(pool: PgPool) {
    let admin = common::token_for(1, ROLE_ADMIN);
    let app = common::build_test_app(pool);

    post_json_auth(
        app.clone(),
        "/api/v1/treatments",
        json!({ "slug": "ivf", "title_en": "IVF", "title_ar": "أطفال الأنابيب", "published": true }),
        &admin,
    )
    .await;

    let response = common::delete_auth(app.clone(), "/api/v1/treatments/ivf", &admin).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(app.clone(), "/api/v1/treatments/ivf").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = common::delete_auth(app, "/api/v1/treatments/ivf", &admin).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn bookings_filter_by_status_and_country(pool: PgPool) {
    let token = common::token_for(1, ROLE_EDITOR);
    let app = common::build_test_app(pool);

    for (name, country) in [("Aisha Khan", "AE"), ("Yusuf Nair", "KW")] {
        let response = post_json(
            app.clone(),
            "/api/v1/lead",
            json!({
                "patient_name": name,
                "email": "patient@example.com",
                "phone": "+96550001234",
                "country_of_origin": country
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let all = body_json(get_auth(app.clone(), "/api/v1/bookings?status=LEAD", &token).await).await;
    assert_eq!(all["meta"]["total"], 2);

    let kuwait = body_json(get_auth(app.clone(), "/api/v1/bookings?country=KW", &token).await).await;
    assert_eq!(kuwait["meta"]["total"], 1);
    assert_eq!(kuwait["data"][0]["patient_name"], "Yusuf Nair");

    let confirmed =
        body_json(get_auth(app, "/api/v1/bookings?status=CONFIRMED", &token).await).await;
    assert_eq!(confirmed["meta"]["total"], 0);
}

#[sqlx::test(migrations = "../db/migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn seo_document_for_published_treatment(pool: PgPool) {
    let token = common::token_for(1, ROLE_EDITOR);
    let app = common::build_test_app(pool);

    post_json_auth(
        app.clone(),
        "/api/v1/treatments",
        json!({
            "slug": "ivf",
            "title_en": "IVF Treatment",
            "title_ar": "أطفال الأنابيب",
            "cost_min": 3000.0,
            "cost_max": 5000.0,
            "published": true
        }),
        &token,
    )
    .await;

    let response = get(app.clone(), "/api/v1/seo/treatments/ivf?locale=ar").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["data"]["metadata"]["canonical"]
        .as_str()
        .unwrap()
        .ends_with("/ar/treatments/ivf"));
    assert!(!json["data"]["json_ld"].as_array().unwrap().is_empty());

    let response = get(app, "/api/v1/seo/treatments/unknown").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
