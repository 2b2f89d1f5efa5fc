//! HTTP-level tests for login, token handling and role gates.

mod common;

use std::sync::Arc;

use axum::http::{Method, StatusCode};
use common::{
    body_json, delete_auth, get, get_auth, patch_json_auth, post_json, post_json_auth,
    RecordingMailer,
};
use serde_json::json;
use shifa_api::auth::password::hash_password;
use shifa_core::roles::{ROLE_ADMIN, ROLE_EDITOR};
use shifa_db::models::user::{CreateUser, User};
use shifa_db::repositories::UserRepo;
use shifa_events::BookingNotifier;
use sqlx::PgPool;

const PASSWORD: &str = "correct-horse-battery";

async fn create_user(pool: &PgPool, email: &str, role: &str) -> User {
    let input = CreateUser {
        email: email.to_string(),
        name: "Test User".to_string(),
        password_hash: hash_password(PASSWORD).expect("hashing should succeed"),
        role: role.to_string(),
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
}

// ---------------------------------------------------------------------------
// Gates decided before the database is touched
// ---------------------------------------------------------------------------

#[tokio::test]
async fn patching_a_booking_without_token_is_401() {
    let app = common::build_test_app(common::unreachable_pool());
    let request = common::json_request(
        Method::PATCH,
        "/api/v1/bookings/1",
        &json!({ "status": "CONFIRMED" }),
        None,
    );

    let response = common::send(app, request).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn garbage_token_is_401_even_on_public_reads() {
    let app = common::build_test_app(common::unreachable_pool());

    let response = get_auth(app, "/api/v1/treatments", "not-a-jwt").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn me_requires_a_token() {
    let app = common::build_test_app(common::unreachable_pool());

    let response = get(app, "/api/v1/auth/me").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn editor_cannot_delete_catalog_entries() {
    let app = common::build_test_app(common::unreachable_pool());
    let token = common::token_for(7, ROLE_EDITOR);

    for uri in [
        "/api/v1/treatments/knee-replacement",
        "/api/v1/hospitals/apollo-chennai",
        "/api/v1/doctors/dr-rao",
        "/api/v1/packages/cardiac-care",
        "/api/v1/content/about",
        "/api/v1/media/3",
        "/api/v1/bookings/3",
    ] {
        let response = delete_auth(app.clone(), uri, &token).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN, "{uri}");
    }
}

#[tokio::test]
async fn unknown_role_cannot_create_content() {
    let app = common::build_test_app(common::unreachable_pool());
    let token = common::token_for(9, "VIEWER");

    let response = post_json_auth(
        app,
        "/api/v1/treatments",
        json!({ "slug": "ivf", "title_en": "IVF", "title_ar": "أطفال الأنابيب" }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn editor_create_with_bad_slug_is_400() {
    let app = common::build_test_app(common::unreachable_pool());
    let token = common::token_for(7, ROLE_EDITOR);

    let response = post_json_auth(
        app,
        "/api/v1/treatments",
        json!({ "slug": "Knee Replacement", "title_en": "Knee", "title_ar": "ركبة" }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn uploads_are_501_without_upload_dir() {
    let app = common::build_test_app(common::unreachable_pool());
    let token = common::token_for(1, ROLE_ADMIN);
    let boundary = "shifa-boundary";
    let body = format!(
        "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"a.png\"\r\n\
         Content-Type: image/png\r\n\r\nnot-really-a-png\r\n--{boundary}--\r\n"
    );
    let request = axum::http::Request::builder()
        .method(Method::POST)
        .uri("/api/v1/media/upload")
        .header("authorization", format!("Bearer {token}"))
        .header(
            "content-type",
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(axum::body::Body::from(body))
        .unwrap();

    let response = common::send(app, request).await;

    assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);
}

// ---------------------------------------------------------------------------
// Flows against a real database
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn login_returns_token_usable_on_me(pool: PgPool) {
    let user = create_user(&pool, "editor@shifa.test", ROLE_EDITOR).await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app.clone(),
        "/api/v1/auth/login",
        json!({ "email": "Editor@Shifa.test", "password": PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["token_type"], "Bearer");
    assert_eq!(json["data"]["expires_in"], 3600);
    assert_eq!(json["data"]["user"]["id"], user.id);
    assert!(json["data"]["user"].get("password_hash").is_none());

    let token = json["data"]["access_token"].as_str().unwrap();
    let response = get_auth(app, "/api/v1/auth/me", token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let me = body_json(response).await;
    assert_eq!(me["data"]["email"], "editor@shifa.test");
    assert_eq!(me["data"]["role"], ROLE_EDITOR);
}

#[sqlx::test(migrations = "../db/migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn wrong_password_and_unknown_email_look_the_same(pool: PgPool) {
    create_user(&pool, "admin@shifa.test", ROLE_ADMIN).await;
    let app = common::build_test_app(pool);

    let wrong = post_json(
        app.clone(),
        "/api/v1/auth/login",
        json!({ "email": "admin@shifa.test", "password": "nope-nope-nope" }),
    )
    .await;
    let unknown = post_json(
        app,
        "/api/v1/auth/login",
        json!({ "email": "ghost@shifa.test", "password": PASSWORD }),
    )
    .await;

    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(wrong).await["error"], body_json(unknown).await["error"]);
}

#[sqlx::test(migrations = "../db/migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn deactivated_account_is_only_revealed_to_the_right_password(pool: PgPool) {
    let user = create_user(&pool, "former@shifa.test", ROLE_EDITOR).await;
    sqlx::query("UPDATE users SET is_active = false WHERE id = $1")
        .bind(user.id)
        .execute(&pool)
        .await
        .unwrap();
    let app = common::build_test_app(pool);

    let wrong = post_json(
        app.clone(),
        "/api/v1/auth/login",
        json!({ "email": "former@shifa.test", "password": "nope-nope-nope" }),
    )
    .await;
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(wrong).await["error"], "Invalid email or password");

    let right = post_json(
        app,
        "/api/v1/auth/login",
        json!({ "email": "former@shifa.test", "password": PASSWORD }),
    )
    .await;
    assert_eq!(right.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn drafts_are_hidden_from_anonymous_readers(pool: PgPool) {
    let editor = create_user(&pool, "editor@shifa.test", ROLE_EDITOR).await;
    let token = common::token_for(editor.id, ROLE_EDITOR);
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app.clone(),
        "/api/v1/treatments",
        json!({
            "slug": "knee-replacement",
            "title_en": "Knee Replacement",
            "title_ar": "استبدال الركبة",
            "cost_min": 4000.0,
            "cost_max": 6500.0
        }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let anonymous = get(app.clone(), "/api/v1/treatments/knee-replacement").await;
    assert_eq!(anonymous.status(), StatusCode::NOT_FOUND);

    let staff = get_auth(app.clone(), "/api/v1/treatments/knee-replacement", &token).await;
    assert_eq!(staff.status(), StatusCode::OK);

    let response = patch_json_auth(
        app.clone(),
        "/api/v1/treatments/knee-replacement",
        json!({ "published": true }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let anonymous = get(app, "/api/v1/treatments/knee-replacement").await;
    assert_eq!(anonymous.status(), StatusCode::OK);
    let json = body_json(anonymous).await;
    assert_eq!(json["data"]["currency"], "USD");
}

#[sqlx::test(migrations = "../db/migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn duplicate_slug_is_409(pool: PgPool) {
    let token = common::token_for(1, ROLE_ADMIN);
    let app = common::build_test_app(pool);
    let body = json!({ "slug": "ivf", "title_en": "IVF", "title_ar": "أطفال الأنابيب" });

    let first = post_json_auth(app.clone(), "/api/v1/treatments", body.clone(), &token).await;
    let second = post_json_auth(app, "/api/v1/treatments", body, &token).await;

    assert_eq!(first.status(), StatusCode::CREATED);
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn confirming_a_lead_stamps_confirmation_and_emails_once(pool: PgPool) {
    let mailer = Arc::new(RecordingMailer::default());
    let notifier = BookingNotifier::new(mailer.clone(), "staff@shifa.test");
    let app = common::build_test_app_with(pool, common::test_config(), notifier);
    let token = common::token_for(1, ROLE_EDITOR);

    let created = post_json(
        app.clone(),
        "/api/v1/lead",
        json!({
            "patient_name": "Omar Haddad",
            "email": "omar@example.om",
            "phone": "+96891234567",
            "country_of_origin": "OM"
        }),
    )
    .await;
    let id = body_json(created).await["data"]["id"].as_i64().unwrap();
    mailer.wait_for(2).await;

    let uri = format!("/api/v1/bookings/{id}");
    let response = patch_json_auth(app.clone(), &uri, json!({ "status": "CONFIRMED" }), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "CONFIRMED");
    let confirmed_at = json["data"]["confirmed_at"].clone();
    assert!(confirmed_at.is_string());

    assert_eq!(mailer.wait_for(4).await.len(), 4);

    let response = patch_json_auth(
        app.clone(),
        &uri,
        json!({ "status": "CONFIRMED", "admin_notes": "Visa letter sent" }),
        &token,
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["confirmed_at"], confirmed_at);
    assert_eq!(json["data"]["admin_notes"], "Visa letter sent");

    tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    assert_eq!(mailer.sent.lock().unwrap().len(), 4);

    let response = patch_json_auth(app, &uri, json!({ "status": "LOST" }), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
