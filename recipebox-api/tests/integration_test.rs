/// Integration tests for the RecipeBox API
///
/// These tests drive the real router end-to-end against a live
/// PostgreSQL database:
/// - User CRUD and the password projection
/// - Recipe CRUD, null and reassigned owners
/// - Cascade delete from user to recipes
/// - Full-replace update semantics (missing fields are faults)
/// - Basic authentication gating

mod common;

use axum::http::StatusCode;
use common::TestContext;
use recipebox_shared::auth::password::verify_password;
use recipebox_shared::models::user::User;
use serde_json::json;

#[tokio::test]
async fn test_create_and_read_user() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx
        .send(common::json_request(
            "POST",
            "/user",
            json!({"email": "alice@example.com", "password": "correct horse"}),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let created = common::body_json(response).await;
    assert_eq!(created["email"], "alice@example.com");
    assert!(created["user_id"].is_number());
    // The password hash never leaves the service
    assert!(created.get("password").is_none());

    let id = created["user_id"].as_i64().unwrap();

    let response = ctx
        .send(common::empty_request("GET", &format!("/user/{}", id)))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let fetched = common::body_json(response).await;
    assert_eq!(fetched["user_id"], id);
    assert_eq!(fetched["email"], "alice@example.com");
    assert!(fetched.get("password").is_none());

    // The stored column holds a salted hash satisfying the check function
    // against the original password and nothing else
    let stored = User::find_by_id(&ctx.db, id as i32).await.unwrap().unwrap();
    assert_ne!(stored.password, "correct horse");
    assert!(verify_password("correct horse", &stored.password).unwrap());
    assert!(!verify_password("wrong horse", &stored.password).unwrap());
}

#[tokio::test]
async fn test_read_missing_user_is_fault() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx.send(common::empty_request("GET", "/user/2147483000")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = common::body_json(response).await;
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn test_list_users_contains_created() {
    let ctx = TestContext::new().await.unwrap();

    let created = common::body_json(
        ctx.send(common::json_request(
            "POST",
            "/user",
            json!({"email": "list-me@example.com", "password": "pw"}),
        ))
        .await,
    )
    .await;
    let id = created["user_id"].as_i64().unwrap();

    let response = ctx.send(common::empty_request("GET", "/users")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let users = common::body_json(response).await;
    let users = users.as_array().unwrap();
    let found = users
        .iter()
        .find(|u| u["user_id"] == id)
        .expect("created user should be listed");
    assert_eq!(found["email"], "list-me@example.com");
    // List responses apply the same projection as single-row responses
    assert!(found.get("password").is_none());
}

#[tokio::test]
async fn test_update_user_is_full_replace() {
    let ctx = TestContext::new().await.unwrap();

    let created = common::body_json(
        ctx.send(common::json_request(
            "POST",
            "/user",
            json!({"email": "before@example.com", "password": "old"}),
        ))
        .await,
    )
    .await;
    let id = created["user_id"].as_i64().unwrap();

    // Full body replaces both fields
    let response = ctx
        .send(common::json_request(
            "PUT",
            &format!("/user/{}", id),
            json!({"email": "after@example.com", "password": "new"}),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = common::body_json(response).await;
    assert_eq!(updated["email"], "after@example.com");

    let stored = User::find_by_id(&ctx.db, id as i32).await.unwrap().unwrap();
    assert!(verify_password("new", &stored.password).unwrap());
    assert!(!verify_password("old", &stored.password).unwrap());

    // A partial body omitting a required field is a fault, not a merge
    let response = ctx
        .send(common::json_request(
            "PUT",
            &format!("/user/{}", id),
            json!({"email": "partial@example.com"}),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // Updating a missing id is a fault
    let response = ctx
        .send(common::json_request(
            "PUT",
            "/user/2147483000",
            json!({"email": "ghost@example.com", "password": "pw"}),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_user_cascades_to_recipes() {
    let ctx = TestContext::new().await.unwrap();

    let created = common::body_json(
        ctx.send(common::json_request(
            "POST",
            "/user",
            json!({"email": "cook@example.com", "password": "pw"}),
        ))
        .await,
    )
    .await;
    let user_id = created["user_id"].as_i64().unwrap();

    let mut recipe_ids = Vec::new();
    for title in ["Soup", "Stew"] {
        let recipe = common::body_json(
            ctx.send(common::json_request(
                "POST",
                "/recipe",
                json!({"title": title, "body": "Simmer.", "user_id": user_id}),
            ))
            .await,
        )
        .await;
        recipe_ids.push(recipe["recipe_id"].as_i64().unwrap());
    }

    // Both owned recipes are listed before the delete
    let listed = common::body_json(
        ctx.send(common::empty_request(
            "GET",
            &format!("/user/{}/recipes", user_id),
        ))
        .await,
    )
    .await;
    assert_eq!(listed.as_array().unwrap().len(), 2);

    let response = ctx
        .send(common::empty_request("DELETE", &format!("/user/{}", user_id)))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(body["message"], "User deleted");

    // The user is gone
    let response = ctx
        .send(common::empty_request("GET", &format!("/user/{}", user_id)))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Its recipe listing is empty and the rows are unreadable by id
    let listed = common::body_json(
        ctx.send(common::empty_request(
            "GET",
            &format!("/user/{}/recipes", user_id),
        ))
        .await,
    )
    .await;
    assert_eq!(listed.as_array().unwrap().len(), 0);

    for recipe_id in recipe_ids {
        let response = ctx
            .send(common::empty_request(
                "GET",
                &format!("/recipe/{}", recipe_id),
            ))
            .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    // Deleting again is a fault, not a repeat confirmation
    let response = ctx
        .send(common::empty_request("DELETE", &format!("/user/{}", user_id)))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_recipe_crud_roundtrip() {
    let ctx = TestContext::new().await.unwrap();

    let owner = common::create_test_user(&ctx, "owner@example.com", "pw")
        .await
        .unwrap();
    let next_owner = common::create_test_user(&ctx, "next-owner@example.com", "pw")
        .await
        .unwrap();

    let response = ctx
        .send(common::json_request(
            "POST",
            "/recipe",
            json!({"title": "Bread", "body": "Flour, water, salt, yeast.", "user_id": owner.user_id}),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let created = common::body_json(response).await;
    let id = created["recipe_id"].as_i64().unwrap();
    assert_eq!(created["title"], "Bread");
    assert_eq!(created["body"], "Flour, water, salt, yeast.");
    assert_eq!(created["user_id"], owner.user_id);

    let fetched = common::body_json(
        ctx.send(common::empty_request("GET", &format!("/recipe/{}", id)))
            .await,
    )
    .await;
    assert_eq!(fetched, created);

    // Full replace, including handing the recipe to another user; the
    // payload-specified owner is trusted as-is
    let response = ctx
        .send(common::json_request(
            "PUT",
            &format!("/recipe/{}", id),
            json!({"title": "Sourdough", "body": "Flour, water, salt.", "user_id": next_owner.user_id}),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = common::body_json(response).await;
    assert_eq!(updated["title"], "Sourdough");
    assert_eq!(updated["user_id"], next_owner.user_id);

    // Listed with the same projection
    let listed = common::body_json(ctx.send(common::empty_request("GET", "/recipes")).await).await;
    let found = listed
        .as_array()
        .unwrap()
        .iter()
        .any(|r| r["recipe_id"] == id && r["title"] == "Sourdough");
    assert!(found, "updated recipe should be listed");

    let response = ctx
        .send(common::empty_request("DELETE", &format!("/recipe/{}", id)))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(body["message"], "Recipe deleted");

    let response = ctx
        .send(common::empty_request("GET", &format!("/recipe/{}", id)))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_recipe_with_null_owner() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx
        .send(common::json_request(
            "POST",
            "/recipe",
            json!({"title": "Orphan", "body": "No owner.", "user_id": null}),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let created = common::body_json(response).await;
    assert!(created["user_id"].is_null());

    let id = created["recipe_id"].as_i64().unwrap();
    let fetched = common::body_json(
        ctx.send(common::empty_request("GET", &format!("/recipe/{}", id)))
            .await,
    )
    .await;
    assert!(fetched["user_id"].is_null());
}

#[tokio::test]
async fn test_recipe_with_unknown_owner_is_conflict() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx
        .send(common::json_request(
            "POST",
            "/recipe",
            json!({"title": "Dangling", "body": "Bad owner.", "user_id": 2147483000}),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body = common::body_json(response).await;
    assert_eq!(body["error"], "conflict");
}

#[tokio::test]
async fn test_update_recipe_missing_field_is_fault() {
    let ctx = TestContext::new().await.unwrap();

    let created = common::body_json(
        ctx.send(common::json_request(
            "POST",
            "/recipe",
            json!({"title": "Complete", "body": "All fields.", "user_id": null}),
        ))
        .await,
    )
    .await;
    let id = created["recipe_id"].as_i64().unwrap();

    let response = ctx
        .send(common::json_request(
            "PUT",
            &format!("/recipe/{}", id),
            json!({"title": "Only a title"}),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_health() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx.send(common::empty_request("GET", "/health")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");
}

#[tokio::test]
async fn test_auth_disabled_leaves_surface_public() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx.send(common::empty_request("GET", "/users")).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_auth_required_gates_the_surface() {
    let ctx = TestContext::with_auth_required(true).await.unwrap();

    common::create_test_user(&ctx, "guarded@example.com", "s3cret")
        .await
        .unwrap();

    // No credentials
    let response = ctx.send(common::empty_request("GET", "/users")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Wrong password
    let response = ctx
        .send(common::authed_request(
            "GET",
            "/users",
            "guarded@example.com",
            "wrong",
        ))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Unknown email
    let response = ctx
        .send(common::authed_request(
            "GET",
            "/users",
            "nobody@example.com",
            "s3cret",
        ))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Malformed header
    let response = ctx
        .send(
            axum::http::Request::builder()
                .method("GET")
                .uri("/users")
                .header("authorization", "Basic !!!not-base64!!!")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Valid credentials
    let response = ctx
        .send(common::authed_request(
            "GET",
            "/users",
            "guarded@example.com",
            "s3cret",
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Health stays public either way
    let response = ctx.send(common::empty_request("GET", "/health")).await;
    assert_eq!(response.status(), StatusCode::OK);
}
