mod test_utils;

use fan_store_backend::repositories::storage::StoreLifecycle;
use reqwest::{header, Client, Response, StatusCode};
use serde_json::{json, Value};
use test_utils::*;

/// `name=value` pair from the response's Set-Cookie header.
fn cookie_pair(response: &Response) -> String {
    let raw = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("no cookie set")
        .to_str()
        .unwrap();
    raw.split(';').next().unwrap().to_string()
}

#[actix_rt::test]
async fn registration_logs_the_customer_in() {
    let app = TestApp::spawn().await;
    let client = new_client();

    let response = app.register(&client, "new_fan").await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert!(cookie_pair(&response).starts_with("sid="));

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["user"]["username"], "new_fan");
    assert_eq!(body["user"]["isAdmin"], false);
    assert!(body["user"]["userId"].is_i64());
    assert!(body.get("token").is_none());

    let me = app.get_json(&client, "/api/auth/user").await;
    assert_eq!(me["username"], "new_fan");
}

#[actix_rt::test]
async fn current_user_requires_a_session() {
    let app = TestApp::spawn().await;

    let response = app.get(&new_client(), "/api/auth/user").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn wrong_password_is_unauthorized() {
    let app = TestApp::spawn().await;
    app.customer_client("careful_fan").await;

    let response = app.login(&new_client(), "careful_fan", "Wrong#Pass99").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app.login(&new_client(), ADMIN_USERNAME, "Wrong#Pass99").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app.login(&new_client(), "nobody_here", PASSWORD).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn customer_can_log_back_in() {
    let app = TestApp::spawn().await;
    app.customer_client("returning_fan").await;

    let client = new_client();
    let response = app.login(&client, "returning_fan", PASSWORD).await;
    assert_eq!(response.status(), StatusCode::OK);

    let me = app.get_json(&client, "/api/auth/user").await;
    assert_eq!(me["username"], "returning_fan");
}

#[actix_rt::test]
async fn logout_destroys_the_session() {
    let app = TestApp::spawn().await;
    app.customer_client("leaving_fan").await;

    let client = new_client();
    let response = app.login(&client, "leaving_fan", PASSWORD).await;
    let sid = cookie_pair(&response);

    let response = client.post(app.url("/api/auth/logout")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Logged out successfully");

    let response = app.get(&client, "/api/auth/user").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Replaying the old cookie must not work either
    let replay = Client::new()
        .get(app.url("/api/auth/user"))
        .header(header::COOKIE, sid)
        .send()
        .await
        .unwrap();
    assert_eq!(replay.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn weak_password_is_rejected_at_registration() {
    let app = TestApp::spawn().await;

    let response = app
        .post(
            &new_client(),
            "/api/auth/register",
            &json!({ "username": "weak_fan", "email": "weak@example.com", "password": "password" }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Invalid input");
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|e| e["field"].as_str())
        .collect();
    assert!(fields.contains(&"password"));
}

#[actix_rt::test]
async fn duplicate_username_is_a_conflict() {
    let app = TestApp::spawn().await;
    app.customer_client("taken_name").await;

    let response = app.register(&new_client(), "taken_name").await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = app.register(&new_client(), ADMIN_USERNAME).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[actix_rt::test]
async fn disabled_customer_cannot_log_in() {
    let app = TestApp::spawn().await;
    let (_, user) = app.customer_client("banned_fan").await;
    let admin = app.admin_client().await;

    let response = app
        .patch(
            &admin,
            &format!("/api/admin/customers/{}", user["userId"]),
            &json!({ "isActive": false }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.login(&new_client(), "banned_fan", PASSWORD).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[actix_rt::test]
async fn hosted_deployment_issues_bearer_tokens() {
    let app = TestApp::spawn_hosted().await;

    let response = app.register(&new_client(), "token_fan").await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert!(cookie_pair(&response).starts_with("auth_token="));
    let body: Value = response.json().await.unwrap();
    let token = body["token"].as_str().expect("token missing").to_string();

    // No cookie jar: the header alone authenticates
    let client = Client::new();
    let me: Value = client
        .get(app.url("/api/auth/user"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(me["username"], "token_fan");

    let response = client
        .get(app.url("/api/auth/user"))
        .bearer_auth("not-a-token")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let health = app.get_json(&client, "/api/health").await;
    assert_eq!(health["auth"], "jwt");
}

#[actix_rt::test]
async fn hosted_admin_token_reaches_admin_routes() {
    let app = TestApp::spawn_hosted().await;

    let response = app.login(&Client::new(), ADMIN_USERNAME, PASSWORD).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["user"]["isAdmin"], true);
    let token = body["token"].as_str().unwrap().to_string();

    let response = Client::new()
        .get(app.url("/api/admin/stats"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn stale_cookie_does_not_break_public_routes_when_backend_is_down() {
    let app = TestApp::spawn().await;
    app.store.close().await;

    let response = Client::new()
        .get(app.url("/api/health"))
        .header(header::COOKIE, "sid=stale-session-id")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let health: Value = response.json().await.unwrap();
    assert_eq!(health["status"], "degraded");
    assert_eq!(health["database"], "Unavailable");

    // Routes that need a caller still surface the lookup failure
    let response = Client::new()
        .get(app.url("/api/auth/user"))
        .header(header::COOKIE, "sid=stale-session-id")
        .send()
        .await
        .unwrap();
    assert!(response.status().is_server_error());
}
