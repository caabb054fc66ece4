mod common;

#[tokio::test]
async fn login_success_sets_cookie() {
    let env = common::TestEnv::start().await;
    let server = env.server();

    let response = server
        .post("/api/auth/login")
        .json(&serde_json::json!({
            "email": "admin@demo.e-davis.gov",
            "password": "admin"
        }))
        .await;

    response.assert_status_ok();
    let cookie = response.cookie("edavis_session");
    assert!(!cookie.value().is_empty());
    assert_eq!(cookie.http_only(), Some(true));

    let body: serde_json::Value = response.json();
    assert_eq!(body["message"].as_str(), Some("Login successful"));
    assert_eq!(body["user"]["role"].as_str(), Some("admin"));
}

#[tokio::test]
async fn login_invalid_credentials() {
    let env = common::TestEnv::start().await;
    let server = env.server_permissive();

    let response = server
        .post("/api/auth/login")
        .json(&serde_json::json!({
            "email": "admin@demo.e-davis.gov",
            "password": "wrongpassword"
        }))
        .await;

    response.assert_status_unauthorized();
    let body: serde_json::Value = response.json();
    assert!(body["error"].as_str().is_some());
}

#[tokio::test]
async fn login_blank_fields_rejected() {
    let env = common::TestEnv::start().await;
    let server = env.server_permissive();

    let response = server
        .post("/api/auth/login")
        .json(&serde_json::json!({ "email": "", "password": "" }))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn me_with_valid_cookie() {
    let env = common::TestEnv::start().await;
    let server = env.server();

    common::login_as(&server, "moderator").await;

    let response = server.get("/api/auth/me").await;
    response.assert_status_ok();

    let user: serde_json::Value = response.json();
    assert_eq!(user["email"].as_str(), Some("moderator@demo.e-davis.gov"));
    assert_eq!(user["role"].as_str(), Some("moderator"));
}

#[tokio::test]
async fn me_without_cookie_returns_401() {
    let env = common::TestEnv::start().await;
    let server = env.server_permissive();

    server.get("/api/auth/me").await.assert_status_unauthorized();
}

#[tokio::test]
async fn logout_ends_session() {
    let env = common::TestEnv::start().await;
    let server = env.server_permissive();

    common::login_as(&server, "owner").await;
    server.get("/api/auth/me").await.assert_status_ok();

    server.post("/api/auth/logout").await;

    server.get("/api/auth/me").await.assert_status_unauthorized();
}
