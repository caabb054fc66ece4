mod common;

use edavis::db::settings_repository::SettingsRepository;

#[tokio::test]
async fn settings_default_has_no_question_link() {
    let env = common::TestEnv::start().await;
    let server = env.server();

    let settings: serde_json::Value = server.get("/api/settings").await.json();
    assert_eq!(settings["key"], "global");
    assert!(settings["question_link"].is_null());
}

#[tokio::test]
async fn admin_sets_question_link() {
    let env = common::TestEnv::start().await;
    let server = env.server();
    common::login_as(&server, "admin").await;

    server
        .put("/api/admin/settings")
        .json(&serde_json::json!({ "question_link": "  https://t.me/edavis_help  " }))
        .await;

    let settings: serde_json::Value = server.get("/api/settings").await.json();
    assert_eq!(settings["question_link"], "https://t.me/edavis_help");

    let stored = env.stores.settings.get_settings().await.unwrap();
    assert_eq!(stored.question_link.as_deref(), Some("https://t.me/edavis_help"));
}

#[tokio::test]
async fn empty_link_clears_setting() {
    let env = common::TestEnv::start().await;
    let server = env.server();
    common::login_as(&server, "owner").await;

    env.stores
        .settings
        .set_question_link(Some("https://example.com"))
        .await
        .unwrap();

    server
        .put("/api/admin/settings")
        .json(&serde_json::json!({ "question_link": "" }))
        .await;

    let settings: serde_json::Value = server.get("/api/settings").await.json();
    assert!(settings["question_link"].is_null());
}
