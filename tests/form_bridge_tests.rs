//! Form bridge integration tests
//!
//! Hidden fields endpoint and submission handling over a temporary SQLite database.

use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::http::{StatusCode, header};
use actix_web::test::{self, TestRequest};
use actix_web::App;
use tempfile::TempDir;

use walink::api::middleware::AttributionLayer;
use walink::api::{AppState, configure_app};
use walink::config::StaticConfig;
use walink::services::{AgentInput, CampaignInput};
use walink::storage::{Agent, Campaign, EntryFilter, FormEntry, FormField, SeaOrmStorage, StorageOptions};

// =============================================================================
// Test Setup
// =============================================================================

async fn create_test_state() -> (AppState, StaticConfig, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("form_bridge_test.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    let storage = Arc::new(
        SeaOrmStorage::new(&db_url, "sqlite", StorageOptions::default())
            .await
            .expect("Failed to create storage"),
    );

    let mut config = StaticConfig::default();
    config.site.base_url = "https://promo.example.com".to_string();

    let state = AppState::new(storage, &config);
    (state, config, temp_dir)
}

macro_rules! walink_app {
    ($state:expr, $config:expr) => {{
        test::init_service(
            App::new()
                .wrap(AttributionLayer::new(
                    $state.identity.clone(),
                    $config.attribution.clone(),
                ))
                .configure(|cfg| configure_app(cfg, &$state, &$config)),
        )
        .await
    }};
}

async fn seed(state: &AppState) -> (Campaign, Agent) {
    let campaign = state
        .campaign_service
        .create_campaign(CampaignInput {
            title: "Summer Promo".to_string(),
            admin_phone: "6281111111111".to_string(),
            whatsapp_message: "Hi, I'm interested".to_string(),
            ..Default::default()
        })
        .await
        .expect("Failed to create campaign");
    let agent = state
        .agent_service
        .create_agent(AgentInput {
            display_name: "Jane".to_string(),
            email: "jane@example.com".to_string(),
            referral_code: "AG007".to_string(),
            phone_number: "6282222222222".to_string(),
        })
        .await
        .expect("Failed to create agent");
    (campaign, agent)
}

fn form_post(uri: &str, body: String) -> TestRequest {
    TestRequest::post()
        .uri(uri)
        .insert_header((header::CONTENT_TYPE, "application/x-www-form-urlencoded"))
        .set_payload(body)
}

async fn saved_entries(state: &AppState) -> Vec<FormEntry> {
    state
        .storage
        .list_entries(EntryFilter::default())
        .await
        .expect("Failed to list entries")
}

// =============================================================================
// Hidden Fields
// =============================================================================

#[tokio::test]
async fn test_hidden_fields_from_tags_and_cookie() {
    let (state, config, _dir) = create_test_state().await;
    let app = walink_app!(state, config);

    let req = TestRequest::get()
        .uri("/forms/hidden-fields?tags=lead,%2312")
        .cookie(Cookie::new("wa_affiliate", "42"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains(r#"name="affiliate_id" value="42""#));
    assert!(body.contains(r#"name="campaign_id" value="12""#));
}

#[tokio::test]
async fn test_hidden_fields_default_to_zero() {
    let (state, config, _dir) = create_test_state().await;
    let app = walink_app!(state, config);

    let req = TestRequest::get().uri("/forms/hidden-fields").to_request();
    let resp = test::call_service(&app, req).await;

    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains(r#"name="affiliate_id" value="0""#));
    assert!(body.contains(r#"name="campaign_id" value="0""#));
}

#[tokio::test]
async fn test_hidden_fields_see_ref_from_same_request() {
    let (state, config, _dir) = create_test_state().await;
    let (_, agent) = seed(&state).await;
    let app = walink_app!(state, config);

    let req = TestRequest::get()
        .uri("/forms/hidden-fields?tags=%233&ref=AG007")
        .to_request();
    let resp = test::call_service(&app, req).await;

    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains(&format!(r#"name="affiliate_id" value="{}""#, agent.id)));
    assert!(body.contains(r#"name="campaign_id" value="3""#));
}

// =============================================================================
// Submissions
// =============================================================================

#[tokio::test]
async fn test_scenario_d_labels_and_redirect() {
    let (state, config, _dir) = create_test_state().await;
    let (campaign, agent) = seed(&state).await;
    let app = walink_app!(state, config);

    let body = format!(
        "campaign_id={}&affiliate_id={}&name=Budi&message=Halo+kak",
        campaign.id, agent.id
    );
    let resp = test::call_service(&app, form_post("/forms/contact/entries", body).to_request()).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        resp.headers().get(header::LOCATION).unwrap(),
        "https://promo.example.com/c/summer-promo"
    );

    let entries = saved_entries(&state).await;
    assert_eq!(entries.len(), 1);
    let entry = &entries[0];
    assert_eq!(entry.form_id, "contact");
    assert_eq!(entry.campaign_id, Some(campaign.id));
    assert_eq!(entry.agent_id, Some(agent.id));
    assert_eq!(
        entry.fields,
        vec![
            FormField::new("campaign", format!("Summer Promo (#{})", campaign.id)),
            FormField::new("agent", format!("Jane - 6282222222222 (#{})", agent.id)),
            FormField::new("name", "Budi"),
            FormField::new("message", "Halo kak"),
        ]
    );
}

#[tokio::test]
async fn test_submission_without_hidden_fields_returns_entry() {
    let (state, config, _dir) = create_test_state().await;
    let app = walink_app!(state, config);

    let resp = test::call_service(
        &app,
        form_post("/forms/newsletter/entries", "email=a%40b.com".to_string()).to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::OK);
    let entry: FormEntry = test::read_body_json(resp).await;
    assert_eq!(entry.form_id, "newsletter");
    assert_eq!(entry.campaign_id, None);
    assert_eq!(entry.agent_id, None);
    assert_eq!(entry.fields, vec![FormField::new("email", "a@b.com")]);
}

#[tokio::test]
async fn test_zero_hidden_values_are_ignored() {
    let (state, config, _dir) = create_test_state().await;
    let app = walink_app!(state, config);

    let resp = test::call_service(
        &app,
        form_post(
            "/forms/contact/entries",
            "campaign_id=0&affiliate_id=0&name=Budi".to_string(),
        ).to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::OK);
    let entry: FormEntry = test::read_body_json(resp).await;
    assert_eq!(entry.fields, vec![FormField::new("name", "Budi")]);
}

#[tokio::test]
async fn test_unknown_ids_keep_raw_labels() {
    let (state, config, _dir) = create_test_state().await;
    let app = walink_app!(state, config);

    let resp = test::call_service(
        &app,
        form_post(
            "/forms/contact/entries",
            "campaign_id=999&affiliate_id=77&name=Budi".to_string(),
        ).to_request(),
    )
    .await;

    // 活动不存在时不跳转
    assert_eq!(resp.status(), StatusCode::OK);
    let entry: FormEntry = test::read_body_json(resp).await;
    assert_eq!(entry.campaign_id, None);
    assert_eq!(entry.agent_id, None);
    assert_eq!(
        entry.fields,
        vec![
            FormField::new("campaign", "999"),
            FormField::new("agent", "77"),
            FormField::new("name", "Budi"),
        ]
    );
}

#[tokio::test]
async fn test_submission_with_only_agent_has_no_redirect() {
    let (state, config, _dir) = create_test_state().await;
    let (_, agent) = seed(&state).await;
    let app = walink_app!(state, config);

    let resp = test::call_service(
        &app,
        form_post(
            "/forms/contact/entries",
            format!("affiliate_id={}&name=Budi", agent.id),
        ).to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::OK);
    let entry: FormEntry = test::read_body_json(resp).await;
    assert_eq!(entry.agent_id, Some(agent.id));
    assert_eq!(entry.fields[0].name, "agent");
}

#[tokio::test]
async fn test_entries_filtered_by_campaign() {
    let (state, config, _dir) = create_test_state().await;
    let (campaign, _) = seed(&state).await;
    let app = walink_app!(state, config);

    test::call_service(
        &app,
        form_post(
            "/forms/contact/entries",
            format!("campaign_id={}&name=A", campaign.id),
        ).to_request(),
    )
    .await;
    test::call_service(
        &app,
        form_post("/forms/contact/entries", "name=B".to_string()).to_request(),
    )
    .await;

    let filtered = state
        .storage
        .list_entries(EntryFilter {
            campaign_id: Some(campaign.id),
            limit: None,
        })
        .await
        .unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(saved_entries(&state).await.len(), 2);
}
