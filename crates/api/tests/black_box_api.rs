use chrono::{Duration as ChronoDuration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::StatusCode;
use serde_json::json;

use staffhub_auth::SessionClaims;
use staffhub_core::StaffId;
use staffhub_infra::PortalConfig;
use staffhub_infra::seed::SeedData;

const ADMIN: &str = "0192b3c4-0000-7000-8000-00000000000a";
const HR_LEAD: &str = "0192b3c4-0000-7000-8000-00000000000b";
const RMT: &str = "0192b3c4-0000-7000-8000-00000000000c";
const MANAGER: &str = "0192b3c4-0000-7000-8000-00000000000d";
const RICHMOND_PHYSIO: &str = "0192b3c4-0000-7000-8000-00000000000e";
const ACCOUNTANT: &str = "0192b3c4-0000-7000-8000-00000000000f";

fn seed() -> SeedData {
    SeedData::from_json(
        &json!({
            "profiles": [
                { "id": ADMIN, "full_name": "Ada Admin", "department": "administration",
                  "roles": ["admin"], "clinic_locations": ["Headquarter"] },
                { "id": HR_LEAD, "full_name": "Hana Hr", "department": "human_resources",
                  "roles": ["hr"], "clinic_locations": ["Headquarter"] },
                { "id": RMT, "full_name": "Riley Rmt", "department": "clinical",
                  "roles": ["rmt"], "clinic_locations": ["Burnaby"],
                  "phone": "604-555-0101", "bio": "Sports massage", "email": "riley@clinic.example" },
                { "id": MANAGER, "full_name": "Morgan Manager", "department": "management",
                  "roles": ["management"], "clinic_locations": ["Burnaby"] },
                { "id": RICHMOND_PHYSIO, "full_name": "Parker Physio", "department": "clinical",
                  "roles": ["clinical_provider"], "clinic_locations": ["Richmond"],
                  "phone": "604-555-0199", "bio": "Physiotherapist" },
                { "id": ACCOUNTANT, "full_name": "Avery Accounts", "department": "finance",
                  "roles": ["staff"], "clinic_locations": ["Burnaby"], "email": "avery@clinic.example" }
            ],
            "hr_records": [
                { "staff_id": RMT, "birth_date": "1991-03-14", "national_id": "123-456-789" }
            ],
            "rules": [
                { "viewer_role": "rmt", "target_department": "clinical", "can_view": true, "visible_fields": ["bio"] },
                { "viewer_role": "management", "target_department": "clinical", "can_view": true, "visible_fields": ["phone"] },
                { "viewer_role": "management", "target_department": "finance", "can_view": true, "visible_fields": ["email"] }
            ]
        })
        .to_string(),
    )
    .expect("seed fixture parses")
}

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(jwt_secret: &str) -> Self {
        // Same router as prod over a seeded in-memory store, on an ephemeral port.
        let config = PortalConfig {
            jwt_secret: jwt_secret.to_string(),
            ..PortalConfig::default()
        };
        let app = staffhub_api::app::build_app_with_seed(&config, seed())
            .await
            .expect("failed to build app");
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn mint_jwt(jwt_secret: &str, sub: &str, roles: &[&str], locations: &[&str]) -> String {
    let now = Utc::now();
    let claims = SessionClaims {
        sub: sub.parse::<StaffId>().unwrap(),
        roles: roles.iter().map(|r| r.to_string()).collect(),
        locations: locations.iter().map(|l| l.to_string()).collect(),
        issued_at: now,
        expires_at: now + ChronoDuration::minutes(10),
    };

    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_bytes()),
    )
    .expect("failed to encode jwt")
}

fn staff_ids(body: &serde_json::Value) -> Vec<String> {
    body["staff"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn auth_required_for_protected_endpoints() {
    let jwt_secret = "test-secret";
    let srv = TestServer::spawn(jwt_secret).await;

    let client = reqwest::Client::new();
    let res = client
        .get(format!("{}/health", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .get(format!("{}/directory", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    // Signed with a different secret.
    let forged = mint_jwt("other-secret", ADMIN, &["admin"], &[]);
    let res = client
        .get(format!("{}/whoami", srv.base_url))
        .bearer_auth(forged)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn viewer_is_derived_from_token() {
    let jwt_secret = "test-secret";
    let srv = TestServer::spawn(jwt_secret).await;

    let token = mint_jwt(jwt_secret, RMT, &["rmt", "wizard"], &["Burnaby"]);

    let client = reqwest::Client::new();
    let res = client
        .get(format!("{}/whoami", srv.base_url))
        .bearer_auth(token)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["staff_id"], RMT);
    // Unknown role tags are dropped.
    assert_eq!(body["roles"], json!(["rmt"]));
    assert_eq!(body["locations"], json!(["Burnaby"]));
}

#[tokio::test]
async fn directory_is_filtered_and_redacted() {
    let jwt_secret = "test-secret";
    let srv = TestServer::spawn(jwt_secret).await;
    let client = reqwest::Client::new();

    let token = mint_jwt(jwt_secret, RMT, &["rmt"], &["Burnaby"]);
    let res = client
        .get(format!("{}/directory", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();

    // Parker Physio, Riley Rmt (self); finance and admin departments hidden.
    assert_eq!(staff_ids(&body), vec![RICHMOND_PHYSIO, RMT]);
    let physio = &body["staff"][0];
    assert_eq!(physio["bio"], "Physiotherapist");
    assert!(physio["phone"].is_null());
    let me = &body["staff"][1];
    assert_eq!(me["phone"], "604-555-0101");
}

#[tokio::test]
async fn management_is_limited_to_own_clinic() {
    let jwt_secret = "test-secret";
    let srv = TestServer::spawn(jwt_secret).await;
    let client = reqwest::Client::new();

    let token = mint_jwt(jwt_secret, MANAGER, &["management"], &["Burnaby"]);
    let res = client
        .get(format!("{}/directory", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();

    assert_eq!(staff_ids(&body), vec![ACCOUNTANT, MANAGER, RMT]);

    // Admin can ask why the Richmond physio is missing.
    let admin = mint_jwt(jwt_secret, ADMIN, &["admin"], &["Headquarter"]);
    let res = client
        .get(format!(
            "{}/admin/visibility/{}?target={}",
            srv.base_url, MANAGER, RICHMOND_PHYSIO
        ))
        .bearer_auth(&admin)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["decision"], "outside_locations");
}

#[tokio::test]
async fn hr_records_are_forbidden_before_lookup() {
    let jwt_secret = "test-secret";
    let srv = TestServer::spawn(jwt_secret).await;
    let client = reqwest::Client::new();
    let missing = StaffId::new().to_string();

    let manager = mint_jwt(jwt_secret, MANAGER, &["management"], &["Burnaby"]);
    for id in [RMT, missing.as_str()] {
        let res = client
            .get(format!("{}/hr/{}", srv.base_url, id))
            .bearer_auth(&manager)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }

    let hr = mint_jwt(jwt_secret, HR_LEAD, &["hr"], &["Headquarter"]);
    let res = client
        .get(format!("{}/hr/{}", srv.base_url, RMT))
        .bearer_auth(&hr)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["national_id"], "123-456-789");

    let res = client
        .get(format!("{}/hr/{}", srv.base_url, missing))
        .bearer_auth(&hr)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client
        .put(format!("{}/hr/{}", srv.base_url, ACCOUNTANT))
        .bearer_auth(&hr)
        .json(&json!({ "emergency_contact": { "name": "Jo", "phone": "604-555-0111" } }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn permission_matrix_is_admin_only_and_idempotent() {
    let jwt_secret = "test-secret";
    let srv = TestServer::spawn(jwt_secret).await;
    let client = reqwest::Client::new();
    let rule = json!({
        "viewer_role": "rmt",
        "target_department": "finance",
        "can_view": true,
        "visible_fields": ["email"]
    });

    let hr = mint_jwt(jwt_secret, HR_LEAD, &["hr"], &[]);
    let res = client
        .put(format!("{}/admin/permissions", srv.base_url))
        .bearer_auth(&hr)
        .json(&rule)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let admin = mint_jwt(jwt_secret, ADMIN, &["admin"], &["Headquarter"]);
    for _ in 0..2 {
        let res = client
            .put(format!("{}/admin/permissions", srv.base_url))
            .bearer_auth(&admin)
            .json(&rule)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    let res = client
        .get(format!("{}/admin/permissions", srv.base_url))
        .bearer_auth(&admin)
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    let cells = body["cells"].as_array().unwrap();
    let explicit = cells.iter().filter(|c| c["explicit"] == true).count();
    assert_eq!(explicit, 4);

    // The RMT now sees the accountant's email.
    let rmt = mint_jwt(jwt_secret, RMT, &["rmt"], &["Burnaby"]);
    let res = client
        .get(format!("{}/directory", srv.base_url))
        .bearer_auth(&rmt)
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    let accountant = body["staff"]
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["id"] == ACCOUNTANT)
        .unwrap();
    assert_eq!(accountant["email"], "avery@clinic.example");

    // Unknown department is a validation error.
    let res = client
        .put(format!("{}/admin/permissions", srv.base_url))
        .bearer_auth(&admin)
        .json(&json!({ "viewer_role": "rmt", "target_department": "warehouse", "can_view": true }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn profile_edits_are_limited_to_owner() {
    let jwt_secret = "test-secret";
    let srv = TestServer::spawn(jwt_secret).await;
    let client = reqwest::Client::new();

    let rmt = mint_jwt(jwt_secret, RMT, &["rmt"], &["Burnaby"]);
    let res = client
        .put(format!("{}/profiles/{}", srv.base_url, RMT))
        .bearer_auth(&rmt)
        .json(&json!({ "bio": "Deep tissue", "email": "Riley@Clinic.Example" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .get(format!("{}/profile/me", srv.base_url))
        .bearer_auth(&rmt)
        .send()
        .await
        .unwrap();
    let me: serde_json::Value = res.json().await.unwrap();
    assert_eq!(me["bio"], "Deep tissue");
    assert_eq!(me["email"], "riley@clinic.example");

    let res = client
        .put(format!("{}/profiles/{}", srv.base_url, ACCOUNTANT))
        .bearer_auth(&rmt)
        .json(&json!({ "bio": "hijacked" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = client
        .put(format!("{}/profiles/{}", srv.base_url, RMT))
        .bearer_auth(&rmt)
        .json(&json!({ "phone": "12" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}
