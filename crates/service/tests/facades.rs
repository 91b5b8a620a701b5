mod support;

use std::sync::Arc;

use axum::http::{Method, StatusCode};
use models::admin::{BloodUnit, EmergencyAlert, UnitAction};
use models::auth::{LoginInput, SignupInput};
use models::donor::{AppointmentRequest, EligibilityInput, ProfileUpdate};
use models::hospital::{BloodStockFilter, NewBloodRequest};
use models::{Page, Role};
use service::storage::{MemoryStorage, AUTH_TOKEN_KEY, USER_TYPE_KEY};
use service::{Api, ApiClient, ClientError, Navigator};
use support::{Recorded, Stub};

/// Answers each endpoint with a body of the right shape.
fn backend(rec: &Recorded) -> (StatusCode, String) {
    let body = match (rec.method.as_str(), rec.path.as_str()) {
        ("POST", "/auth/login") => r#"{"token":"jwt-1","user":{"name":"Asha","blood_type":"B+"}}"#,
        ("GET", "/donor/profile") => r#"{"name":"Asha","blood_type":"B+","total_donations":3}"#,
        ("GET", "/donor/appointments") | ("GET", "/donor/history") => "[]",
        ("POST", "/donor/check-eligibility") => r#"{"eligible":false,"reason":"Donation too recent"}"#,
        ("GET", "/hospital/blood-stock") | ("GET", "/hospital/requests") => "[]",
        ("GET", "/admin/blood-units") | ("GET", "/admin/requests") => "[]",
        ("GET", "/admin/dashboard-stats") => r#"{"units":10}"#,
        _ => r#"{"msg":"ok"}"#,
    };
    (StatusCode::OK, body.to_string())
}

async fn api() -> anyhow::Result<(Stub, Api)> {
    let stub = Stub::start(backend).await?;
    let storage = Arc::new(MemoryStorage::with_items([(AUTH_TOKEN_KEY, "jwt-0")]));
    let api = Api::new(ApiClient::new(&stub.base_url, storage));
    Ok((stub, api))
}

fn unit(id: Option<&str>) -> BloodUnit {
    BloodUnit {
        id: id.map(str::to_string),
        bag_id: "BAG-1".into(),
        blood_type: "O+".into(),
        collection_date: None,
        expiry_date: Some("2025-02-01".into()),
        location: "Pune".into(),
        status: "Available".into(),
    }
}

#[tokio::test]
async fn auth_endpoints() -> anyhow::Result<()> {
    let (stub, api) = api().await?;
    let resp = api.auth.login(&LoginInput { email: "a@b.in".into(), password: "pw".into() }).await?;
    assert_eq!(resp.token.as_deref(), Some("jwt-1"));
    let rec = stub.last();
    assert_eq!((rec.method.clone(), rec.target()), (Method::POST, "/auth/login".to_string()));
    assert_eq!(rec.json()["email"], "a@b.in");

    api.auth
        .signup(&SignupInput {
            name: "Asha".into(),
            email: "a@b.in".into(),
            password: "secret1".into(),
            blood_type: Some("B+".into()),
            phone: None,
            address: None,
            role: Role::Donor,
        })
        .await?;
    assert_eq!(stub.last().target(), "/auth/signup");
    Ok(())
}

#[tokio::test]
async fn invalid_login_never_hits_the_network() -> anyhow::Result<()> {
    let (stub, api) = api().await?;
    let err = api.auth.login(&LoginInput { email: "nope".into(), password: "pw".into() }).await.unwrap_err();
    assert!(matches!(err, ClientError::Model(_)));
    assert!(stub.requests().is_empty());
    Ok(())
}

#[tokio::test]
async fn donor_endpoints() -> anyhow::Result<()> {
    let (stub, api) = api().await?;
    let profile = api.donor.get_profile().await?;
    assert_eq!(profile.total_donations, 3);
    api.donor.update_profile(&ProfileUpdate { phone: Some("999".into()), ..Default::default() }).await?;
    api.donor
        .book_appointment(&AppointmentRequest { date: "2025-01-05T10:00:00".into(), location: "KEM".into() })
        .await?;
    api.donor.get_appointments().await?;
    let result = api.donor
        .check_eligibility(&EligibilityInput { health: "yes".into(), last_donation: "yes".into() })
        .await?;
    assert!(!result.eligible);
    api.donor.get_donation_history().await?;

    let seen: Vec<(Method, String)> = stub.requests().into_iter().map(|r| (r.method.clone(), r.target())).collect();
    assert_eq!(
        seen,
        vec![
            (Method::GET, "/donor/profile".to_string()),
            (Method::PUT, "/donor/profile".to_string()),
            (Method::POST, "/donor/book-appointment".to_string()),
            (Method::GET, "/donor/appointments".to_string()),
            (Method::POST, "/donor/check-eligibility".to_string()),
            (Method::GET, "/donor/history".to_string()),
        ]
    );
    assert!(stub.requests().iter().all(|r| r.header("authorization") == Some("Bearer jwt-0")));
    Ok(())
}

#[tokio::test]
async fn hospital_endpoints() -> anyhow::Result<()> {
    let (stub, api) = api().await?;
    api.hospital.get_blood_stock(&BloodStockFilter::default()).await?;
    assert_eq!(stub.last().target(), "/hospital/blood-stock");

    api.hospital.get_blood_stock(&BloodStockFilter::search("O+")).await?;
    assert_eq!(stub.last().target(), "/hospital/blood-stock?search=O%2B");

    api.hospital
        .request_blood(&NewBloodRequest {
            hospital_name: "KEM".into(),
            blood_type: "A-".into(),
            units: 2,
            urgency: "normal".into(),
        })
        .await?;
    let rec = stub.last();
    assert_eq!((rec.method.clone(), rec.path.as_str()), (Method::POST, "/hospital/request-blood"));
    assert_eq!(rec.json()["hospitalName"], "KEM");

    api.hospital.get_requests().await?;
    assert_eq!(stub.last().target(), "/hospital/requests");
    Ok(())
}

#[tokio::test]
async fn zero_units_are_left_to_the_server() -> anyhow::Result<()> {
    let (stub, api) = api().await?;
    api.hospital
        .request_blood(&NewBloodRequest {
            hospital_name: "KEM".into(),
            blood_type: "A-".into(),
            units: 0,
            urgency: "normal".into(),
        })
        .await?;
    assert_eq!(stub.last().json()["units"], 0);
    Ok(())
}

#[tokio::test]
async fn admin_endpoints() -> anyhow::Result<()> {
    let (stub, api) = api().await?;
    api.admin.get_dashboard_stats().await?;
    api.admin.get_blood_units().await?;
    api.admin.manage_blood_unit(&unit(None), UnitAction::Create).await?;
    api.admin.manage_blood_unit(&unit(Some("u-7")), UnitAction::Update).await?;
    api.admin.delete_blood_unit("abc123").await?;
    api.admin.get_requests().await?;
    api.admin.update_request_status("r/1", "Approved").await?;
    api.admin
        .send_emergency_alert(&EmergencyAlert { blood_type: "O-".into(), region: "Pune".into(), message: "Need O-".into() })
        .await?;

    let reqs = stub.requests();
    let seen: Vec<(Method, String)> = reqs.iter().map(|r| (r.method.clone(), r.target())).collect();
    assert_eq!(
        seen,
        vec![
            (Method::GET, "/admin/dashboard-stats".to_string()),
            (Method::GET, "/admin/blood-units".to_string()),
            (Method::POST, "/admin/blood-units".to_string()),
            (Method::PUT, "/admin/blood-units".to_string()),
            (Method::DELETE, "/admin/blood-units/abc123".to_string()),
            (Method::GET, "/admin/requests".to_string()),
            (Method::PUT, "/admin/requests/r%2F1".to_string()),
            (Method::POST, "/admin/emergency-alert".to_string()),
        ]
    );
    assert!(reqs[2].json().get("_id").is_none());
    assert_eq!(reqs[3].json()["_id"], "u-7");
    assert_eq!(reqs[6].json(), serde_json::json!({"status": "Approved"}));
    assert_eq!(reqs[7].json()["bloodType"], "O-");
    Ok(())
}

#[tokio::test]
async fn update_without_id_is_rejected_locally() -> anyhow::Result<()> {
    let (stub, api) = api().await?;
    let err = api.admin.manage_blood_unit(&unit(None), UnitAction::Update).await.unwrap_err();
    assert_eq!(err.to_string(), "validation error: Missing unit ID");
    assert!(stub.requests().is_empty());
    Ok(())
}

#[derive(Default)]
struct Recorder(std::sync::Mutex<Vec<Page>>);

impl Navigator for Recorder {
    fn navigate(&self, page: Page) {
        self.0.lock().unwrap().push(page);
    }
}

#[tokio::test]
async fn logout_clears_storage_and_goes_to_login() -> anyhow::Result<()> {
    for seeded in [true, false] {
        let storage = Arc::new(if seeded {
            MemoryStorage::with_items([(AUTH_TOKEN_KEY, "t"), (USER_TYPE_KEY, "admin")])
        } else {
            MemoryStorage::new()
        });
        // nothing listens here; logout must not need the backend
        let base = support::dead_base_url().await?;
        let api = Api::new(ApiClient::new(&base, storage.clone()));
        let nav = Recorder::default();

        api.auth.logout(&nav).await;

        assert!(storage.is_empty());
        assert_eq!(*nav.0.lock().unwrap(), vec![Page::Login]);
    }
    Ok(())
}

struct BrokenDisk;

#[async_trait::async_trait]
impl service::ClientStorage for BrokenDisk {
    async fn get_item(&self, _key: &str) -> Option<String> {
        Some("stale".into())
    }
    async fn set_item(&self, _key: &str, _value: String) -> Result<(), ClientError> {
        Err(ClientError::Storage("read-only".into()))
    }
    async fn remove_item(&self, _key: &str) -> Result<bool, ClientError> {
        Err(ClientError::Storage("read-only".into()))
    }
}

#[tokio::test]
async fn logout_navigates_even_when_storage_fails() -> anyhow::Result<()> {
    let api = Api::new(ApiClient::new(&support::dead_base_url().await?, Arc::new(BrokenDisk)));
    let nav = Recorder::default();
    api.auth.logout(&nav).await;
    assert_eq!(*nav.0.lock().unwrap(), vec![Page::Login]);
    Ok(())
}
