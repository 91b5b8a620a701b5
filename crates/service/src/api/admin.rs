use models::admin::{BloodUnit, DashboardStats, EmergencyAlert, RequestStatusUpdate, UnitAction};
use models::hospital::BloodRequest;
use models::ApiMessage;
use reqwest::Method;
use tracing::instrument;

use crate::errors::ClientError;
use crate::http::{ApiClient, RequestOptions};

fn unit_endpoint(unit_id: &str) -> String {
    format!("/admin/blood-units/{}", urlencoding::encode(unit_id))
}

fn request_endpoint(request_id: &str) -> String {
    format!("/admin/requests/{}", urlencoding::encode(request_id))
}

#[derive(Clone)]
pub struct AdminApi {
    client: ApiClient,
}

impl AdminApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn get_dashboard_stats(&self) -> Result<DashboardStats, ClientError> {
        self.client.request("/admin/dashboard-stats", RequestOptions::get()).await
    }

    pub async fn get_blood_units(&self) -> Result<Vec<BloodUnit>, ClientError> {
        self.client.request("/admin/blood-units", RequestOptions::get()).await
    }

    /// Create (POST) or update (PUT) a unit; updates carry the unit's `_id`.
    #[instrument(skip(self, unit), fields(bag_id = %unit.bag_id, ?action))]
    pub async fn manage_blood_unit(&self, unit: &BloodUnit, action: UnitAction) -> Result<ApiMessage, ClientError> {
        unit.validate(action)?;
        let method = match action {
            UnitAction::Create => Method::POST,
            UnitAction::Update => Method::PUT,
        };
        self.client
            .request("/admin/blood-units", RequestOptions::method(method).json(unit)?)
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete_blood_unit(&self, unit_id: &str) -> Result<ApiMessage, ClientError> {
        let endpoint = unit_endpoint(unit_id);
        self.client.request(&endpoint, RequestOptions::delete()).await
    }

    pub async fn get_requests(&self) -> Result<Vec<BloodRequest>, ClientError> {
        self.client.request("/admin/requests", RequestOptions::get()).await
    }

    #[instrument(skip(self))]
    pub async fn update_request_status(&self, request_id: &str, status: &str) -> Result<ApiMessage, ClientError> {
        let endpoint = request_endpoint(request_id);
        let body = RequestStatusUpdate { status: status.to_string() };
        self.client.request(&endpoint, RequestOptions::put().json(&body)?).await
    }

    #[instrument(skip(self, alert), fields(blood_type = %alert.blood_type, region = %alert.region))]
    pub async fn send_emergency_alert(&self, alert: &EmergencyAlert) -> Result<ApiMessage, ClientError> {
        self.client
            .request("/admin/emergency-alert", RequestOptions::post().json(alert)?)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_encoded_as_one_path_segment() {
        assert_eq!(unit_endpoint("abc123"), "/admin/blood-units/abc123");
        assert_eq!(unit_endpoint("a/b c"), "/admin/blood-units/a%2Fb%20c");
        assert_eq!(request_endpoint("O+"), "/admin/requests/O%2B");
    }
}
