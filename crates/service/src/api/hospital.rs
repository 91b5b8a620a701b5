use models::hospital::{BloodRequest, BloodStockFilter, BloodStockItem, NewBloodRequest};
use models::ApiMessage;

use crate::errors::ClientError;
use crate::http::{ApiClient, RequestOptions};

#[derive(Clone)]
pub struct HospitalApi {
    client: ApiClient,
}

impl HospitalApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Stock listing; the filter becomes the query string (`search=O%2B`).
    pub async fn get_blood_stock(&self, filter: &BloodStockFilter) -> Result<Vec<BloodStockItem>, ClientError> {
        self.client
            .request("/hospital/blood-stock", RequestOptions::get().query(filter)?)
            .await
    }

    pub async fn request_blood(&self, request: &NewBloodRequest) -> Result<ApiMessage, ClientError> {
        request.validate()?;
        self.client
            .request("/hospital/request-blood", RequestOptions::post().json(request)?)
            .await
    }

    pub async fn get_requests(&self) -> Result<Vec<BloodRequest>, ClientError> {
        self.client.request("/hospital/requests", RequestOptions::get()).await
    }
}
