use models::donor::{
    Appointment, AppointmentRequest, Donation, EligibilityInput, EligibilityResult, ProfileUpdate, UserProfile,
};
use models::ApiMessage;

use crate::errors::ClientError;
use crate::http::{ApiClient, RequestOptions};

#[derive(Clone)]
pub struct DonorApi {
    client: ApiClient,
}

impl DonorApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn get_profile(&self) -> Result<UserProfile, ClientError> {
        self.client.request("/donor/profile", RequestOptions::get()).await
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<ApiMessage, ClientError> {
        self.client.request("/donor/profile", RequestOptions::put().json(update)?).await
    }

    pub async fn book_appointment(&self, appointment: &AppointmentRequest) -> Result<ApiMessage, ClientError> {
        self.client
            .request("/donor/book-appointment", RequestOptions::post().json(appointment)?)
            .await
    }

    pub async fn get_appointments(&self) -> Result<Vec<Appointment>, ClientError> {
        self.client.request("/donor/appointments", RequestOptions::get()).await
    }

    pub async fn check_eligibility(&self, answers: &EligibilityInput) -> Result<EligibilityResult, ClientError> {
        self.client
            .request("/donor/check-eligibility", RequestOptions::post().json(answers)?)
            .await
    }

    pub async fn get_donation_history(&self) -> Result<Vec<Donation>, ClientError> {
        self.client.request("/donor/history", RequestOptions::get()).await
    }
}
