use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

pub const DEFAULT_URGENCY: &str = "normal";

fn single_unit() -> u32 { 1 }

/// One row of the stock table. The backend returns one record per bag, so a
/// record without a count stands for a single unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BloodStockItem {
    #[serde(default, rename = "_id", alias = "id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(alias = "bloodType")]
    pub blood_type: String,
    #[serde(default = "single_unit")]
    pub units: u32,
    #[serde(default)]
    pub location: String,
}

/// Query string of `GET /hospital/blood-stock`; unset fields are left out.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BloodStockFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(rename = "bloodType", skip_serializing_if = "Option::is_none")]
    pub blood_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl BloodStockFilter {
    pub fn search(query: impl Into<String>) -> Self {
        Self { search: Some(query.into()), ..Default::default() }
    }

    pub fn is_empty(&self) -> bool {
        self.search.is_none() && self.blood_type.is_none() && self.location.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BloodRequest {
    #[serde(default, rename = "_id", alias = "id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, alias = "hospitalName")]
    pub hospital_name: String,
    #[serde(default, alias = "bloodType")]
    pub blood_type: String,
    #[serde(default)]
    pub units: u32,
    #[serde(default = "default_urgency")]
    pub urgency: String,
    #[serde(default = "default_status")]
    pub status: String,
}

fn default_urgency() -> String { DEFAULT_URGENCY.to_string() }
fn default_status() -> String { "Pending".to_string() }

/// Body of `POST /hospital/request-blood`, keyed the way that endpoint reads it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewBloodRequest {
    #[serde(rename = "hospitalName")]
    pub hospital_name: String,
    #[serde(rename = "bloodType")]
    pub blood_type: String,
    pub units: u32,
    pub urgency: String,
}

impl NewBloodRequest {
    /// Only the blood type is checked; the unit count is the server's call.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.blood_type.trim().is_empty() {
            return Err(ModelError::Validation("blood type required".into()));
        }
        Ok(())
    }
}
