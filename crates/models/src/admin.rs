use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

pub const DEFAULT_ALERT_MESSAGE: &str = "Emergency blood requirement";

fn default_unit_status() -> String { "Available".to_string() }

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BloodUnit {
    /// Backend document id; required for updates and deletes.
    #[serde(default, rename = "_id", alias = "id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(alias = "bagId")]
    pub bag_id: String,
    #[serde(alias = "bloodType")]
    pub blood_type: String,
    #[serde(default, alias = "collectionDate", skip_serializing_if = "Option::is_none")]
    pub collection_date: Option<String>,
    #[serde(default, alias = "expiryDate", skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,
    #[serde(default)]
    pub location: String,
    #[serde(default = "default_unit_status")]
    pub status: String,
}

impl BloodUnit {
    pub fn validate(&self, action: UnitAction) -> Result<(), ModelError> {
        if self.bag_id.trim().is_empty() {
            return Err(ModelError::Validation("bag id required".into()));
        }
        if self.blood_type.trim().is_empty() {
            return Err(ModelError::Validation("blood type required".into()));
        }
        if action == UnitAction::Update && self.id.is_none() {
            return Err(ModelError::Validation("Missing unit ID".into()));
        }
        Ok(())
    }
}

/// Whether `manageBloodUnit` creates (POST) or updates (PUT).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnitAction {
    #[default]
    Create,
    Update,
}

impl UnitAction {
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("update") { UnitAction::Update } else { UnitAction::Create }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergencyAlert {
    #[serde(rename = "bloodType", alias = "blood_type")]
    pub blood_type: String,
    pub region: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestStatusUpdate {
    pub status: String,
}

/// Free-form counters shown on top of the admin panel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DashboardStats(pub serde_json::Map<String, serde_json::Value>);

impl DashboardStats {
    /// `(label, value)` pairs sorted by label, with string values unquoted.
    pub fn entries(&self) -> Vec<(String, String)> {
        let mut out: Vec<(String, String)> = self
            .0
            .iter()
            .map(|(k, v)| {
                let shown = match v {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (k.clone(), shown)
            })
            .collect();
        out.sort();
        out
    }
}
