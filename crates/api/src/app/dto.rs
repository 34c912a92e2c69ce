use serde::{Deserialize, Serialize};

use chrono::NaiveDate;

use staffhub_core::StaffId;
use staffhub_directory::{EmergencyContact, HrRecord, MatrixCell, StaffProfile, VisibilityDecision};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct ExplainQuery {
    pub target: String,
}

/// HR record body; the staff id comes from the path.
#[derive(Debug, Deserialize)]
pub struct HrRecordRequest {
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub national_id: Option<String>,
    #[serde(default)]
    pub emergency_contact: Option<EmergencyContact>,
    #[serde(default)]
    pub termination_date: Option<NaiveDate>,
}

impl HrRecordRequest {
    pub fn into_record(self, staff_id: StaffId) -> HrRecord {
        HrRecord {
            staff_id,
            birth_date: self.birth_date,
            national_id: self.national_id,
            emergency_contact: self.emergency_contact,
            termination_date: self.termination_date,
        }
    }
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct DirectoryResponse {
    pub staff: Vec<StaffProfile>,
}

#[derive(Debug, Serialize)]
pub struct MatrixResponse {
    pub cells: Vec<MatrixCell>,
}

#[derive(Debug, Serialize)]
pub struct ExplainResponse {
    pub viewer_id: String,
    pub target_id: String,
    #[serde(flatten)]
    pub decision: VisibilityDecision,
}

pub fn viewer_to_json(viewer: &staffhub_auth::Viewer) -> serde_json::Value {
    serde_json::json!({
        "staff_id": viewer.staff_id.to_string(),
        "roles": viewer.roles.iter().map(|r| r.as_str()).collect::<Vec<_>>(),
        "locations": viewer.locations.iter().map(|l| l.as_str()).collect::<Vec<_>>(),
    })
}
