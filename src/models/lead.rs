use serde::{Deserialize, Serialize};

use crate::models::{Language, Tier};

/// One computed line of the estimate, attached to a lead so the operator
/// sees what the total was built from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownRow {
    pub karat: u32,
    pub tier: Tier,
    pub grams: f64,
    pub rate_per_gram: f64,
    pub line_total: f64,
}

/// A prospective customer's submitted contact + estimate data.
///
/// Wire shape matches the notification backend's contract; name, phone
/// and email are all optional (the form accepts phone *or* email).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub estimate_total: f64,
    pub total_weight: f64,
    pub breakdown: Vec<BreakdownRow>,
    #[serde(default)]
    pub language: Language,
    pub page_url: String,
}
