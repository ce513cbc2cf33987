use serde::{Deserialize, Serialize};

// ============================================================================
// BARCODE STATUS WIRE MODELS - grn/barcode-status
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarcodeStatusRequest {
    pub barcode: i64,
    pub database: String,
}

/// Evento del historial de un barcode
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct StatusRecord {
    #[serde(rename = "Category", default)]
    pub category: Option<String>,
    #[serde(rename = "EventDate", default)]
    pub event_date: Option<String>,
    #[serde(rename = "JobBookingNo", default)]
    pub job_booking_no: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BarcodeStatusResponse {
    #[serde(default)]
    pub status: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub records: Vec<StatusRecord>,
}
