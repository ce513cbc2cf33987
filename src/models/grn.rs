use serde::{Deserialize, Serialize};

use crate::models::session::MachineInfo;

// ============================================================================
// GRN WIRE MODELS - Endpoints auth/* y grn/* (contrato camelCase)
// ============================================================================
// Toda respuesta trae `status: bool`; false (o ausente) es fallo de aplicación
// con `error` opcional. Contrato de nombres fijado: camelCase, sin cadenas de
// fallback por variantes de casing.
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(default)]
    pub status: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub ledger_id: Option<i64>,
    #[serde(default)]
    pub machines: Vec<MachineInfo>,
    #[serde(default)]
    pub selected_database: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transporter {
    pub ledger_id: i64,
    pub ledger_name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportersResponse {
    #[serde(default)]
    pub status: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub transporters: Vec<Transporter>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitiateRequest {
    pub barcode: i64,
    pub database: String,
    pub user_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitiateResponse {
    #[serde(default)]
    pub status: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub ledger_name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveDeliveryNoteRequest {
    pub barcode: i64,
    pub database: String,
    pub user_id: i64,
    pub client_name: String,
    pub mode_of_transport: String,
    pub container_number: String,
    pub seal_number: String,
    pub transporter_name: String,
    pub transporter_ledger_id: i64,
    pub vehicle_number: String,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryNoteData {
    #[serde(default)]
    pub barcode: Option<i64>,
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub mode_of_transport: Option<String>,
    #[serde(default)]
    pub transporter_name: Option<String>,
    #[serde(default)]
    pub container_number: Option<String>,
    #[serde(default)]
    pub vehicle_number: Option<String>,
    #[serde(default)]
    pub seal_number: Option<String>,
}

/// Resumen devuelto por el stored procedure del backend al guardar/actualizar
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SpSummary {
    #[serde(default)]
    pub job_name: Option<String>,
    #[serde(default)]
    pub order_qty: Option<f64>,
    #[serde(default)]
    pub gpn_qty: Option<f64>,
    #[serde(default)]
    pub delivered_this_voucher: Option<f64>,
    #[serde(default)]
    pub delivered_total: Option<f64>,
    #[serde(default)]
    pub carton_count: Option<f64>,
    #[serde(default)]
    pub transaction_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveDeliveryNoteResponse {
    #[serde(default)]
    pub status: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub delivery_note_number: Option<String>,
    #[serde(default)]
    pub data: Option<DeliveryNoteData>,
    #[serde(default)]
    pub sp: Option<SpSummary>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDeliveryNoteRequest {
    pub barcode: i64,
    pub database: String,
    pub user_id: i64,
    pub fg_transaction_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDeliveryNoteResponse {
    #[serde(default)]
    pub status: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub sp: Option<SpSummary>,
}

/// Body compartido por delete-delivery-note y delete-finish-goods
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteRecordRequest {
    pub barcode: i64,
    pub database: String,
    pub user_id: i64,
    pub company_id: i64,
    pub branch_id: i64,
}

/// Respuesta sin payload (logout, deletes, clear-db-cache)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AckResponse {
    #[serde(default)]
    pub status: bool,
    #[serde(default)]
    pub error: Option<String>,
}
