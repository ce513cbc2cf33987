use serde::{Deserialize, Serialize};

// ============================================================================
// GPN WIRE MODELS - Endpoints gpn/* (goods packing note)
// ============================================================================
// El payload `data` viene del stored procedure en PascalCase; el contrato de
// nombres queda fijado en la variante canónica (FGTransactionID, VoucherNo...)
// ============================================================================

/// Body de save-finish-goods; `status` es "new" para el alta inicial y
/// "update" para entradas posteriores (que requieren fg_transaction_id)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveFinishGoodsRequest {
    pub barcode: i64,
    pub database: String,
    pub user_id: i64,
    pub company_id: i64,
    pub branch_id: i64,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fg_transaction_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct FinishGoodsData {
    #[serde(rename = "FGTransactionID", default)]
    pub fg_transaction_id: Option<i64>,
    #[serde(rename = "VoucherNo", default)]
    pub voucher_no: Option<String>,
    #[serde(rename = "OrderQty", default)]
    pub order_qty: Option<f64>,
    #[serde(rename = "PackedQtyThisVoucher", default)]
    pub packed_qty_this_voucher: Option<f64>,
    #[serde(rename = "PackedQtyTotal", default)]
    pub packed_qty_total: Option<f64>,
    #[serde(rename = "CartonQtyTotal", default)]
    pub carton_qty_total: Option<f64>,
    #[serde(rename = "JobName", default)]
    pub job_name: Option<String>,
    #[serde(rename = "JobBookingNo", default)]
    pub job_booking_no: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SaveFinishGoodsResponse {
    #[serde(default)]
    pub status: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub data: Option<FinishGoodsData>,
}
