// ============================================================================
// GPN VIEW - Packing de finish goods + tabla de confirmación
// ============================================================================

use wasm_bindgen::JsValue;

use crate::dom::{
    append_child, get_element_by_id, prepend_child, set_inner_html, set_text_by_id, ElementBuilder,
};
use crate::models::gpn::FinishGoodsData;
use crate::utils::format::{format_number, EM_DASH};

const GPN_TABLE_BODY_ID: &str = "gpn-table-body";

pub fn show_gpn_error(message: &str) {
    set_text_by_id("gpn-error", message);
}

pub fn clear_gpn_error() {
    show_gpn_error("");
}

pub fn clear_gpn_table() {
    if let Some(body) = get_element_by_id(GPN_TABLE_BODY_ID) {
        set_inner_html(&body, "");
    }
}

fn gpn_row(barcode_text: &str, data: &FinishGoodsData) -> Result<web_sys::Element, JsValue> {
    let mut row = ElementBuilder::new("tr")?;
    let cells = [
        barcode_text.to_string(),
        data.voucher_no.clone().unwrap_or_else(|| EM_DASH.to_string()),
        qty_cell(data.order_qty),
        qty_cell(data.packed_qty_this_voucher),
        qty_cell(data.packed_qty_total),
        qty_cell(data.carton_qty_total),
        data.job_name.clone().unwrap_or_else(|| EM_DASH.to_string()),
        data.job_booking_no
            .clone()
            .unwrap_or_else(|| EM_DASH.to_string()),
    ];
    for cell in cells {
        row = row.child(ElementBuilder::new("td")?.text(&cell).build())?;
    }
    Ok(row.build())
}

// Las cantidades ausentes se muestran como 0, no como raya
fn qty_cell(value: Option<f64>) -> String {
    format_number(Some(value.unwrap_or(0.0)))
}

/// Primera fila tras el submit inicial (la tabla arranca vacía)
pub fn set_first_gpn_row(barcode_text: &str, data: &FinishGoodsData) -> Result<(), JsValue> {
    let Some(body) = get_element_by_id(GPN_TABLE_BODY_ID) else {
        return Ok(());
    };
    set_inner_html(&body, "");
    append_child(&body, &gpn_row(barcode_text, data)?)
}

/// Updates siguientes siempre arriba (lo más nuevo primero)
pub fn prepend_gpn_row(barcode_text: &str, data: &FinishGoodsData) -> Result<(), JsValue> {
    let Some(body) = get_element_by_id(GPN_TABLE_BODY_ID) else {
        return Ok(());
    };
    prepend_child(&body, &gpn_row(barcode_text, data)?)
}
