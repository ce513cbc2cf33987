// ============================================================================
// CHALLAN VIEW - Formulario de delivery note + tabla de confirmación
// ============================================================================

use wasm_bindgen::JsValue;

use crate::dom::{
    append_child, get_element_by_id, input_value, prepend_child, select_value, set_inner_html,
    set_input_value, set_text_by_id, ElementBuilder,
};
use crate::models::grn::{DeliveryNoteData, SpSummary, Transporter};
use crate::utils::format::{format_number, EM_DASH};

const TRANSPORTER_SELECT_ID: &str = "transporterName";
const DELIVERY_TABLE_BODY_ID: &str = "delivery-table-body";
const EMPTY_TABLE_ROWS: usize = 10;

/// Campos del formulario de challan, ya recortados
#[derive(Debug, Clone, PartialEq)]
pub struct ChallanForm {
    pub client_name: String,
    pub mode_of_transport: String,
    pub container_number: String,
    pub seal_number: String,
    pub transporter_name: String,
    pub vehicle_number: String,
}

impl ChallanForm {
    pub fn is_complete(&self) -> bool {
        !self.client_name.is_empty()
            && !self.mode_of_transport.is_empty()
            && !self.container_number.is_empty()
            && !self.seal_number.is_empty()
            && !self.transporter_name.is_empty()
            && !self.vehicle_number.is_empty()
    }
}

pub fn read_form() -> ChallanForm {
    ChallanForm {
        client_name: input_value("clientName").trim().to_string(),
        mode_of_transport: select_value("modeOfTransport").trim().to_string(),
        container_number: input_value("containerNumber").trim().to_string(),
        seal_number: input_value("sealNumber").trim().to_string(),
        transporter_name: select_value(TRANSPORTER_SELECT_ID).trim().to_string(),
        vehicle_number: input_value("vehicleNumber").trim().to_string(),
    }
}

pub fn set_client_name(value: &str) {
    set_input_value("clientName", value);
}

pub fn transporters_loading() {
    if let Some(select) = get_element_by_id(TRANSPORTER_SELECT_ID) {
        set_inner_html(&select, r#"<option value="">Loading...</option>"#);
    }
}

/// Poblar el dropdown de transportistas (placeholder + una opción por ledger)
pub fn populate_transporters(transporters: &[Transporter]) -> Result<(), JsValue> {
    let Some(select) = get_element_by_id(TRANSPORTER_SELECT_ID) else {
        return Ok(());
    };
    set_inner_html(&select, "");

    let placeholder = ElementBuilder::new("option")?
        .attr("value", "")?
        .text("Select Transporter")
        .build();
    append_child(&select, &placeholder)?;

    for transporter in transporters {
        let option = ElementBuilder::new("option")?
            .attr("value", &transporter.ledger_name)?
            .text(&transporter.ledger_name)
            .build();
        append_child(&select, &option)?;
    }
    Ok(())
}

pub fn reset_transporters() {
    if let Some(select) = get_element_by_id(TRANSPORTER_SELECT_ID) {
        set_inner_html(&select, r#"<option value="">Select Transporter</option>"#);
    }
}

/// Volcar la confirmación del guardado: número de DN + campos de solo lectura
pub fn show_confirmation(delivery_note_number: &str, data: &DeliveryNoteData) {
    set_text_by_id("dn-number", delivery_note_number);
    set_input_value("conf-client-name", data.client_name.as_deref().unwrap_or(""));
    set_input_value(
        "conf-mode-transport",
        data.mode_of_transport.as_deref().unwrap_or(""),
    );
    set_input_value(
        "conf-transporter",
        data.transporter_name.as_deref().unwrap_or(""),
    );
    set_input_value(
        "conf-container",
        data.container_number.as_deref().unwrap_or(""),
    );
    set_input_value("conf-vehicle", data.vehicle_number.as_deref().unwrap_or(""));
    set_input_value("conf-seal", data.seal_number.as_deref().unwrap_or(""));
    // El barcode de confirmación queda vacío para el siguiente escaneo
    set_input_value("conf-barcode", "");
}

fn delivery_row(barcode_text: &str, sp: &SpSummary) -> Result<web_sys::Element, JsValue> {
    let mut row = ElementBuilder::new("tr")?;
    let cells = [
        barcode_text.to_string(),
        sp.job_name.clone().unwrap_or_else(|| EM_DASH.to_string()),
        qty_cell(sp.order_qty),
        qty_cell(sp.gpn_qty),
        qty_cell(sp.delivered_this_voucher),
        qty_cell(sp.delivered_total),
        qty_cell(sp.carton_count),
    ];
    for cell in cells {
        row = row.child(ElementBuilder::new("td")?.text(&cell).build())?;
    }
    Ok(row.build())
}

fn qty_cell(value: Option<f64>) -> String {
    format_number(value)
}

/// Primera fila tras el guardado inicial (reemplaza las filas vacías)
pub fn set_first_delivery_row(barcode_text: &str, sp: &SpSummary) -> Result<(), JsValue> {
    let Some(body) = get_element_by_id(DELIVERY_TABLE_BODY_ID) else {
        return Ok(());
    };
    set_inner_html(&body, "");
    append_child(&body, &delivery_row(barcode_text, sp)?)
}

/// Filas siguientes siempre arriba (lo más nuevo primero)
pub fn prepend_delivery_row(barcode_text: &str, sp: &SpSummary) -> Result<(), JsValue> {
    let Some(body) = get_element_by_id(DELIVERY_TABLE_BODY_ID) else {
        return Ok(());
    };
    prepend_child(&body, &delivery_row(barcode_text, sp)?)
}

/// Tabla inicial: filas vacías para que la grilla no colapse
pub fn init_delivery_table() -> Result<(), JsValue> {
    let Some(body) = get_element_by_id(DELIVERY_TABLE_BODY_ID) else {
        return Ok(());
    };
    set_inner_html(&body, "");
    for _ in 0..EMPTY_TABLE_ROWS {
        let mut row = ElementBuilder::new("tr")?;
        for _ in 0..7 {
            row = row.child(ElementBuilder::new("td")?.build())?;
        }
        append_child(&body, &row.build())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_completeness_requires_every_field() {
        let full = ChallanForm {
            client_name: "ACME".to_string(),
            mode_of_transport: "Road".to_string(),
            container_number: "C-1".to_string(),
            seal_number: "S-9".to_string(),
            transporter_name: "Speedy".to_string(),
            vehicle_number: "WB-01".to_string(),
        };
        assert!(full.is_complete());

        let mut missing = full.clone();
        missing.seal_number.clear();
        assert!(!missing.is_complete());
    }
}
