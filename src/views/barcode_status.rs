// ============================================================================
// BARCODE STATUS VIEW - Timeline de estados de un barcode
// ============================================================================
// Renderiza las filas que arma el viewmodel. Los botones Delete avisan al
// caller vía callback con la categoría canónica; la vista no borra nada.
// ============================================================================

use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys::HtmlButtonElement;

use crate::dom::{
    append_child, get_element_by_id, on_click, set_inner_html, set_text_by_id, ElementBuilder,
};
use crate::viewmodels::status_viewmodel::{StatusCategory, StatusRowView};

const TABLE_BODY_ID: &str = "status-table-body";
const TITLE_ID: &str = "status-results-title";
const SUMMARY_ID: &str = "status-results-summary";
const ERROR_ID: &str = "status-error";
const COLUMNS: usize = 4;

pub fn show_status_error(message: &str) {
    set_text_by_id(ERROR_ID, message);
}

pub fn clear_status_error() {
    show_status_error("");
}

fn set_empty_message(message: &str) {
    if let Some(body) = get_element_by_id(TABLE_BODY_ID) {
        set_inner_html(
            &body,
            &format!(
                r#"<tr><td colspan="{}" class="empty-message">{}</td></tr>"#,
                COLUMNS, message
            ),
        );
    }
}

/// Estado inicial del panel (y al entrar desde el landing)
pub fn reset_view() {
    clear_status_error();
    set_text_by_id(TITLE_ID, "Status Timeline");
    set_text_by_id(SUMMARY_ID, "");
    set_empty_message("Enter a barcode to view status history.");
}

pub fn show_loading(barcode: i64) {
    clear_status_error();
    set_text_by_id(TITLE_ID, &format!("Status Timeline for Barcode {}", barcode));
    set_text_by_id(SUMMARY_ID, "Checking barcode status...");
    set_empty_message("Loading status history...");
}

pub fn show_no_records(barcode: i64) {
    set_empty_message(&format!("No records found for barcode {}.", barcode));
    set_text_by_id(
        SUMMARY_ID,
        &format!("No history available for barcode {}.", barcode),
    );
}

pub fn set_summary(summary: &str) {
    set_text_by_id(SUMMARY_ID, summary);
}

/// Render de las filas. `on_delete` recibe la categoría y el botón pulsado,
/// para que el caller pueda deshabilitarlo mientras el borrado está en vuelo.
pub fn render_rows<F>(rows: &[StatusRowView], on_delete: F) -> Result<(), JsValue>
where
    F: Fn(StatusCategory, HtmlButtonElement) + 'static,
{
    let Some(body) = get_element_by_id(TABLE_BODY_ID) else {
        return Ok(());
    };
    set_inner_html(&body, "");
    let on_delete = Rc::new(on_delete);

    for row in rows {
        let badge = ElementBuilder::new("span")?
            .class(&format!("status-badge {}", row.badge_class))
            .text(&row.category_label)
            .build();
        let category_cell = ElementBuilder::new("td")?.child(badge)?.build();
        let date_cell = ElementBuilder::new("td")?.text(&row.event_date).build();
        let job_cell = ElementBuilder::new("td")?.text(&row.job_booking_no).build();

        let action_cell = match &row.delete {
            Some(action) => {
                let mut button = ElementBuilder::new("button")?
                    .class("delete-btn")
                    .attr("type", "button")?
                    .text("Delete");
                if !action.enabled {
                    button = button.attr("disabled", "disabled")?;
                    if let Some(hint) = action.disabled_hint {
                        button = button.attr("title", hint)?;
                    }
                }
                let button = button.build();
                if action.enabled {
                    if let Some(trigger) = button.dyn_ref::<HtmlButtonElement>() {
                        let category = action.category;
                        let on_delete = Rc::clone(&on_delete);
                        let trigger = trigger.clone();
                        on_click(&button, move |_| on_delete(category, trigger.clone()))?;
                    }
                }
                ElementBuilder::new("td")?.child(button)?.build()
            }
            None => ElementBuilder::new("td")?.text("—").build(),
        };

        let tr = ElementBuilder::new("tr")?
            .child(category_cell)?
            .child(date_cell)?
            .child(job_cell)?
            .child(action_cell)?
            .build();
        append_child(&body, &tr)?;
    }
    Ok(())
}
