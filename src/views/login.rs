// ============================================================================
// LOGIN VIEW - Formulario de login + chips de usuario/base en cada sección
// ============================================================================

use crate::dom::{get_element_by_id, input_value, select_value, set_input_value, set_text_by_id};
use crate::models::session::Session;

const LOGIN_ERROR_ID: &str = "login-error";

/// Chips de usuario/base repetidos en landing, GRM, GPN y status
const INFO_IDS: [(&str, &str); 4] = [
    ("info-username", "info-database"),
    ("info-username-grm", "info-database-grm"),
    ("info-username-gpn", "info-database-gpn"),
    ("info-username-status", "info-database-status"),
];

pub fn read_username() -> String {
    input_value("username")
}

pub fn read_database() -> String {
    select_value("database")
}

pub fn show_login_error(message: &str) {
    set_text_by_id(LOGIN_ERROR_ID, message);
}

pub fn clear_login_error() {
    show_login_error("");
}

pub fn set_info_displays(session: &Session) {
    for (user_id, db_id) in INFO_IDS {
        set_text_by_id(user_id, &session.username);
        set_text_by_id(db_id, &session.selected_database);
    }
}

pub fn clear_info_displays() {
    for (user_id, db_id) in INFO_IDS {
        set_text_by_id(user_id, "");
        set_text_by_id(db_id, "");
    }
}

/// Vaciar los campos de barcode de todos los flujos (login nuevo o logout)
pub fn clear_barcode_fields() {
    for id in ["barcode", "gpn-barcode", "gpn-conf-barcode", "conf-barcode", "status-barcode"] {
        set_input_value(id, "");
    }
}

/// Año en el footer
pub fn set_footer_year() {
    if get_element_by_id("year").is_some() {
        let year = js_sys::Date::new_0().get_full_year();
        set_text_by_id("year", &year.to_string());
    }
}
