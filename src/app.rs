// ============================================================================
// GRN APP - Controlador del cliente de goods receipt / packing
// ============================================================================
// Ata los handlers del DOM con los servicios y el router. Toda la lógica
// testeable vive en los viewmodels; acá solo hay orquestación de flujos.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsValue;
use wasm_bindgen_futures::spawn_local;

use crate::dom::{
    alert, confirm, focus_input, get_element_by_id, get_select_by_id, input_value, on_click_id,
    on_enter_key_id, on_submit, set_input_value,
};
use crate::models::grn::{DeleteRecordRequest, InitiateRequest, SaveDeliveryNoteRequest, UpdateDeliveryNoteRequest};
use crate::models::gpn::SaveFinishGoodsRequest;
use crate::models::session::Session;
use crate::models::status::BarcodeStatusRequest;
use crate::router::{NavigateOptions, Router, View};
use crate::services::audio::alert_with_siren;
use crate::services::{session_service, ApiClient};
use crate::state::AppState;
use crate::viewmodels::login_viewmodel::{parse_barcode, validate_credentials};
use crate::viewmodels::status_viewmodel::{
    build_status_rows, delete_trigger, summary_line, StatusCategory,
};
use crate::views::barcode_status as status_view;
use crate::views::challan as challan_view;
use crate::views::gpn as gpn_view;
use crate::views::login as login_view;
use crate::views::{restore_button, set_button_busy};

/// companyId/branchId fijos del cliente de packing
const COMPANY_ID: i64 = 2;
const BRANCH_ID: i64 = 0;

#[derive(Clone)]
pub struct GrnApp {
    state: AppState,
    router: Router,
    api: ApiClient,
    /// FGTransactionID del último save de delivery note (para updates)
    delivery_fg_transaction: Rc<RefCell<Option<i64>>>,
}

impl GrnApp {
    pub fn new() -> Self {
        Self {
            state: AppState::new(),
            router: Router::new(),
            api: ApiClient::new(),
            delivery_fg_transaction: Rc::new(RefCell::new(None)),
        }
    }

    pub fn init(&self) -> Result<(), JsValue> {
        log::info!("🚀 [APP] Inicializando cliente GRN");

        login_view::set_footer_year();
        challan_view::init_delivery_table()?;
        status_view::reset_view();

        self.router.init();
        self.router.install_popstate(self.state.clone())?;
        let app = self.clone();
        session_service::install_storage_listener(self.state.clone(), self.router.clone(), move || {
            app.reset_logged_out_ui();
        })?;

        self.wire_handlers()?;
        self.restore_session();
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Sesión
    // ------------------------------------------------------------------------

    fn restore_session(&self) {
        let Some((session, session_id)) = session_service::load_session() else {
            return;
        };
        if let Err(e) = self.state.login(session.clone()) {
            log::warn!("⚠️ [APP] Sesión persistida inválida: {}", e);
            session_service::clear_session();
            return;
        }
        log::info!("🔁 [APP] Sesión restaurada para: {}", session.username);
        self.state.set_session_id(Some(session_id));
        login_view::set_info_displays(&session);
        self.router
            .navigate_to(View::Landing, NavigateOptions::replace_forced());
        self.router.reset_depth();
    }

    /// Sesión actual o aviso de login
    fn require_session(&self) -> Option<Session> {
        let session = self.state.session();
        if session.is_none() {
            alert("Please login first.");
        }
        session
    }

    fn handle_login(&self) {
        login_view::clear_login_error();
        let credentials =
            match validate_credentials(&login_view::read_username(), &login_view::read_database()) {
                Ok(c) => c,
                Err(msg) => {
                    login_view::show_login_error(&msg);
                    return;
                }
            };

        let app = self.clone();
        spawn_local(async move {
            // Limpiar todo antes de autenticar: evita que una sesión vieja
            // del backend responda con otra base de datos
            app.state.logout();
            if let Err(e) = app.api.logout().await {
                log::warn!("⚠️ [APP] No se pudo cerrar la sesión previa: {}", e);
            }
            app.router
                .navigate_to(View::Login, NavigateOptions::replace_forced());
            app.router.reset_depth();

            login_view::clear_info_displays();
            login_view::clear_barcode_fields();
            status_view::reset_view();
            gpn_view::clear_gpn_error();
            gpn_view::clear_gpn_table();
            *app.delivery_fg_transaction.borrow_mut() = None;

            match app
                .api
                .login(&credentials.username, &credentials.database)
                .await
            {
                Ok(resp) => {
                    let session = Session {
                        user_id: resp.user_id.unwrap_or(0),
                        ledger_id: resp.ledger_id,
                        machines: resp.machines,
                        selected_database: resp
                            .selected_database
                            .unwrap_or_else(|| credentials.database.clone()),
                        username: credentials.username.clone(),
                        challan_barcode: None,
                        gpn_fg_transaction_id: None,
                    };
                    match app.state.login(session.clone()) {
                        Ok(()) => {
                            let session_id = session_service::save_session(&session);
                            app.state.set_session_id(Some(session_id));
                            login_view::set_info_displays(&session);
                            app.router
                                .navigate_to(View::Landing, NavigateOptions::replace());
                            app.router.reset_depth();
                        }
                        Err(e) => login_view::show_login_error(&e),
                    }
                }
                Err(e) => login_view::show_login_error(&e),
            }
        });
    }

    /// Limpiar inputs, chips y tablas de la sesión que termina. Se usa tanto
    /// en el logout local como cuando otra pestaña cierra o pisa la sesión.
    fn reset_logged_out_ui(&self) {
        *self.delivery_fg_transaction.borrow_mut() = None;
        set_input_value("username", "");
        if let Some(select) = get_select_by_id("database") {
            select.set_value("");
        }
        login_view::clear_barcode_fields();
        login_view::clear_info_displays();
        status_view::reset_view();
        gpn_view::clear_gpn_table();
    }

    fn perform_logout(&self) {
        let api = self.api.clone();
        spawn_local(async move {
            if let Err(e) = api.logout().await {
                log::warn!("⚠️ [APP] Logout de backend falló: {}", e);
            }
        });

        self.state.logout();
        // Borrar el storage dispara el evento "storage" que desloguea al
        // resto de las pestañas
        session_service::clear_session();
        self.reset_logged_out_ui();

        self.router
            .navigate_to(View::Login, NavigateOptions::replace_forced());
        self.router.reset_depth();
        focus_input("username");
    }

    // ------------------------------------------------------------------------
    // GRM: initiate + delivery note
    // ------------------------------------------------------------------------

    fn handle_initiate(&self) {
        let Some(session) = self.require_session() else {
            return;
        };
        let raw = input_value("barcode");
        if raw.trim().is_empty() {
            alert("Please enter a Barcode Number.");
            focus_input("barcode");
            return;
        }
        let Some(barcode) = parse_barcode(&raw) else {
            alert("Barcode must be a valid number");
            return;
        };

        let app = self.clone();
        spawn_local(async move {
            let request = InitiateRequest {
                barcode,
                database: session.selected_database.clone(),
                user_id: session.user_id,
            };
            match app.api.initiate_challan(&request).await {
                Ok(resp) => {
                    challan_view::set_client_name(resp.ledger_name.as_deref().unwrap_or(""));
                    app.state.set_challan_barcode(barcode);
                    app.router
                        .navigate_to(View::ChallanForm, NavigateOptions::push());
                    app.load_transporters(&session.selected_database).await;
                }
                Err(e) => alert_with_siren(&e),
            }
        });
    }

    async fn load_transporters(&self, database: &str) {
        challan_view::transporters_loading();
        match self.api.get_transporters(database).await {
            Ok(resp) => {
                if let Err(e) = challan_view::populate_transporters(&resp.transporters) {
                    log::warn!("⚠️ [APP] No se pudo poblar transportistas: {:?}", e);
                    challan_view::reset_transporters();
                }
            }
            Err(e) => {
                log::warn!("⚠️ [APP] Carga de transportistas falló: {}", e);
                challan_view::reset_transporters();
            }
        }
    }

    fn handle_save_challan(&self) {
        let Some(session) = self.require_session() else {
            return;
        };
        let Some(challan_barcode) = session.challan_barcode else {
            alert("Please initiate a challan first.");
            return;
        };
        let form = challan_view::read_form();

        let app = self.clone();
        spawn_local(async move {
            // El ledgerId del transportista se resuelve fresco contra el
            // backend: el dropdown solo guarda el nombre
            let ledger_id = match app.api.get_transporters(&session.selected_database).await {
                Ok(resp) => resp
                    .transporters
                    .iter()
                    .find(|t| t.ledger_name.trim() == form.transporter_name)
                    .map(|t| t.ledger_id),
                Err(_) => None,
            };
            let Some(transporter_ledger_id) = ledger_id else {
                alert("Could not resolve selected transporter. Please re-select transporter.");
                return;
            };

            if !form.is_complete() {
                alert("All fields are mandatory. Please fill in all required information.");
                return;
            }

            let request = SaveDeliveryNoteRequest {
                barcode: challan_barcode,
                database: session.selected_database.clone(),
                user_id: session.user_id,
                client_name: form.client_name,
                mode_of_transport: form.mode_of_transport,
                container_number: form.container_number,
                seal_number: form.seal_number,
                transporter_name: form.transporter_name,
                transporter_ledger_id,
                vehicle_number: form.vehicle_number,
            };

            match app.api.save_delivery_note(&request).await {
                Ok(resp) => {
                    let data = resp.data.unwrap_or_default();
                    challan_view::show_confirmation(
                        resp.delivery_note_number.as_deref().unwrap_or(""),
                        &data,
                    );
                    app.router
                        .navigate_to(View::DeliveryConfirmation, NavigateOptions::push());

                    let sp = resp.sp.unwrap_or_default();
                    let barcode_text = data
                        .barcode
                        .unwrap_or(challan_barcode)
                        .to_string();
                    if let Err(e) = challan_view::set_first_delivery_row(&barcode_text, &sp) {
                        log::warn!("⚠️ [APP] No se pudo renderizar la fila: {:?}", e);
                    }
                    *app.delivery_fg_transaction.borrow_mut() = sp.transaction_id;
                }
                Err(e) => alert_with_siren(&e),
            }
        });
    }

    fn run_update_delivery_note(&self) {
        let Some(session) = self.require_session() else {
            return;
        };
        let raw = input_value("conf-barcode");
        if raw.trim().is_empty() {
            alert("Enter barcode number");
            focus_input("conf-barcode");
            return;
        }
        let Some(barcode) = parse_barcode(&raw) else {
            alert("Barcode must be a valid number");
            return;
        };
        let Some(fg_transaction_id) = *self.delivery_fg_transaction.borrow() else {
            alert("Missing FGTransactionID from initial save. Please save the delivery note first.");
            return;
        };

        let app = self.clone();
        spawn_local(async move {
            let request = UpdateDeliveryNoteRequest {
                barcode,
                database: session.selected_database.clone(),
                user_id: session.user_id,
                fg_transaction_id,
            };
            match app.api.update_delivery_note(&request).await {
                Ok(resp) => {
                    let sp = resp.sp.unwrap_or_default();
                    if let Err(e) =
                        challan_view::prepend_delivery_row(&barcode.to_string(), &sp)
                    {
                        log::warn!("⚠️ [APP] No se pudo renderizar la fila: {:?}", e);
                    }
                    set_input_value("conf-barcode", "");
                    focus_input("conf-barcode");
                }
                Err(e) => alert_with_siren(&e),
            }
        });
    }

    // ------------------------------------------------------------------------
    // GPN: submit + update
    // ------------------------------------------------------------------------

    fn handle_gpn_submit(&self) {
        let raw = input_value("gpn-barcode");
        if raw.trim().is_empty() {
            gpn_view::show_gpn_error("Please enter a Barcode Number.");
            focus_input("gpn-barcode");
            return;
        }
        let Some(session) = self.state.session() else {
            gpn_view::show_gpn_error("Please login first.");
            return;
        };
        let Some(barcode) = parse_barcode(&raw) else {
            gpn_view::show_gpn_error("Barcode must be a valid number");
            return;
        };

        gpn_view::clear_gpn_error();
        set_button_busy("btn-submit-gpn", "Submitting...");

        let app = self.clone();
        spawn_local(async move {
            let request = SaveFinishGoodsRequest {
                barcode,
                database: session.selected_database.clone(),
                user_id: session.user_id,
                company_id: COMPANY_ID,
                branch_id: BRANCH_ID,
                status: "new".to_string(),
                fg_transaction_id: None,
            };
            let result = app.api.save_finish_goods(&request).await;
            restore_button("btn-submit-gpn", "Submit");

            match result {
                Ok(resp) => {
                    let data = resp.data.unwrap_or_default();
                    let Some(fg_transaction_id) = data.fg_transaction_id else {
                        alert_with_siren(
                            "Success but no FGTransactionID returned. Cannot proceed to confirmation screen.",
                        );
                        return;
                    };
                    app.state.set_gpn_transaction(fg_transaction_id);
                    if let Err(e) = gpn_view::set_first_gpn_row(&barcode.to_string(), &data) {
                        log::warn!("⚠️ [APP] No se pudo renderizar la fila GPN: {:?}", e);
                    }
                    app.router
                        .navigate_to(View::GpnConfirmation, NavigateOptions::push());
                }
                Err(e) => {
                    alert_with_siren(&e);
                    gpn_view::show_gpn_error(&e);
                }
            }
        });
    }

    fn run_gpn_update(&self) {
        let Some(session) = self.require_session() else {
            return;
        };
        let raw = input_value("gpn-conf-barcode");
        if raw.trim().is_empty() {
            alert("Enter barcode number");
            focus_input("gpn-conf-barcode");
            return;
        }
        let Some(barcode) = parse_barcode(&raw) else {
            alert("Barcode must be a valid number");
            return;
        };
        let Some(fg_transaction_id) = session.gpn_fg_transaction_id else {
            alert("Missing FGTransactionID from initial save. Please submit a new barcode first.");
            return;
        };

        let app = self.clone();
        spawn_local(async move {
            let request = SaveFinishGoodsRequest {
                barcode,
                database: session.selected_database.clone(),
                user_id: session.user_id,
                company_id: COMPANY_ID,
                branch_id: BRANCH_ID,
                status: "update".to_string(),
                fg_transaction_id: Some(fg_transaction_id),
            };
            match app.api.save_finish_goods(&request).await {
                Ok(resp) => {
                    let data = resp.data.unwrap_or_default();
                    if let Some(updated) = data.fg_transaction_id {
                        app.state.set_gpn_transaction(updated);
                    }
                    if let Err(e) = gpn_view::prepend_gpn_row(&barcode.to_string(), &data) {
                        log::warn!("⚠️ [APP] No se pudo renderizar la fila GPN: {:?}", e);
                    }
                    set_input_value("gpn-conf-barcode", "");
                    focus_input("gpn-conf-barcode");
                }
                Err(e) => alert_with_siren(&e),
            }
        });
    }

    // ------------------------------------------------------------------------
    // Barcode status: lookup + delete
    // ------------------------------------------------------------------------

    fn run_status_lookup(&self) {
        let Some(session) = self.state.session() else {
            status_view::show_status_error("Please login first.");
            return;
        };
        let raw = input_value("status-barcode");
        if raw.trim().is_empty() {
            status_view::show_status_error("Enter barcode number");
            focus_input("status-barcode");
            return;
        }
        let Some(barcode) = parse_barcode(&raw) else {
            status_view::show_status_error("Barcode must be a valid number");
            return;
        };

        self.state.set_last_status_barcode(Some(barcode));
        status_view::show_loading(barcode);
        set_button_busy("btn-search-barcode-status", "Searching...");

        let app = self.clone();
        spawn_local(async move {
            let request = BarcodeStatusRequest {
                barcode,
                database: session.selected_database.clone(),
            };
            let result = app.api.barcode_status(&request).await;
            restore_button("btn-search-barcode-status", "Search Barcode Status");

            match result {
                Ok(resp) => {
                    if resp.records.is_empty() {
                        status_view::show_no_records(barcode);
                        return;
                    }
                    let rows = build_status_rows(&resp.records);
                    let delete_app = app.clone();
                    if let Err(e) = status_view::render_rows(&rows, move |category, trigger| {
                        delete_app.run_status_delete(category, trigger);
                    }) {
                        log::warn!("⚠️ [APP] No se pudo renderizar el timeline: {:?}", e);
                    }
                    status_view::set_summary(&summary_line(&resp.records, Some(barcode)));
                }
                Err(e) => {
                    status_view::show_status_error(&e);
                    status_view::set_summary("");
                }
            }
        });
    }

    fn run_status_delete(&self, category: StatusCategory, trigger: web_sys::HtmlButtonElement) {
        let Some(session) = self.require_session() else {
            return;
        };
        let Some(barcode) = self.state.last_status_barcode() else {
            alert_with_siren("Unable to determine barcode for deletion.");
            return;
        };
        if !confirm(&category.confirm_message(barcode)) {
            return;
        }

        // Deshabilitar el botón pulsado mientras el borrado está en vuelo
        let busy = delete_trigger(true);
        trigger.set_disabled(busy.disabled);
        trigger.set_text_content(Some(busy.label));

        let app = self.clone();
        spawn_local(async move {
            let request = DeleteRecordRequest {
                barcode,
                database: session.selected_database.clone(),
                user_id: session.user_id,
                company_id: COMPANY_ID,
                branch_id: BRANCH_ID,
            };
            let result = match category {
                StatusCategory::DeliveryNote => app.api.delete_delivery_note(&request).await,
                StatusCategory::Gpn => app.api.delete_finish_goods(&request).await,
                _ => {
                    let idle = delete_trigger(false);
                    trigger.set_disabled(idle.disabled);
                    trigger.set_text_content(Some(idle.label));
                    return;
                }
            };

            // Restaurar siempre, también en error (el éxito re-renderiza el
            // timeline y reemplaza el botón de todos modos)
            let idle = delete_trigger(false);
            trigger.set_disabled(idle.disabled);
            trigger.set_text_content(Some(idle.label));

            match result {
                // El timeline se refresca para reflejar el borrado
                Ok(_) => app.run_status_lookup(),
                Err(e) => alert_with_siren(&e),
            }
        });
    }

    // ------------------------------------------------------------------------
    // Wiring
    // ------------------------------------------------------------------------

    fn wire_handlers(&self) -> Result<(), JsValue> {
        if let Some(form) = get_element_by_id("login-form") {
            let app = self.clone();
            on_submit(&form, move || app.handle_login())?;
        }

        let app = self.clone();
        on_click_id("btn-logout", move |_| app.perform_logout())?;

        // Portales del landing
        let app = self.clone();
        on_click_id("portal-grm", move |_| {
            app.router.navigate_to(View::PostLogin, NavigateOptions::push());
        })?;
        let app = self.clone();
        on_click_id("portal-gpn", move |_| {
            app.router.navigate_to(View::Gpn, NavigateOptions::push());
        })?;
        let app = self.clone();
        on_click_id("portal-barcode-status", move |_| {
            status_view::reset_view();
            app.router
                .navigate_to(View::BarcodeStatus, NavigateOptions::push());
        })?;

        // GRM
        let app = self.clone();
        on_click_id("btn-initiate", move |_| app.handle_initiate())?;
        let app = self.clone();
        on_click_id("btn-save-challan", move |_| app.handle_save_challan())?;
        let app = self.clone();
        on_click_id("btn-update-delivery-note", move |_| {
            app.run_update_delivery_note()
        })?;
        let app = self.clone();
        on_enter_key_id("conf-barcode", move || app.run_update_delivery_note())?;

        // GPN
        let app = self.clone();
        on_click_id("btn-submit-gpn", move |_| app.handle_gpn_submit())?;
        let app = self.clone();
        on_enter_key_id("gpn-barcode", move || app.handle_gpn_submit())?;
        let app = self.clone();
        on_click_id("btn-update-gpn", move |_| app.run_gpn_update())?;
        let app = self.clone();
        on_enter_key_id("gpn-conf-barcode", move || app.run_gpn_update())?;

        // Barcode status
        let app = self.clone();
        on_click_id("btn-search-barcode-status", move |_| app.run_status_lookup())?;
        let app = self.clone();
        on_enter_key_id("status-barcode", move || app.run_status_lookup())?;

        // Botones de volver
        for (button_id, target) in [
            ("btn-back-to-landing", View::Landing),
            ("btn-back-to-landing-gpn", View::Landing),
            ("btn-back-to-landing-status", View::Landing),
            ("btn-back-to-gpn-form", View::Gpn),
            ("btn-back-to-initiate", View::PostLogin),
            ("btn-back-to-form", View::ChallanForm),
        ] {
            let app = self.clone();
            on_click_id(button_id, move |_| {
                app.router.handle_back(target, app.state.is_authenticated());
            })?;
        }

        Ok(())
    }
}

impl Default for GrnApp {
    fn default() -> Self {
        Self::new()
    }
}
