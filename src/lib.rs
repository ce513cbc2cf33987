// ============================================================================
// GRN FLOOR WEBAPP - Cliente WASM de goods receipt + panel de máquinas
// ============================================================================
// Un solo bundle sirve dos páginas: el flujo GRN (login, delivery notes,
// packing, timeline de barcodes) y el dashboard de estado de máquina. El
// entrypoint detecta la página por su elemento raíz.
// ============================================================================

pub mod app;
pub mod config;
pub mod dashboard;
pub mod dom;
pub mod models;
pub mod router;
pub mod services;
pub mod state;
pub mod utils;
pub mod viewmodels;
pub mod views;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use crate::app::GrnApp;
use crate::dashboard::DashboardApp;
use crate::dom::get_element_by_id;
use crate::services::ApiClient;

thread_local! {
    static GRN_APP: RefCell<Option<GrnApp>> = const { RefCell::new(None) };
    static DASHBOARD_APP: RefCell<Option<DashboardApp>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());

    if get_element_by_id("login-section").is_some() {
        let app = GrnApp::new();
        app.init()?;
        GRN_APP.with(|cell| *cell.borrow_mut() = Some(app));
    } else if get_element_by_id("dashboard").is_some() {
        let app = DashboardApp::new();
        app.init()?;
        DASHBOARD_APP.with(|cell| *cell.borrow_mut() = Some(app));
    } else {
        log::warn!("⚠️ [START] Ningún elemento raíz conocido en esta página");
    }
    Ok(())
}

/// Utilidad de soporte, pensada para invocarse desde la consola del navegador:
/// limpia el cache de conexiones de base de datos del backend
#[wasm_bindgen]
pub fn grn_clear_db_cache() {
    wasm_bindgen_futures::spawn_local(async {
        match ApiClient::new().clear_db_cache().await {
            Ok(_) => log::info!("✅ [ADMIN] Cache de DB limpiado"),
            Err(e) => log::warn!("⚠️ [ADMIN] No se pudo limpiar el cache de DB: {}", e),
        }
    });
}
