// ============================================================================
// DASHBOARD APP - Controlador del panel de estado de máquina
// ============================================================================
// Página independiente del cliente GRN: lee machineId/database de la URL,
// consulta machine-floor y re-renderiza. El contador de idle corre localmente
// entre refreshes; el auto-refresh es un toggle del usuario.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsValue;
use wasm_bindgen_futures::spawn_local;
use web_sys::UrlSearchParams;

use crate::config::DashboardConfig;
use crate::dom::{
    get_element_by_id, get_input_by_id, get_select_by_id, on_change, on_click_id, set_hidden,
};
use crate::models::machine::MachineStatus;
use crate::services::ApiClient;
use crate::utils::scheduler::PeriodicTask;
use crate::viewmodels::dashboard_viewmodel::{
    dashboard_view, resolve_database, resolve_machine_id, MachineBody,
};
use crate::views::dashboard as dashboard_view_dom;
use crate::views::dashboard::MessageVariant;

const IDLE_TICK_MS: u32 = 60_000;

#[derive(Clone)]
pub struct DashboardApp {
    api: ApiClient,
    config: DashboardConfig,
    machine_id: Rc<RefCell<Option<u32>>>,
    database: Rc<RefCell<String>>,
    /// Minutos de idle reportados por el backend en el último fetch
    idle_seed: Rc<RefCell<Option<f64>>>,
    /// Minutos sumados localmente desde ese fetch
    idle_extra: Rc<RefCell<f64>>,
    idle_timer: PeriodicTask,
    auto_refresh: PeriodicTask,
}

impl DashboardApp {
    pub fn new() -> Self {
        let config = DashboardConfig::from_env();
        Self {
            api: ApiClient::new(),
            database: Rc::new(RefCell::new(resolve_database(
                None,
                &config.default_database,
            ))),
            machine_id: Rc::new(RefCell::new(None)),
            idle_seed: Rc::new(RefCell::new(None)),
            idle_extra: Rc::new(RefCell::new(0.0)),
            idle_timer: PeriodicTask::new(),
            auto_refresh: PeriodicTask::new(),
            config,
        }
    }

    pub fn init(&self) -> Result<(), JsValue> {
        log::info!("🚀 [DASHBOARD] Inicializando panel de máquina");
        self.derive_state_from_url();

        if let Some(select) = get_select_by_id("databaseSelect") {
            select.set_value(&self.database.borrow());
        }
        self.update_machine_chip();
        self.wire_handlers()?;
        self.load_data();

        if auto_refresh_enabled() {
            self.start_auto_refresh();
        }
        Ok(())
    }

    fn derive_state_from_url(&self) {
        let search = web_sys::window()
            .map(|w| w.location())
            .and_then(|l| l.search().ok())
            .unwrap_or_default();
        let params = UrlSearchParams::new_with_str(&search).ok();

        let machine_param = params.as_ref().and_then(|p| p.get("machineId"));
        let database_param = params.as_ref().and_then(|p| p.get("database"));

        *self.machine_id.borrow_mut() =
            resolve_machine_id(machine_param.as_deref(), self.config.default_machine_id);
        *self.database.borrow_mut() =
            resolve_database(database_param.as_deref(), &self.config.default_database);
    }

    fn update_machine_chip(&self) {
        dashboard_view_dom::set_machine_id_display(*self.machine_id.borrow());
    }

    fn show_dashboard(&self, show: bool) {
        if let Some(el) = get_element_by_id("dashboard") {
            set_hidden(&el, !show);
        }
    }

    pub fn load_data(&self) {
        let Some(machine_id) = *self.machine_id.borrow() else {
            dashboard_view_dom::show_status_message(
                "No machine ID provided. Pass ?machineId=### in the URL.",
                MessageVariant::Error,
            );
            self.show_dashboard(false);
            self.update_machine_chip();
            return;
        };

        dashboard_view_dom::show_status_message("Loading machine data…", MessageVariant::Info);
        self.show_dashboard(false);
        self.update_machine_chip();

        let app = self.clone();
        let database = self.database.borrow().clone();
        spawn_local(async move {
            match app.api.machine_floor(&machine_id.to_string(), &database).await {
                Ok(resp) => match resp.data {
                    Some(data) => {
                        app.render(&data);
                        dashboard_view_dom::hide_status_message();
                        app.show_dashboard(true);
                    }
                    None => {
                        dashboard_view_dom::show_status_message(
                            "API returned an empty payload.",
                            MessageVariant::Error,
                        );
                        app.show_dashboard(false);
                    }
                },
                Err(e) => {
                    log::error!("❌ [DASHBOARD] Carga de datos falló: {}", e);
                    dashboard_view_dom::show_status_message(&e, MessageVariant::Error);
                    app.show_dashboard(false);
                }
            }
        });
    }

    fn render(&self, data: &MachineStatus) {
        // El backend puede corregir el machine id (alias, redirecciones)
        if let Some(id) = data.machine_id {
            *self.machine_id.borrow_mut() = Some(id);
        }
        self.update_machine_chip();

        let view = dashboard_view(data);
        match &view.body {
            MachineBody::Idle(idle) => self.start_idle_timer(idle.idle_since_minutes),
            MachineBody::Running(_) => self.clear_idle_timer(),
        }
        dashboard_view_dom::render(&view, *self.idle_extra.borrow());
    }

    fn start_idle_timer(&self, seed_minutes: Option<f64>) {
        self.clear_idle_timer();
        *self.idle_seed.borrow_mut() = seed_minutes;
        if seed_minutes.is_none() {
            return;
        }

        let idle_seed = Rc::clone(&self.idle_seed);
        let idle_extra = Rc::clone(&self.idle_extra);
        self.idle_timer.start(IDLE_TICK_MS, move || {
            *idle_extra.borrow_mut() += 1.0;
            dashboard_view_dom::render_idle_duration(*idle_seed.borrow(), *idle_extra.borrow());
        });
    }

    fn clear_idle_timer(&self) {
        self.idle_timer.stop();
        *self.idle_seed.borrow_mut() = None;
        *self.idle_extra.borrow_mut() = 0.0;
    }

    fn start_auto_refresh(&self) {
        let interval_ms = self.config.refresh_interval_seconds.max(1) * 1000;
        let app = self.clone();
        self.auto_refresh.start(interval_ms, move || app.load_data());
    }

    fn stop_auto_refresh(&self) {
        self.auto_refresh.stop();
    }

    fn wire_handlers(&self) -> Result<(), JsValue> {
        let app = self.clone();
        on_click_id("refreshButton", move |_| app.load_data())?;

        if let Some(select) = get_select_by_id("databaseSelect") {
            let app = self.clone();
            let select_ref = select.clone();
            on_change(&select, move || {
                let value = select_ref.value();
                *app.database.borrow_mut() =
                    resolve_database(Some(&value), &app.config.default_database);
                app.load_data();
            })?;
        }

        if let Some(toggle) = get_input_by_id("autoRefreshToggle") {
            let app = self.clone();
            let toggle_ref = toggle.clone();
            on_change(&toggle, move || {
                if toggle_ref.checked() {
                    app.start_auto_refresh();
                } else {
                    app.stop_auto_refresh();
                }
            })?;
        }
        Ok(())
    }
}

impl Default for DashboardApp {
    fn default() -> Self {
        Self::new()
    }
}

fn auto_refresh_enabled() -> bool {
    get_input_by_id("autoRefreshToggle")
        .map(|t| t.checked())
        .unwrap_or(false)
}
