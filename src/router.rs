// ============================================================================
// ROUTER - Navegación entre vistas sincronizada con el history del navegador
// ============================================================================
// Exactamente una vista visible a la vez. Cada navegación push/replace lleva
// {view} como history state; `depth` cuenta cuántos estados empujó el router
// para decidir si "back" delega en history.back() o reemplaza directo.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use js_sys::Reflect;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::PopStateEvent;

use crate::dom::{add_class, document, focus_input, get_element_by_id, has_class, remove_class};
use crate::state::AppState;

pub const HIDDEN_CLASS: &str = "hidden";
const LOGOUT_BUTTON_ID: &str = "btn-logout";

/// Vistas registradas del cliente GRN
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Login,
    Landing,
    PostLogin,
    ChallanForm,
    DeliveryConfirmation,
    Gpn,
    GpnConfirmation,
    BarcodeStatus,
}

impl View {
    pub const ALL: [View; 8] = [
        View::Login,
        View::Landing,
        View::PostLogin,
        View::ChallanForm,
        View::DeliveryConfirmation,
        View::Gpn,
        View::GpnConfirmation,
        View::BarcodeStatus,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            View::Login => "login",
            View::Landing => "landing",
            View::PostLogin => "post-login",
            View::ChallanForm => "challan-form",
            View::DeliveryConfirmation => "delivery-confirmation",
            View::Gpn => "gpn",
            View::GpnConfirmation => "gpn-confirmation",
            View::BarcodeStatus => "barcode-status",
        }
    }

    pub fn from_name(name: &str) -> Option<View> {
        View::ALL.iter().copied().find(|v| v.name() == name)
    }

    /// Secciones del DOM que componen la vista
    pub fn section_ids(&self) -> &'static [&'static str] {
        match self {
            View::Login => &["login-section"],
            View::Landing => &["landing-section"],
            View::PostLogin => &["post-login-section"],
            View::ChallanForm => &["challan-form-section"],
            View::DeliveryConfirmation => &["delivery-note-confirmation"],
            View::Gpn => &["gpn-section"],
            View::GpnConfirmation => &["gpn-confirmation"],
            View::BarcodeStatus => &["barcode-status-section"],
        }
    }

    /// Input que recibe foco al entrar a la vista
    fn enter_focus_id(&self) -> Option<&'static str> {
        match self {
            View::Login => Some("username"),
            View::PostLogin => Some("barcode"),
            View::DeliveryConfirmation => Some("conf-barcode"),
            View::Gpn => Some("gpn-barcode"),
            View::GpnConfirmation => Some("gpn-conf-barcode"),
            View::BarcodeStatus => Some("status-barcode"),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NavigateOptions {
    pub replace: bool,
    pub force: bool,
    pub skip_history: bool,
}

impl NavigateOptions {
    pub fn push() -> Self {
        Self::default()
    }

    pub fn replace() -> Self {
        Self {
            replace: true,
            ..Self::default()
        }
    }

    pub fn replace_forced() -> Self {
        Self {
            replace: true,
            force: true,
            skip_history: false,
        }
    }
}

// ----------------------------------------------------------------------------
// Decisiones puras (testeables sin DOM)
// ----------------------------------------------------------------------------

/// Re-entrar a la vista actual sin force es no-op (evita entradas duplicadas)
pub fn should_apply(current: Option<View>, target: View, force: bool) -> bool {
    force || current != Some(target)
}

/// Resolver la vista destino de un popstate: el view del history state si es
/// conocido, si no la detectada en el DOM; sin sesión siempre login
pub fn resolve_popstate_target(
    state_view: Option<View>,
    detected: View,
    authenticated: bool,
) -> View {
    let target = state_view.unwrap_or(detected);
    if !authenticated && target != View::Login {
        View::Login
    } else {
        target
    }
}

/// Ajuste del contador de profundidad tras un popstate (sin re-push)
pub fn depth_after_popstate(target: View, depth: u32) -> u32 {
    if target == View::Login {
        0
    } else {
        depth.saturating_sub(1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackAction {
    /// Hay history empujado por el router: delegar en history.back()
    HistoryBack,
    /// Sin history propio: replace directo a la vista dada
    Replace(View),
}

pub fn back_action(depth: u32, fallback: View, authenticated: bool) -> BackAction {
    let target = if !authenticated && fallback != View::Login {
        View::Login
    } else {
        fallback
    };
    if depth > 0 {
        BackAction::HistoryBack
    } else {
        BackAction::Replace(target)
    }
}

// ----------------------------------------------------------------------------
// Router (DOM + history)
// ----------------------------------------------------------------------------

#[derive(Clone, Default)]
pub struct Router {
    current: Rc<RefCell<Option<View>>>,
    depth: Rc<RefCell<u32>>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<View> {
        *self.current.borrow()
    }

    pub fn reset_depth(&self) {
        *self.depth.borrow_mut() = 0;
    }

    /// Detectar la vista inicial: primera cuyo section ya está visible
    pub fn detect_initial_view() -> View {
        for view in View::ALL {
            let visible = view.section_ids().iter().any(|id| {
                get_element_by_id(id)
                    .map(|el| !has_class(&el, HIDDEN_CLASS))
                    .unwrap_or(false)
            });
            if visible {
                return view;
            }
        }
        View::Login
    }

    /// Ocultar todas las secciones registradas y mostrar solo las del view
    fn apply_view(&self, view: View) {
        for v in View::ALL {
            for id in v.section_ids() {
                if let Some(el) = get_element_by_id(id) {
                    let _ = add_class(&el, HIDDEN_CLASS);
                }
            }
        }
        for id in view.section_ids() {
            if let Some(el) = get_element_by_id(id) {
                let _ = remove_class(&el, HIDDEN_CLASS);
            }
        }

        if let Some(logout_btn) = get_element_by_id(LOGOUT_BUTTON_ID) {
            if view == View::Login {
                let _ = add_class(&logout_btn, HIDDEN_CLASS);
            } else {
                let _ = remove_class(&logout_btn, HIDDEN_CLASS);
            }
        }

        if let Some(focus_id) = view.enter_focus_id() {
            // Foco diferido para que el section ya esté visible
            Timeout::new(0, move || focus_input(focus_id)).forget();
        }
    }

    /// Navegar a una vista; no-op si ya es la actual y no viene `force`
    pub fn navigate_to(&self, view: View, options: NavigateOptions) {
        if !should_apply(self.current(), view, options.force) {
            return;
        }

        self.apply_view(view);
        *self.current.borrow_mut() = Some(view);

        if options.skip_history {
            return;
        }

        if let Err(e) = self.write_history(view, options.replace) {
            log::warn!("⚠️ [ROUTER] No se pudo actualizar el history: {:?}", e);
        }
    }

    fn write_history(&self, view: View, replace: bool) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
        let history = window.history()?;
        let state = js_sys::Object::new();
        Reflect::set(
            &state,
            &JsValue::from_str("view"),
            &JsValue::from_str(view.name()),
        )?;
        let title = document().map(|d| d.title()).unwrap_or_default();

        if replace {
            history.replace_state(&state, &title)?;
        } else {
            history.push_state(&state, &title)?;
            *self.depth.borrow_mut() += 1;
        }
        Ok(())
    }

    /// Inicializar: detectar vista visible, aplicarla y sembrar el history
    pub fn init(&self) {
        let initial = Self::detect_initial_view();
        self.apply_view(initial);
        *self.current.borrow_mut() = Some(initial);
        if let Err(e) = self.write_history(initial, true) {
            log::warn!("⚠️ [ROUTER] No se pudo inicializar el history: {:?}", e);
        }
        self.reset_depth();
    }

    /// Back del UI: history.back() si el router empujó entradas, si no
    /// replace directo al fallback (login si no hay sesión)
    pub fn handle_back(&self, fallback: View, authenticated: bool) {
        match back_action(*self.depth.borrow(), fallback, authenticated) {
            BackAction::HistoryBack => {
                if let Some(window) = web_sys::window() {
                    if let Ok(history) = window.history() {
                        let _ = history.back();
                    }
                }
            }
            BackAction::Replace(target) => {
                self.navigate_to(target, NavigateOptions::replace_forced());
            }
        }
    }

    /// Registrar el listener global de popstate (una sola vez, desde App::new)
    pub fn install_popstate(&self, state: AppState) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
        let router = self.clone();

        let closure = Closure::wrap(Box::new(move |event: PopStateEvent| {
            let state_view = Reflect::get(&event.state(), &JsValue::from_str("view"))
                .ok()
                .and_then(|v| v.as_string())
                .and_then(|name| View::from_name(&name));

            let detected = Router::detect_initial_view();
            let target =
                resolve_popstate_target(state_view, detected, state.is_authenticated());

            {
                let mut depth = router.depth.borrow_mut();
                *depth = depth_after_popstate(target, *depth);
            }

            // Aplicar sin tocar el history (el navegador ya movió el estado)
            router.apply_view(target);
            *router.current.borrow_mut() = Some(target);
        }) as Box<dyn FnMut(PopStateEvent)>);

        window.add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref())?;
        // Listener global: vive toda la app
        closure.forget();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_view_without_force_is_noop() {
        assert!(!should_apply(Some(View::Landing), View::Landing, false));
        assert!(should_apply(Some(View::Landing), View::Landing, true));
        assert!(should_apply(Some(View::Landing), View::Gpn, false));
        assert!(should_apply(None, View::Login, false));
    }

    #[test]
    fn popstate_forces_login_without_session() {
        assert_eq!(
            resolve_popstate_target(Some(View::Gpn), View::Login, false),
            View::Login
        );
        assert_eq!(
            resolve_popstate_target(Some(View::Gpn), View::Login, true),
            View::Gpn
        );
        // Sin view en el state: cae a la detectada
        assert_eq!(
            resolve_popstate_target(None, View::Landing, true),
            View::Landing
        );
    }

    #[test]
    fn depth_resets_on_login_and_decrements_elsewhere() {
        assert_eq!(depth_after_popstate(View::Login, 3), 0);
        assert_eq!(depth_after_popstate(View::Gpn, 3), 2);
        assert_eq!(depth_after_popstate(View::Gpn, 0), 0);
    }

    #[test]
    fn back_delegates_to_history_only_with_router_depth() {
        assert_eq!(
            back_action(2, View::Landing, true),
            BackAction::HistoryBack
        );
        assert_eq!(
            back_action(0, View::Landing, true),
            BackAction::Replace(View::Landing)
        );
        assert_eq!(
            back_action(0, View::Landing, false),
            BackAction::Replace(View::Login)
        );
    }

    #[test]
    fn view_names_round_trip() {
        for view in View::ALL {
            assert_eq!(View::from_name(view.name()), Some(view));
        }
        assert_eq!(View::from_name("nope"), None);
    }
}
