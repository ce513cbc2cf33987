// ============================================================================
// SESSION SERVICE - Persistencia de sesión + sincronización entre pestañas
// ============================================================================
// La sesión vive en localStorage bajo dos claves: la sesión serializada y un
// id único por login. Cuando otra pestaña hace login nuevo el id cambia y el
// evento "storage" expulsa a las pestañas viejas.
// ============================================================================

use std::cell::Cell;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::StorageEvent;

use crate::dom::alert;
use crate::models::session::Session;
use crate::router::{NavigateOptions, Router, View};
use crate::state::AppState;
use crate::utils::storage;

pub const SESSION_KEY: &str = "grn_session";
pub const SESSION_ID_KEY: &str = "grn_session_id";

thread_local! {
    static STORAGE_LISTENER_INSTALLED: Cell<bool> = const { Cell::new(false) };
}

/// Id único por login: epoch ms + prefijo de un uuid v4
pub fn new_session_id() -> String {
    let uuid = uuid::Uuid::new_v4().to_string();
    let prefix = uuid.split('-').next().unwrap_or("");
    format!("{}_{}", js_sys::Date::now() as u64, prefix)
}

/// Persistir sesión + id nuevo. Devuelve el id para cachearlo en memoria.
/// Los fallos de storage se loguean y no rompen el login.
pub fn save_session(session: &Session) -> String {
    let session_id = new_session_id();
    if let Err(e) = storage::save_json(SESSION_KEY, session) {
        log::warn!("⚠️ [SESSION] No se pudo guardar la sesión: {}", e);
    }
    if let Err(e) = storage::save_raw(SESSION_ID_KEY, &session_id) {
        log::warn!("⚠️ [SESSION] No se pudo guardar el session id: {}", e);
    }
    log::info!("💾 [SESSION] Sesión guardada, id: {}", session_id);
    session_id
}

/// Restaurar la sesión persistida junto con su id (ambos o nada)
pub fn load_session() -> Option<(Session, String)> {
    let session: Session = storage::load_json(SESSION_KEY)?;
    if !session.is_authenticated() {
        return None;
    }
    let session_id = storage::load_raw(SESSION_ID_KEY)?;
    Some((session, session_id))
}

/// Borrar la sesión persistida (logout local o expulsión)
pub fn clear_session() {
    if let Err(e) = storage::remove(SESSION_KEY) {
        log::warn!("⚠️ [SESSION] No se pudo borrar la sesión: {}", e);
    }
    if let Err(e) = storage::remove(SESSION_ID_KEY) {
        log::warn!("⚠️ [SESSION] No se pudo borrar el session id: {}", e);
    }
}

/// Leer el session id actual directo del storage (no del cache en memoria)
pub fn stored_session_id() -> Option<String> {
    storage::load_raw(SESSION_ID_KEY)
}

/// Decisión pura ante un cambio de la clave de session id en otra pestaña
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabAction {
    /// Nada que hacer (sin sesión local, o el id coincide)
    Ignore,
    /// La clave desapareció: logout silencioso sin tocar el storage
    SilentLogout,
    /// Otra pestaña inició un login nuevo: expulsar con aviso
    Evict,
}

pub fn resolve_tab_action(local_id: Option<&str>, stored_id: Option<&str>) -> TabAction {
    let Some(local) = local_id else {
        return TabAction::Ignore;
    };
    match stored_id {
        None => TabAction::SilentLogout,
        Some(stored) if stored != local => TabAction::Evict,
        Some(_) => TabAction::Ignore,
    }
}

/// Plan de salida para una acción: toda salida de sesión limpia la UI
/// (inputs, chips y tablas), igual que el logout local. Solo la expulsión
/// avisa al usuario.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabExit {
    pub clear_ui: bool,
    pub notify: bool,
}

pub fn exit_plan(action: TabAction) -> Option<TabExit> {
    match action {
        TabAction::Ignore => None,
        TabAction::SilentLogout => Some(TabExit {
            clear_ui: true,
            notify: false,
        }),
        TabAction::Evict => Some(TabExit {
            clear_ui: true,
            notify: true,
        }),
    }
}

/// Registrar el listener global de "storage". Idempotente: la segunda llamada
/// es no-op (el listener hace .forget() y vive toda la app).
///
/// `reset_views` limpia los inputs, chips y tablas de la pestaña expulsada:
/// sin eso la pantalla de login quedaría mostrando los datos de la sesión
/// anterior.
pub fn install_storage_listener<R>(
    state: AppState,
    router: Router,
    reset_views: R,
) -> Result<(), JsValue>
where
    R: Fn() + 'static,
{
    let already = STORAGE_LISTENER_INSTALLED.with(|installed| installed.replace(true));
    if already {
        return Ok(());
    }

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;

    let closure = Closure::wrap(Box::new(move |event: StorageEvent| {
        if event.key().as_deref() != Some(SESSION_ID_KEY) {
            return;
        }

        let local_id = state.session_id();
        let stored_id = stored_session_id();
        let action = resolve_tab_action(local_id.as_deref(), stored_id.as_deref());
        let Some(plan) = exit_plan(action) else {
            return;
        };

        match action {
            TabAction::SilentLogout => {
                log::info!("🔄 [SESSION] Sesión cerrada en otra pestaña");
            }
            _ => log::warn!("🔄 [SESSION] Login nuevo en otra pestaña, expulsando"),
        }

        state.logout();
        if plan.clear_ui {
            reset_views();
        }
        router.reset_depth();
        router.navigate_to(View::Login, NavigateOptions::replace_forced());
        if plan.notify {
            alert("You have been signed out because a new session was started in another tab.");
        }
    }) as Box<dyn FnMut(StorageEvent)>);

    window.add_event_listener_with_callback("storage", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_action_ignores_without_local_session() {
        assert_eq!(resolve_tab_action(None, Some("abc")), TabAction::Ignore);
        assert_eq!(resolve_tab_action(None, None), TabAction::Ignore);
    }

    #[test]
    fn tab_action_matches_by_session_id() {
        assert_eq!(
            resolve_tab_action(Some("abc"), Some("abc")),
            TabAction::Ignore
        );
        assert_eq!(
            resolve_tab_action(Some("abc"), Some("xyz")),
            TabAction::Evict
        );
        assert_eq!(resolve_tab_action(Some("abc"), None), TabAction::SilentLogout);
    }

    #[test]
    fn every_session_exit_clears_the_ui() {
        // Tanto el logout silencioso como la expulsión deben dejar la
        // pestaña sin inputs ni chips de la sesión anterior
        let silent = exit_plan(TabAction::SilentLogout);
        assert_eq!(
            silent,
            Some(TabExit {
                clear_ui: true,
                notify: false
            })
        );

        let evict = exit_plan(TabAction::Evict);
        assert_eq!(
            evict,
            Some(TabExit {
                clear_ui: true,
                notify: true
            })
        );

        assert_eq!(exit_plan(TabAction::Ignore), None);
    }
}
