// ============================================================================
// APP STATE - Estado global del cliente GRN
// ============================================================================
// Singleton mutable con celdas Rc<RefCell>. Toda mutación de sesión pasa por
// las transiciones nombradas (login / logout / set_*) para que el invariante
// "sesión implica username + selected_database no vacíos" se valide en un
// solo lugar.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::models::Session;

#[derive(Clone, Default)]
pub struct AppState {
    session: Rc<RefCell<Option<Session>>>,
    /// Session id cacheado en memoria al guardar/restaurar; el listener de
    /// storage lo compara contra el valor recién escrito por otra pestaña
    session_id: Rc<RefCell<Option<String>>>,
    /// Último barcode consultado en el timeline de status
    last_status_barcode: Rc<RefCell<Option<i64>>>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transición: login. Rechaza sesiones que violan el invariante.
    pub fn login(&self, session: Session) -> Result<(), String> {
        if !session.is_authenticated() {
            return Err("Session requires non-empty username and database".to_string());
        }
        *self.session.borrow_mut() = Some(session);
        Ok(())
    }

    /// Transición: logout. Limpia sesión, session id y el barcode cacheado.
    pub fn logout(&self) {
        *self.session.borrow_mut() = None;
        *self.session_id.borrow_mut() = None;
        *self.last_status_barcode.borrow_mut() = None;
    }

    pub fn session(&self) -> Option<Session> {
        self.session.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session
            .borrow()
            .as_ref()
            .map(|s| s.is_authenticated())
            .unwrap_or(false)
    }

    /// Transición: recordar el barcode del challan iniciado
    pub fn set_challan_barcode(&self, barcode: i64) {
        if let Some(session) = self.session.borrow_mut().as_mut() {
            session.challan_barcode = Some(barcode);
        }
    }

    /// Transición: recordar el FGTransactionID de la última alta GPN
    pub fn set_gpn_transaction(&self, fg_transaction_id: i64) {
        if let Some(session) = self.session.borrow_mut().as_mut() {
            session.gpn_fg_transaction_id = Some(fg_transaction_id);
        }
    }

    pub fn set_session_id(&self, id: Option<String>) {
        *self.session_id.borrow_mut() = id;
    }

    pub fn session_id(&self) -> Option<String> {
        self.session_id.borrow().clone()
    }

    pub fn set_last_status_barcode(&self, barcode: Option<i64>) {
        *self.last_status_barcode.borrow_mut() = barcode;
    }

    pub fn last_status_barcode(&self) -> Option<i64> {
        *self.last_status_barcode.borrow()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_session() -> Session {
        Session {
            user_id: 1,
            ledger_id: None,
            machines: Vec::new(),
            selected_database: "KOL".to_string(),
            username: "operator1".to_string(),
            challan_barcode: None,
            gpn_fg_transaction_id: None,
        }
    }

    #[test]
    fn login_enforces_invariant() {
        let state = AppState::new();

        let mut bad = valid_session();
        bad.username = String::new();
        assert!(state.login(bad).is_err());
        assert!(!state.is_authenticated());

        assert!(state.login(valid_session()).is_ok());
        assert!(state.is_authenticated());
    }

    #[test]
    fn logout_clears_everything() {
        let state = AppState::new();
        state.login(valid_session()).unwrap();
        state.set_session_id(Some("123_abc".to_string()));
        state.set_last_status_barcode(Some(42));

        state.logout();

        assert!(state.session().is_none());
        assert!(state.session_id().is_none());
        assert!(state.last_status_barcode().is_none());
    }

    #[test]
    fn challan_and_gpn_transitions_touch_the_session() {
        let state = AppState::new();
        state.login(valid_session()).unwrap();
        state.set_challan_barcode(123456);
        state.set_gpn_transaction(77);

        let session = state.session().unwrap();
        assert_eq!(session.challan_barcode, Some(123456));
        assert_eq!(session.gpn_fg_transaction_id, Some(77));
    }

    #[test]
    fn transitions_are_noops_without_session() {
        let state = AppState::new();
        state.set_challan_barcode(1);
        state.set_gpn_transaction(2);
        assert!(state.session().is_none());
    }
}
