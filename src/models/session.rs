use serde::{Deserialize, Serialize};

// ============================================================================
// SESSION - Sesión autenticada del cliente GRN
// ============================================================================
// Invariante: una sesión no nula siempre tiene username y selected_database
// no vacíos; ambos campos habilitan cada llamada autenticada al API.
// La validación vive en AppState::login (un solo punto de mutación).
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user_id: i64,

    #[serde(default)]
    pub ledger_id: Option<i64>,

    /// Máquinas asignadas al usuario (devueltas por auth/login)
    #[serde(default)]
    pub machines: Vec<MachineInfo>,

    pub selected_database: String,

    pub username: String,

    /// Barcode del challan iniciado (flujo GRN), sobrevive entre pantallas
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challan_barcode: Option<i64>,

    /// FGTransactionID emitido por el primer save-finish-goods (flujo GPN)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpn_fg_transaction_id: Option<i64>,
}

impl Session {
    /// Los dos campos que habilitan llamadas autenticadas
    pub fn is_authenticated(&self) -> bool {
        !self.username.trim().is_empty() && !self.selected_database.trim().is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct MachineInfo {
    #[serde(default)]
    pub machine_id: Option<i64>,
    #[serde(default)]
    pub machine_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_session() -> Session {
        Session {
            user_id: 7,
            ledger_id: Some(42),
            machines: Vec::new(),
            selected_database: "KOL".to_string(),
            username: "operator1".to_string(),
            challan_barcode: None,
            gpn_fg_transaction_id: None,
        }
    }

    #[test]
    fn authenticated_requires_username_and_database() {
        assert!(base_session().is_authenticated());

        let mut s = base_session();
        s.username = "  ".to_string();
        assert!(!s.is_authenticated());

        let mut s = base_session();
        s.selected_database = String::new();
        assert!(!s.is_authenticated());
    }

    #[test]
    fn session_round_trips_through_json() {
        let mut s = base_session();
        s.challan_barcode = Some(123456);
        let json = serde_json::to_string(&s).unwrap();
        let back: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(s, back);
    }
}
