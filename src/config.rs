// ============================================================================
// CONFIG - Resolución de configuración (API base, defaults del dashboard)
// ============================================================================
// Los defaults se fijan en tiempo de compilación vía option_env! (.env cargado
// por build.rs). El API base puede sobreescribirse en runtime desde la consola
// del navegador (localStorage, clave `grn_api_base`).
// ============================================================================

use gloo_storage::{LocalStorage, Storage};
use wasm_bindgen::prelude::*;

/// Clave de localStorage con el override del API base
pub const API_BASE_STORAGE_KEY: &str = "grn_api_base";

/// URL base del API en producción (siempre bajo el prefijo /api/)
pub const DEFAULT_API_BASE: &str = match option_env!("GRN_API_BASE") {
    Some(url) => url,
    None => "https://cdcapi.onrender.com/api/",
};

/// URL base del API en desarrollo local
pub const LOCAL_API_BASE: &str = match option_env!("GRN_LOCAL_API_BASE") {
    Some(url) => url,
    None => "http://localhost:3001/api/",
};

/// Configuración del dashboard de planta
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub default_database: String,
    pub default_machine_id: Option<u32>,
    pub refresh_interval_seconds: u32,
}

impl DashboardConfig {
    pub fn from_env() -> Self {
        Self {
            default_database: option_env!("MACHINE_FLOOR_DEFAULT_DATABASE")
                .unwrap_or("KOL")
                .to_string(),
            default_machine_id: option_env!("MACHINE_FLOOR_DEFAULT_MACHINE_ID")
                .and_then(|v| v.parse().ok()),
            refresh_interval_seconds: option_env!("MACHINE_FLOOR_REFRESH_SECONDS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
        }
    }
}

/// Validar URL absoluta http(s)
pub fn is_valid_absolute_url(value: &str) -> bool {
    let v = value.trim();
    if !(v.starts_with("http://") || v.starts_with("https://")) {
        return false;
    }
    // Debe tener host después del esquema y no contener espacios
    let rest = v.splitn(2, "://").nth(1).unwrap_or("");
    !rest.is_empty() && !rest.starts_with('/') && !v.contains(char::is_whitespace)
}

/// Normalizar base: garantiza slash final
pub fn normalize_base(value: &str) -> String {
    let v = value.trim();
    if v.ends_with('/') {
        v.to_string()
    } else {
        format!("{}/", v)
    }
}

/// Resolver el API base efectivo: override de localStorage si es válido,
/// si no el default compilado. Fallos de storage caen al default.
pub fn api_base() -> String {
    let stored: Option<String> = LocalStorage::get(API_BASE_STORAGE_KEY).ok();
    match stored {
        Some(url) if is_valid_absolute_url(&url) => normalize_base(&url),
        _ => normalize_base(DEFAULT_API_BASE),
    }
}

// ----------------------------------------------------------------------------
// Override para desarrollo desde la consola del navegador
// ----------------------------------------------------------------------------

#[wasm_bindgen]
pub fn grn_api_base() -> String {
    api_base()
}

#[wasm_bindgen]
pub fn grn_set_api_base(url: String) {
    if let Err(e) = LocalStorage::set(API_BASE_STORAGE_KEY, url) {
        log::warn!("⚠️ [CONFIG] No se pudo guardar el API base: {:?}", e);
    }
}

#[wasm_bindgen]
pub fn grn_use_local_api() {
    grn_set_api_base(LOCAL_API_BASE.to_string());
}

#[wasm_bindgen]
pub fn grn_use_prod_api() {
    grn_set_api_base(DEFAULT_API_BASE.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_url_validation() {
        assert!(is_valid_absolute_url("https://api.example.com/api/"));
        assert!(is_valid_absolute_url("http://localhost:3001/api"));
        assert!(!is_valid_absolute_url(""));
        assert!(!is_valid_absolute_url("ftp://example.com"));
        assert!(!is_valid_absolute_url("https://"));
        assert!(!is_valid_absolute_url("https://bad host/api"));
    }

    #[test]
    fn base_always_ends_with_slash() {
        assert_eq!(normalize_base("http://x/api"), "http://x/api/");
        assert_eq!(normalize_base("http://x/api/"), "http://x/api/");
    }
}
