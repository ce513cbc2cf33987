// ============================================================================
// VIEWS - Render directo al DOM (sin lógica de negocio)
// ============================================================================
// Las vistas toman modelos de vista ya calculados (viewmodels) y los vuelcan
// en los elementos estáticos del HTML. Nada acá hace requests ni decide flujo.
// ============================================================================

pub mod barcode_status;
pub mod challan;
pub mod dashboard;
pub mod gpn;
pub mod login;

use crate::dom::{set_button_disabled, set_button_label};

/// Deshabilitar un botón durante una operación async, con etiqueta de progreso
pub fn set_button_busy(id: &str, busy_label: &str) {
    set_button_disabled(id, true);
    set_button_label(id, busy_label);
}

/// Restaurar el botón al terminar (siempre, también en error)
pub fn restore_button(id: &str, label: &str) {
    set_button_disabled(id, false);
    set_button_label(id, label);
}
