// ============================================================================
// VIEWMODELS - Lógica de presentación pura (sin DOM)
// ============================================================================

pub mod dashboard_viewmodel;
pub mod login_viewmodel;
pub mod status_viewmodel;

pub use dashboard_viewmodel::*;
pub use login_viewmodel::*;
pub use status_viewmodel::*;
