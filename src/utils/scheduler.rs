// ============================================================================
// SCHEDULER - Tarea periódica cancelable
// ============================================================================
// Envuelve gloo_timers::callback::Interval con un handle start/stop para que
// los timers (idle counter, auto-refresh) no queden huérfanos al reconfigurar
// ============================================================================

use gloo_timers::callback::Interval;
use std::cell::RefCell;
use std::rc::Rc;

/// Handle de una tarea periódica. `start` cancela cualquier intervalo previo;
/// soltar el handle (o `stop`) cancela el intervalo activo.
#[derive(Clone, Default)]
pub struct PeriodicTask {
    handle: Rc<RefCell<Option<Interval>>>,
}

impl PeriodicTask {
    pub fn new() -> Self {
        Self {
            handle: Rc::new(RefCell::new(None)),
        }
    }

    /// Arrancar (o re-arrancar) la tarea con el intervalo dado
    pub fn start<F>(&self, interval_ms: u32, callback: F)
    where
        F: FnMut() + 'static,
    {
        // Drop del intervalo anterior lo cancela
        *self.handle.borrow_mut() = Some(Interval::new(interval_ms, callback));
    }

    /// Cancelar la tarea si está activa
    pub fn stop(&self) {
        *self.handle.borrow_mut() = None;
    }

    pub fn is_active(&self) -> bool {
        self.handle.borrow().is_some()
    }
}
