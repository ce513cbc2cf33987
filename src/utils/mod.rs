// Utils compartidos

pub mod format;
pub mod scheduler;
pub mod storage;

pub use format::*;
pub use scheduler::PeriodicTask;
