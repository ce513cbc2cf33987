pub mod gpn;
pub mod grn;
pub mod machine;
pub mod session;
pub mod status;

pub use gpn::*;
pub use grn::*;
pub use machine::*;
pub use session::{MachineInfo, Session};
pub use status::*;
