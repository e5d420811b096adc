//! State Management
//!
//! Toast messages, the shared session, and per-view fetch state.

pub mod global;
pub mod load;
pub mod session;

pub use global::{provide_global_state, GlobalState};
pub use load::Load;
pub use session::{page_scope, provide_auth, AuthContext};
