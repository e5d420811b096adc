//! UI Components
//!
//! Reusable Leptos components shared by the pages.

pub mod fd_table;
pub mod field;
pub mod loading;
pub mod nav;
pub mod status_badge;
pub mod toast;

pub use fd_table::FdTable;
pub use field::{input_field, select_field};
pub use loading::{InlineLoading, LoadFailed, Loading};
pub use nav::Nav;
pub use status_badge::StatusBadge;
pub use toast::Toast;
