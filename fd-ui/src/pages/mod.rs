//! Pages
//!
//! Top-level page components for each route.

pub mod create_fd;
pub mod dashboard;
pub mod fd_details;
pub mod login;
pub mod not_found;
pub mod register;
pub mod system_config;
pub mod users;

pub use create_fd::CreateFd;
pub use dashboard::Dashboard;
pub use fd_details::FdDetails;
pub use login::Login;
pub use not_found::NotFound;
pub use register::Register;
pub use system_config::SystemConfigPage;
pub use users::Users;

/// Today in the browser's time zone
pub(crate) fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}
