//! Routing and Access Control
//!
//! The application's routes and the gate each one sits behind. Both front
//! ends consult [`evaluate`] before rendering a route: the browser to decide
//! between a spinner, a redirect, the access-denied view or the page, the
//! terminal to decide whether a subcommand may run.

use std::fmt;

use crate::session::SessionState;

/// Access level a route requires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// Any logged-in user
    Authenticated,
    /// Logged-in supervisors only
    Supervisor,
}

/// Outcome of checking a session against a gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session restoration has not finished
    Loading,
    RedirectToLogin,
    /// Logged in without the required role; the route stays where it is
    AccessDenied,
    Allow,
}

pub fn evaluate(state: &SessionState, gate: Gate) -> GuardDecision {
    match state {
        SessionState::Restoring => GuardDecision::Loading,
        SessionState::Anonymous => GuardDecision::RedirectToLogin,
        SessionState::Authenticated(session) => match gate {
            Gate::Authenticated => GuardDecision::Allow,
            Gate::Supervisor if session.is_supervisor() => GuardDecision::Allow,
            Gate::Supervisor => GuardDecision::AccessDenied,
        },
    }
}

/// Message shown in place of a supervisor page
pub const ACCESS_DENIED_MESSAGE: &str = "You do not have permission to access this page.";

/// Application routes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
    CreateFd,
    Register,
    FdDetails(String),
    Config,
    Users,
}

impl Route {
    /// Resolve a path; `/` and anything unknown land on the dashboard
    pub fn parse(path: &str) -> Route {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            ["login"] => Route::Login,
            ["dashboard"] => Route::Dashboard,
            ["fd", "create"] => Route::CreateFd,
            ["fd", "register"] => Route::Register,
            ["fd", fd_no] => Route::FdDetails(
                urlencoding::decode(fd_no)
                    .map(|s| s.into_owned())
                    .unwrap_or_else(|_| fd_no.to_string()),
            ),
            ["config"] => Route::Config,
            ["users"] => Route::Users,
            _ => Route::Dashboard,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
            Route::CreateFd => "/fd/create".to_string(),
            Route::Register => "/fd/register".to_string(),
            Route::FdDetails(fd_no) => format!("/fd/{}", urlencoding::encode(fd_no)),
            Route::Config => "/config".to_string(),
            Route::Users => "/users".to_string(),
        }
    }

    /// Title shown in the top bar
    pub fn title(&self) -> &'static str {
        match self {
            Route::Login => "Login",
            Route::Dashboard => "Dashboard",
            Route::CreateFd => "Create Fixed Deposit",
            Route::Register => "FD Register",
            Route::FdDetails(_) => "FD Details",
            Route::Config => "System Configuration",
            Route::Users => "User Management",
        }
    }

    /// Gate in front of the route; the login page has none
    pub fn gate(&self) -> Option<Gate> {
        match self {
            Route::Login => None,
            Route::Config | Route::Users => Some(Gate::Supervisor),
            _ => Some(Gate::Authenticated),
        }
    }

    /// Decision for showing this route in the given session state
    pub fn check(&self, state: &SessionState) -> GuardDecision {
        match self.gate() {
            Some(gate) => evaluate(state, gate),
            None => GuardDecision::Allow,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
