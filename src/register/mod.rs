//! FD Register
//!
//! Client-side view over an already-fetched FD list: filtering, the
//! empty/no-match classification shown by the register, and the dashboard
//! aggregates. Everything here is pure and synchronous; callers recompute
//! whenever the source list or the filter changes.

pub mod filter;
pub mod stats;

pub use filter::FdFilter;
pub use stats::DashboardStats;

use crate::models::FdAccount;

/// Shown when the backend holds no FDs at all
pub const EMPTY_MESSAGE: &str = "No FDs created yet";

/// Shown when FDs exist but none pass the filter
pub const NO_MATCHES_MESSAGE: &str = "No FDs match your filters";

/// What the register should display for a source list and filter
#[derive(Debug, Clone, PartialEq)]
pub enum RegisterView<'a> {
    Empty,
    NoMatches,
    Rows(Vec<&'a FdAccount>),
}

impl<'a> RegisterView<'a> {
    pub fn build(accounts: &'a [FdAccount], filter: &FdFilter) -> Self {
        if accounts.is_empty() {
            return RegisterView::Empty;
        }
        let rows = filter.apply(accounts);
        if rows.is_empty() {
            RegisterView::NoMatches
        } else {
            RegisterView::Rows(rows)
        }
    }

    /// Placeholder text, if there are no rows to show
    pub fn message(&self) -> Option<&'static str> {
        match self {
            RegisterView::Empty => Some(EMPTY_MESSAGE),
            RegisterView::NoMatches => Some(NO_MATCHES_MESSAGE),
            RegisterView::Rows(_) => None,
        }
    }

    pub fn rows(&self) -> &[&'a FdAccount] {
        match self {
            RegisterView::Rows(rows) => rows,
            _ => &[],
        }
    }
}
