//! Dashboard aggregates

use serde::Serialize;

use crate::models::{FdAccount, FdStatus};

/// How many accounts the dashboard lists under "recent"
pub const RECENT_LIMIT: usize = 5;

/// Totals shown on the dashboard cards
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total: usize,
    pub active: usize,
    pub closed: usize,
    pub prematurely_closed: usize,
    /// Sum of principal across every account, whatever its status
    pub total_deposits: f64,
    /// First accounts in list order; the backend lists newest first
    pub recent: Vec<FdAccount>,
}

impl DashboardStats {
    pub fn from_accounts(accounts: &[FdAccount]) -> Self {
        let mut stats = DashboardStats {
            total: accounts.len(),
            recent: accounts.iter().take(RECENT_LIMIT).cloned().collect(),
            ..Default::default()
        };

        for fd in accounts {
            match fd.status {
                FdStatus::Active => stats.active += 1,
                FdStatus::Closed => stats.closed += 1,
                FdStatus::PrematurelyClosed => stats.prematurely_closed += 1,
            }
            stats.total_deposits += fd.deposit_amount;
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::register::fixtures;

    #[test]
    fn test_counts_by_status() {
        let stats = DashboardStats::from_accounts(&fixtures::register());
        assert_eq!(stats.total, 3);
        assert_eq!(stats.active, 1);
        assert_eq!(stats.closed, 1);
        assert_eq!(stats.prematurely_closed, 1);
        assert_eq!(stats.total_deposits, 175000.0);
        assert_eq!(stats.recent.len(), 3);
        assert_eq!(stats.recent[0].fd_no, "FD3");
    }

    #[test]
    fn test_recent_is_capped() {
        let accounts: Vec<FdAccount> = (0..8)
            .map(|i| {
                fixtures::account(
                    &format!("FD{}", i),
                    "Customer",
                    FdStatus::Active,
                    (2025, 1, 1),
                    (2026, 1, 1),
                    1000.0,
                )
            })
            .collect();

        let stats = DashboardStats::from_accounts(&accounts);
        assert_eq!(stats.total, 8);
        assert_eq!(stats.recent.len(), RECENT_LIMIT);
        assert_eq!(stats.recent[4].fd_no, "FD4");
    }

    #[test]
    fn test_empty() {
        assert_eq!(DashboardStats::from_accounts(&[]), DashboardStats::default());
    }
}
