//! Premature Closure Workflow
//!
//! The server computes every figure of a premature closure; the client only
//! forms the request and renders the breakdown. [`ClosureDraft`] enforces the
//! one rule the client owns: an FD can only be closed after a simulation has
//! been fetched for the date currently selected.

use chrono::NaiveDate;

use crate::api::{ApiResult, FdApi};
use crate::models::{ActionMessage, ClosureSimulation, FdAccount};

/// Reasons the close action is not available yet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClosureBlocked {
    /// The account is not Active
    NotActive,
    /// No simulation for the selected date
    NotSimulated,
}

impl std::fmt::Display for ClosureBlocked {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClosureBlocked::NotActive => f.write_str("Only Active FDs can be closed"),
            ClosureBlocked::NotSimulated => {
                f.write_str("Simulate the closure for the selected date first")
            }
        }
    }
}

/// Closure panel state for one FD
#[derive(Debug, Clone, PartialEq)]
pub struct ClosureDraft {
    closure_date: NaiveDate,
    simulation: Option<(NaiveDate, ClosureSimulation)>,
}

impl ClosureDraft {
    pub fn new(closure_date: NaiveDate) -> Self {
        Self {
            closure_date,
            simulation: None,
        }
    }

    pub fn closure_date(&self) -> NaiveDate {
        self.closure_date
    }

    /// Pick another date; a simulation for a different date is discarded
    pub fn set_date(&mut self, date: NaiveDate) {
        if date != self.closure_date {
            self.closure_date = date;
            self.simulation = None;
        }
    }

    /// Record a simulation result for `date`. Results for a date that is no
    /// longer selected are dropped; returns whether it was kept.
    pub fn record(&mut self, date: NaiveDate, simulation: ClosureSimulation) -> bool {
        if date == self.closure_date {
            self.simulation = Some((date, simulation));
            true
        } else {
            false
        }
    }

    /// Simulation for the currently selected date
    pub fn simulation(&self) -> Option<&ClosureSimulation> {
        self.simulation
            .as_ref()
            .filter(|(date, _)| *date == self.closure_date)
            .map(|(_, sim)| sim)
    }

    pub fn can_close(&self) -> bool {
        self.simulation().is_some()
    }

    /// Whether the close action can be offered for `fd`
    pub fn check(&self, fd: &FdAccount) -> Result<(), ClosureBlocked> {
        if !fd.can_simulate() {
            Err(ClosureBlocked::NotActive)
        } else if !self.can_close() {
            Err(ClosureBlocked::NotSimulated)
        } else {
            Ok(())
        }
    }

    /// Fetch a simulation for the selected date and keep it
    pub async fn simulate<A>(&mut self, api: &A, fd_no: &str) -> ApiResult<ClosureSimulation>
    where
        A: FdApi + ?Sized,
    {
        let date = self.closure_date;
        let simulation = api.simulate_closure(fd_no, date).await?;
        self.record(date, simulation.clone());
        Ok(simulation)
    }

    /// Submit the closure for the simulated date
    pub async fn close<A>(&self, api: &A, fd: &FdAccount) -> Result<ActionMessage, ClosureError>
    where
        A: FdApi + ?Sized,
    {
        self.check(fd).map_err(ClosureError::Blocked)?;
        let message = api.close_fd(&fd.fd_no, self.closure_date).await?;
        Ok(message)
    }
}

/// Failure of [`ClosureDraft::close`]
#[derive(Debug, thiserror::Error)]
pub enum ClosureError {
    #[error("{0}")]
    Blocked(ClosureBlocked),

    #[error(transparent)]
    Api(#[from] crate::api::ApiError),
}
