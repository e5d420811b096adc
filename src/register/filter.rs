//! Register filter
//!
//! Each criterion is independent; an absent criterion matches everything.
//! Date bounds are inclusive.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{FdAccount, FdStatus};

/// Filter criteria for the FD register
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FdFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<FdStatus>,
    /// Case-insensitive substring of the customer name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date_from: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date_to: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maturity_date_from: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maturity_date_to: Option<NaiveDate>,
}

impl FdFilter {
    /// Name criterion, ignoring an empty search box
    fn name_needle(&self) -> Option<String> {
        self.customer_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .map(str::to_lowercase)
    }

    /// True when no criterion is set
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.name_needle().is_none()
            && self.start_date_from.is_none()
            && self.start_date_to.is_none()
            && self.maturity_date_from.is_none()
            && self.maturity_date_to.is_none()
    }

    pub fn matches(&self, fd: &FdAccount) -> bool {
        self.matches_with(fd, self.name_needle().as_deref())
    }

    fn matches_with(&self, fd: &FdAccount, needle: Option<&str>) -> bool {
        if let Some(status) = self.status {
            if fd.status != status {
                return false;
            }
        }
        if let Some(needle) = needle {
            if !fd.customer_name.to_lowercase().contains(needle) {
                return false;
            }
        }
        within(fd.start_date, self.start_date_from, self.start_date_to)
            && within(fd.maturity_date, self.maturity_date_from, self.maturity_date_to)
    }

    /// Accounts passing every criterion, in source order
    pub fn apply<'a>(&self, accounts: &'a [FdAccount]) -> Vec<&'a FdAccount> {
        let needle = self.name_needle();
        accounts
            .iter()
            .filter(|fd| self.matches_with(fd, needle.as_deref()))
            .collect()
    }

    /// Query parameters understood by `GET /fd`
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(status) = self.status {
            pairs.push(("status", status.as_str().to_string()));
        }
        if let Some(name) = self.customer_name.as_deref().filter(|n| !n.is_empty()) {
            pairs.push(("customer_name", name.to_string()));
        }
        let dates = [
            ("start_date_from", self.start_date_from),
            ("start_date_to", self.start_date_to),
            ("maturity_date_from", self.maturity_date_from),
            ("maturity_date_to", self.maturity_date_to),
        ];
        for (key, date) in dates {
            if let Some(date) = date {
                pairs.push((key, date.format("%Y-%m-%d").to_string()));
            }
        }
        pairs
    }

    /// URL-encoded form of [`to_query_pairs`](Self::to_query_pairs)
    pub fn to_query_string(&self) -> String {
        self.to_query_pairs()
            .into_iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(&value)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

fn within(date: NaiveDate, from: Option<NaiveDate>, to: Option<NaiveDate>) -> bool {
    from.map_or(true, |from| date >= from) && to.map_or(true, |to| date <= to)
}
