//! Output rendering for the terminal front end
//!
//! Every renderer returns the text to print so it can be checked in tests.

use anyhow::Result;
use serde::Serialize;

use super::OutputFormat;
use crate::display::{format_date, format_inr, format_percent};
use crate::models::{ClosureSimulation, FdAccount, SystemConfig, User, UserProfile};
use crate::preview::Preview;
use crate::register::{DashboardStats, RegisterView};

/// One register row, flattened for CSV
#[derive(Serialize)]
struct RegisterRecord<'a> {
    fd_no: &'a str,
    customer_name: &'a str,
    deposit_amount: f64,
    interest_rate: f64,
    tenure: String,
    start_date: String,
    maturity_date: String,
    maturity_amount: f64,
    status: &'static str,
}

impl<'a> From<&'a FdAccount> for RegisterRecord<'a> {
    fn from(fd: &'a FdAccount) -> Self {
        Self {
            fd_no: &fd.fd_no,
            customer_name: &fd.customer_name,
            deposit_amount: fd.deposit_amount,
            interest_rate: fd.interest_rate,
            tenure: fd.tenure_label(),
            start_date: fd.start_date.to_string(),
            maturity_date: fd.maturity_date.to_string(),
            maturity_amount: fd.maturity_amount,
            status: fd.status.as_str(),
        }
    }
}

fn to_csv<T: Serialize>(records: impl IntoIterator<Item = T>) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for record in records {
        writer.serialize(record)?;
    }
    let bytes = writer.into_inner().map_err(|e| anyhow::anyhow!(e.to_string()))?;
    Ok(String::from_utf8(bytes)?)
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn register_table(rows: &[&FdAccount]) -> String {
    let mut out = format!(
        "{:<22} {:<24} {:>16} {:>7} {:<11} {:<11} {:<11} {:>16} {}\n",
        "FD No", "Customer", "Deposit", "Rate", "Tenure", "Start", "Maturity", "Maturity Amt", "Status"
    );
    out.push_str(&"-".repeat(136));
    out.push('\n');
    for fd in rows {
        out.push_str(&format!(
            "{:<22} {:<24} {:>16} {:>7} {:<11} {:<11} {:<11} {:>16} {}\n",
            fd.fd_no,
            truncate(&fd.customer_name, 24),
            format_inr(fd.deposit_amount),
            format_percent(fd.interest_rate),
            fd.tenure_label(),
            fd.start_date,
            fd.maturity_date,
            format_inr(fd.maturity_amount),
            fd.status.label(),
        ));
    }
    out
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut cut: String = s.chars().take(width.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}

/// The register, or its placeholder message
pub fn register(view: &RegisterView<'_>, format: OutputFormat) -> Result<String> {
    let rows = view.rows();
    match format {
        OutputFormat::Json => to_json(rows),
        OutputFormat::Csv => to_csv(rows.iter().map(|fd| RegisterRecord::from(*fd))),
        OutputFormat::Table => Ok(match view.message() {
            Some(message) => format!("{}\n", message),
            None => format!("{}\n{} FD(s)\n", register_table(rows), rows.len()),
        }),
    }
}

pub fn fd_details(fd: &FdAccount, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(fd),
        OutputFormat::Csv => to_csv([RegisterRecord::from(fd)]),
        OutputFormat::Table => {
            let mut lines = vec![
                ("FD Number", fd.fd_no.clone()),
                ("Status", fd.status.label().to_string()),
                ("Customer", fd.customer_name.clone()),
                ("ID", format!("{} {}", fd.id_type, fd.id_number)),
                ("Deposit", format_inr(fd.deposit_amount)),
                ("Interest Rate", format_percent(fd.interest_rate)),
                ("Tenure", fd.tenure_label()),
                ("Start Date", format_date(fd.start_date)),
                ("Maturity Date", format_date(fd.maturity_date)),
                ("Maturity Amount", format_inr(fd.maturity_amount)),
            ];
            if let Some(interest_type) = fd.interest_type {
                lines.push(("Interest Type", interest_type.label().to_string()));
            }
            if let Some(created_by) = &fd.created_by {
                lines.push(("Created By", created_by.clone()));
            }
            if let Some(closed_at) = &fd.closed_at {
                lines.push(("Closed On", closed_at.clone()));
            }
            Ok(key_values(&lines))
        }
    }
}

pub fn simulation(sim: &ClosureSimulation, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(sim),
        OutputFormat::Csv => to_csv([sim]),
        OutputFormat::Table => {
            let mut lines = vec![
                ("Principal", format_inr(sim.principal)),
                ("Days Held", sim.days_held.to_string()),
                ("Accrued Interest", format_inr(sim.accrued_interest)),
                (
                    "Penalty",
                    format!(
                        "{} ({} of interest)",
                        format_inr(sim.penalty_amount),
                        format_percent(sim.penalty_percent)
                    ),
                ),
                ("Net Interest", format_inr(sim.net_interest)),
                ("Net Payout", format_inr(sim.net_payout)),
            ];
            if let Some(date) = sim.simulated_closure_date {
                lines.insert(0, ("Closure Date", format_date(date)));
            }
            let mut out = key_values(&lines);
            if let Some(note) = &sim.note {
                out.push_str(&format!("\n{}\n", note));
            }
            Ok(out)
        }
    }
}

pub fn preview(preview: &Preview, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(preview),
        OutputFormat::Csv => to_csv([preview]),
        OutputFormat::Table => Ok(key_values(&[
            ("Maturity Amount", format_inr(preview.maturity_amount)),
            ("Interest Earned", format_inr(preview.interest_earned)),
            ("Maturity Date", format_date(preview.maturity_date)),
            ("Interest Type", preview.interest_type.label().to_string()),
        ])),
    }
}

pub fn dashboard(stats: &DashboardStats, user: Option<&UserProfile>, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(stats),
        OutputFormat::Csv => to_csv(stats.recent.iter().map(RegisterRecord::from)),
        OutputFormat::Table => {
            let mut out = String::new();
            if let Some(user) = user {
                out.push_str(&format!("Welcome back, {} ({})\n\n", user.username, user.role.label()));
            }
            out.push_str(&key_values(&[
                ("Total FDs", stats.total.to_string()),
                ("Active FDs", stats.active.to_string()),
                ("Closed", stats.closed.to_string()),
                ("Prematurely Closed", stats.prematurely_closed.to_string()),
                ("Total Deposits", format_inr(stats.total_deposits)),
            ]));
            out.push_str("\nRecent FDs\n");
            if stats.recent.is_empty() {
                out.push_str(crate::register::EMPTY_MESSAGE);
                out.push('\n');
            } else {
                let rows: Vec<&FdAccount> = stats.recent.iter().collect();
                out.push_str(&register_table(&rows));
            }
            Ok(out)
        }
    }
}

pub fn system_config(config: &SystemConfig, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(config),
        OutputFormat::Csv => to_csv([config]),
        OutputFormat::Table => Ok(key_values(&[
            ("Interest Type", config.interest_type.label().to_string()),
            ("Penalty", format_percent(config.penalty_percent)),
            ("Default Rate (12m)", format_percent(config.default_rate_12m)),
            ("Default Rate (24m)", format_percent(config.default_rate_24m)),
            ("Default Rate (36m)", format_percent(config.default_rate_36m)),
        ])),
    }
}

pub fn users(users: &[User], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(users),
        OutputFormat::Csv => to_csv(users),
        OutputFormat::Table => {
            let mut out = format!("{:<6} {:<24} {:<12} {}\n", "ID", "Username", "Role", "Created");
            out.push_str(&"-".repeat(64));
            out.push('\n');
            for user in users {
                out.push_str(&format!(
                    "{:<6} {:<24} {:<12} {}\n",
                    user.id,
                    user.username,
                    user.role.label(),
                    user.created_at.as_deref().unwrap_or("-"),
                ));
            }
            Ok(out)
        }
    }
}

pub fn profile(profile: &UserProfile, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(profile),
        OutputFormat::Csv => to_csv([profile]),
        OutputFormat::Table => Ok(format!("{} ({})\n", profile.username, profile.role.label())),
    }
}

fn key_values(lines: &[(&str, String)]) -> String {
    let width = lines.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    lines
        .iter()
        .map(|(k, v)| format!("{:<width$}  {}\n", k, v, width = width))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::register::{fixtures, FdFilter};

    #[test]
    fn test_register_placeholders() {
        let view = RegisterView::build(&[], &FdFilter::default());
        assert_eq!(register(&view, OutputFormat::Table).unwrap(), "No FDs created yet\n");

        let accounts = fixtures::register();
        let filter = FdFilter {
            customer_name: Some("zzz".to_string()),
            ..Default::default()
        };
        let view = RegisterView::build(&accounts, &filter);
        assert_eq!(
            register(&view, OutputFormat::Table).unwrap(),
            "No FDs match your filters\n"
        );
        assert_eq!(register(&view, OutputFormat::Json).unwrap(), "[]");
    }

    #[test]
    fn test_register_table() {
        let accounts = fixtures::register();
        let view = RegisterView::build(&accounts, &FdFilter::default());
        let out = register(&view, OutputFormat::Table).unwrap();

        assert!(out.starts_with("FD No"));
        assert!(out.contains("Ramesh Kumar"));
        assert!(out.contains("₹1,00,000.00"));
        assert!(out.contains("Prematurely Closed"));
        assert!(out.ends_with("3 FD(s)\n"));
    }

    #[test]
    fn test_register_csv() {
        let accounts = fixtures::register();
        let view = RegisterView::build(&accounts, &FdFilter::default());
        let out = register(&view, OutputFormat::Csv).unwrap();
        let mut lines = out.lines();

        assert_eq!(
            lines.next(),
            Some("fd_no,customer_name,deposit_amount,interest_rate,tenure,start_date,maturity_date,maturity_amount,status")
        );
        assert!(lines.next().unwrap().starts_with("FD3,Ramesh Kumar,100000.0,7.0,12 months,2025-03-01,2026-03-01,"));
        assert_eq!(out.lines().count(), 4);
    }

    #[test]
    fn test_key_values_align() {
        let out = key_values(&[("A", "1".to_string()), ("Longer", "2".to_string())]);
        assert_eq!(out, "A       1\nLonger  2\n");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long customer name", 10), "a very lo…");
    }
}
