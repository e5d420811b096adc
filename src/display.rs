//! Display helpers shared by the front ends

use chrono::NaiveDate;

/// Rupee amount with Indian digit grouping: `₹1,00,000.00`
pub fn format_inr(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let rupees = (cents / 100).to_string();
    let paise = cents % 100;

    // Last three digits, then groups of two
    let grouped = if rupees.len() <= 3 {
        rupees
    } else {
        let (head, tail) = rupees.split_at(rupees.len() - 3);
        let mut groups: Vec<&str> = Vec::new();
        let mut end = head.len();
        while end > 0 {
            let start = end.saturating_sub(2);
            groups.push(&head[start..end]);
            end = start;
        }
        groups.reverse();
        format!("{},{}", groups.join(","), tail)
    };

    format!("{}₹{}.{:02}", if negative { "-" } else { "" }, grouped, paise)
}

/// Percentage with up to two decimals: `7.5%`
pub fn format_percent(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    format!("{}%", rounded)
}

/// Long date used on detail views: `01 Jan 2025`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d %b %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indian_grouping() {
        assert_eq!(format_inr(0.0), "₹0.00");
        assert_eq!(format_inr(999.5), "₹999.50");
        assert_eq!(format_inr(1000.0), "₹1,000.00");
        assert_eq!(format_inr(100000.0), "₹1,00,000.00");
        assert_eq!(format_inr(107500.0), "₹1,07,500.00");
        assert_eq!(format_inr(12345678.9), "₹1,23,45,678.90");
        assert_eq!(format_inr(-2500.0), "-₹2,500.00");
    }

    #[test]
    fn test_percent_and_date() {
        assert_eq!(format_percent(7.5), "7.5%");
        assert_eq!(format_percent(6.0), "6%");
        assert_eq!(
            format_date(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()),
            "01 Jan 2025"
        );
    }
}
