use chrono::NaiveDate;

/// Thousands separated with dots: 1234567 -> "1.234.567"
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push('.');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

/// Day-first display form used in titles and labels: 2024-01-31 -> "31/01/2024"
pub fn format_date_dmy(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// ISO form used for date cells in view rows
pub fn format_date_iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1.000");
        assert_eq!(format_number(1234567), "1.234.567");
    }

    #[test]
    fn test_format_dates() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(format_date_dmy(date), "05/01/2024");
        assert_eq!(format_date_iso(date), "2024-01-05");
    }
}
