use chrono::{Datelike, Days, Month, NaiveDate};

/// Day-first layouts with a four-digit year
const DAY_FIRST_LONG: &[&str] = &["%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y"];
/// Day-first layouts with a two-digit year
const DAY_FIRST_SHORT: &[&str] = &["%d/%m/%y", "%d-%m-%y", "%d.%m.%y"];
/// Year-first layouts the spreadsheet emits for cells typed as dates
const YEAR_FIRST: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];
/// Years outside this window are typos, not dates
const YEAR_RANGE: std::ops::RangeInclusive<i32> = 1900..=2100;

/// Parse a spreadsheet cell as a day-first calendar date.
///
/// Total: anything that is not a valid date (empty, free text, 31/02, a year
/// that is not two or four digits or falls outside 1900..=2100) is `None`.
/// A trailing time part (`"15/03/2024 10:30:00"`, `"2024-03-15T10:30"`) is ignored.
pub fn parse_day_first(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let date_part = trimmed
        .split(|c: char| c.is_whitespace() || c == 'T')
        .next()
        .unwrap_or(trimmed);

    // %Y accepts any number of digits, so pick the layouts by segment width
    let mut segments = date_part.split(|c: char| c == '/' || c == '-' || c == '.');
    let first_width = segments.next().map(str::len).unwrap_or(0);
    let last_width = segments.last().map(str::len).unwrap_or(0);

    let layouts: &[&str] = match (first_width, last_width) {
        (4, _) => YEAR_FIRST,
        (_, 4) => DAY_FIRST_LONG,
        (_, 2) => DAY_FIRST_SHORT,
        _ => &[],
    };

    layouts
        .iter()
        .find_map(|layout| NaiveDate::parse_from_str(date_part, layout).ok())
        .filter(|date| YEAR_RANGE.contains(&date.year()))
}

/// Calendar fields derived from a parsed date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarFields {
    pub year: i32,
    /// 1-based
    pub month: u32,
    /// Canonical English month name
    pub month_name: &'static str,
    /// ISO-8601 week number
    pub iso_week: u32,
}

impl CalendarFields {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            month_name: month_name(date.month()),
            iso_week: date.iso_week().week(),
        }
    }
}

pub fn month_name(month: u32) -> &'static str {
    u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name())
        .unwrap_or("")
}

/// Monday..=Sunday window of the ISO week containing `date`
pub fn week_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let offset = u64::from(date.weekday().num_days_from_monday());
    let monday = date.checked_sub_days(Days::new(offset)).unwrap_or(date);
    let sunday = monday.checked_add_days(Days::new(6)).unwrap_or(monday);
    (monday, sunday)
}
