use chrono::NaiveDate;

#[must_use]
pub fn format_day(value: NaiveDate) -> String {
    value.format("%Y-%m-%d").to_string()
}

/// Short weekday label used on the trend chart, e.g. `Tue`.
#[must_use]
pub fn format_weekday(value: NaiveDate) -> String {
    value.format("%a").to_string()
}
