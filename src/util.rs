use time::{
    format_description::well_known::{Iso8601, Rfc3339},
    macros::format_description,
    Date, OffsetDateTime, PrimitiveDateTime,
};

/// Accepts ISO-8601 calendar dates and timestamps, keeping only the date.
///
/// Reduced forms (`YYYY-MM`, `YYYY`) mean the first day of that month or year; a
/// timestamp's date is taken as written, whatever its offset.
pub fn parse_iso_date(value: &str) -> Option<Date> {
    let value = value.trim();
    if let Ok(date) = Date::parse(value, &format_description!("[year]-[month]-[day]")) {
        return Some(date);
    }
    if let Ok(date) = Date::parse(value, &format_description!("[year][month][day]")) {
        return Some(date);
    }

    let padded = match value.len() {
        7 => format!("{}-01", value),
        4 => format!("{}-01-01", value),
        _ => String::new(),
    };
    if let Ok(date) = Date::parse(&padded, &format_description!("[year]-[month]-[day]")) {
        return Some(date);
    }

    if let Ok(timestamp) = PrimitiveDateTime::parse(
        value,
        &format_description!("[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]"),
    ) {
        return Some(timestamp.date());
    }
    if let Ok(timestamp) = PrimitiveDateTime::parse(
        value,
        &format_description!("[year]-[month]-[day]T[hour]:[minute]"),
    ) {
        return Some(timestamp.date());
    }
    OffsetDateTime::parse(value, &Rfc3339)
        .or_else(|_| OffsetDateTime::parse(value, &Iso8601::DEFAULT))
        .ok()
        .map(|timestamp| timestamp.date())
}

pub fn format_date(date: &Date) -> String {
    date.format(&format_description!(
        "[month repr:short] [day padding:none], [year]"
    ))
    .unwrap_or_default()
}

// value for <input type="date">
pub fn format_date_input(date: &Date) -> String {
    date.format(&format_description!("[year]-[month]-[day]"))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;

    #[test]
    fn parses_plain_dates_and_timestamps() {
        assert_eq!(parse_iso_date("1920-01-05"), Some(date!(1920 - 01 - 05)));
        assert_eq!(
            parse_iso_date("1920-01-05T10:30:00Z"),
            Some(date!(1920 - 01 - 05))
        );
        assert_eq!(parse_iso_date(" 1920-01-05 "), Some(date!(1920 - 01 - 05)));
    }

    #[test]
    fn parses_local_timestamps() {
        let day = Some(date!(1920 - 01 - 05));
        assert_eq!(parse_iso_date("1920-01-05T10:30:00"), day);
        assert_eq!(parse_iso_date("1920-01-05T10:30:00.000"), day);
        assert_eq!(parse_iso_date("1920-01-05T10:30"), day);
        assert_eq!(parse_iso_date("1920-01-05T23:30:00+02:00"), day);
    }

    #[test]
    fn parses_basic_and_reduced_dates() {
        assert_eq!(parse_iso_date("19200105"), Some(date!(1920 - 01 - 05)));
        assert_eq!(parse_iso_date("1920-01"), Some(date!(1920 - 01 - 01)));
        assert_eq!(parse_iso_date("1920"), Some(date!(1920 - 01 - 01)));
    }

    #[test]
    fn rejects_garbage_and_impossible_dates() {
        assert_eq!(parse_iso_date("yesterday"), None);
        assert_eq!(parse_iso_date("1920-02-30"), None);
        assert_eq!(parse_iso_date("05/01/1920"), None);
        assert_eq!(parse_iso_date("1920-13"), None);
        assert_eq!(parse_iso_date("1920-01-05T25:00:00"), None);
        assert_eq!(parse_iso_date(""), None);
    }

    #[test]
    fn formats_for_display_and_inputs() {
        let day = date!(1920 - 01 - 05);
        assert_eq!(format_date(&day), "Jan 5, 1920");
        assert_eq!(format_date_input(&day), "1920-01-05");
    }
}
