use time::{
    Date, OffsetDateTime, UtcOffset, format_description::BorrowedFormatItem,
    format_description::well_known::Rfc3339, macros::format_description,
};

lazy_static! {
    pub(crate) static ref LOCAL_OFFSET: UtcOffset = UtcOffset::current_local_offset()
        .unwrap_or_else(|_| {
            warn!("Could not determine the local UTC offset; falling back to UTC.");
            UtcOffset::UTC
        });
}

const ISO_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

#[inline]
pub(crate) fn now() -> OffsetDateTime {
    OffsetDateTime::now_utc().to_offset(*LOCAL_OFFSET)
}

#[inline]
pub fn today() -> Date {
    now().date()
}

/// Formats a date as an ISO calendar date (`YYYY-MM-DD`).
pub fn iso_date(date: Date) -> String {
    // Every representable date fits the description; `Display` prints the same shape.
    date.format(ISO_DATE).unwrap_or_else(|_| date.to_string())
}

/// The local calendar day of an instant, using the offset that was in force at that instant
/// rather than the one in force now.
pub(crate) fn local_day(instant: OffsetDateTime) -> Date {
    let offset = UtcOffset::local_offset_at(instant).unwrap_or_else(|_| {
        debug!("No local offset for {instant}; using the offset at start-up.");
        *LOCAL_OFFSET
    });
    instant.to_offset(offset).date()
}

/// Parses a calendar day. Plain ISO dates are taken as-is, while full RFC 3339 timestamps are
/// moved to the local calendar day they fell on, so `2026-05-31T22:00:00Z` is the 1st of June
/// in Berlin whatever the season is when it gets read.
pub fn parse_calendar_day<S: AsRef<str>>(value: S) -> Result<Date, time::error::Parse> {
    let value = value.as_ref().trim();
    match Date::parse(value, ISO_DATE) {
        Ok(date) => Ok(date),
        Err(date_error) => OffsetDateTime::parse(value, &Rfc3339)
            .map(local_day)
            .map_err(|_| date_error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use time::macros::date;

    #[test]
    fn formats_with_zero_padding() {
        assert_eq!(iso_date(date!(2026 - 01 - 05)), "2026-01-05");
        assert_eq!(iso_date(date!(2026 - 12 - 24)), "2026-12-24");
        assert_eq!(iso_date(date!(0999 - 03 - 01)), "0999-03-01");
    }

    #[test]
    fn formatted_dates_parse_back() {
        let day = date!(2028 - 02 - 29);
        assert_eq!(parse_calendar_day(iso_date(day)).unwrap(), day);
    }

    #[test]
    fn parses_plain_dates() {
        assert_eq!(
            parse_calendar_day("2026-03-09").unwrap(),
            date!(2026 - 03 - 09)
        );
        assert_eq!(
            parse_calendar_day(" 2026-03-09 ").unwrap(),
            date!(2026 - 03 - 09)
        );
    }

    #[test]
    fn midday_timestamps_keep_their_date() {
        // Noon UTC is the same calendar day for every offset within twelve hours.
        assert_eq!(
            parse_calendar_day("2026-06-01T12:00:00.000Z").unwrap(),
            date!(2026 - 06 - 01)
        );
        assert_eq!(
            parse_calendar_day("2026-01-15T12:00:00+00:00").unwrap(),
            date!(2026 - 01 - 15)
        );
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_calendar_day("next tuesday").is_err());
        assert!(parse_calendar_day("2026-13-01").is_err());
    }
}
