//! "Today" / "Tomorrow" departure labels.
//!
//! The comparison is by calendar day in the caller's timezone, not by
//! 24-hour windows: a departure at 23:50 tonight is "today" even when it is
//! minutes away, and a departure 25 hours ahead that crosses midnight once is
//! "tomorrow".  The presentation layer maps the tokens to localized strings.

use chrono::{DateTime, Days, NaiveDate, TimeZone};

/// Which label a departure timestamp should carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateLabel {
    Today,
    Tomorrow,
    /// Any other day; carries the local calendar date for formatting.
    Other(NaiveDate),
}

/// Classify `departure` relative to `now`.
///
/// Both timestamps must already be in the timezone the user perceives;
/// convert with [`DateTime::with_timezone`] before calling.
pub fn date_label<Tz: TimeZone>(departure: &DateTime<Tz>, now: &DateTime<Tz>) -> DateLabel {
    let departure_day = departure.date_naive();
    let today = now.date_naive();

    if departure_day == today {
        DateLabel::Today
    } else if Some(departure_day) == today.checked_add_days(Days::new(1)) {
        DateLabel::Tomorrow
    } else {
        DateLabel::Other(departure_day)
    }
}

impl DateLabel {
    /// Stable token for presentation layers that key translations off it.
    pub fn token(&self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Tomorrow => "tomorrow",
            Self::Other(_) => "date",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone as _};

    fn bishkek() -> FixedOffset {
        FixedOffset::east_opt(6 * 3600).unwrap()
    }

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<FixedOffset> {
        bishkek().with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn same_day_less_than_an_hour_ahead_is_today() {
        let now = at(2026, 8, 23, 9, 30);
        let departure = at(2026, 8, 23, 10, 0);
        assert_eq!(date_label(&departure, &now), DateLabel::Today);
    }

    #[test]
    fn late_tonight_is_today_not_tomorrow() {
        let now = at(2026, 8, 23, 8, 0);
        let departure = at(2026, 8, 23, 23, 50);
        assert_eq!(date_label(&departure, &now), DateLabel::Today);
    }

    #[test]
    fn twenty_five_hours_crossing_one_midnight_is_tomorrow() {
        let now = at(2026, 8, 23, 22, 0);
        let departure = at(2026, 8, 24, 23, 0);
        assert_eq!(date_label(&departure, &now), DateLabel::Tomorrow);
    }

    #[test]
    fn shortly_after_midnight_is_tomorrow_even_within_24h() {
        // 2 hours ahead but across midnight: calendar day wins.
        let now = at(2026, 8, 23, 23, 0);
        let departure = at(2026, 8, 24, 1, 0);
        assert_eq!(date_label(&departure, &now), DateLabel::Tomorrow);
    }

    #[test]
    fn two_days_out_is_a_plain_date() {
        let now = at(2026, 8, 23, 12, 0);
        let departure = at(2026, 8, 25, 12, 0);
        assert_eq!(
            date_label(&departure, &now),
            DateLabel::Other(departure.date_naive())
        );
    }

    #[test]
    fn past_days_are_plain_dates() {
        let now = at(2026, 8, 23, 12, 0);
        let departure = at(2026, 8, 22, 12, 0);
        assert!(matches!(date_label(&departure, &now), DateLabel::Other(_)));
    }

    #[test]
    fn tokens_are_stable() {
        assert_eq!(DateLabel::Today.token(), "today");
        assert_eq!(DateLabel::Tomorrow.token(), "tomorrow");
    }
}
