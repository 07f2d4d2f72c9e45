use time::{Date, Weekday, Weekday::*};

/// Julian day number of Thursday, 1 January 1970
pub(crate) const EPOCH_JULIAN_DAY: i64 = 2_440_588;

/// Julian day number of Monday, 29 December 1969.  Week 0 is counted from
/// here.
pub(crate) const MONDAY_BEFORE_JULIAN_EPOCH: i64 = EPOCH_JULIAN_DAY - 3;

pub(crate) const DAYS_IN_WEEK: u16 = 7;

pub(crate) const WEEKDAYS: [Weekday; 7] = [
    Sunday, Monday, Tuesday, Wednesday, Thursday, Friday, Saturday,
];

pub(crate) trait WeekdayExt {
    /// Number of days since Sunday, 0 through 6
    fn index0(&self) -> u16;

    /// Column of this weekday in a week that starts on `start`
    fn offset_from(&self, start: Weekday) -> u16;
}

impl WeekdayExt for Weekday {
    fn index0(&self) -> u16 {
        self.number_days_from_sunday().into()
    }

    fn offset_from(&self, start: Weekday) -> u16 {
        (self.index0() + DAYS_IN_WEEK - start.index0()) % DAYS_IN_WEEK
    }
}

/// Converts a day-of-week number (Sunday = 0) to a `Weekday`.  Anything past
/// Saturday yields `None`.
pub(crate) fn weekday_from_index0(i: u8) -> Option<Weekday> {
    WEEKDAYS.get(usize::from(i)).copied()
}

pub(crate) fn julian_monday(week: u32) -> i64 {
    MONDAY_BEFORE_JULIAN_EPOCH + i64::from(week) * i64::from(DAYS_IN_WEEK)
}

/// Returns the Julian day number of the first cell of row `week` when weeks
/// start on `week_start`.
///
/// With a Sunday start, week 0 runs from 28 December 1969 through
/// 3 January 1970; with a Saturday start, from 27 December 1969 through
/// 2 January 1970.
pub(crate) fn first_julian_day(week: u32, week_start: Weekday) -> i64 {
    julian_monday(week) - i64::from(Monday.offset_from(week_start))
}

/// Returns the row whose seven days include `julian_day`, or `None` if the
/// day falls before row 0.
pub(crate) fn week_of_julian_day(julian_day: i64, week_start: Weekday) -> Option<u32> {
    let days = julian_day.checked_sub(first_julian_day(0, week_start))?;
    if days < 0 {
        return None;
    }
    u32::try_from(days / i64::from(DAYS_IN_WEEK)).ok()
}

pub(crate) fn julian_day(date: Date) -> i64 {
    date.to_julian_day().into()
}

pub(crate) fn date_from_julian_day(julian_day: i64) -> Option<Date> {
    let jd = i32::try_from(julian_day).ok()?;
    Date::from_julian_day(jd).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_epoch_constants() {
        assert_eq!(julian_day(date!(1970 - 01 - 01)), EPOCH_JULIAN_DAY);
        assert_eq!(
            date_from_julian_day(MONDAY_BEFORE_JULIAN_EPOCH),
            Some(date!(1969 - 12 - 29))
        );
        assert_eq!(
            date_from_julian_day(MONDAY_BEFORE_JULIAN_EPOCH).map(Date::weekday),
            Some(Monday)
        );
    }

    #[test]
    fn test_offset_from() {
        assert_eq!(Monday.offset_from(Sunday), 1);
        assert_eq!(Sunday.offset_from(Monday), 6);
        assert_eq!(Saturday.offset_from(Saturday), 0);
        assert_eq!(Friday.offset_from(Saturday), 6);
    }

    #[test]
    fn test_weekday_from_index0() {
        assert_eq!(weekday_from_index0(0), Some(Sunday));
        assert_eq!(weekday_from_index0(6), Some(Saturday));
        assert_eq!(weekday_from_index0(7), None);
    }

    #[test]
    fn test_first_day_of_week_zero() {
        let first = |start| date_from_julian_day(first_julian_day(0, start));
        assert_eq!(first(Sunday), Some(date!(1969 - 12 - 28)));
        assert_eq!(first(Monday), Some(date!(1969 - 12 - 29)));
        assert_eq!(first(Saturday), Some(date!(1969 - 12 - 27)));
        assert_eq!(first(Friday), Some(date!(1969 - 12 - 26)));
    }

    #[test]
    fn test_first_day_starts_on_week_start() {
        for start in WEEKDAYS {
            for week in [0, 1, 52, 2800, 3496] {
                let first = date_from_julian_day(first_julian_day(week, start));
                assert_eq!(first.map(Date::weekday), Some(start), "week {week}");
            }
        }
    }

    #[test]
    fn test_first_day_steps_by_seven() {
        for start in WEEKDAYS {
            let mut prev = first_julian_day(0, start);
            for week in 1..600 {
                let jd = first_julian_day(week, start);
                assert_eq!(jd - prev, 7);
                prev = jd;
            }
        }
    }

    #[test]
    fn test_week_of_julian_day() {
        for start in WEEKDAYS {
            for week in [0, 1, 52, 2800, 3496] {
                let first = first_julian_day(week, start);
                assert_eq!(week_of_julian_day(first, start), Some(week));
                assert_eq!(week_of_julian_day(first + 6, start), Some(week));
                assert_eq!(week_of_julian_day(first + 7, start), Some(week + 1));
            }
            assert_eq!(
                week_of_julian_day(first_julian_day(0, start) - 1, start),
                None
            );
        }
    }

    #[test]
    fn test_week_of_known_date() {
        // 22 January 2025 is a Wednesday, 2873 weeks after the Sunday
        // 28 December 1969.
        let jd = julian_day(date!(2025 - 01 - 22));
        assert_eq!(week_of_julian_day(jd, Sunday), Some(2873));
        assert_eq!(
            date_from_julian_day(first_julian_day(2873, Sunday)),
            Some(date!(2025 - 01 - 19))
        );
    }
}
