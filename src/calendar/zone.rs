use chrono::{DateTime, Offset, TimeZone as _, Utc};
use chrono_tz::Tz;
use thiserror::Error;
use time::{
    format_description::FormatItem, macros::format_description, Date, OffsetDateTime, UtcOffset,
};

static OFFSET_FMT: &[FormatItem<'_>] =
    format_description!("[offset_hour sign:mandatory]:[offset_minute]");

/// The time zone in which "today" is determined
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct TimeZone {
    name: String,
    rules: ZoneRules,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum ZoneRules {
    Fixed(UtcOffset),
    /// A zone from the tz database, whose offset depends on the instant
    Named(Tz),
}

impl TimeZone {
    pub(crate) fn utc() -> TimeZone {
        TimeZone {
            name: String::from("UTC"),
            rules: ZoneRules::Fixed(UtcOffset::UTC),
        }
    }

    pub(crate) fn local(offset: UtcOffset) -> TimeZone {
        TimeZone {
            name: String::from("local"),
            rules: ZoneRules::Fixed(offset),
        }
    }

    /// Parses a zone identifier: `local` (resolved to `local_offset`), `UTC`,
    /// a fixed offset of the form `+HH:MM`, or a tz database name such as
    /// `America/New_York`.
    pub(crate) fn parse(s: &str, local_offset: UtcOffset) -> Result<TimeZone, TimeZoneError> {
        if s.eq_ignore_ascii_case("local") {
            Ok(TimeZone::local(local_offset))
        } else if ["utc", "gmt", "z"].iter().any(|n| s.eq_ignore_ascii_case(n)) {
            Ok(TimeZone::utc())
        } else if let Ok(offset) = UtcOffset::parse(s, OFFSET_FMT) {
            Ok(TimeZone {
                name: s.to_owned(),
                rules: ZoneRules::Fixed(offset),
            })
        } else {
            match s.parse::<Tz>() {
                Ok(tz) => Ok(TimeZone {
                    name: tz.name().to_owned(),
                    rules: ZoneRules::Named(tz),
                }),
                Err(_) => Err(TimeZoneError(s.to_owned())),
            }
        }
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    /// The zone's offset from UTC at the instant `now`
    fn offset_at(&self, now: OffsetDateTime) -> UtcOffset {
        match self.rules {
            ZoneRules::Fixed(offset) => offset,
            ZoneRules::Named(tz) => DateTime::<Utc>::from_timestamp(now.unix_timestamp(), 0)
                .map(|utc| {
                    tz.offset_from_utc_datetime(&utc.naive_utc())
                        .fix()
                        .local_minus_utc()
                })
                .and_then(|secs| UtcOffset::from_whole_seconds(secs).ok())
                .unwrap_or(UtcOffset::UTC),
        }
    }

    pub(crate) fn today(&self, now: OffsetDateTime) -> Date {
        now.to_offset(self.offset_at(now)).date()
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("unrecognized time zone {0:?}; expected \"local\", \"UTC\", an offset like +05:30, or a name like Europe/Paris")]
pub(crate) struct TimeZoneError(String);
