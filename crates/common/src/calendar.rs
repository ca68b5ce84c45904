//! Calendar utilities: parsing, locale formatting and civil-day arithmetic.
//!
//! Instants are `DateTime<Tz>` for any chrono time zone; pass
//! `chrono::Local` values for local-time behavior. Calendar-only helpers
//! accept anything `Datelike`.

use std::fmt;
use std::str::FromStr;

use chrono::{
    DateTime, Datelike, Days, LocalResult, Months, NaiveDate, NaiveDateTime,
    NaiveTime, Offset, TimeDelta, TimeZone, Utc, Weekday,
};

use crate::error::CommonError;
use crate::ports::ClockPort;

const PT_BR_WEEKDAYS: [&str; 7] = [
    "domingo",
    "segunda-feira",
    "terça-feira",
    "quarta-feira",
    "quinta-feira",
    "sexta-feira",
    "sábado",
];

const EN_US_WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Locale used for date formatting and weekday names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Locale {
    /// Brazilian Portuguese: `dd/mm/yyyy`, `segunda-feira`
    #[default]
    PtBr,
    /// US English: `m/d/yyyy`, `Monday`
    EnUs,
}

impl Locale {
    /// Environment variable read by [`Locale::from_env`].
    pub const ENV_VAR: &'static str = "SNIPKIT_LOCALE";

    /// Reads the locale from `SNIPKIT_LOCALE`, falling back to the default
    /// when unset or unrecognized.
    pub fn from_env() -> Self {
        std::env::var(Self::ENV_VAR)
            .ok()
            .and_then(|tag| tag.parse().ok())
            .unwrap_or_default()
    }

    /// BCP 47 tag for this locale.
    pub fn tag(&self) -> &'static str {
        match self {
            Locale::PtBr => "pt-BR",
            Locale::EnUs => "en-US",
        }
    }

    fn weekday_names(&self) -> &'static [&'static str; 7] {
        match self {
            Locale::PtBr => &PT_BR_WEEKDAYS,
            Locale::EnUs => &EN_US_WEEKDAYS,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Locale {
    type Err = CommonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "pt-br" | "pt" => Ok(Locale::PtBr),
            "en-us" | "en" => Ok(Locale::EnUs),
            other => Err(CommonError::invalid_argument(format!(
                "unsupported locale: {}",
                other
            ))),
        }
    }
}

/// Parses an instant from text.
///
/// Accepts RFC 3339 (`2024-01-15T10:30:00-03:00`), a bare date
/// (`2024-01-15`, read as UTC midnight) and a date-time without offset
/// (`2024-01-15T10:30:00`, read as UTC).
///
/// # Errors
///
/// Returns [`CommonError::InvalidDate`] for anything else.
pub fn parse_instant(s: &str) -> Result<DateTime<Utc>, CommonError> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }
    Err(CommonError::invalid_date(s))
}

/// Short numeric date in the given locale.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use snipkit_common::{format_date, Locale};
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
/// assert_eq!(format_date(&date, Locale::PtBr), "05/03/2024");
/// assert_eq!(format_date(&date, Locale::EnUs), "3/5/2024");
/// ```
pub fn format_date<D: Datelike>(date: &D, locale: Locale) -> String {
    match locale {
        Locale::PtBr => format!("{:02}/{:02}/{}", date.day(), date.month(), date.year()),
        Locale::EnUs => format!("{}/{}/{}", date.month(), date.day(), date.year()),
    }
}

/// Whole days between two instants, ignoring order.
pub fn days_between<Tz1, Tz2>(a: &DateTime<Tz1>, b: &DateTime<Tz2>) -> i64
where
    Tz1: TimeZone,
    Tz2: TimeZone,
{
    (a.with_timezone(&Utc) - b.with_timezone(&Utc))
        .num_days()
        .abs()
}

/// [`days_between`] over two strings accepted by [`parse_instant`].
pub fn days_between_str(a: &str, b: &str) -> Result<i64, CommonError> {
    Ok(days_between(&parse_instant(a)?, &parse_instant(b)?))
}

/// True on Saturday and Sunday.
pub fn is_weekend<D: Datelike>(date: &D) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Long weekday name in the given locale.
pub fn weekday_name<D: Datelike>(date: &D, locale: Locale) -> &'static str {
    locale.weekday_names()[date.weekday().num_days_from_sunday() as usize]
}

/// Number of days in a month (`month` is 1-based).
///
/// # Errors
///
/// Returns [`CommonError::InvalidArgument`] for a month outside `1..=12`,
/// or [`CommonError::OutOfRange`] for a year chrono cannot represent.
pub fn days_in_month(month: u32, year: i32) -> Result<u32, CommonError> {
    if !(1..=12).contains(&month) {
        return Err(CommonError::invalid_argument(format!(
            "month must be in 1..=12, got {}",
            month
        )));
    }
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| CommonError::out_of_range(format!("{}-{:02}", year, month)))?;
    let next = first
        .checked_add_months(Months::new(1))
        .ok_or_else(|| CommonError::out_of_range(format!("{}-{:02}", year, month)))?;
    Ok((next - first).num_days() as u32)
}

/// Maps a wall-clock time back to an instant in `tz`.
///
/// Ambiguous times (DST fall-back) take the earlier instant. Times that do
/// not exist (DST spring-forward) are read with the offset in force before
/// the gap, which moves them forward by the gap length on the same date.
fn resolve_local<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => {
            // A day back is always before the gap
            let earlier = naive.checked_sub_signed(TimeDelta::days(1)).unwrap_or(naive);
            let before_gap = tz.offset_from_utc_datetime(&earlier).fix();
            tz.from_utc_datetime(&(naive - before_gap))
        }
    }
}

/// Adds (or subtracts) civil days, keeping the wall-clock time.
///
/// Crosses month and year boundaries; across a DST change the result keeps
/// the same local time rather than a fixed 24h step.
///
/// # Errors
///
/// Returns [`CommonError::OutOfRange`] if the result leaves chrono's range.
pub fn add_days<Tz: TimeZone>(dt: &DateTime<Tz>, days: i64) -> Result<DateTime<Tz>, CommonError> {
    let local = dt.naive_local();
    let step = Days::new(days.unsigned_abs());
    let shifted = if days >= 0 {
        local.checked_add_days(step)
    } else {
        local.checked_sub_days(step)
    }
    .ok_or_else(|| CommonError::out_of_range(format!("{} days from {}", days, local)))?;

    Ok(resolve_local(&dt.timezone(), shifted))
}

/// Same date at 00:00:00.000 in the value's own time zone.
pub fn start_of_day<Tz: TimeZone>(dt: &DateTime<Tz>) -> DateTime<Tz> {
    let midnight = dt.date_naive().and_time(NaiveTime::MIN);
    resolve_local(&dt.timezone(), midnight)
}

/// Same date at 23:59:59.999 in the value's own time zone.
pub fn end_of_day<Tz: TimeZone>(dt: &DateTime<Tz>) -> DateTime<Tz> {
    // NaiveTime arithmetic wraps around midnight
    let last_millisecond = NaiveTime::MIN - TimeDelta::milliseconds(1);
    let end = dt.date_naive().and_time(last_millisecond);
    resolve_local(&dt.timezone(), end)
}

/// Start of the clock's current day as seen in `tz`.
pub fn start_of_today<Tz: TimeZone>(clock: &dyn ClockPort, tz: &Tz) -> DateTime<Tz> {
    start_of_day(&clock.now().with_timezone(tz))
}
