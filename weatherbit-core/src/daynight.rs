//! Day/night icon correction.
//!
//! Weatherbit sometimes reports a night icon in the middle of the day (and
//! the other way around). We decide day or night ourselves from the
//! station's sunrise/sunset and rewrite the icon's `d`/`n` letters.
//!
//! The API labels its date/time fields as UTC even when the station has a
//! local timezone, but the sunrise/sunset digits behave like local clock
//! readings. This is inferred from observed responses, not documented. We
//! take the `HH:MM` digits at face value and stamp them onto *today* in the
//! reference timezone; the station's own timezone is ignored.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;

use crate::{
    error::{Error, Result},
    model::{CurrentObservation, PartOfDay},
};

/// The raw textual inputs the resolver needs from one observation.
#[derive(Debug, Clone, Copy)]
pub struct SolarClock<'a> {
    /// Cycle hour, `YYYY-MM-DD:HH` (`YYYY-MM-DD HH` is accepted too).
    pub observed: &'a str,
    /// Station timezone as reported. Logged only.
    pub timezone: &'a str,
    pub sunrise: &'a str,
    pub sunset: &'a str,
}

impl<'a> From<&'a CurrentObservation> for SolarClock<'a> {
    fn from(obs: &'a CurrentObservation) -> Self {
        Self {
            observed: &obs.datetime,
            timezone: obs.timezone.as_deref().unwrap_or_default(),
            sunrise: &obs.sunrise,
            sunset: &obs.sunset,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayNight {
    pub period: PartOfDay,
    pub icon: String,
    pub sunrise: DateTime<Tz>,
    pub sunset: DateTime<Tz>,
}

/// Resolve day/night at the current instant.
pub fn resolve_now(clock: SolarClock<'_>, raw_icon: &str, reference: Tz) -> Result<DayNight> {
    resolve(clock, raw_icon, reference, Utc::now())
}

/// Resolve day/night at `now`.
///
/// Daytime is the open interval `(sunrise, sunset)`; an instant equal to
/// either bound is night.
pub fn resolve(
    clock: SolarClock<'_>,
    raw_icon: &str,
    reference: Tz,
    now: DateTime<Utc>,
) -> Result<DayNight> {
    let date = parse_cycle_date(clock.observed)?;
    let sunrise_clock = stamp(date, clock.sunrise)?;
    let sunset_clock = stamp(date, clock.sunset)?;

    tracing::trace!(
        station_tz = clock.timezone,
        reference = %reference,
        sunrise = %sunrise_clock,
        sunset = %sunset_clock,
        "resolving part of day"
    );

    let now = now.with_timezone(&reference);
    let sunrise = at_clock(&now, &sunrise_clock)?;
    let sunset = at_clock(&now, &sunset_clock)?;

    let period = if now > sunrise && now < sunset { PartOfDay::Day } else { PartOfDay::Night };

    Ok(DayNight { period, icon: rewrite_icon(raw_icon, period), sunrise, sunset })
}

/// Replace every opposite-period letter, case-insensitively, with the
/// lowercase letter for `period`.
pub fn rewrite_icon(icon: &str, period: PartOfDay) -> String {
    let opposite = match period {
        PartOfDay::Day => 'n',
        PartOfDay::Night => 'd',
    };
    let target = period.as_char();

    icon.chars()
        .map(|c| if c.to_ascii_lowercase() == opposite { target } else { c })
        .collect()
}

fn parse_cycle_date(raw: &str) -> Result<NaiveDate> {
    let invalid = || Error::parse(format!("invalid observation datetime '{raw}'"));

    let date_part = raw.get(..10).ok_or_else(invalid)?;
    let date = NaiveDate::parse_from_str(date_part, "%Y-%m-%d").map_err(|_| invalid())?;

    let rest = &raw[10..];
    let hour = rest.strip_prefix(':').or_else(|| rest.strip_prefix(' ')).ok_or_else(invalid)?;
    match hour.parse::<u32>() {
        Ok(h) if h < 24 && hour.len() <= 2 => Ok(date),
        _ => Err(invalid()),
    }
}

fn stamp(date: NaiveDate, clock: &str) -> Result<NaiveDateTime> {
    let time = NaiveTime::parse_from_str(clock.trim(), "%H:%M")
        .map_err(|e| Error::parse(format!("invalid clock time '{clock}': {e}")))?;
    Ok(date.and_time(time))
}

/// Today's date in the reference tz at the clock's `HH:MM`, keeping now's
/// seconds. A repeated fall-back hour resolves to its earlier instant; a
/// spring-forward gap is a parse error.
fn at_clock(now: &DateTime<Tz>, clock: &NaiveDateTime) -> Result<DateTime<Tz>> {
    now.date_naive()
        .and_hms_nano_opt(clock.hour(), clock.minute(), now.second(), now.nanosecond())
        .and_then(|local| now.timezone().from_local_datetime(&local).earliest())
        .ok_or_else(|| {
            Error::parse(format!(
                "{:02}:{:02} does not exist on {} in {}",
                clock.hour(),
                clock.minute(),
                now.date_naive(),
                now.timezone()
            ))
        })
}
