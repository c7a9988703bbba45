//! Registration window evaluation
//!
//! Pure date arithmetic for the regular and on-the-spot registration
//! windows. Dates and times are stored naive and compared against the
//! caller-supplied instant in UTC.

use chrono::{DateTime, Duration, NaiveDateTime, NaiveTime, Utc};

use crate::models::event::{default_end_of_day, Event};

/// Availability of the regular registration path at an instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegularAvailability {
    Open,
    /// Explicitly closed for the current date via the daily closure map
    ClosedToday,
    NotStarted,
    Ended,
}

/// Evaluate the regular registration path
///
/// A daily closure for the current date suppresses the path outright,
/// regardless of the configured window. An event with no window configured
/// is open. A missing time half defaults to start-of-day for the start and
/// 23:59 for the end; both bounds are inclusive.
pub fn regular_availability(event: &Event, now: DateTime<Utc>) -> RegularAvailability {
    let now_naive = now.naive_utc();

    if event.is_closed_on(now_naive.date()) {
        return RegularAvailability::ClosedToday;
    }

    let start = event.registration_start_date.map(|date| {
        date.and_time(event.registration_start_time.unwrap_or(NaiveTime::MIN))
    });
    let end = event.registration_end_date.map(|date| {
        date.and_time(event.registration_end_time.unwrap_or_else(default_end_of_day))
    });

    match (start, end) {
        (None, None) => RegularAvailability::Open,
        (Some(start), _) if now_naive < start => RegularAvailability::NotStarted,
        (_, Some(end)) if now_naive > end => RegularAvailability::Ended,
        _ => RegularAvailability::Open,
    }
}

/// Instant the regular window opens, if a start is configured
pub fn regular_opens_at(event: &Event) -> Option<NaiveDateTime> {
    event
        .registration_start_date
        .map(|date| date.and_time(event.registration_start_time.unwrap_or(NaiveTime::MIN)))
}

/// Whether the on-the-spot path is open at an instant
///
/// On-the-spot registration only exists on the event's own calendar day
/// (the time half of `now` never affects the date match). If a
/// minute-of-day window is configured the current time must fall within
/// it, bounds inclusive; otherwise the whole day qualifies.
pub fn on_spot_available(event: &Event, now: DateTime<Utc>) -> bool {
    if !event.allow_on_spot_registration {
        return false;
    }
    if now.naive_utc().date() != event.date {
        return false;
    }
    match (event.on_spot_start_time, event.on_spot_end_time) {
        (Some(start), Some(end)) => {
            let time = now.naive_utc().time();
            time >= start && time <= end
        }
        (Some(start), None) => now.naive_utc().time() >= start,
        (None, Some(end)) => now.naive_utc().time() <= end,
        (None, None) => true,
    }
}

/// Human-readable time remaining, largest two non-zero units
///
/// "2 days, 3 hours"; "45 minutes" under an hour; "less than a minute"
/// below that.
pub fn format_time_remaining(remaining: Duration) -> String {
    let total_minutes = remaining.num_minutes();
    if total_minutes < 1 {
        return "less than a minute".to_string();
    }

    let days = total_minutes / (24 * 60);
    let hours = (total_minutes % (24 * 60)) / 60;
    let minutes = total_minutes % 60;

    let mut parts = Vec::new();
    for (amount, unit) in [(days, "day"), (hours, "hour"), (minutes, "minute")] {
        if amount > 0 {
            let plural = if amount == 1 { "" } else { "s" };
            parts.push(format!("{} {}{}", amount, unit, plural));
        }
        if parts.len() == 2 {
            break;
        }
    }

    parts.join(", ")
}
