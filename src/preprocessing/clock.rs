//! Арифметика времени суток "HH:MM" <-> минуты от полуночи

use crate::error::{Error, Result};

pub const MINUTES_PER_DAY: i64 = 24 * 60;

/// "HH:MM" -> hours * 60 + minutes.
///
/// Диапазоны часов и минут намеренно не проверяются: "25:70" даёт 1570.
pub fn time_to_minutes(t: &str) -> Result<i64> {
    let invalid = |reason: &str| Error::InvalidTime {
        input: t.to_string(),
        reason: reason.to_string(),
    };

    let mut parts = t.split(':');
    let (hours, minutes) = match (parts.next(), parts.next(), parts.next()) {
        (Some(h), Some(m), None) => (h, m),
        _ => return Err(invalid("expected HH:MM")),
    };

    let hours: i64 = hours
        .trim()
        .parse()
        .map_err(|_| invalid("hours are not an integer"))?;
    let minutes: i64 = minutes
        .trim()
        .parse()
        .map_err(|_| invalid("minutes are not an integer"))?;

    hours
        .checked_mul(60)
        .and_then(|h| h.checked_add(minutes))
        .ok_or_else(|| invalid("time is out of range"))
}

/// Минуты -> "HH:MM", часы берутся по модулю 24
pub fn minutes_to_time(m: i64) -> String {
    let hours = m.div_euclid(60).rem_euclid(24);
    let mins = m.rem_euclid(60);
    format!("{:02}:{:02}", hours, mins)
}
