// Copyright 2025 the Ridgeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Calendar-aware time tick generation and formatting.
//!
//! Time is modeled as integer **epoch milliseconds** in UTC. This module provides:
//! - calendar intervals (hours, days, Sunday-aligned weeks, months, years),
//! - interval selection for an approximate tick count, and
//! - multi-scale tick labels (`2019`, `April`, `Apr 07`, `Wed 03`, `03 PM`).

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

/// Milliseconds per hour.
pub const MILLIS_PER_HOUR: i64 = 3_600_000;
/// Milliseconds per day.
pub const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;

const MAX_TICKS: usize = 10_000;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const WEEKDAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// A UTC calendar interval used to place ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeInterval {
    /// Every `n` hours, aligned to hours of the day divisible by `n`.
    Hour(u32),
    /// Every `n` days, aligned to days of the month where `(day - 1) % n == 0`.
    Day(u32),
    /// Every Sunday.
    Week,
    /// Every `n` months, aligned to months where `(month - 1) % n == 0`.
    Month(u32),
    /// Every `n` years, aligned to years divisible by `n`.
    Year(u32),
}

const CANDIDATES: [TimeInterval; 10] = [
    TimeInterval::Hour(1),
    TimeInterval::Hour(3),
    TimeInterval::Hour(6),
    TimeInterval::Hour(12),
    TimeInterval::Day(1),
    TimeInterval::Day(2),
    TimeInterval::Week,
    TimeInterval::Month(1),
    TimeInterval::Month(3),
    TimeInterval::Year(1),
];

impl TimeInterval {
    /// Approximate length in milliseconds, used for interval selection.
    pub fn approx_millis(self) -> f64 {
        let day = MILLIS_PER_DAY as f64;
        match self {
            Self::Hour(n) => f64::from(n) * MILLIS_PER_HOUR as f64,
            Self::Day(n) => f64::from(n) * day,
            Self::Week => 7.0 * day,
            Self::Month(n) => f64::from(n) * 30.0 * day,
            Self::Year(n) => f64::from(n) * 365.0 * day,
        }
    }

    /// Picks an interval yielding roughly `count` ticks over `[start, stop]`.
    pub fn for_span(start: i64, stop: i64, count: usize) -> Self {
        let span = stop.abs_diff(start) as f64;
        let target = span / count.max(1) as f64;
        let i = CANDIDATES.partition_point(|c| c.approx_millis() <= target);
        if i == 0 {
            return CANDIDATES[0];
        }
        if i == CANDIDATES.len() {
            let years = target / Self::Year(1).approx_millis();
            return Self::Year(nice_year_step(years));
        }
        let lo = CANDIDATES[i - 1];
        let hi = CANDIDATES[i];
        if target / lo.approx_millis() < hi.approx_millis() / target {
            lo
        } else {
            hi
        }
    }

    /// Returns the latest aligned instant at or before `t`, or `None` when it falls
    /// outside the `i64` millisecond range.
    pub fn floor(self, t: i64) -> Option<i64> {
        match self {
            Self::Hour(n) => {
                let hour = t.div_euclid(MILLIS_PER_HOUR);
                let of_day = hour.rem_euclid(24);
                (hour - of_day % i64::from(n.max(1))).checked_mul(MILLIS_PER_HOUR)
            }
            Self::Day(n) => {
                let day = t.div_euclid(MILLIS_PER_DAY);
                let (_, _, d) = civil_from_days(day);
                day_start(day - i64::from((d - 1) % n.max(1)))
            }
            Self::Week => {
                let day = t.div_euclid(MILLIS_PER_DAY);
                day_start(day - weekday(day))
            }
            Self::Month(n) => {
                let (y, m, _) = civil_from_days(t.div_euclid(MILLIS_PER_DAY));
                let m0 = (m - 1) - (m - 1) % n.max(1);
                day_start(days_from_civil(y, m0 + 1, 1))
            }
            Self::Year(n) => {
                let (y, _, _) = civil_from_days(t.div_euclid(MILLIS_PER_DAY));
                let y = y - y.rem_euclid(i64::from(n.max(1)));
                day_start(days_from_civil(y, 1, 1))
            }
        }
    }

    /// Returns the next aligned instant after the aligned instant `t`, or `None` once
    /// the calendar runs past the `i64` millisecond range.
    pub fn next(self, t: i64) -> Option<i64> {
        match self {
            Self::Hour(n) => {
                let n = i64::from(n.max(1));
                let mut hour = t.div_euclid(MILLIS_PER_HOUR) + 1;
                while hour.rem_euclid(24) % n != 0 {
                    hour += 1;
                }
                hour.checked_mul(MILLIS_PER_HOUR)
            }
            Self::Day(n) => {
                let mut day = t.div_euclid(MILLIS_PER_DAY) + 1;
                while (civil_from_days(day).2 - 1) % n.max(1) != 0 {
                    day += 1;
                }
                day_start(day)
            }
            Self::Week => t.checked_add(7 * MILLIS_PER_DAY),
            Self::Month(n) => {
                let (mut y, mut m, _) = civil_from_days(t.div_euclid(MILLIS_PER_DAY));
                loop {
                    if m == 12 {
                        y += 1;
                        m = 1;
                    } else {
                        m += 1;
                    }
                    if (m - 1) % n.max(1) == 0 {
                        break;
                    }
                }
                day_start(days_from_civil(y, m, 1))
            }
            Self::Year(n) => {
                let (y, _, _) = civil_from_days(t.div_euclid(MILLIS_PER_DAY));
                day_start(days_from_civil(y + i64::from(n.max(1)), 1, 1))
            }
        }
    }

    /// Returns every aligned instant in `[min, max]` that fits in an `i64`.
    pub fn ticks(self, min: i64, max: i64) -> Vec<i64> {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        let mut out = Vec::new();
        let mut t = match self.floor(min) {
            Some(t) if t < min => self.next(t),
            start => start,
        };
        while let Some(tick) = t {
            if tick > max || out.len() >= MAX_TICKS {
                break;
            }
            out.push(tick);
            t = self.next(tick);
        }
        out
    }
}

fn day_start(day: i64) -> Option<i64> {
    day.checked_mul(MILLIS_PER_DAY)
}

fn nice_year_step(years: f64) -> u32 {
    let mut base = 1_u32;
    loop {
        for m in [1, 2, 5] {
            let step = m * base;
            if f64::from(step) >= years {
                return step;
            }
        }
        match base.checked_mul(10) {
            Some(b) => base = b,
            None => return u32::MAX,
        }
    }
}

/// Returns roughly `count` calendar-aligned ticks over a millisecond domain.
pub fn nice_time_ticks_millis(min: f64, max: f64, count: usize) -> Vec<f64> {
    if count == 0 || !min.is_finite() || !max.is_finite() {
        return Vec::new();
    }
    if min == max {
        return alloc::vec![min];
    }
    let lo = to_millis(min.min(max));
    let hi = to_millis(min.max(max));
    TimeInterval::for_span(lo, hi, count)
        .ticks(lo, hi)
        .into_iter()
        .map(|t| t as f64)
        .collect()
}

fn to_millis(v: f64) -> i64 {
    let v = v.clamp(i64::MIN as f64, i64::MAX as f64);
    #[allow(clippy::cast_possible_truncation, reason = "clamped to the i64 range")]
    {
        v as i64
    }
}

/// Formats a tick at the coarsest calendar unit it is aligned to.
pub fn format_time_millis(t: f64) -> String {
    if !t.is_finite() {
        return alloc::format!("{t}");
    }
    let t = to_millis(t);
    let day = t.div_euclid(MILLIS_PER_DAY);
    let (y, m, d) = civil_from_days(day);
    let ms_of_day = t.rem_euclid(MILLIS_PER_DAY);
    let hour = ms_of_day / MILLIS_PER_HOUR;
    let hour12 = if hour % 12 == 0 { 12 } else { hour % 12 };

    if ms_of_day % MILLIS_PER_HOUR != 0 {
        let minute = (ms_of_day % MILLIS_PER_HOUR) / 60_000;
        return alloc::format!("{hour12:02}:{minute:02}");
    }
    if ms_of_day != 0 {
        let period = if hour < 12 { "AM" } else { "PM" };
        return alloc::format!("{hour12:02} {period}");
    }
    let month = MONTH_NAMES[(m - 1) as usize];
    if d != 1 {
        let wd = weekday(day);
        if wd != 0 {
            return alloc::format!("{} {d:02}", WEEKDAY_NAMES[wd as usize]);
        }
        return alloc::format!("{} {d:02}", &month[..3]);
    }
    if m != 1 {
        return String::from(month);
    }
    alloc::format!("{y}")
}

/// Day of week for a day count since the epoch (`0` = Sunday).
fn weekday(day: i64) -> i64 {
    (day + 4).rem_euclid(7)
}

/// Converts days since 1970-01-01 into a proleptic Gregorian `(year, month, day)`.
pub(crate) fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = (if z >= 0 { z } else { z - 146_096 }) / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    let y = yoe + era * 400 + i64::from(m <= 2);
    #[allow(clippy::cast_possible_truncation, reason = "month and day are small")]
    {
        (y, m as u32, d as u32)
    }
}

/// Converts a proleptic Gregorian date into days since 1970-01-01.
pub(crate) fn days_from_civil(year: i64, month: u32, day: u32) -> i64 {
    let y = if month <= 2 { year - 1 } else { year };
    let era = (if y >= 0 { y } else { y - 399 }) / 400;
    let yoe = y - era * 400;
    let m = i64::from(month);
    let mp = if m > 2 { m - 3 } else { m + 9 };
    let doy = (153 * mp + 2) / 5 + i64::from(day) - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}
