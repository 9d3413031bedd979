use crate::checkin::date_key;
use crate::models::{AppData, CompletionStats, DayPoint};
use chrono::{Duration, Local, NaiveDate};

pub const DEFAULT_WINDOW_DAYS: u32 = 14;

pub fn build_stats(data: &AppData, window_days: u32, is_premium: bool) -> CompletionStats {
    build_stats_at(Local::now().date_naive(), data, window_days, is_premium)
}

/// Completion over the `window_days` calendar days ending on `today`.
///
/// Today counts as completed once checked in but is never counted as
/// missed, so the rate is taken over the prior `window_days - 1` days. With
/// today done on top of a full window the rate exceeds 100.
pub fn build_stats_at(
    today: NaiveDate,
    data: &AppData,
    window_days: u32,
    is_premium: bool,
) -> CompletionStats {
    let mut days = Vec::with_capacity(window_days as usize);
    let mut completed_days = 0u32;
    let mut missed_days = 0u32;

    for offset in (0..window_days).rev() {
        let date = today - Duration::days(i64::from(offset));
        let entry = data.days.get(&date_key(date));
        let is_today = offset == 0;

        let completed = entry.map_or(0, |day| {
            u8::from(day.morning) + u8::from(day.evening && is_premium)
        });
        if entry.is_some_and(|day| day.is_completed()) {
            completed_days += 1;
        }
        let missed = !is_today && entry.is_none();
        if missed {
            missed_days += 1;
        }

        days.push(DayPoint {
            date: date.to_string(),
            completed,
            missed,
        });
    }

    let denom = window_days.saturating_sub(1).max(1);
    let completion_rate_percent = if window_days == 0 {
        0
    } else {
        (f64::from(completed_days) / f64::from(denom) * 100.0).round() as u32
    };

    CompletionStats {
        window_days,
        completed_days,
        missed_days,
        completion_rate_percent,
        total_check_ins: data.days.len(),
        days,
    }
}
