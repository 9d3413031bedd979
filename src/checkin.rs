//! Daily check-in ledger and streak transitions.
//!
//! Every operation here is pure: callers pass the current `AppData` and the
//! caller's calendar date, and get back the next state to commit.

use crate::entitlement::Entitlement;
use crate::errors::CheckInError;
use crate::models::{AppData, CheckInRecord, DayCheckIn, StreakState};
use chrono::NaiveDate;
use serde::Serialize;
use std::str::FromStr;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

const SEGMENT_SEPARATOR: &str = "\n\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckInKind {
    Morning,
    Evening,
}

impl CheckInKind {
    fn tag(self) -> &'static str {
        match self {
            CheckInKind::Morning => "[Morning]",
            CheckInKind::Evening => "[Evening]",
        }
    }

    fn is_done(self, day: &DayCheckIn) -> bool {
        match self {
            CheckInKind::Morning => day.morning,
            CheckInKind::Evening => day.evening,
        }
    }

    fn mark(self, day: &mut DayCheckIn) {
        match self {
            CheckInKind::Morning => day.morning = true,
            CheckInKind::Evening => day.evening = true,
        }
    }
}

impl FromStr for CheckInKind {
    type Err = CheckInError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "morning" => Ok(CheckInKind::Morning),
            "evening" => Ok(CheckInKind::Evening),
            other => Err(CheckInError::InvalidArgument(format!(
                "kind must be 'morning' or 'evening', got '{other}'"
            ))),
        }
    }
}

pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn parse_date_key(value: &str) -> Result<NaiveDate, CheckInError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| CheckInError::InvalidArgument(format!("date must be YYYY-MM-DD, got '{value}'")))
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckInOutcome {
    pub data: AppData,
    pub record: CheckInRecord,
    /// False when the requested half of the day was already complete.
    pub changed: bool,
}

/// Records a morning or evening check-in for `today`.
///
/// Completing a half that is already done is a no-op, and so is any check-in
/// dated before the last one. The returned `data` is the full next state;
/// nothing is mutated in place.
pub fn record_check_in(
    data: &AppData,
    kind: CheckInKind,
    reflection: &str,
    today: NaiveDate,
    entitlement: Entitlement,
) -> Result<CheckInOutcome, CheckInError> {
    entitlement.allows(kind)?;

    let key = date_key(today);
    let existing = data.days.get(&key);
    // Days before the last check-in are closed; only the current day moves.
    let closed = days_since_last(&data.streak, today).is_some_and(|diff| diff < 0);
    if closed || existing.is_some_and(|day| kind.is_done(day)) {
        let record = match existing {
            Some(day) => CheckInRecord::from_day(&key, day),
            None => CheckInRecord::from_day(&key, &DayCheckIn::default()),
        };
        return Ok(CheckInOutcome {
            data: data.clone(),
            record,
            changed: false,
        });
    }

    let mut next = data.clone();
    let day = next.days.entry(key.clone()).or_default();
    kind.mark(day);
    day.reflection = append_reflection(&day.reflection, kind, reflection);
    let record = CheckInRecord::from_day(&key, day);

    next.streak = next_streak(&data.streak, today);

    Ok(CheckInOutcome {
        data: next,
        record,
        changed: true,
    })
}

fn append_reflection(existing: &str, kind: CheckInKind, text: &str) -> String {
    let text = text.trim();
    if text.is_empty() {
        return existing.to_string();
    }
    let segment = format!("{} {text}", kind.tag());
    if existing.is_empty() {
        segment
    } else {
        format!("{existing}{SEGMENT_SEPARATOR}{segment}")
    }
}

fn days_since_last(state: &StreakState, today: NaiveDate) -> Option<i64> {
    if state.last_check_in_date.is_empty() {
        return None;
    }
    // An unreadable stored date is treated like no previous check-in.
    parse_date_key(&state.last_check_in_date)
        .ok()
        .map(|last| (today - last).num_days())
}

/// Streak transition for a check-in made on `today`.
pub fn next_streak(state: &StreakState, today: NaiveDate) -> StreakState {
    match days_since_last(state, today) {
        None => StreakState {
            streak: 1,
            last_check_in_date: date_key(today),
        },
        // Same day, or a date before the last check-in: keep both fields.
        Some(diff) if diff <= 0 => state.clone(),
        Some(1) => StreakState {
            streak: state.streak.saturating_add(1),
            last_check_in_date: date_key(today),
        },
        Some(_) => StreakState {
            streak: 1,
            last_check_in_date: date_key(today),
        },
    }
}

/// Streak as it should be shown on `today`, before any check-in is made.
/// A gap of more than one day means the streak is already broken.
pub fn refresh_streak(state: &StreakState, today: NaiveDate) -> u32 {
    match days_since_last(state, today) {
        Some(diff) if diff > 1 => 0,
        _ => state.streak,
    }
}

/// All records, most recent first.
pub fn history(data: &AppData) -> Vec<CheckInRecord> {
    data.days
        .iter()
        .rev()
        .map(|(date, day)| CheckInRecord::from_day(date, day))
        .collect()
}

/// A stored reflection split back into its tagged halves. Untagged text
/// from older records lands in `legacy`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReflectionSegments {
    pub morning: Option<String>,
    pub evening: Option<String>,
    pub legacy: Option<String>,
}

impl ReflectionSegments {
    pub fn parse(reflection: &str) -> Self {
        let parts = split_segments(reflection);
        let find = |kind: CheckInKind| {
            parts
                .iter()
                .find_map(|part| part.strip_prefix(kind.tag()))
                .map(|text| text.trim_start().to_string())
        };
        let morning = find(CheckInKind::Morning);
        let evening = find(CheckInKind::Evening);
        let legacy = (morning.is_none() && evening.is_none() && !reflection.is_empty())
            .then(|| reflection.to_string());
        Self {
            morning,
            evening,
            legacy,
        }
    }
}

/// Splits only at separators followed by a tag, so blank lines inside a
/// reflection stay with their segment.
fn split_segments(reflection: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut search = 0;
    while let Some(pos) = reflection[search..].find(SEGMENT_SEPARATOR) {
        let at = search + pos;
        let next = at + SEGMENT_SEPARATOR.len();
        let rest = &reflection[next..];
        if rest.starts_with(CheckInKind::Morning.tag()) || rest.starts_with(CheckInKind::Evening.tag()) {
            parts.push(&reflection[start..at]);
            start = next;
        }
        search = next;
    }
    parts.push(&reflection[start..]);
    parts
}
