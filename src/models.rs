use crate::breathing::BreathPhase;
use crate::quotes::Quote;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One day's check-in state, keyed by date in [`AppData::days`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DayCheckIn {
    pub morning: bool,
    pub evening: bool,
    pub reflection: String,
}

impl DayCheckIn {
    pub fn is_completed(&self) -> bool {
        self.morning || self.evening
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StreakState {
    pub streak: u32,
    /// Date key of the most recent check-in, empty before the first one.
    pub last_check_in_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppData {
    pub days: BTreeMap<String, DayCheckIn>,
    pub streak: StreakState,
    pub favorites: Vec<Quote>,
    pub playlists: Vec<Playlist>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub quotes: Vec<Quote>,
    /// Milliseconds since the Unix epoch.
    pub created_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckInRecord {
    pub date: String,
    pub morning: bool,
    pub evening: bool,
    pub reflection: String,
}

impl CheckInRecord {
    pub fn from_day(date: &str, day: &DayCheckIn) -> Self {
        Self {
            date: date.to_string(),
            morning: day.morning,
            evening: day.evening,
            reflection: day.reflection.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CheckInRequest {
    pub kind: String,
    #[serde(default)]
    pub reflection: String,
    pub date: Option<String>,
    pub hour: Option<u32>,
    #[serde(default)]
    pub premium: bool,
}

#[derive(Debug, Deserialize)]
pub struct CheckInForm {
    #[serde(default)]
    pub reflection: String,
    /// Present when the premium checkbox is ticked.
    pub premium: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CheckInResponse {
    pub record: CheckInRecord,
    pub streak: u32,
    pub last_check_in_date: String,
    pub changed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct TodayQuery {
    pub date: Option<String>,
    pub hour: Option<u32>,
    #[serde(default)]
    pub premium: bool,
}

#[derive(Debug, Serialize)]
pub struct TodayResponse {
    pub date: String,
    pub record: Option<CheckInRecord>,
    pub streak: u32,
    pub can_morning: bool,
    pub can_evening: bool,
    pub prompt: String,
    pub quote: Option<Quote>,
}

#[derive(Debug, Deserialize, Default)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub date: String,
    pub morning: bool,
    pub evening: bool,
    pub reflection: String,
    pub morning_reflection: Option<String>,
    pub evening_reflection: Option<String>,
    pub legacy_reflection: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub streak: u32,
    pub total: usize,
    pub entries: Vec<HistoryEntry>,
}

#[derive(Debug, Deserialize, Default)]
pub struct StatsQuery {
    pub days: Option<u32>,
    pub date: Option<String>,
    #[serde(default)]
    pub premium: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DayPoint {
    pub date: String,
    pub completed: u8,
    pub missed: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CompletionStats {
    pub window_days: u32,
    pub completed_days: u32,
    pub missed_days: u32,
    pub completion_rate_percent: u32,
    pub total_check_ins: usize,
    pub days: Vec<DayPoint>,
}

#[derive(Debug, Deserialize, Default)]
pub struct QuoteQuery {
    pub tier: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct BreathingQuery {
    pub elapsed_ms: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct BreathingResponse {
    pub cycle_seconds: u64,
    pub phases: Vec<BreathPhaseSpan>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<BreathPhase>,
}

#[derive(Debug, Serialize)]
pub struct BreathPhaseSpan {
    pub phase: BreathPhase,
    pub seconds: u64,
    pub cue: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct FavoriteRequest {
    pub quote_id: u32,
    #[serde(default)]
    pub premium: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FavoritesResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorited: Option<bool>,
    pub favorites: Vec<Quote>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PlaylistRequest {
    pub name: String,
    pub quote_ids: Vec<u32>,
    #[serde(default)]
    pub premium: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PlaylistResponse {
    pub playlist: Playlist,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PlaylistsResponse {
    pub playlists: Vec<Playlist>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct PlayQuery {
    /// Index of the quote currently shown; absent to start from the top.
    pub after: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PlayResponse {
    pub playlist_id: String,
    pub index: usize,
    pub total: usize,
    pub quote: Quote,
}
