use crate::breathing::{PATTERN, cycle_length, phase_at};
use crate::checkin::{
    CheckInKind, ReflectionSegments, date_key, history, parse_date_key, record_check_in,
    refresh_streak,
};
use crate::entitlement::Entitlement;
use crate::errors::{AppError, CheckInError};
use crate::library::{create_playlist, delete_playlist, next_index, remove_favorite, toggle_favorite};
use crate::models::{
    AppData, BreathPhaseSpan, BreathingQuery, BreathingResponse, CheckInForm, CheckInRecord,
    CheckInRequest, CheckInResponse, CompletionStats, FavoriteRequest, FavoritesResponse,
    HistoryEntry, HistoryQuery, HistoryResponse, PlayQuery, PlayResponse, PlaylistRequest,
    PlaylistResponse, PlaylistsResponse, QuoteQuery, StatsQuery, TodayQuery, TodayResponse,
};
use crate::prompts::pick_prompt;
use crate::quotes::{Quote, TierFilter, pick_daily_quote, pick_quote};
use crate::state::AppState;
use crate::stats::{DEFAULT_WINDOW_DAYS, build_stats, build_stats_at};
use crate::storage::persist_data;
use crate::ui::render_index;
use axum::{
    extract::{Path, Query, State},
    response::{Html, Redirect},
    Form, Json,
};
use chrono::{Local, NaiveDate, Timelike, Utc};
use std::time::Duration;
use tracing::{info, warn};

const MAX_WINDOW_DAYS: u32 = 366;

pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<TodayQuery>,
) -> Result<Html<String>, AppError> {
    let (today, hour) = resolve_clock(query.date.as_deref(), query.hour)?;
    let entitlement = Entitlement::new(query.premium, hour);
    let data = state.data.lock().await;
    let day = data.days.get(&date_key(today));
    let streak = refresh_streak(&data.streak, today);
    Ok(Html(render_index(
        &date_key(today),
        streak,
        day,
        entitlement.availability(day),
    )))
}

pub async fn get_today(
    State(state): State<AppState>,
    Query(query): Query<TodayQuery>,
) -> Result<Json<TodayResponse>, AppError> {
    let (today, hour) = resolve_clock(query.date.as_deref(), query.hour)?;
    let entitlement = Entitlement::new(query.premium, hour);
    let key = date_key(today);
    let data = state.data.lock().await;
    let day = data.days.get(&key);
    let availability = entitlement.availability(day);

    let (prompt, quote) = {
        let mut rng = rand::thread_rng();
        let prompt = pick_prompt(entitlement, &mut rng);
        let quote = pick_daily_quote(&state.quotes, entitlement.tier(), &mut rng);
        (prompt.to_string(), quote.cloned())
    };

    Ok(Json(TodayResponse {
        record: day.map(|day| CheckInRecord::from_day(&key, day)),
        streak: refresh_streak(&data.streak, today),
        can_morning: availability.can_morning,
        can_evening: availability.can_evening,
        prompt,
        quote,
        date: key,
    }))
}

pub async fn checkin(
    State(state): State<AppState>,
    Json(payload): Json<CheckInRequest>,
) -> Result<Json<CheckInResponse>, AppError> {
    let kind: CheckInKind = payload.kind.parse()?;
    let (today, hour) = resolve_clock(payload.date.as_deref(), payload.hour)?;
    let entitlement = Entitlement::new(payload.premium, hour);

    let response = apply_check_in(&state, kind, &payload.reflection, today, entitlement).await?;
    Ok(Json(response))
}

pub async fn checkin_morning_form(
    State(state): State<AppState>,
    Form(form): Form<CheckInForm>,
) -> Result<Redirect, AppError> {
    submit_form(&state, CheckInKind::Morning, form).await
}

pub async fn checkin_evening_form(
    State(state): State<AppState>,
    Form(form): Form<CheckInForm>,
) -> Result<Redirect, AppError> {
    submit_form(&state, CheckInKind::Evening, form).await
}

async fn submit_form(state: &AppState, kind: CheckInKind, form: CheckInForm) -> Result<Redirect, AppError> {
    let (today, hour) = resolve_clock(None, None)?;
    let premium = form.premium.is_some();
    apply_check_in(state, kind, &form.reflection, today, Entitlement::new(premium, hour)).await?;
    Ok(Redirect::to(if premium { "/?premium=true" } else { "/" }))
}

async fn apply_check_in(
    state: &AppState,
    kind: CheckInKind,
    reflection: &str,
    today: NaiveDate,
    entitlement: Entitlement,
) -> Result<CheckInResponse, AppError> {
    let mut data = state.data.lock().await;
    let outcome = record_check_in(&data, kind, reflection, today, entitlement)?;

    let mut notice = None;
    if outcome.changed {
        notice = commit(state, &mut data, outcome.data).await;
        info!(
            date = %outcome.record.date,
            kind = ?kind,
            streak = data.streak.streak,
            "check-in recorded"
        );
    }

    Ok(CheckInResponse {
        record: outcome.record,
        streak: data.streak.streak,
        last_check_in_date: data.streak.last_check_in_date.clone(),
        changed: outcome.changed,
        notice,
    })
}

/// Persists `next` and swaps it into the shared state. A failed write keeps
/// the in-memory change and returns a notice for the caller.
async fn commit(state: &AppState, data: &mut AppData, next: AppData) -> Option<String> {
    let notice = match persist_data(&state.data_path, &next).await {
        Ok(()) => None,
        Err(err) => {
            warn!("change kept in memory only: {err}");
            Some("saved for this session only; storage is unavailable".to_string())
        }
    };
    *data = next;
    notice
}

pub async fn get_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Json<HistoryResponse> {
    let data = state.data.lock().await;
    let entries = history(&data)
        .into_iter()
        .take(query.limit.unwrap_or(usize::MAX))
        .map(|record| {
            let segments = ReflectionSegments::parse(&record.reflection);
            HistoryEntry {
                date: record.date,
                morning: record.morning,
                evening: record.evening,
                reflection: record.reflection,
                morning_reflection: segments.morning,
                evening_reflection: segments.evening,
                legacy_reflection: segments.legacy,
            }
        })
        .collect();

    Json(HistoryResponse {
        streak: data.streak.streak,
        total: data.days.len(),
        entries,
    })
}

pub async fn get_stats(
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<CompletionStats>, AppError> {
    let window_days = query.days.unwrap_or(DEFAULT_WINDOW_DAYS);
    if window_days > MAX_WINDOW_DAYS {
        return Err(AppError::bad_request(format!(
            "days must be at most {MAX_WINDOW_DAYS}"
        )));
    }
    let today = query.date.as_deref().map(parse_date_key).transpose()?;

    let data = state.data.lock().await;
    let stats = match today {
        Some(today) => build_stats_at(today, &data, window_days, query.premium),
        None => build_stats(&data, window_days, query.premium),
    };
    Ok(Json(stats))
}

pub async fn get_quote(
    State(state): State<AppState>,
    Query(query): Query<QuoteQuery>,
) -> Result<Json<Quote>, AppError> {
    let tier = match query.tier.as_deref() {
        Some(value) => value.parse::<TierFilter>().map_err(AppError::bad_request)?,
        None => TierFilter::Free,
    };
    let quote = pick_quote(
        &state.quotes,
        tier,
        query.category.as_deref(),
        &mut rand::thread_rng(),
    )
    .cloned()
    .ok_or_else(|| AppError::not_found("no quotes match the requested tier and category"))?;
    Ok(Json(quote))
}

pub async fn get_breathing(Query(query): Query<BreathingQuery>) -> Json<BreathingResponse> {
    Json(BreathingResponse {
        current: query
            .elapsed_ms
            .map(|elapsed| phase_at(Duration::from_millis(elapsed))),
        cycle_seconds: cycle_length().as_secs(),
        phases: PATTERN
            .iter()
            .map(|(phase, length)| BreathPhaseSpan {
                phase: *phase,
                seconds: length.as_secs(),
                cue: phase.cue(),
            })
            .collect(),
    })
}

pub async fn get_favorites(State(state): State<AppState>) -> Json<FavoritesResponse> {
    let data = state.data.lock().await;
    Json(FavoritesResponse {
        favorited: None,
        favorites: data.favorites.clone(),
        notice: None,
    })
}

pub async fn toggle_favorite_quote(
    State(state): State<AppState>,
    Json(payload): Json<FavoriteRequest>,
) -> Result<Json<FavoritesResponse>, AppError> {
    let quote = find_quote(&state, payload.quote_id)?;
    let entitlement = Entitlement::new(payload.premium, Local::now().hour());

    let mut data = state.data.lock().await;
    let outcome = toggle_favorite(&data, quote, entitlement)?;
    let notice = commit(&state, &mut data, outcome.data).await;
    info!(quote_id = payload.quote_id, favorited = outcome.favorited, "favorite toggled");

    Ok(Json(FavoritesResponse {
        favorited: Some(outcome.favorited),
        favorites: data.favorites.clone(),
        notice,
    }))
}

pub async fn delete_favorite(
    State(state): State<AppState>,
    Path(quote_id): Path<u32>,
) -> Json<FavoritesResponse> {
    let mut data = state.data.lock().await;
    let next = remove_favorite(&data, quote_id);
    let notice = if next == *data {
        None
    } else {
        commit(&state, &mut data, next).await
    };
    Json(FavoritesResponse {
        favorited: Some(false),
        favorites: data.favorites.clone(),
        notice,
    })
}

pub async fn get_playlists(State(state): State<AppState>) -> Json<PlaylistsResponse> {
    let data = state.data.lock().await;
    Json(PlaylistsResponse {
        playlists: data.playlists.clone(),
        notice: None,
    })
}

pub async fn create_playlist_from_ids(
    State(state): State<AppState>,
    Json(payload): Json<PlaylistRequest>,
) -> Result<Json<PlaylistResponse>, AppError> {
    let quotes = payload
        .quote_ids
        .iter()
        .map(|id| find_quote(&state, *id).cloned())
        .collect::<Result<Vec<_>, _>>()?;
    let entitlement = Entitlement::new(payload.premium, Local::now().hour());

    let mut data = state.data.lock().await;
    let (next, playlist) = create_playlist(
        &data,
        &payload.name,
        &quotes,
        entitlement,
        Utc::now().timestamp_millis(),
    )?;
    let notice = commit(&state, &mut data, next).await;
    info!(id = %playlist.id, quotes = playlist.quotes.len(), "playlist created");

    Ok(Json(PlaylistResponse { playlist, notice }))
}

pub async fn remove_playlist(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PlaylistsResponse>, AppError> {
    let mut data = state.data.lock().await;
    let next = delete_playlist(&data, &id)
        .ok_or_else(|| AppError::not_found(format!("no playlist with id '{id}'")))?;
    let notice = commit(&state, &mut data, next).await;
    Ok(Json(PlaylistsResponse {
        playlists: data.playlists.clone(),
        notice,
    }))
}

pub async fn play_playlist(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<PlayQuery>,
) -> Result<Json<PlayResponse>, AppError> {
    let data = state.data.lock().await;
    let playlist = data
        .playlists
        .iter()
        .find(|p| p.id == id)
        .ok_or_else(|| AppError::not_found(format!("no playlist with id '{id}'")))?;
    let index = next_index(playlist, query.after)
        .ok_or_else(|| AppError::not_found("playlist has no quotes"))?;

    Ok(Json(PlayResponse {
        playlist_id: playlist.id.clone(),
        index,
        total: playlist.quotes.len(),
        quote: playlist.quotes[index].clone(),
    }))
}

fn find_quote(state: &AppState, id: u32) -> Result<&Quote, AppError> {
    state
        .quotes
        .iter()
        .find(|quote| quote.id == id)
        .ok_or_else(|| AppError::not_found(format!("no quote with id {id}")))
}

/// The caller's calendar date and hour, falling back to the server clock.
fn resolve_clock(date: Option<&str>, hour: Option<u32>) -> Result<(NaiveDate, u32), CheckInError> {
    let now = Local::now();
    let today = match date {
        Some(value) => parse_date_key(value)?,
        None => now.date_naive(),
    };
    let hour = hour.unwrap_or_else(|| now.hour());
    if hour > 23 {
        return Err(CheckInError::InvalidArgument(format!(
            "hour must be between 0 and 23, got {hour}"
        )));
    }
    Ok((today, hour))
}
