//! Favorites and playlists kept alongside the check-in ledger.
//!
//! Like the check-in operations, these take the current `AppData` and return
//! the next one; tier limits all go through [`Entitlement`].

use crate::entitlement::Entitlement;
use crate::errors::CheckInError;
use crate::models::{AppData, Playlist};
use crate::quotes::Quote;

pub const MAX_PLAYLIST_NAME_CHARS: usize = 80;

#[derive(Debug, Clone, PartialEq)]
pub struct FavoriteOutcome {
    pub data: AppData,
    pub favorited: bool,
}

/// Adds `quote` to favorites, or removes it when it is already there.
pub fn toggle_favorite(
    data: &AppData,
    quote: &Quote,
    entitlement: Entitlement,
) -> Result<FavoriteOutcome, CheckInError> {
    if data.favorites.iter().any(|fav| fav.id == quote.id) {
        return Ok(FavoriteOutcome {
            data: remove_favorite(data, quote.id),
            favorited: false,
        });
    }

    entitlement.allows_quote(quote)?;
    entitlement.allows_favorite(data.favorites.len())?;

    let mut next = data.clone();
    next.favorites.push(quote.clone());
    Ok(FavoriteOutcome {
        data: next,
        favorited: true,
    })
}

pub fn remove_favorite(data: &AppData, quote_id: u32) -> AppData {
    let mut next = data.clone();
    next.favorites.retain(|fav| fav.id != quote_id);
    next
}

/// Creates a playlist from `quotes` in the order given, dropping repeats.
///
/// The id is `now_millis` as a string, bumped until it is unused.
pub fn create_playlist(
    data: &AppData,
    name: &str,
    quotes: &[Quote],
    entitlement: Entitlement,
    now_millis: i64,
) -> Result<(AppData, Playlist), CheckInError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CheckInError::InvalidArgument(
            "playlist name must not be empty".to_string(),
        ));
    }
    if name.chars().count() > MAX_PLAYLIST_NAME_CHARS {
        return Err(CheckInError::InvalidArgument(format!(
            "playlist name must be at most {MAX_PLAYLIST_NAME_CHARS} characters"
        )));
    }
    entitlement.allows_playlist(data.playlists.len())?;

    let mut selected: Vec<Quote> = Vec::with_capacity(quotes.len());
    for quote in quotes {
        if selected.iter().any(|q| q.id == quote.id) {
            continue;
        }
        entitlement.allows_quote(quote)?;
        selected.push(quote.clone());
    }

    let max = entitlement.max_playlist_quotes();
    if selected.is_empty() || selected.len() > max {
        return Err(CheckInError::InvalidArgument(format!(
            "select 1-{max} quotes for a playlist"
        )));
    }

    let mut stamp = now_millis;
    while data.playlists.iter().any(|p| p.id == stamp.to_string()) {
        stamp += 1;
    }

    let playlist = Playlist {
        id: stamp.to_string(),
        name: name.to_string(),
        quotes: selected,
        created_at: now_millis,
    };
    let mut next = data.clone();
    next.playlists.push(playlist.clone());
    Ok((next, playlist))
}

/// `None` when no playlist has that id.
pub fn delete_playlist(data: &AppData, id: &str) -> Option<AppData> {
    if !data.playlists.iter().any(|p| p.id == id) {
        return None;
    }
    let mut next = data.clone();
    next.playlists.retain(|p| p.id != id);
    Some(next)
}

/// Index to play after `current`, wrapping at the end. Starts at 0.
pub fn next_index(playlist: &Playlist, current: Option<usize>) -> Option<usize> {
    let len = playlist.quotes.len();
    if len == 0 {
        return None;
    }
    Some(current.map_or(0, |index| (index + 1) % len))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quotes::{Tier, default_pool};

    fn free() -> Entitlement {
        Entitlement::new(false, 9)
    }

    fn premium() -> Entitlement {
        Entitlement::new(true, 9)
    }

    fn free_quotes() -> Vec<Quote> {
        default_pool()
            .into_iter()
            .filter(|q| q.tier == Tier::Free)
            .collect()
    }

    fn numbered(count: u32, tier: Tier) -> Vec<Quote> {
        (100..100 + count)
            .map(|id| Quote {
                id,
                text: format!("quote {id}"),
                author: None,
                category: "calm".to_string(),
                tier,
            })
            .collect()
    }

    #[test]
    fn toggle_adds_then_removes() {
        let quote = &free_quotes()[0];
        let added = toggle_favorite(&AppData::default(), quote, free()).unwrap();
        assert!(added.favorited);
        assert_eq!(added.data.favorites, vec![quote.clone()]);

        let removed = toggle_favorite(&added.data, quote, free()).unwrap();
        assert!(!removed.favorited);
        assert!(removed.data.favorites.is_empty());
    }

    #[test]
    fn free_favorites_cap_at_ten() {
        let mut data = AppData::default();
        for quote in numbered(10, Tier::Free) {
            data = toggle_favorite(&data, &quote, free()).unwrap().data;
        }
        let extra = &numbered(11, Tier::Free)[10];
        let err = toggle_favorite(&data, extra, free()).unwrap_err();
        assert!(matches!(err, CheckInError::NotEntitled(_)));
        assert_eq!(data.favorites.len(), 10);

        // Removing still works at the cap, and premium has no cap.
        let first = data.favorites[0].clone();
        assert!(!toggle_favorite(&data, &first, free()).unwrap().favorited);
        assert!(toggle_favorite(&data, extra, premium()).unwrap().favorited);
    }

    #[test]
    fn free_user_cannot_favorite_premium_quote() {
        let locked = &numbered(1, Tier::Premium)[0];
        assert!(toggle_favorite(&AppData::default(), locked, free()).is_err());
    }

    #[test]
    fn remove_favorite_by_id() {
        let quotes = free_quotes();
        let mut data = AppData::default();
        data.favorites = quotes[..3].to_vec();
        let next = remove_favorite(&data, quotes[1].id);
        let ids: Vec<_> = next.favorites.iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![quotes[0].id, quotes[2].id]);
        assert_eq!(remove_favorite(&next, 9999), next);
    }

    #[test]
    fn free_user_gets_one_playlist_of_up_to_five() {
        let quotes = numbered(6, Tier::Free);
        let err = create_playlist(&AppData::default(), "Morning", &quotes, free(), 1_000).unwrap_err();
        assert!(matches!(err, CheckInError::InvalidArgument(_)));

        let (data, playlist) =
            create_playlist(&AppData::default(), " Morning ", &quotes[..5], free(), 1_000).unwrap();
        assert_eq!(playlist.name, "Morning");
        assert_eq!(playlist.id, "1000");
        assert_eq!(playlist.quotes.len(), 5);

        let err = create_playlist(&data, "Evening", &quotes[..1], free(), 2_000).unwrap_err();
        assert!(matches!(err, CheckInError::NotEntitled(_)));
    }

    #[test]
    fn premium_playlists_hold_ten() {
        let quotes = numbered(11, Tier::Premium);
        assert!(create_playlist(&AppData::default(), "All", &quotes, premium(), 5).is_err());
        let (data, _) =
            create_playlist(&AppData::default(), "Ten", &quotes[..10], premium(), 5).unwrap();
        let (data, second) = create_playlist(&data, "Again", &quotes[..2], premium(), 5).unwrap();
        assert_eq!(second.id, "6");
        assert_eq!(data.playlists.len(), 2);
    }

    #[test]
    fn playlist_rejects_blank_name_and_empty_selection() {
        let quotes = free_quotes();
        assert!(create_playlist(&AppData::default(), "  ", &quotes[..1], free(), 1).is_err());
        assert!(create_playlist(&AppData::default(), "Calm", &[], free(), 1).is_err());
    }

    #[test]
    fn playlist_drops_repeated_quotes() {
        let quote = free_quotes()[0].clone();
        let picks = vec![quote.clone(), quote.clone(), quote];
        let (_, playlist) = create_playlist(&AppData::default(), "One", &picks, free(), 1).unwrap();
        assert_eq!(playlist.quotes.len(), 1);
    }

    #[test]
    fn delete_and_play_next() {
        let quotes = free_quotes();
        let (data, playlist) =
            create_playlist(&AppData::default(), "Loop", &quotes[..3], free(), 42).unwrap();

        assert_eq!(next_index(&playlist, None), Some(0));
        assert_eq!(next_index(&playlist, Some(0)), Some(1));
        assert_eq!(next_index(&playlist, Some(2)), Some(0));

        assert!(delete_playlist(&data, "missing").is_none());
        let next = delete_playlist(&data, &playlist.id).unwrap();
        assert!(next.playlists.is_empty());
    }
}
