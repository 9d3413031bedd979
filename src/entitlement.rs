use crate::checkin::CheckInKind;
use crate::errors::CheckInError;
use crate::models::DayCheckIn;
use crate::quotes::{Quote, TierFilter};

/// Local hour from which the evening check-in opens. Uses the caller's
/// wall-clock hour as-is, without timezone normalization.
pub const EVENING_START_HOUR: u32 = 17;

pub const FREE_FAVORITES_LIMIT: usize = 10;
pub const FREE_PLAYLIST_LIMIT: usize = 1;
pub const FREE_PLAYLIST_QUOTES: usize = 5;
pub const PREMIUM_PLAYLIST_QUOTES: usize = 10;

/// Per-call entitlement inputs. The hour comes from the caller's clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entitlement {
    pub is_premium: bool,
    pub current_hour: u32,
}

impl Entitlement {
    pub fn new(is_premium: bool, current_hour: u32) -> Self {
        Self {
            is_premium,
            current_hour,
        }
    }

    pub fn is_evening(&self) -> bool {
        self.current_hour >= EVENING_START_HOUR
    }

    /// The one place that decides whether a check-in kind is reachable.
    pub fn allows(&self, kind: CheckInKind) -> Result<(), CheckInError> {
        match kind {
            CheckInKind::Morning => Ok(()),
            CheckInKind::Evening if !self.is_premium => Err(CheckInError::NotEntitled(
                "evening check-in requires premium".to_string(),
            )),
            CheckInKind::Evening if !self.is_evening() => Err(CheckInError::NotEntitled(
                format!("evening check-in opens at {EVENING_START_HOUR}:00"),
            )),
            CheckInKind::Evening => Ok(()),
        }
    }

    /// Free users draw only from free-tier quotes.
    pub fn tier(&self) -> TierFilter {
        TierFilter::for_premium(self.is_premium)
    }

    pub fn allows_quote(&self, quote: &Quote) -> Result<(), CheckInError> {
        if self.tier().admits(quote) {
            Ok(())
        } else {
            Err(CheckInError::NotEntitled(format!(
                "quote {} requires premium",
                quote.id
            )))
        }
    }

    /// Checked before adding one more favorite to `current` existing ones.
    pub fn allows_favorite(&self, current: usize) -> Result<(), CheckInError> {
        if !self.is_premium && current >= FREE_FAVORITES_LIMIT {
            return Err(CheckInError::NotEntitled(format!(
                "free tier allows up to {FREE_FAVORITES_LIMIT} favorites"
            )));
        }
        Ok(())
    }

    /// Checked before creating one more playlist next to `current` ones.
    pub fn allows_playlist(&self, current: usize) -> Result<(), CheckInError> {
        if !self.is_premium && current >= FREE_PLAYLIST_LIMIT {
            return Err(CheckInError::NotEntitled(format!(
                "free tier allows only {FREE_PLAYLIST_LIMIT} playlist"
            )));
        }
        Ok(())
    }

    pub fn max_playlist_quotes(&self) -> usize {
        if self.is_premium {
            PREMIUM_PLAYLIST_QUOTES
        } else {
            FREE_PLAYLIST_QUOTES
        }
    }

    pub fn availability(&self, today: Option<&DayCheckIn>) -> Availability {
        let morning_done = today.is_some_and(|day| day.morning);
        let evening_done = today.is_some_and(|day| day.evening);
        Availability {
            can_morning: !morning_done,
            can_evening: !evening_done && self.allows(CheckInKind::Evening).is_ok(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Availability {
    pub can_morning: bool,
    pub can_evening: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn morning_is_always_allowed() {
        assert!(Entitlement::new(false, 6).allows(CheckInKind::Morning).is_ok());
        assert!(Entitlement::new(true, 23).allows(CheckInKind::Morning).is_ok());
    }

    #[test]
    fn evening_needs_premium_and_hour() {
        assert!(matches!(
            Entitlement::new(false, 20).allows(CheckInKind::Evening),
            Err(CheckInError::NotEntitled(_))
        ));
        assert!(matches!(
            Entitlement::new(true, 16).allows(CheckInKind::Evening),
            Err(CheckInError::NotEntitled(_))
        ));
        assert!(Entitlement::new(true, 17).allows(CheckInKind::Evening).is_ok());
    }

    #[test]
    fn library_limits_depend_on_tier() {
        let free = Entitlement::new(false, 9);
        let premium = Entitlement::new(true, 9);

        assert!(free.allows_favorite(9).is_ok());
        assert!(matches!(free.allows_favorite(10), Err(CheckInError::NotEntitled(_))));
        assert!(premium.allows_favorite(500).is_ok());

        assert!(free.allows_playlist(0).is_ok());
        assert!(free.allows_playlist(1).is_err());
        assert!(premium.allows_playlist(7).is_ok());

        assert_eq!(free.max_playlist_quotes(), 5);
        assert_eq!(premium.max_playlist_quotes(), 10);
    }

    #[test]
    fn premium_quotes_need_premium() {
        let pool = crate::quotes::default_pool();
        let locked = pool.iter().find(|q| q.tier == crate::quotes::Tier::Premium).unwrap();
        assert!(Entitlement::new(false, 9).allows_quote(locked).is_err());
        assert!(Entitlement::new(true, 9).allows_quote(locked).is_ok());
    }

    #[test]
    fn availability_reflects_completed_halves() {
        let day = DayCheckIn {
            morning: true,
            evening: false,
            reflection: String::new(),
        };
        let availability = Entitlement::new(true, 18).availability(Some(&day));
        assert!(!availability.can_morning);
        assert!(availability.can_evening);

        let fresh = Entitlement::new(false, 18).availability(None);
        assert!(fresh.can_morning);
        assert!(!fresh.can_evening);
    }
}
