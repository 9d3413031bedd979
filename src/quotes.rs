use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Free,
    Premium,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub id: u32,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub category: String,
    pub tier: Tier,
}

/// Which part of the pool a caller may draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierFilter {
    Free,
    All,
}

impl TierFilter {
    pub fn for_premium(is_premium: bool) -> Self {
        if is_premium { TierFilter::All } else { TierFilter::Free }
    }

    pub fn admits(self, quote: &Quote) -> bool {
        match self {
            TierFilter::All => true,
            TierFilter::Free => quote.tier == Tier::Free,
        }
    }
}

impl FromStr for TierFilter {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "free" => Ok(TierFilter::Free),
            "all" | "premium" => Ok(TierFilter::All),
            other => Err(format!("tier must be 'free' or 'all', got '{other}'")),
        }
    }
}

pub fn filter_pool<'a>(pool: &'a [Quote], tier: TierFilter, category: Option<&str>) -> Vec<&'a Quote> {
    pool.iter()
        .filter(|quote| tier.admits(quote))
        .filter(|quote| category.is_none_or(|c| quote.category.eq_ignore_ascii_case(c)))
        .collect()
}

/// Uniform pick over the tier-filtered pool. `None` when nothing qualifies.
pub fn pick_quote<'a, R: Rng + ?Sized>(
    pool: &'a [Quote],
    tier: TierFilter,
    category: Option<&str>,
    rng: &mut R,
) -> Option<&'a Quote> {
    filter_pool(pool, tier, category).choose(rng).copied()
}

/// Quote shown on the check-in screen: prefers mindfulness or motivation
/// categories, falling back to anything the tier allows.
pub fn pick_daily_quote<'a, R: Rng + ?Sized>(
    pool: &'a [Quote],
    tier: TierFilter,
    rng: &mut R,
) -> Option<&'a Quote> {
    let available = filter_pool(pool, tier, None);
    let mindful: Vec<&Quote> = available
        .iter()
        .copied()
        .filter(|quote| {
            let category = quote.category.to_lowercase();
            category.contains("mindfulness") || category.contains("motivation")
        })
        .collect();
    let candidates = if mindful.is_empty() { available } else { mindful };
    candidates.choose(rng).copied()
}

pub fn default_pool() -> Vec<Quote> {
    let entries: [(&str, Option<&str>, &str, Tier); 10] = [
        ("Breathe. You are exactly where you need to be.", None, "mindfulness", Tier::Free),
        ("The present moment is the only moment available to us.", Some("Thich Nhat Hanh"), "mindfulness", Tier::Free),
        ("Small steps every day add up to big changes.", None, "motivation", Tier::Free),
        ("You are allowed to rest.", None, "calm", Tier::Free),
        ("I choose peace over worry.", None, "affirmation", Tier::Free),
        ("Feelings are visitors. Let them come and go.", Some("Mooji"), "mindfulness", Tier::Premium),
        ("What you practice grows stronger.", Some("Shauna Shapiro"), "motivation", Tier::Premium),
        ("Be where you are; otherwise you will miss your life.", Some("Buddha"), "mindfulness", Tier::Premium),
        ("I am worthy of the love I give others.", None, "affirmation", Tier::Premium),
        ("Quiet the mind and the soul will speak.", Some("Ma Jaya Sati Bhagavati"), "calm", Tier::Premium),
    ];
    entries
        .into_iter()
        .zip(1..)
        .map(|((text, author, category, tier), id)| Quote {
            id,
            text: text.to_string(),
            author: author.map(str::to_string),
            category: category.to_string(),
            tier,
        })
        .collect()
}
