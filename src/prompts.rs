use crate::entitlement::Entitlement;
use rand::Rng;
use rand::seq::SliceRandom;

const FREE_MORNING_PROMPTS: &[&str] = &["What's one thing you're looking forward to?"];

const PREMIUM_MORNING_PROMPTS: &[&str] = &[
    "What intention will guide your day?",
    "What are you grateful for in this moment?",
    "How do you want to feel today?",
    "What is one small act of kindness you can offer?",
    "What would make today meaningful?",
];

const EVENING_PROMPTS: &[&str] = &[
    "What went well today?",
    "What did you learn about yourself?",
    "How did you show up for yourself today?",
    "What moment brought you joy?",
    "What are you ready to release?",
];

/// Prompt set for the check-in the caller can currently reach. Evening
/// prompts only appear for premium users after the evening threshold.
pub fn prompts_for(entitlement: Entitlement) -> &'static [&'static str] {
    if entitlement.is_premium && entitlement.is_evening() {
        EVENING_PROMPTS
    } else if entitlement.is_premium {
        PREMIUM_MORNING_PROMPTS
    } else {
        FREE_MORNING_PROMPTS
    }
}

pub fn pick_prompt<R: Rng + ?Sized>(entitlement: Entitlement, rng: &mut R) -> &'static str {
    prompts_for(entitlement)
        .choose(rng)
        .copied()
        .unwrap_or(FREE_MORNING_PROMPTS[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn free_users_get_single_prompt() {
        let mut rng = StdRng::seed_from_u64(3);
        let prompt = pick_prompt(Entitlement::new(false, 20), &mut rng);
        assert_eq!(prompt, FREE_MORNING_PROMPTS[0]);
    }

    #[test]
    fn premium_prompts_switch_in_evening() {
        assert_eq!(prompts_for(Entitlement::new(true, 9)).len(), 5);
        assert_eq!(prompts_for(Entitlement::new(true, 9)), PREMIUM_MORNING_PROMPTS);
        assert_eq!(prompts_for(Entitlement::new(true, 17)), EVENING_PROMPTS);
    }
}
