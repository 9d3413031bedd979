use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BreathPhase {
    Inhale,
    Hold,
    Exhale,
}

impl BreathPhase {
    pub fn cue(self) -> &'static str {
        match self {
            BreathPhase::Inhale => "Breathe in slowly...",
            BreathPhase::Hold => "Hold gently...",
            BreathPhase::Exhale => "Release slowly...",
        }
    }
}

/// 4-4-6 pattern.
pub const PATTERN: [(BreathPhase, Duration); 3] = [
    (BreathPhase::Inhale, Duration::from_secs(4)),
    (BreathPhase::Hold, Duration::from_secs(4)),
    (BreathPhase::Exhale, Duration::from_secs(6)),
];

pub fn cycle_length() -> Duration {
    PATTERN.iter().map(|(_, length)| *length).sum()
}

/// Phase active after `elapsed` since the session started.
pub fn phase_at(elapsed: Duration) -> BreathPhase {
    let cycle = cycle_length().as_millis();
    let mut offset = elapsed.as_millis() % cycle;
    for (phase, length) in PATTERN {
        let length = length.as_millis();
        if offset < length {
            return phase;
        }
        offset -= length;
    }
    BreathPhase::Inhale
}
