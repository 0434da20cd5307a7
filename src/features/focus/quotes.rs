//! Motivational lines shown under the phase header.

use rand::seq::SliceRandom;
use rand::Rng;

use super::phase::Phase;

const WORK_QUOTES: &[&str] = &[
    "Think only of your craft.",
    "Swing the sword as if you had no hands.",
    "Be free. Be boundless.",
    "There is no light for those who do not know darkness.",
    "Worry about a single tree and you will miss the forest.",
    "Do not follow in the footsteps of the wise. Seek what they sought.",
    "Being incomplete is what drives us toward the next thing.",
    "Fear is the true enemy of the one who works.",
    "See everything in its entirety, effortlessly.",
    "Outwork others consistently.",
];

const BREAK_QUOTES: &[&str] = &[
    "Rest is part of the journey.",
    "Even the strongest warrior must sleep.",
    "A moment of stillness can reveal the path ahead.",
    "The wind does not hurry, yet it moves everything.",
    "Strength is knowing when to stop.",
    "The river flows without effort, yet it carves mountains.",
    "Even the sword must be sheathed.",
    "A calm mind sees more than a mind in battle.",
    "The stars do not hurry, yet they shine.",
    "True strength is found in balance.",
];

/// Pick a quote suited to the phase.
pub fn pick<R: Rng + ?Sized>(phase: Phase, rng: &mut R) -> &'static str {
    let pool = if phase.is_break() {
        BREAK_QUOTES
    } else {
        WORK_QUOTES
    };
    pool.choose(rng).copied().unwrap_or_default()
}
