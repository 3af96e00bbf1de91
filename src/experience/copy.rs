//! Fixed text pools for the interactive page.

/// A question asked by the flow. `key` is what gets stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub key: &'static str,
    pub text: &'static str,
}

pub const QUESTIONS: [Question; 4] = [
    Question { key: "q1", text: "Honestly, who is your favourite person, and why is it me?" },
    Question { key: "q2", text: "Would you pick me in every parallel universe?" },
    Question { key: "q3", text: "Is your evening on 14 Feb suspiciously free?" },
    Question { key: "q4", text: "Will you take me out for dinner on 14 Feb, and cover the bill?" },
];

/// Shown as a toast every time the reject control escapes.
pub const TAUNTS: [&str; 8] = [
    "Think again... YES feels warmer.",
    "That NO looks exhausted. Give YES a go.",
    "Plot twist: YES was the answer all along.",
    "NO keeps running. YES is standing right there.",
    "Nice try. Be brave and click YES.",
    "Be honest... you meant YES.",
    "NO says: not today. Pick YES.",
    "Stop chasing NO. Choose YES.",
];

/// One of these is shown in the celebration modal after a YES.
pub const YES_TEASE_LINES: [&str; 4] = [
    "Knew it. Predictable in the best possible way.",
    "Called it. Charm wins again.",
    "Obviously. That yes was loading since question one.",
    "Good call. Best decision you will make today.",
];

/// Rotates with the question index.
pub const PICKUP_LINES: [&str; 4] = [
    "Are you Wi-Fi? Because I am sensing a strong connection... click YES.",
    "Are you made of stardust? Every timeline keeps choosing you.",
    "Is your calendar free on 14 Feb, or do I need to argue harder?",
    "Dinner date chemistry test: say YES and let fate handle the rest.",
];

/// Pool for the closing letter; four are drawn per visit.
pub const FINAL_LETTER_LINES: [&str; 6] = [
    "You made it through my dramatic questionnaire and still said yes often enough to keep my ego alive.",
    "You roll your eyes, call me extra, and still keep showing up. Highly suspicious loyalty.",
    "Official notice: on 14 Feb I expect a premium dinner, premium attitude, and premium payment from you.",
    "I bring the charm and the chaos. You bring the bill. Perfectly balanced.",
    "If this is not romance, it is at least top-tier comedy with excellent chemistry.",
    "Friendly reminder that saying yes to me is usually the smartest thing you do all day.",
];

/// Number of letter lines shown on the closing screen.
pub const LETTER_LINES_SHOWN: usize = 4;
