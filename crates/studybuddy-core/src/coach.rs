//! Scripted study coach.
//!
//! Not a language model: the input is classified by keyword into one of three
//! response kinds and a canned line is picked for the selected personality.
//! The caller supplies the RNG so replies are reproducible under a seeded
//! generator.

use std::fmt;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Streak length above which replies mention the streak.
const STREAK_MENTION_THRESHOLD: u32 = 3;

const GREETING_KEYWORDS: &[&str] = &["hello", "hi", "hey"];
const COMPLETION_KEYWORDS: &[&str] = &["done", "completed", "finished"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoachPersonality {
    #[default]
    Motivational,
    Empathetic,
    Analytical,
    Creative,
    Stoic,
}

impl CoachPersonality {
    pub const ALL: [CoachPersonality; 5] = [
        CoachPersonality::Motivational,
        CoachPersonality::Empathetic,
        CoachPersonality::Analytical,
        CoachPersonality::Creative,
        CoachPersonality::Stoic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CoachPersonality::Motivational => "motivational",
            CoachPersonality::Empathetic => "empathetic",
            CoachPersonality::Analytical => "analytical",
            CoachPersonality::Creative => "creative",
            CoachPersonality::Stoic => "stoic",
        }
    }
}

impl fmt::Display for CoachPersonality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CoachPersonality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == needle)
            .ok_or_else(|| format!("unknown coach personality: {s}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseKind {
    Greeting,
    Encouragement,
    TaskComplete,
}

/// Classify a chat message. Greeting wins over completion; anything else is
/// answered with encouragement.
pub fn classify(input: &str) -> ResponseKind {
    let lowered = input.to_lowercase();
    let words: Vec<&str> = lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();
    let mentions = |keywords: &[&str]| words.iter().any(|w| keywords.contains(w));

    if mentions(GREETING_KEYWORDS) {
        ResponseKind::Greeting
    } else if mentions(COMPLETION_KEYWORDS) {
        ResponseKind::TaskComplete
    } else {
        ResponseKind::Encouragement
    }
}

/// Canned lines for one personality and response kind.
pub fn lines(personality: CoachPersonality, kind: ResponseKind) -> &'static [&'static str] {
    use CoachPersonality::*;
    use ResponseKind::*;
    match (personality, kind) {
        (Motivational, Greeting) => &[
            "Let's crush those goals today! 💪",
            "You've got this, champion! 🏆",
            "Time to make today amazing! ⚡",
        ],
        (Motivational, Encouragement) => &[
            "Every small step counts! Keep pushing forward!",
            "You're stronger than you think! Let's do this!",
            "Success is just around the corner - don't give up!",
        ],
        (Motivational, TaskComplete) => &[
            "BOOM! That's how it's done! 🎯",
            "You're on fire today! Keep that momentum going! 🔥",
            "Another win in the books! You're unstoppable! 💪",
        ],
        (Empathetic, Greeting) => &[
            "How are you feeling today? I'm here for you 💝",
            "Welcome back! Remember, it's okay to take things at your own pace 🌸",
            "I'm so glad you're here. Let's make today a good one together 🤗",
        ],
        (Empathetic, Encouragement) => &[
            "I understand this is challenging. You're doing your best, and that's enough.",
            "It's okay to feel overwhelmed. Let's take this one step at a time.",
            "Remember to be kind to yourself. You're making progress, even if it doesn't feel like it.",
        ],
        (Empathetic, TaskComplete) => &[
            "I'm so proud of you! You did it! 🌟",
            "You should feel really good about this accomplishment 💖",
            "Look at you go! You're doing amazing things! 🌈",
        ],
        (Analytical, Greeting) => &[
            "Ready to optimize your productivity? Let's analyze your goals 📊",
            "Time to strategize. What's our primary objective today? 🎯",
            "Let's review your progress and plan the most efficient path forward 📈",
        ],
        (Analytical, Encouragement) => &[
            "Based on your patterns, you perform best when you break tasks into smaller chunks.",
            "Data shows you're 73% more productive at this time. Let's capitalize on that.",
            "Your completion rate has improved by 15% this week. Maintain this trajectory.",
        ],
        (Analytical, TaskComplete) => &[
            "Excellent execution. Task completed with 100% efficiency ✅",
            "Objective achieved. Your productivity score has increased 📈",
            "Well done. This completion puts you ahead of schedule by 12% 🎯",
        ],
        (Creative, Greeting) => &[
            "Let's paint today with the colors of productivity! 🎨",
            "Time to create something amazing! What masterpiece shall we work on? ✨",
            "Your creative energy is flowing! Let's channel it into something wonderful 🌟",
        ],
        (Creative, Encouragement) => &[
            "Think of each task as a brushstroke in your daily masterpiece!",
            "Sometimes the best ideas come when we approach things differently. Try a new angle!",
            "Let your imagination guide you - there's no wrong way to be productive!",
        ],
        (Creative, TaskComplete) => &[
            "Beautiful work! You've created something special today! 🎨",
            "That's a masterpiece of productivity! Bravo! 🌟",
            "You've added another brilliant chapter to your story! ✨",
        ],
        (Stoic, Greeting) => &[
            "Focus on what you can control. Let's begin. 🗿",
            "The obstacle is the way. What challenges await us today? ⚔️",
            "Discipline equals freedom. Time to practice both. 🛡️",
        ],
        (Stoic, Encouragement) => &[
            "The struggle is where character is forged. Embrace it.",
            "You cannot control the outcome, only your effort. Give your best.",
            "Every difficulty is an opportunity to practice virtue.",
        ],
        (Stoic, TaskComplete) => &[
            "Well done. You've acted with discipline and purpose. 🗿",
            "Task complete. You've demonstrated excellent self-control. ⚔️",
            "You've conquered today's challenge. Tomorrow brings new opportunities. 🛡️",
        ],
    }
}

/// Pick a reply for `input`. Appends a streak mention once the streak is
/// longer than three days.
pub fn respond<R: Rng + ?Sized>(
    input: &str,
    personality: CoachPersonality,
    current_streak: u32,
    rng: &mut R,
) -> String {
    let kind = classify(input);
    let line = lines(personality, kind)
        .choose(rng)
        .copied()
        .unwrap_or_default();

    if current_streak > STREAK_MENTION_THRESHOLD {
        format!("{line} You're on a {current_streak} day streak!")
    } else {
        line.to_string()
    }
}
