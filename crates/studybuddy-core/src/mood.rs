//! Mood entries and their coupling to motivation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::date::DateKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Amazing,
    Good,
    Okay,
    Stressed,
    Overwhelmed,
}

impl Mood {
    pub const ALL: [Mood; 5] = [
        Mood::Amazing,
        Mood::Good,
        Mood::Okay,
        Mood::Stressed,
        Mood::Overwhelmed,
    ];

    /// Motivation change applied when the mood is logged on its own.
    pub fn motivation_delta(&self) -> i32 {
        match self {
            Mood::Amazing => 10,
            Mood::Good => 5,
            Mood::Okay | Mood::Stressed | Mood::Overwhelmed => 0,
        }
    }

    /// Motivation change applied when a written reflection carries this mood.
    pub fn reflection_boost(&self) -> i32 {
        match self {
            Mood::Amazing => 15,
            Mood::Good => 10,
            Mood::Okay => 5,
            Mood::Stressed => 2,
            Mood::Overwhelmed => 0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Amazing => "amazing",
            Mood::Good => "good",
            Mood::Okay => "okay",
            Mood::Stressed => "stressed",
            Mood::Overwhelmed => "overwhelmed",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == needle)
            .ok_or_else(|| format!("unknown mood: {s}"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub date: DateKey,
    pub mood: Mood,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reflection: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mood_delta_table() {
        let deltas: Vec<i32> = Mood::ALL.iter().map(Mood::motivation_delta).collect();
        assert_eq!(deltas, vec![10, 5, 0, 0, 0]);
    }

    #[test]
    fn reflection_boost_table() {
        let boosts: Vec<i32> = Mood::ALL.iter().map(Mood::reflection_boost).collect();
        assert_eq!(boosts, vec![15, 10, 5, 2, 0]);
    }

    #[test]
    fn parses_lowercase_names() {
        assert_eq!("Stressed".parse::<Mood>(), Ok(Mood::Stressed));
        assert!("meh".parse::<Mood>().is_err());
    }
}
