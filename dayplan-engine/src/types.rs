use serde::{Deserialize, Serialize};

use crate::weather::WeatherSnapshot;

/// Upper bound on recommendation titles, in characters
pub const TITLE_MAX_CHARS: usize = 60;
/// Upper bound on recommendation reasons, in characters
pub const REASON_MAX_CHARS: usize = 140;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Chill,
    Social,
    Active,
    Focus,
    Surprise,
}

impl Mood {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Chill => "chill",
            Mood::Social => "social",
            Mood::Active => "active",
            Mood::Focus => "focus",
            Mood::Surprise => "surprise",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Budget {
    Free,
    Low,
    Medium,
    High,
}

impl Budget {
    pub fn as_str(&self) -> &'static str {
        match self {
            Budget::Free => "free",
            Budget::Low => "low",
            Budget::Medium => "medium",
            Budget::High => "high",
        }
    }
}

/// Where the user wants to spend the day. Only the input preference carries
/// `Either`; recommendations themselves are always labeled two-valued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Place {
    Indoor,
    Outdoor,
    Either,
}

impl Place {
    pub fn as_str(&self) -> &'static str {
        match self {
            Place::Indoor => "indoor",
            Place::Outdoor => "outdoor",
            Place::Either => "either",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Indoor,
    Outdoor,
}

/// Optional user bias on the day plan. Every field is independently
/// optional; absence means a neutral default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<Mood>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<Budget>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place: Option<Place>,
}

impl Preferences {
    pub fn place_or_default(&self) -> Place {
        self.place.unwrap_or(Place::Either)
    }

    pub fn mood_or_default(&self) -> Mood {
        self.mood.unwrap_or(Mood::Surprise)
    }

    pub fn budget_or_default(&self) -> Budget {
        self.budget.unwrap_or(Budget::Medium)
    }
}

/// A single scored suggestion. List position is ranking order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub reason: String,
    pub label: Label,
    pub confidence: u8,
}

/// Final response envelope returned by the engine.
#[derive(Debug, Clone, Serialize)]
pub struct RecommendResponse {
    pub city: String,
    pub weather: WeatherSnapshot,
    pub recommendations: Vec<Recommendation>,
}

/// Round and clamp a raw score into the [0, 100] integer range.
pub fn clamp_confidence(raw: f64) -> u8 {
    raw.round().clamp(0.0, 100.0) as u8
}

/// Truncate a string to at most `max` characters, char-boundary safe.
pub fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        text.chars().take(max).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_is_rounded_and_clamped() {
        assert_eq!(clamp_confidence(87.4), 87);
        assert_eq!(clamp_confidence(87.6), 88);
        assert_eq!(clamp_confidence(250.0), 100);
        assert_eq!(clamp_confidence(-5.0), 0);
        assert_eq!(clamp_confidence(0.0), 0);
        assert_eq!(clamp_confidence(100.0), 100);
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        assert_eq!(truncate_chars("short", 60), "short");
        assert_eq!(truncate_chars("ağaçlık yürüyüş", 7), "ağaçlık");
        let long = "x".repeat(200);
        assert_eq!(truncate_chars(&long, 140).chars().count(), 140);
    }

    #[test]
    fn preferences_default_to_neutral_values() {
        let prefs = Preferences::default();
        assert_eq!(prefs.place_or_default(), Place::Either);
        assert_eq!(prefs.mood_or_default(), Mood::Surprise);
        assert_eq!(prefs.budget_or_default(), Budget::Medium);
    }

    #[test]
    fn preferences_deserialize_with_missing_fields() {
        let prefs: Preferences = serde_json::from_str(r#"{"place":"outdoor"}"#).unwrap();
        assert_eq!(prefs.place, Some(Place::Outdoor));
        assert!(prefs.mood.is_none());
        assert!(prefs.budget.is_none());
    }

    #[test]
    fn labels_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&Label::Indoor).unwrap(), r#""indoor""#);
        assert_eq!(serde_json::to_string(&Label::Outdoor).unwrap(), r#""outdoor""#);
    }
}
