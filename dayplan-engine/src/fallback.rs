use async_trait::async_trait;
use tracing::info;

use crate::catalog::{INDOOR_POOL, OUTDOOR_POOL, OUTDOOR_WARNING_POOL};
use crate::error::Result;
use crate::rules;
use crate::strategy::{GenerationRequest, Generator};
use crate::types::{clamp_confidence, Label, Place, Recommendation};
use crate::weather::WeatherSnapshot;

/// Maximum list length on the mixed indoor/outdoor path.
pub const MIXED_LIST_MAX: usize = 7;

/// Deterministic rule-driven generation: pure over snapshot and place
/// preference, no I/O, always succeeds.
pub fn recommendations_for(snapshot: &WeatherSnapshot, place: Option<Place>) -> Vec<Recommendation> {
    let assessment = rules::assess(snapshot);

    let user_target = match place {
        Some(Place::Indoor) => Some(Label::Indoor),
        Some(Place::Outdoor) => Some(Label::Outdoor),
        _ => None,
    };

    // Weather bias always wins; an explicit user choice only decides when
    // the weather has no opinion.
    let target = if assessment.prefer_indoor {
        Label::Indoor
    } else {
        user_target.unwrap_or(Label::Outdoor)
    };

    let pool = match target {
        Label::Indoor => &INDOOR_POOL,
        Label::Outdoor => &OUTDOOR_POOL,
    };

    let mut recommendations: Vec<Recommendation> = pool
        .iter()
        .map(|entry| Recommendation {
            title: entry.title.to_string(),
            reason: entry.reason.to_string(),
            label: entry.label,
            confidence: clamp_confidence(entry.confidence as f64),
        })
        .collect();

    // The one label-mixing path: the user explicitly asked for outdoor but
    // the weather prefers indoor. Two low-confidence outdoor entries are
    // appended with a warning text matching the rain state.
    if assessment.prefer_indoor && user_target == Some(Label::Outdoor) {
        for warning in &OUTDOOR_WARNING_POOL {
            let reason = if snapshot.is_rainy {
                warning.reason_rain
            } else {
                warning.reason_dry
            };
            recommendations.push(Recommendation {
                title: warning.title.to_string(),
                reason: reason.to_string(),
                label: Label::Outdoor,
                confidence: clamp_confidence(warning.confidence as f64),
            });
        }
        recommendations.truncate(MIXED_LIST_MAX);
    }

    recommendations
}

/// Strategy wrapper around [`recommendations_for`]; last in the chain.
pub struct FallbackGenerator;

#[async_trait]
impl Generator for FallbackGenerator {
    fn id(&self) -> &str {
        "fallback_rules"
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<Vec<Recommendation>> {
        info!(city = %request.city, "generating recommendations from the rule-based pools");
        Ok(recommendations_for(
            &request.snapshot,
            request.preferences.place,
        ))
    }
}
