use std::time::Duration;

use async_trait::async_trait;
use rig::completion::Chat;
use rig::prelude::*;
use serde::Deserialize;
use tracing::info;

use crate::error::{EngineError, Result};
use crate::strategy::{GenerationRequest, Generator};
use crate::types::{
    clamp_confidence, truncate_chars, Label, Recommendation, REASON_MAX_CHARS, TITLE_MAX_CHARS,
};

/// Model used when no identifier is configured.
pub const DEFAULT_MODEL: &str = "openai/gpt-4.1-mini";

const COMPLETION_TIMEOUT: Duration = Duration::from_secs(30);
const MIN_ITEMS: usize = 5;
const MAX_ITEMS: usize = 8;
const TITLE_MIN_CHARS: usize = 2;
const REASON_MIN_CHARS: usize = 10;

/// Strategy that delegates generation to an external structured-output
/// model via OpenRouter. Any malformed or missing data is a hard failure
/// surfaced to the chain; the rule pools are never substituted here.
pub struct ModelGenerator {
    api_key: String,
    model: String,
}

/// Structured shape the model is instructed to return.
#[derive(Debug, Deserialize)]
struct ModelPayload {
    recommendations: Vec<ModelItem>,
}

#[derive(Debug, Deserialize)]
struct ModelItem {
    title: String,
    reason: String,
    label: Label,
    confidence: f64,
}

impl ModelGenerator {
    pub fn new(api_key: impl Into<String>, model: Option<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        }
    }

    fn agent(&self) -> rig::agent::Agent<rig::providers::openrouter::CompletionModel> {
        let client = rig::providers::openrouter::Client::new(&self.api_key);
        client.agent(&self.model).build()
    }
}

/// Deterministic instruction payload embedding the snapshot, the defaulted
/// preferences, and the rule assessment, so both strategies share one
/// source of truth about the weather.
fn build_prompt(request: &GenerationRequest) -> String {
    let snapshot = &request.snapshot;
    let assessment = &request.assessment;
    let notes = if assessment.notes.is_empty() {
        "none".to_string()
    } else {
        assessment.notes.join("; ")
    };

    format!(
        r#"You are a day-activity planner for travelers and locals.
Suggest activities for today in {city} given the current weather.

Weather: {temp:.1}°C, wind {wind:.1} m/s, condition "{condition}", raining: {rainy}.
Weather guidance: prefer indoor activities: {prefer_indoor}. Notes: {notes}.
User preferences: mood {mood}, budget {budget}, place {place}.

Respond **only** with JSON of the form
{{"recommendations":[{{"title":"...","reason":"...","label":"indoor","confidence":0}}]}}
with between {min_items} and {max_items} items. Each label must be "indoor" or "outdoor",
each title {title_min}-{title_max} characters, each reason {reason_min}-{reason_max} characters,
each confidence an integer fit score from 0 to 100. No other top-level text."#,
        city = request.city,
        temp = snapshot.temp_c,
        wind = snapshot.wind_mps,
        condition = snapshot.condition,
        rainy = snapshot.is_rainy,
        prefer_indoor = assessment.prefer_indoor,
        notes = notes,
        mood = request.preferences.mood_or_default().as_str(),
        budget = request.preferences.budget_or_default().as_str(),
        place = request.preferences.place_or_default().as_str(),
        min_items = MIN_ITEMS,
        max_items = MAX_ITEMS,
        title_min = TITLE_MIN_CHARS,
        title_max = TITLE_MAX_CHARS,
        reason_min = REASON_MIN_CHARS,
        reason_max = REASON_MAX_CHARS,
    )
}

/// Strict decode of the model output into recommendations. Fails closed:
/// anything that does not parse as the declared shape is an error, never a
/// partial result.
fn parse_payload(raw: &str) -> Result<Vec<Recommendation>> {
    // Clean JSON response (remove code blocks if present)
    let cleaned = raw.trim();
    let cleaned = cleaned.strip_prefix("```json").unwrap_or(cleaned);
    let cleaned = cleaned.strip_prefix("```").unwrap_or(cleaned);
    let cleaned = cleaned.strip_suffix("```").unwrap_or(cleaned).trim();

    let payload: ModelPayload = serde_json::from_str(cleaned).map_err(|e| {
        EngineError::ModelMalformed(format!("could not parse model response: {e}"))
    })?;

    if payload.recommendations.len() < MIN_ITEMS {
        return Err(EngineError::ModelMalformed(format!(
            "model returned {} recommendations, need at least {MIN_ITEMS}",
            payload.recommendations.len()
        )));
    }

    let mut recommendations = Vec::with_capacity(MAX_ITEMS);
    for item in payload.recommendations.into_iter().take(MAX_ITEMS) {
        // Re-clamp and re-truncate even though the schema already bounds
        // these; providers do not always honor the schema strictly.
        let title = truncate_chars(item.title.trim(), TITLE_MAX_CHARS);
        let reason = truncate_chars(item.reason.trim(), REASON_MAX_CHARS);

        if title.chars().count() < TITLE_MIN_CHARS {
            return Err(EngineError::ModelMalformed(format!(
                "recommendation title {title:?} is shorter than {TITLE_MIN_CHARS} characters"
            )));
        }
        if reason.chars().count() < REASON_MIN_CHARS {
            return Err(EngineError::ModelMalformed(format!(
                "recommendation reason {reason:?} is shorter than {REASON_MIN_CHARS} characters"
            )));
        }

        recommendations.push(Recommendation {
            title,
            reason,
            label: item.label,
            confidence: clamp_confidence(item.confidence),
        });
    }

    Ok(recommendations)
}

#[async_trait]
impl Generator for ModelGenerator {
    fn id(&self) -> &str {
        "model_assisted"
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<Vec<Recommendation>> {
        info!(city = %request.city, model = %self.model, "requesting model-assisted recommendations");

        let agent = self.agent();
        let prompt = build_prompt(request);

        let raw = tokio::time::timeout(COMPLETION_TIMEOUT, agent.chat(prompt.as_str(), vec![]))
            .await
            .map_err(|_| {
                EngineError::ModelUnavailable(format!(
                    "model call exceeded the {}s deadline",
                    COMPLETION_TIMEOUT.as_secs()
                ))
            })?
            .map_err(|e| EngineError::ModelUnavailable(format!("model chat failed: {e}")))?;

        let recommendations = parse_payload(&raw)?;
        info!(
            count = recommendations.len(),
            "model returned a valid recommendation list"
        );
        Ok(recommendations)
    }
}
