use std::sync::Arc;

use tracing::info;

use crate::error::{EngineError, Result};
use crate::rules;
use crate::strategy::{GenerationRequest, StrategyChain};
use crate::types::{Preferences, RecommendResponse};
use crate::weather::WeatherProvider;

/// Entry point bundling the weather collaborator and the strategy chain.
///
/// One call handles one request: validate, fetch weather, assess once,
/// run the chain, assemble. No state survives the call.
pub struct Recommender {
    weather: Arc<dyn WeatherProvider>,
    chain: StrategyChain,
}

impl Recommender {
    pub fn new(weather: Arc<dyn WeatherProvider>, chain: StrategyChain) -> Self {
        Self { weather, chain }
    }

    /// Produce a full response for one city. Generation-tier failures are
    /// absorbed inside the chain; only request and weather errors escape.
    pub async fn recommend(
        &self,
        city: &str,
        preferences: Preferences,
    ) -> Result<RecommendResponse> {
        let city = city.trim();
        if city.is_empty() {
            return Err(EngineError::InvalidRequest(
                "city must not be empty".to_string(),
            ));
        }

        // A weather failure is terminal: every downstream decision depends
        // on a correct snapshot, so it is never silently defaulted.
        let snapshot = self.weather.fetch(city).await?;
        info!(
            city = %snapshot.city,
            temp_c = snapshot.temp_c,
            wind_mps = snapshot.wind_mps,
            is_rainy = snapshot.is_rainy,
            "weather snapshot fetched"
        );

        let assessment = rules::assess(&snapshot);
        let request = GenerationRequest {
            city: city.to_string(),
            snapshot: snapshot.clone(),
            preferences,
            assessment,
        };

        let recommendations = self.chain.run(&request).await?;

        Ok(RecommendResponse {
            city: city.to_string(),
            weather: snapshot,
            recommendations,
        })
    }
}
