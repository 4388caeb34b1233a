use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::error::{EngineError, Result};
use crate::rules::WeatherAssessment;
use crate::types::{Preferences, Recommendation};
use crate::weather::WeatherSnapshot;

/// Everything a strategy needs to produce a ranked list for one request.
/// Built fresh per request; the assessment is computed once and shared so
/// both strategies see the same weather signal.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub city: String,
    pub snapshot: WeatherSnapshot,
    pub preferences: Preferences,
    pub assessment: WeatherAssessment,
}

/// Core trait implemented by every recommendation strategy
#[async_trait]
pub trait Generator: Send + Sync {
    /// Short identifier used in logs
    fn id(&self) -> &str;

    async fn generate(&self, request: &GenerationRequest) -> Result<Vec<Recommendation>>;
}

/// Ordered list of strategies; the first one to succeed wins.
///
/// Failures are absorbed and logged, never retried: falling through to the
/// next strategy is a one-shot substitution. The shipped configuration ends
/// with the infallible rule-based fallback, so the chain always answers.
pub struct StrategyChain {
    generators: Vec<Arc<dyn Generator>>,
}

impl StrategyChain {
    pub fn new(generators: Vec<Arc<dyn Generator>>) -> Self {
        Self { generators }
    }

    pub async fn run(&self, request: &GenerationRequest) -> Result<Vec<Recommendation>> {
        for generator in &self.generators {
            match generator.generate(request).await {
                Ok(recommendations) => {
                    info!(
                        strategy = generator.id(),
                        count = recommendations.len(),
                        "strategy produced recommendations"
                    );
                    return Ok(recommendations);
                }
                Err(err) => {
                    warn!(
                        strategy = generator.id(),
                        error = %err,
                        "strategy failed, trying the next one"
                    );
                }
            }
        }

        Err(EngineError::NoStrategySucceeded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules;
    use crate::types::Label;

    fn request() -> GenerationRequest {
        let snapshot = WeatherSnapshot {
            provider: "openweather".to_string(),
            city: "Testville".to_string(),
            temp_c: 20.0,
            wind_mps: 3.0,
            condition: "clear sky".to_string(),
            is_rainy: false,
        };
        GenerationRequest {
            city: "Testville".to_string(),
            assessment: rules::assess(&snapshot),
            snapshot,
            preferences: Preferences::default(),
        }
    }

    struct FailingGenerator;

    #[async_trait]
    impl Generator for FailingGenerator {
        fn id(&self) -> &str {
            "failing"
        }

        async fn generate(&self, _request: &GenerationRequest) -> Result<Vec<Recommendation>> {
            Err(EngineError::ModelUnavailable("boom".to_string()))
        }
    }

    struct CannedGenerator {
        title: &'static str,
    }

    #[async_trait]
    impl Generator for CannedGenerator {
        fn id(&self) -> &str {
            "canned"
        }

        async fn generate(&self, _request: &GenerationRequest) -> Result<Vec<Recommendation>> {
            Ok(vec![Recommendation {
                title: self.title.to_string(),
                reason: "a canned reason for tests".to_string(),
                label: Label::Indoor,
                confidence: 50,
            }])
        }
    }

    #[tokio::test]
    async fn first_success_wins() {
        let chain = StrategyChain::new(vec![
            Arc::new(CannedGenerator { title: "first" }),
            Arc::new(CannedGenerator { title: "second" }),
        ]);
        let result = chain.run(&request()).await.unwrap();
        assert_eq!(result[0].title, "first");
    }

    #[tokio::test]
    async fn failure_falls_through_to_the_next_strategy() {
        let chain = StrategyChain::new(vec![
            Arc::new(FailingGenerator),
            Arc::new(CannedGenerator { title: "backup" }),
        ]);
        let result = chain.run(&request()).await.unwrap();
        assert_eq!(result[0].title, "backup");
    }

    #[tokio::test]
    async fn exhausted_chain_reports_no_strategy() {
        let chain = StrategyChain::new(vec![Arc::new(FailingGenerator)]);
        let err = chain.run(&request()).await.unwrap_err();
        assert!(matches!(err, EngineError::NoStrategySucceeded));
    }
}
