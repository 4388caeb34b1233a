pub mod catalog;
pub mod error;
pub mod fallback;
pub mod model;
pub mod rules;
pub mod runner;
pub mod strategy;
pub mod types;
pub mod weather;

// Re-export commonly used types
pub use error::{EngineError, Result};
pub use fallback::FallbackGenerator;
pub use model::{ModelGenerator, DEFAULT_MODEL};
pub use rules::{assess, WeatherAssessment, WeatherFlags};
pub use runner::Recommender;
pub use strategy::{GenerationRequest, Generator, StrategyChain};
pub use types::{
    Budget, Label, Mood, Place, Preferences, Recommendation, RecommendResponse,
};
pub use weather::{OpenWeatherClient, WeatherProvider, WeatherSnapshot};
