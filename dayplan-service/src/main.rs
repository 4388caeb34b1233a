use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use dayplan_engine::{
    EngineError, FallbackGenerator, Generator, ModelGenerator, OpenWeatherClient, Preferences,
    RecommendResponse, Recommender, StrategyChain,
};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
struct RecommendRequest {
    city: String,
    #[serde(default)]
    preferences: Preferences,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Clone)]
struct AppState {
    recommender: Arc<Recommender>,
}

struct ServiceConfig {
    openweather_api_key: String,
    openrouter_api_key: Option<String>,
    model: Option<String>,
    port: u16,
}

impl ServiceConfig {
    fn from_env() -> anyhow::Result<Self> {
        // The weather credential is load-bearing: without it no request can
        // be served, so its absence is fatal at startup.
        let openweather_api_key = std::env::var("OPENWEATHER_API_KEY")
            .map_err(|_| anyhow::anyhow!("OPENWEATHER_API_KEY environment variable not set"))?;

        let openrouter_api_key = std::env::var("OPENROUTER_API_KEY").ok();
        let model = std::env::var("DAYPLAN_MODEL").ok();

        let port = match std::env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a number, got {raw:?}"))?,
            Err(_) => 3000,
        };

        Ok(Self {
            openweather_api_key,
            openrouter_api_key,
            model,
            port,
        })
    }
}

/// Initialize structured tracing based on environment variables
fn init_tracing() {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "dayplan_service=debug,dayplan_engine=debug,tower_http=debug".into());

    match log_format.as_str() {
        "pretty" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
    }
}

async fn health_check() -> &'static str {
    "OK"
}

fn error_response(err: &EngineError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match err {
        EngineError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        EngineError::WeatherUpstream { .. } => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
}

async fn recommend(
    State(state): State<AppState>,
    Json(request): Json<RecommendRequest>,
) -> Result<Json<RecommendResponse>, (StatusCode, Json<ErrorResponse>)> {
    let request_id = Uuid::new_v4();
    info!(%request_id, city = %request.city, "received recommendation request");

    let response = state
        .recommender
        .recommend(&request.city, request.preferences)
        .await
        .map_err(|e| {
            error!(%request_id, error = %e, "recommendation request failed");
            error_response(&e)
        })?;

    info!(
        %request_id,
        count = response.recommendations.len(),
        "returning recommendations"
    );
    Ok(Json(response))
}

fn build_recommender(config: &ServiceConfig) -> Recommender {
    let weather = Arc::new(OpenWeatherClient::new(config.openweather_api_key.clone()));

    let mut generators: Vec<Arc<dyn Generator>> = Vec::new();
    match &config.openrouter_api_key {
        Some(key) => {
            info!("model credential present, enabling the model-assisted strategy");
            generators.push(Arc::new(ModelGenerator::new(
                key.clone(),
                config.model.clone(),
            )));
        }
        None => {
            warn!("OPENROUTER_API_KEY not set, running with the rule-based fallback only");
        }
    }
    generators.push(Arc::new(FallbackGenerator));

    Recommender::new(weather, StrategyChain::new(generators))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    info!("Starting dayplan service");

    let config = ServiceConfig::from_env()?;
    let state = AppState {
        recommender: Arc::new(build_recommender(&config)),
    };

    let app = Router::new()
        .route("/health", get(health_check))
        .route("/recommend", post(recommend))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        );

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    info!("Server running on http://0.0.0.0:{}", config.port);

    info!("Available endpoints:");
    info!("  GET  /health     - Health check");
    info!("  POST /recommend  - Recommend day activities for a city");
    info!("    Example: POST /recommend with body {{\"city\":\"Istanbul\",\"preferences\":{{\"place\":\"outdoor\"}}}}");

    axum::serve(listener, app).await?;

    Ok(())
}
