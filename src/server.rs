use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::{net::SocketAddr, sync::Arc};
use tracing::{info, warn};

use crate::api::{
    ApiPostRequest, ApiRankRequest, ApiRankResponse, ApiScoreResponse, ApiThreadRequest,
    ApiThreadResponse,
};
use post_score::config::ScorerConfig;
use post_score::{analyze_flow, hook_type, rank_alternatives, score_post, score_thread, ScoreError};

#[derive(Clone)]
struct AppState {
    config: Arc<ScorerConfig>,
}

type ApiError = (StatusCode, String);

pub async fn serve(config: ScorerConfig) -> Result<(), ScoreError> {
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|err| ScoreError::Server(format!("invalid bind address: {}", err)))?;

    let state = AppState {
        config: Arc::new(config),
    };
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|err| ScoreError::Server(format!("failed to bind {}: {}", addr, err)))?;
    info!(%addr, "post-score api listening");

    axum::serve(listener, app)
        .await
        .map_err(|err| ScoreError::Server(err.to_string()))
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/score", post(score_handler))
        .route("/api/thread", post(thread_handler))
        .route("/api/rank", post(rank_handler))
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    StatusCode::OK
}

fn bad_request(err: ScoreError) -> ApiError {
    warn!(%err, "rejected request");
    (StatusCode::BAD_REQUEST, err.to_string())
}

async fn score_handler(
    State(state): State<AppState>,
    Json(request): Json<ApiPostRequest>,
) -> Result<Json<ApiScoreResponse>, ApiError> {
    let input = request.into_input(&state.config).map_err(bad_request)?;
    let result = score_post(&input);
    Ok(Json(ApiScoreResponse {
        hook_type: hook_type(&input.text),
        result,
    }))
}

async fn thread_handler(
    State(state): State<AppState>,
    Json(request): Json<ApiThreadRequest>,
) -> Result<Json<ApiThreadResponse>, ApiError> {
    let posts = request.into_inputs(&state.config).map_err(bad_request)?;
    let texts: Vec<&str> = posts
        .iter()
        .map(|post| post.text.as_str())
        .filter(|text| !text.trim().is_empty())
        .collect();
    let template_flow = analyze_flow(&texts);
    Ok(Json(ApiThreadResponse {
        result: score_thread(&posts),
        template_flow,
    }))
}

async fn rank_handler(
    State(state): State<AppState>,
    Json(request): Json<ApiRankRequest>,
) -> Result<Json<ApiRankResponse>, ApiError> {
    let draft = request.draft.into_input(&state.config).map_err(bad_request)?;
    Ok(Json(ApiRankResponse {
        alternatives: rank_alternatives(&draft, &request.candidates),
    }))
}
