use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;
use tradechat_core::AskResponse;

#[derive(Deserialize)]
struct AskRequest {
    message: String,
}

async fn ask(
    State(state): State<Arc<AppState>>,
    Json(body): Json<AskRequest>,
) -> ApiResult<Json<AskResponse>> {
    let response = state.assistant_service.ask(&body.message).await?;
    Ok(Json(response))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/ask", post(ask))
}
