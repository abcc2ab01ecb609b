use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, State},
    routing::{get, patch},
    Json, Router,
};
use serde_json::{json, Value};
use tradechat_core::{NewTrade, Trade, TradeUpdate};

async fn list_trades(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Trade>>> {
    let trades = state.trade_service.list_trades()?;
    Ok(Json(trades))
}

async fn create_trade(
    State(state): State<Arc<AppState>>,
    Json(trade): Json<NewTrade>,
) -> ApiResult<Json<Trade>> {
    let created = state.trade_service.create_trade(trade).await?;
    Ok(Json(created))
}

async fn update_trade(
    Path(id): Path<i64>,
    State(state): State<Arc<AppState>>,
    Json(update): Json<TradeUpdate>,
) -> ApiResult<Json<Trade>> {
    let updated = state.trade_service.update_trade(id, update).await?;
    Ok(Json(updated))
}

async fn delete_trade(
    Path(id): Path<i64>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Value>> {
    state.trade_service.delete_trade(id).await?;
    Ok(Json(json!({ "ok": true })))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/trades", get(list_trades).post(create_trade))
        .route("/trades/{id}", patch(update_trade).delete(delete_trade))
}
