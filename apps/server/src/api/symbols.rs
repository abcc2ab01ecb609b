use std::sync::Arc;

use crate::main_lib::AppState;
use axum::{extract::State, routing::get, Json, Router};
use tradechat_market_data::SymbolCatalog;

async fn list_symbols(State(state): State<Arc<AppState>>) -> Json<SymbolCatalog> {
    Json(state.assistant_service.list_symbols())
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/symbols", get(list_symbols))
}
