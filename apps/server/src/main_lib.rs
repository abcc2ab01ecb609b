use std::sync::Arc;

use crate::config::Config;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};
use tradechat_core::{
    AssistantService, AssistantServiceTrait, TradeService, TradeServiceTrait,
};
use tradechat_market_data::{get_provider, CandidateTable, TtlCache};
use tradechat_storage_sqlite::{
    db::{self, write_actor},
    trades::TradeRepository,
};

pub struct AppState {
    pub assistant_service: Arc<dyn AssistantServiceTrait>,
    pub trade_service: Arc<dyn TradeServiceTrait>,
}

pub fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if config.log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = write_actor::spawn_writer((*pool).clone());

    // One cache and one provider for the life of the process
    let quote_cache = Arc::new(TtlCache::new(config.quote_ttl));
    let candidates = Arc::new(CandidateTable::default());
    let provider = get_provider(&config.provider_settings(), quote_cache, candidates.clone())?;

    let trade_repository = Arc::new(TradeRepository::new(pool.clone(), writer.clone()));
    let trade_service: Arc<dyn TradeServiceTrait> =
        Arc::new(TradeService::new(trade_repository));
    let assistant_service: Arc<dyn AssistantServiceTrait> = Arc::new(AssistantService::new(
        provider,
        trade_service.clone(),
        candidates,
    ));

    Ok(Arc::new(AppState {
        assistant_service,
        trade_service,
    }))
}
