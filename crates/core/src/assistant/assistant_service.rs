use async_trait::async_trait;
use log::debug;
use serde_json::json;
use std::sync::Arc;

use super::assistant_model::AskResponse;
use super::assistant_traits::AssistantServiceTrait;
use super::intent::{parse_intent, Intent};
use crate::errors::Result;
use crate::trades::{NewTrade, TradeServiceTrait};
use tradechat_market_data::{CandidateTable, MarketDataProvider, Quote, SymbolCatalog};

const HELP_ANSWER: &str = "Sorry, I couldn't infer your request. Try: 'price of SX5E', \
'buy 10 SX5E @ 4200', 'mark trade 3 executed'.";

/// Routes a parsed [`Intent`] to the price provider or the trade ledger.
///
/// Never retries: provider retries happen inside the provider.
pub struct AssistantService {
    provider: Arc<dyn MarketDataProvider>,
    trade_service: Arc<dyn TradeServiceTrait>,
    candidates: Arc<CandidateTable>,
}

impl AssistantService {
    pub fn new(
        provider: Arc<dyn MarketDataProvider>,
        trade_service: Arc<dyn TradeServiceTrait>,
        candidates: Arc<CandidateTable>,
    ) -> Self {
        Self {
            provider,
            trade_service,
            candidates,
        }
    }

    async fn answer_price(&self, symbol: &str, name: &str) -> Result<AskResponse> {
        let quote = self.provider.get_price(symbol).await?;
        Ok(AskResponse::new(
            price_sentence(symbol, &quote),
            name,
            json!({
                "symbol": quote.symbol,
                "price": quote.price,
                "currency": quote.currency,
                "provider_symbol": quote.provider_symbol,
                "note": quote.note,
            }),
        ))
    }
}

fn price_sentence(symbol: &str, quote: &Quote) -> String {
    match &quote.currency {
        Some(currency) => format!(
            "{} is {:.2} {} (provider: {}).",
            symbol, quote.price, currency, quote.provider_symbol
        ),
        None => format!(
            "{} is {:.2} (provider: {}).",
            symbol, quote.price, quote.provider_symbol
        ),
    }
}

#[async_trait]
impl AssistantServiceTrait for AssistantService {
    async fn ask(&self, text: &str) -> Result<AskResponse> {
        let intent = parse_intent(text);
        debug!("Parsed intent {:?}", intent);
        let name = intent.name();

        match intent {
            Intent::Price { symbol } => self.answer_price(&symbol, name).await,
            Intent::AddTrade {
                side,
                quantity,
                symbol,
                price,
            } => {
                let trade = self
                    .trade_service
                    .create_trade(NewTrade {
                        symbol,
                        side,
                        quantity,
                        price,
                        note: None,
                    })
                    .await?;
                Ok(AskResponse::new(
                    format!(
                        "Added trade #{}: {} {:?} {} @ {:?}",
                        trade.id, trade.side, trade.quantity, trade.symbol, trade.price
                    ),
                    name,
                    serde_json::to_value(&trade)?,
                ))
            }
            Intent::MarkExecuted { id } => {
                let trade = self.trade_service.mark_executed(id).await?;
                Ok(AskResponse::new(
                    format!("Trade #{} marked executed.", trade.id),
                    name,
                    serde_json::to_value(&trade)?,
                ))
            }
            Intent::CancelTrade { id } => {
                self.trade_service.delete_trade(id).await?;
                Ok(AskResponse::new(
                    format!("Trade #{} removed.", id),
                    name,
                    json!({ "id": id }),
                ))
            }
            Intent::ListTrades => {
                let trades = self.trade_service.list_unexecuted_trades()?;
                Ok(AskResponse::new(
                    format!("{} open trades.", trades.len()),
                    name,
                    serde_json::to_value(&trades)?,
                ))
            }
            Intent::Unknown => Ok(AskResponse::new(HELP_ANSWER, name, json!({}))),
        }
    }

    fn list_symbols(&self) -> SymbolCatalog {
        self.candidates.catalog()
    }
}
