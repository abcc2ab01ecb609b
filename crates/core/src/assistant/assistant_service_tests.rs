#[cfg(test)]
mod tests {
    use crate::assistant::{AssistantService, AssistantServiceTrait};
    use crate::trades::testing::InMemoryTradeRepository;
    use crate::trades::{
        NewTrade, TradeRepositoryTrait, TradeService, TradeServiceTrait, TradeSide, TradeStatus,
        TradeUpdate,
    };
    use crate::Error;
    use async_trait::async_trait;
    use proptest::prelude::*;
    use serde_json::json;
    use std::sync::{Arc, Mutex};
    use tradechat_market_data::{CandidateTable, MarketDataError, MarketDataProvider, Quote};

    // --- Mock provider ---
    struct MockPriceProvider {
        quote: Option<Quote>,
        calls: Mutex<Vec<String>>,
    }

    impl MockPriceProvider {
        fn answering(quote: Quote) -> Self {
            Self {
                quote: Some(quote),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                quote: None,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl MarketDataProvider for MockPriceProvider {
        fn id(&self) -> &'static str {
            "TEST"
        }

        async fn get_price(&self, symbol: &str) -> Result<Quote, MarketDataError> {
            self.calls.lock().unwrap().push(symbol.to_string());
            self.quote
                .clone()
                .ok_or_else(|| MarketDataError::SymbolNotResolvable {
                    symbol: symbol.to_string(),
                    message: "Provider error: TEST - offline".to_string(),
                })
        }
    }

    struct Fixture {
        assistant: AssistantService,
        trades: Arc<TradeService>,
        provider: Arc<MockPriceProvider>,
    }

    fn fixture(provider: MockPriceProvider) -> Fixture {
        let provider = Arc::new(provider);
        let repo: Arc<dyn TradeRepositoryTrait> = Arc::new(InMemoryTradeRepository::default());
        let trades = Arc::new(TradeService::new(repo));
        let assistant = AssistantService::new(
            provider.clone(),
            trades.clone(),
            Arc::new(CandidateTable::default()),
        );
        Fixture {
            assistant,
            trades,
            provider,
        }
    }

    fn fez_quote() -> Quote {
        Quote::new("SX5E", "FEZ", 4210.5, Some("USD".to_string())).with_note("ETF proxy")
    }

    async fn add(trades: &TradeService, symbol: &str) -> i64 {
        trades
            .create_trade(NewTrade {
                symbol: symbol.to_string(),
                side: TradeSide::Buy,
                quantity: 1.0,
                price: 1.0,
                note: None,
            })
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_price_answer() {
        let f = fixture(MockPriceProvider::answering(fez_quote()));
        let response = f.assistant.ask("price of sx5e").await.unwrap();

        assert_eq!(response.intent, "price");
        assert_eq!(response.answer, "SX5E is 4210.50 USD (provider: FEZ).");
        assert_eq!(
            response.data,
            json!({
                "symbol": "SX5E",
                "price": 4210.5,
                "currency": "USD",
                "provider_symbol": "FEZ",
                "note": "ETF proxy",
            })
        );
        assert_eq!(*f.provider.calls.lock().unwrap(), vec!["SX5E".to_string()]);
    }

    #[tokio::test]
    async fn test_price_answer_without_currency() {
        let quote = Quote::new("DAX", "^GDAXI", 18000.0, None);
        let f = fixture(MockPriceProvider::answering(quote));
        let response = f.assistant.ask("what is the level of DAX?").await.unwrap();

        assert_eq!(response.answer, "DAX is 18000.00 (provider: ^GDAXI).");
        assert_eq!(response.data["currency"], json!(null));
    }

    #[tokio::test]
    async fn test_price_failure_surfaces_market_data_error() {
        let f = fixture(MockPriceProvider::failing());
        let err = f.assistant.ask("price of NOPE").await.unwrap_err();

        match err {
            Error::MarketData(e) => assert!(e.to_string().contains("offline")),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_add_trade_creates_open_trade() {
        let f = fixture(MockPriceProvider::failing());
        let response = f.assistant.ask("buy 10 SX5E @ 4200").await.unwrap();

        assert_eq!(response.intent, "add_trade");
        assert_eq!(response.answer, "Added trade #1: buy 10.0 SX5E @ 4200.0");
        assert_eq!(response.data["status"], json!("open"));
        assert_eq!(response.data["side"], json!("buy"));

        let stored = f.trades.list_trades().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].symbol, "SX5E");
        assert_eq!(stored[0].quantity, 10.0);
        assert_eq!(stored[0].price, 4200.0);
        // Trades never touch the price provider
        assert!(f.provider.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_mark_executed() {
        let f = fixture(MockPriceProvider::failing());
        let id = add(&f.trades, "DAX").await;

        let response = f
            .assistant
            .ask(&format!("mark trade {} executed", id))
            .await
            .unwrap();

        assert_eq!(response.answer, format!("Trade #{} marked executed.", id));
        assert_eq!(response.data["status"], json!("executed"));
    }

    #[tokio::test]
    async fn test_mark_unknown_trade_is_not_found() {
        let f = fixture(MockPriceProvider::failing());
        let err = f.assistant.ask("mark trade 3 executed").await.unwrap_err();
        assert!(err.is_trade_not_found());
    }

    #[tokio::test]
    async fn test_cancel_trade() {
        let f = fixture(MockPriceProvider::failing());
        let id = add(&f.trades, "CAC").await;

        let response = f.assistant.ask(&format!("cancel trade {}", id)).await.unwrap();
        assert_eq!(response.answer, format!("Trade #{} removed.", id));
        assert_eq!(response.data, json!({ "id": id }));
        assert!(f.trades.list_trades().unwrap().is_empty());

        let err = f.assistant.ask(&format!("cancel trade {}", id)).await.unwrap_err();
        assert!(err.is_trade_not_found());
    }

    #[tokio::test]
    async fn test_list_hides_only_executed() {
        let f = fixture(MockPriceProvider::failing());
        let executed = add(&f.trades, "DAX").await;
        let canceled = add(&f.trades, "CAC").await;
        let open = add(&f.trades, "SMI").await;
        f.trades.mark_executed(executed).await.unwrap();
        f.trades
            .update_trade(canceled, TradeUpdate::status(TradeStatus::Canceled))
            .await
            .unwrap();

        let response = f.assistant.ask("show open trades").await.unwrap();

        assert_eq!(response.intent, "list_trades");
        assert_eq!(response.answer, "2 open trades.");
        let ids: Vec<i64> = response
            .data
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![open, canceled]);
    }

    #[tokio::test]
    async fn test_unknown_returns_help() {
        let f = fixture(MockPriceProvider::failing());
        let response = f.assistant.ask("tell me a joke").await.unwrap();

        assert_eq!(response.intent, "unknown");
        assert!(response.answer.starts_with("Sorry, I couldn't infer your request."));
        assert_eq!(response.data, json!({}));
    }

    #[test]
    fn test_list_symbols() {
        let f = fixture(MockPriceProvider::failing());
        let catalog = f.assistant.list_symbols();

        let mut sorted = catalog.supported.clone();
        sorted.sort();
        assert_eq!(catalog.supported, sorted);
        assert_eq!(
            catalog.mapping["SX5E"],
            vec!["^STOXX50E", "^STOXX50", "FEZ", "EZU"]
        );
    }

    fn status_strategy() -> impl Strategy<Value = TradeStatus> {
        prop_oneof![
            Just(TradeStatus::Open),
            Just(TradeStatus::Executed),
            Just(TradeStatus::Canceled),
        ]
    }

    proptest! {
        #[test]
        fn prop_list_never_contains_executed(statuses in prop::collection::vec(status_strategy(), 0..12)) {
            let runtime = tokio::runtime::Runtime::new().unwrap();
            let (count, listed) = runtime.block_on(async {
                let f = fixture(MockPriceProvider::failing());
                for status in &statuses {
                    let id = add(&f.trades, "SX5E").await;
                    f.trades
                        .update_trade(id, TradeUpdate::status(*status))
                        .await
                        .unwrap();
                }
                let response = f.assistant.ask("list trades").await.unwrap();
                (
                    statuses.iter().filter(|s| **s != TradeStatus::Executed).count(),
                    response.data.as_array().unwrap().clone(),
                )
            });

            prop_assert_eq!(listed.len(), count);
            prop_assert!(listed.iter().all(|t| t["status"] != json!("executed")));
        }
    }
}
