use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use tradechat_core::trades::{NewTrade, Trade, TradeError, TradeRepositoryTrait, TradeUpdate};
use tradechat_core::Result;

use super::model::{NewTradeDB, TradeChangesetDB, TradeDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::trades;
use crate::schema::trades::dsl::*;

pub struct TradeRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl TradeRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        TradeRepository { pool, writer }
    }
}

fn find_trade(conn: &mut SqliteConnection, trade_id: i64) -> Result<Option<TradeDB>> {
    Ok(trades
        .find(trade_id)
        .select(TradeDB::as_select())
        .first::<TradeDB>(conn)
        .optional()
        .map_err(StorageError::from)?)
}

#[async_trait]
impl TradeRepositoryTrait for TradeRepository {
    fn list(&self) -> Result<Vec<Trade>> {
        let mut conn = get_connection(&self.pool)?;
        let trades_db = trades
            .select(TradeDB::as_select())
            .order((created_at.desc(), id.desc()))
            .load::<TradeDB>(&mut conn)
            .map_err(StorageError::from)?;
        trades_db.into_iter().map(Trade::try_from).collect()
    }

    async fn create(&self, new_trade: NewTrade) -> Result<Trade> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Trade> {
                let new_trade_db = NewTradeDB::from_domain(new_trade, Utc::now().naive_utc());
                let result_db = diesel::insert_into(trades::table)
                    .values(&new_trade_db)
                    .returning(TradeDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Trade::try_from(result_db)
            })
            .await
    }

    async fn update(&self, trade_id: i64, update: TradeUpdate) -> Result<Trade> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Trade> {
                if find_trade(conn, trade_id)?.is_none() {
                    return Err(TradeError::NotFound(trade_id).into());
                }

                let changeset = TradeChangesetDB::from_domain(update, Utc::now().naive_utc());
                let result_db = diesel::update(trades.find(trade_id))
                    .set(&changeset)
                    .returning(TradeDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Trade::try_from(result_db)
            })
            .await
    }

    async fn delete(&self, trade_id: i64) -> Result<()> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                let deleted = diesel::delete(trades.find(trade_id))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                if deleted == 0 {
                    return Err(TradeError::NotFound(trade_id).into());
                }
                Ok(())
            })
            .await
    }
}
