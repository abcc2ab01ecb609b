//! Database models for trades.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use tradechat_core::trades::{NewTrade, Trade, TradeStatus, TradeUpdate};
use tradechat_core::Error;

/// Database model for trades
#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::trades)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TradeDB {
    pub id: i64,
    pub symbol: String,
    pub side: String,
    pub quantity: f64,
    pub price: f64,
    pub status: String,
    pub note: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Database model for creating a new trade
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::trades)]
pub struct NewTradeDB {
    pub symbol: String,
    pub side: String,
    pub quantity: f64,
    pub price: f64,
    pub status: String,
    pub note: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Partial update; `None` fields are left out of the UPDATE statement
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::trades)]
pub struct TradeChangesetDB {
    pub symbol: Option<String>,
    pub side: Option<String>,
    pub quantity: Option<f64>,
    pub price: Option<f64>,
    pub status: Option<String>,
    pub note: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<TradeDB> for Trade {
    type Error = Error;

    fn try_from(db: TradeDB) -> Result<Self, Self::Error> {
        Ok(Self {
            id: db.id,
            symbol: db.symbol,
            side: db.side.parse()?,
            quantity: db.quantity,
            price: db.price,
            status: db.status.parse()?,
            note: db.note,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl NewTradeDB {
    pub fn from_domain(domain: NewTrade, now: NaiveDateTime) -> Self {
        Self {
            symbol: domain.symbol,
            side: domain.side.as_str().to_string(),
            quantity: domain.quantity,
            price: domain.price,
            status: TradeStatus::Open.as_str().to_string(),
            note: domain.note,
            created_at: now,
            updated_at: now,
        }
    }
}

impl TradeChangesetDB {
    pub fn from_domain(domain: TradeUpdate, now: NaiveDateTime) -> Self {
        Self {
            symbol: domain.symbol,
            side: domain.side.map(|s| s.as_str().to_string()),
            quantity: domain.quantity,
            price: domain.price,
            status: domain.status.map(|s| s.as_str().to_string()),
            note: domain.note,
            updated_at: now,
        }
    }
}
